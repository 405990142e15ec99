// Copyright (C) 2023 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Request configuration and its normalization.
//!
//! A [`RequestConfig`] describes one request declaratively. Before it is
//! dispatched it is normalized: defaults are filled in, derived fields are
//! computed and conflicting settings are rejected. Normalization happens in
//! place through [`RequestConfig::validate`]; callers sharing one instance
//! across threads should use [`RequestConfig::normalized`] on a clone instead.

use anyhow::Result as AnyhowResult;
use http::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs::read_to_string;
use std::path::Path;
use typed_builder::TypedBuilder;

use crate::constants::{
    ACCEPT_JSON, DEFAULT_CONTENT_TYPE, DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT,
    DEFAULT_USER_AGENT, MULTIPART, URL_ENCODED,
};
use crate::error::ConfigError;

pub type Body = Map<String, Value>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

impl BasicAuth {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[builder(field_defaults(default, setter(into)))]
#[serde(default)]
pub struct RequestConfig {
    pub url: String,
    /// Any standard verb, case-insensitive. Empty means GET.
    pub method: String,
    #[builder(setter(strip_option))]
    pub base_url: Option<String>,
    pub basic_auth: Option<BasicAuth>,
    #[builder(setter(strip_option))]
    pub bearer_token: Option<String>,
    /// Applied last, so these win over every header derived from other fields.
    pub headers: BTreeMap<String, String>,
    pub timeout_seconds: u64,
    /// Sent as JSON. Not allowed together with GET.
    pub body: Option<Body>,
    pub user_agent: String,
    pub accept_json: bool,
    pub accepts: String,
    pub as_multipart: bool,
    pub as_url_encoded: bool,
    pub content_type: String,
    pub max_redirects: usize,
}

impl RequestConfig {
    pub fn from_file(path: &Path) -> AnyhowResult<RequestConfig> {
        Ok(serde_json::from_str(&read_to_string(path)?)?)
    }

    /// Fills in defaults and validates, mutating `self`.
    ///
    /// Stops at the first violation. Defaults applied before the failing rule
    /// stay applied. A non-empty `content_type` is always replaced by the
    /// default JSON content type; only `as_url_encoded` and `as_multipart`
    /// select anything else, and multipart wins when both are set.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        self.accept_json = true;

        if self.user_agent.is_empty() {
            self.user_agent = DEFAULT_USER_AGENT.to_string();
        }

        if self.timeout_seconds == 0 {
            self.timeout_seconds = DEFAULT_TIMEOUT;
        }

        if self.max_redirects == 0 {
            self.max_redirects = DEFAULT_MAX_REDIRECTS;
        }

        if self.has_bearer_token() && self.basic_auth.is_some() {
            return Err(ConfigError::ConflictingAuth);
        }

        // Exact comparison, "get" passes.
        if self.body.is_some() && self.method == Method::GET.as_str() {
            return Err(ConfigError::BodyNotAllowed);
        }

        if self.accept_json {
            self.accepts = ACCEPT_JSON.to_string();
        }

        if !self.content_type.is_empty() {
            self.content_type = DEFAULT_CONTENT_TYPE.to_string();
        }

        if self.as_url_encoded {
            self.content_type = URL_ENCODED.to_string();
        }

        if self.as_multipart {
            self.content_type = MULTIPART.to_string();
        }

        if let Some(base_url) = self.base_url.as_mut().filter(|b| !b.is_empty()) {
            *base_url = base_url.trim_matches('/').to_string();
        }

        log::debug!(
            "Normalized config: timeout={}s, max_redirects={}, content_type={:?}",
            self.timeout_seconds,
            self.max_redirects,
            self.content_type
        );
        Ok(())
    }

    /// Same rules as [`RequestConfig::validate`], returning the normalized value.
    pub fn normalized(mut self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self)
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.bearer_token.as_deref().filter(|t| !t.is_empty())
    }

    fn has_bearer_token(&self) -> bool {
        self.bearer_token().is_some()
    }

    /// `winner` takes precedence field by field; header maps are merged.
    pub fn merge_two_configs(loser: RequestConfig, winner: RequestConfig) -> RequestConfig {
        let mut headers = loser.headers;
        headers.extend(winner.headers);

        RequestConfig {
            url: or_non_empty(winner.url, loser.url),
            method: or_non_empty(winner.method, loser.method),
            base_url: winner.base_url.or(loser.base_url),
            basic_auth: winner.basic_auth.or(loser.basic_auth),
            bearer_token: winner.bearer_token.or(loser.bearer_token),
            headers,
            timeout_seconds: or_non_zero(winner.timeout_seconds, loser.timeout_seconds),
            body: winner.body.or(loser.body),
            user_agent: or_non_empty(winner.user_agent, loser.user_agent),
            accept_json: winner.accept_json || loser.accept_json,
            accepts: or_non_empty(winner.accepts, loser.accepts),
            as_multipart: winner.as_multipart || loser.as_multipart,
            as_url_encoded: winner.as_url_encoded || loser.as_url_encoded,
            content_type: or_non_empty(winner.content_type, loser.content_type),
            max_redirects: or_non_zero(winner.max_redirects, loser.max_redirects),
        }
    }
}

fn or_non_empty(winner: String, loser: String) -> String {
    if winner.is_empty() {
        loser
    } else {
        winner
    }
}

fn or_non_zero<T: Default + PartialEq>(winner: T, loser: T) -> T {
    if winner == T::default() {
        loser
    } else {
        winner
    }
}
