// Copyright (C) 2023 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

use base64::{engine::general_purpose::STANDARD, Engine};
use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use reqwest::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT},
    Url,
};

use crate::config::{BasicAuth, RequestConfig};
use crate::error::DispatchError;

/// The request exactly as it goes on the wire, independent of the client
/// flavour that executes it.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
}

impl PreparedRequest {
    pub(crate) fn to_builder(&self, client: &reqwest::Client) -> reqwest::RequestBuilder {
        let builder = client
            .request(self.method.clone(), self.url.clone())
            .headers(self.headers.clone());
        match &self.body {
            Some(body) => builder.body(body.clone()),
            None => builder,
        }
    }

    pub(crate) fn to_blocking_builder(
        &self,
        client: &reqwest::blocking::Client,
    ) -> reqwest::blocking::RequestBuilder {
        let builder = client
            .request(self.method.clone(), self.url.clone())
            .headers(self.headers.clone());
        match &self.body {
            Some(body) => builder.body(body.clone()),
            None => builder,
        }
    }
}

/// Builds the request for an already normalized config.
pub fn prepare(cfg: &RequestConfig) -> Result<PreparedRequest, DispatchError> {
    let body = match &cfg.body {
        Some(body) => Some(Bytes::from(
            serde_json::to_vec(body).map_err(DispatchError::Serialization)?,
        )),
        None => None,
    };

    let method = parse_method(&cfg.method)?;
    let url = Url::parse(&cfg.url).map_err(|e| {
        DispatchError::RequestConstruction(format!("invalid url {:?}: {}", cfg.url, e))
    })?;

    let mut headers = HeaderMap::new();
    if body.is_some() && !cfg.content_type.is_empty() {
        headers.insert(CONTENT_TYPE, header_value(&cfg.content_type)?);
    }

    if let Some(auth) = &cfg.basic_auth {
        headers.insert(AUTHORIZATION, basic_auth_value(auth)?);
    } else if let Some(token) = cfg.bearer_token() {
        headers.insert(AUTHORIZATION, sensitive(format!("Bearer {}", token))?);
    }

    headers.insert(ACCEPT, header_value(&cfg.accepts)?);
    headers.insert(USER_AGENT, header_value(&cfg.user_agent)?);

    // caller headers replace anything set above
    for (name, value) in &cfg.headers {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            DispatchError::RequestConstruction(format!("invalid header name {:?}: {}", name, e))
        })?;
        headers.insert(name, header_value(value)?);
    }

    Ok(PreparedRequest {
        method,
        url,
        headers,
        body,
    })
}

fn parse_method(method: &str) -> Result<Method, DispatchError> {
    if method.is_empty() {
        return Ok(Method::GET);
    }
    Method::from_bytes(method.to_uppercase().as_bytes()).map_err(|e| {
        DispatchError::RequestConstruction(format!("invalid method {:?}: {}", method, e))
    })
}

// Opaque bytes are allowed, control characters are not.
fn header_value(value: &str) -> Result<HeaderValue, DispatchError> {
    HeaderValue::from_bytes(value.as_bytes()).map_err(|e| {
        DispatchError::RequestConstruction(format!("invalid header value {:?}: {}", value, e))
    })
}

fn sensitive(value: String) -> Result<HeaderValue, DispatchError> {
    let mut value = HeaderValue::from_bytes(value.as_bytes()).map_err(|e| {
        DispatchError::RequestConstruction(format!("invalid credentials: {}", e))
    })?;
    value.set_sensitive(true);
    Ok(value)
}

fn basic_auth_value(auth: &BasicAuth) -> Result<HeaderValue, DispatchError> {
    let credentials = STANDARD.encode(format!("{}:{}", auth.username, auth.password));
    sensitive(format!("Basic {}", credentials))
}
