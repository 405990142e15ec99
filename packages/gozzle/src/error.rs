// Copyright (C) 2023 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

use thiserror::Error;

/// Rejections raised while normalizing a [`crate::config::RequestConfig`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("cannot authenticate with bearer and basic auth")]
    ConflictingAuth,

    #[error("body not allowed for 'GET' method")]
    BodyNotAllowed,
}

/// Everything that can abort a dispatch. No variant carries a partial response.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to encode request body as JSON: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("error building the request: {0}")]
    RequestConstruction(String),

    #[error("too many redirects: {0}")]
    TooManyRedirects(#[source] reqwest::Error),

    #[error("error while sending request: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("error while reading response body: {0}")]
    BodyRead(#[source] reqwest::Error),
}

impl DispatchError {
    pub(crate) fn from_send(err: reqwest::Error) -> Self {
        if err.is_redirect() {
            log::warn!("Redirect policy aborted the request: {}", err);
            Self::TooManyRedirects(err)
        } else {
            Self::Transport(err)
        }
    }
}
