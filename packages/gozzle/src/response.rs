// Copyright (C) 2023 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Fully buffered result of one dispatch.
//!
//! The body is kept as raw bytes and never decoded here. `status_text` is the
//! canonical reason phrase of `status_code`, empty for codes that have none.

use bytes::Bytes;
use http::HeaderMap;
use reqwest::StatusCode;
use std::time::Duration;

use crate::config::RequestConfig;
use crate::http::PreparedRequest;

#[derive(Debug)]
pub struct ResponseEnvelope {
    pub raw_body: Bytes,
    pub status_code: u16,
    pub status_text: String,
    /// Response headers as received, case-insensitive.
    pub headers: HeaderMap,
    /// The normalized config that produced this response.
    pub config: RequestConfig,
    /// The request that was sent.
    pub request: PreparedRequest,
    /// Round trip including the body read.
    pub elapsed: Duration,
}

impl ResponseEnvelope {
    pub fn new(
        status: StatusCode,
        headers: HeaderMap,
        raw_body: Bytes,
        config: RequestConfig,
        request: PreparedRequest,
        elapsed: Duration,
    ) -> Self {
        Self {
            raw_body,
            status_code: status.as_u16(),
            status_text: status_text(status),
            headers,
            config,
            request,
            elapsed,
        }
    }
}

pub fn status_text(status: StatusCode) -> String {
    status.canonical_reason().unwrap_or_default().to_string()
}
