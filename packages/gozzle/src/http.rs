// Copyright (C) 2023 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Single-shot dispatch of a [`RequestConfig`].
//!
//! Every call normalizes the config, builds one request, runs it through a
//! fresh client and buffers the whole response. Nothing is retried and no
//! state survives between calls.

use bytes::Bytes;
use reqwest::{header::HeaderMap, Result as ReqwestResult, StatusCode};
use std::time::Instant;

pub use client::ClientConfig;
pub use request::{prepare, PreparedRequest};

use crate::config::RequestConfig;
use crate::error::DispatchError;
use crate::response::ResponseEnvelope;

mod client;
mod request;

/// Dispatches `config` and blocks until the response body is read.
///
/// Must not be called from within an async runtime, use [`send_async`] there.
pub fn send(config: RequestConfig) -> Result<ResponseEnvelope, DispatchError> {
    let (config, request, client_cfg) = begin(config)?;
    let client = client::build_blocking(&client_cfg).map_err(DispatchError::Transport)?;

    let now = Instant::now();
    let response = request
        .to_blocking_builder(&client)
        .send()
        .map_err(DispatchError::from_send)?;
    let status = response.status();
    let headers = response.headers().to_owned();
    finish(status, headers, response.bytes(), config, request, now)
}

/// Same pipeline as [`send`] on the async client.
pub async fn send_async(config: RequestConfig) -> Result<ResponseEnvelope, DispatchError> {
    let (config, request, client_cfg) = begin(config)?;
    let client = client::build(&client_cfg).map_err(DispatchError::Transport)?;

    let now = Instant::now();
    let response = request
        .to_builder(&client)
        .send()
        .await
        .map_err(DispatchError::from_send)?;
    let status = response.status();
    let headers = response.headers().to_owned();
    finish(status, headers, response.bytes().await, config, request, now)
}

fn begin(
    mut config: RequestConfig,
) -> Result<(RequestConfig, PreparedRequest, ClientConfig), DispatchError> {
    config.validate()?;
    let request = prepare(&config)?;
    let client_cfg = ClientConfig::from(&config);
    log::debug!("{} {}", request.method, request.url);
    Ok((config, request, client_cfg))
}

fn finish(
    status: StatusCode,
    headers: HeaderMap,
    raw_body: ReqwestResult<Bytes>,
    config: RequestConfig,
    request: PreparedRequest,
    started: Instant,
) -> Result<ResponseEnvelope, DispatchError> {
    let raw_body = raw_body.map_err(DispatchError::BodyRead)?;
    let elapsed = started.elapsed();
    log::info!("{} {} -> {}", request.method, request.url, status);

    Ok(ResponseEnvelope::new(
        status, headers, raw_body, config, request, elapsed,
    ))
}
