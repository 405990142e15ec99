// Copyright (C) 2023 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

use reqwest::{
    redirect::{Action, Attempt, Policy},
    Result as ReqwestResult,
};
use std::time::Duration;

use crate::config::RequestConfig;
use crate::constants::MAX_TIMEOUT;

pub struct ClientConfig {
    pub timeout: Duration,
    pub max_redirects: usize,
}

impl From<&RequestConfig> for ClientConfig {
    fn from(cfg: &RequestConfig) -> Self {
        Self {
            timeout: Duration::from_secs(cfg.timeout_seconds.min(MAX_TIMEOUT)),
            max_redirects: cfg.max_redirects,
        }
    }
}

pub fn build(cfg: &ClientConfig) -> ReqwestResult<reqwest::Client> {
    reqwest::Client::builder()
        .redirect(get_policy(cfg.max_redirects))
        .timeout(cfg.timeout)
        .build()
}

pub fn build_blocking(cfg: &ClientConfig) -> ReqwestResult<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .redirect(get_policy(cfg.max_redirects))
        .timeout(cfg.timeout)
        .build()
}

fn get_policy(max_redirects: usize) -> Policy {
    Policy::custom(move |att| policy_capped(att, max_redirects))
}

fn policy_capped(attempt: Attempt, max_redirects: usize) -> Action {
    if exceeds_cap(attempt.previous().len(), max_redirects) {
        return attempt.error("too many redirects");
    }
    attempt.follow()
}

// `previous` holds every URL requested so far, including the first one.
fn exceeds_cap(previous: usize, max_redirects: usize) -> bool {
    previous > max_redirects
}
