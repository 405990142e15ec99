// Copyright (C) 2023 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

pub const VERSION: &str = "0.1.0";

pub const DEFAULT_USER_AGENT: &str = "gozzle-client-v1.0";
pub const DEFAULT_CONTENT_TYPE: &str = "application/json; charset=utf-8";
pub const DEFAULT_TIMEOUT: u64 = 5;
pub const DEFAULT_MAX_REDIRECTS: usize = 5;
// Upper bound for the client timeout, one day.
pub const MAX_TIMEOUT: u64 = 24 * 60 * 60;

pub const ACCEPT_JSON: &str = "application/json";
pub const MULTIPART: &str = "multipart/form-data";
// Non-standard spelling, sent as is.
pub const URL_ENCODED: &str = "application/x-www-form-url-encoded";

use lazy_static::lazy_static;
use std::path::PathBuf;

pub mod log {
    use flexi_logger::{Cleanup, Criterion, Naming};
    pub const FILE_MAX_SIZE: Criterion = Criterion::Size(500000);
    pub const FILE_NAMING: Naming = Naming::Numbers;
    pub const FILE_CLEANUP: Cleanup = Cleanup::KeepLogFiles(5);
    pub const FILE_BASENAME: &str = "gozzle";
}

pub mod environment {
    pub const LOG_DIR_ENV_VAR: &str = "GOZZLE_LOGDIR";
}

lazy_static! {
    pub static ref ENV_LOG_DIR: Option<PathBuf> = std::env::var(environment::LOG_DIR_ENV_VAR)
        .ok()
        .map(PathBuf::from);
}
