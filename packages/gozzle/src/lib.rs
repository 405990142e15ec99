// Copyright (C) 2023 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod http;
pub mod response;
pub mod setup;

pub use config::{BasicAuth, RequestConfig};
pub use error::{ConfigError, DispatchError};
pub use crate::http::{send, send_async, PreparedRequest};
pub use response::ResponseEnvelope;
