// Copyright (C) 2023 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

use clap::{ArgAction, Parser};
use serde_json::Value;
use std::path::PathBuf;

use crate::config::{BasicAuth, Body, RequestConfig};
use crate::constants;

#[derive(Parser, Debug)]
#[command(about = "Builds and sends a single HTTP request.", version = constants::VERSION)]
pub struct Cli {
    /// URL to request
    #[arg(short, long, required_unless_present = "config_file")]
    pub url: Option<String>,

    /// HTTP method, case-insensitive (default: GET)
    #[arg(short = 'j', long)]
    pub method: Option<String>,

    /// Additional header "NAME: VALUE". Overrides any header gozzle sets itself.
    /// May be repeated.
    #[arg(short = 'k', long = "header", value_parser = split_header)]
    pub headers: Vec<(String, String)>,

    /// JSON object sent as request body
    #[arg(long, value_parser = parse_body)]
    pub body: Option<Body>,

    /// Token for "Authorization: Bearer"
    #[arg(long)]
    pub bearer_token: Option<String>,

    /// Username for HTTP Basic Auth
    #[arg(long)]
    pub auth_user: Option<String>,

    /// Password for HTTP Basic Auth
    #[arg(long, requires = "auth_user")]
    pub auth_pw: Option<String>,

    /// Timeout in seconds (default: 5)
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Maximum number of redirects to follow (default: 5)
    #[arg(long)]
    pub max_redirs: Option<usize>,

    /// Set user-agent
    #[arg(short = 'A', long)]
    pub user_agent: Option<String>,

    /// Content type of the body. Any value selects the JSON default.
    #[arg(long)]
    pub content_type: Option<String>,

    /// Mark the body as multipart/form-data
    #[arg(long)]
    pub multipart: bool,

    /// Mark the body as url-encoded
    #[arg(long)]
    pub urlencoded: bool,

    /// Base URL, kept with the config
    #[arg(long)]
    pub base_url: Option<String>,

    /// Read the request from a JSON file. Command line options take precedence.
    #[arg(short, long)]
    pub config_file: Option<PathBuf>,

    /// Enable verbose output. Use once (-v) for logging level DEBUG and twice (-vv) for logging
    /// level TRACE.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Sends log to stderr.
    #[arg(short = 'l', long)]
    pub display_log: bool,

    /// Use custom log dir
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

impl Cli {
    pub fn logging_level(&self) -> String {
        match self.verbose {
            2.. => String::from("trace"),
            1 => String::from("debug"),
            _ => String::from("info"),
        }
    }

    pub fn to_request_config(&self) -> RequestConfig {
        RequestConfig {
            url: self.url.clone().unwrap_or_default(),
            method: self.method.clone().unwrap_or_default(),
            base_url: self.base_url.clone(),
            basic_auth: self.auth_user.as_ref().map(|user| {
                BasicAuth::new(user.as_str(), self.auth_pw.clone().unwrap_or_default())
            }),
            bearer_token: self.bearer_token.clone(),
            headers: self.headers.iter().cloned().collect(),
            timeout_seconds: self.timeout.unwrap_or_default(),
            body: self.body.clone(),
            user_agent: self.user_agent.clone().unwrap_or_default(),
            as_multipart: self.multipart,
            as_url_encoded: self.urlencoded,
            content_type: self.content_type.clone().unwrap_or_default(),
            max_redirects: self.max_redirs.unwrap_or_default(),
            ..RequestConfig::default()
        }
    }
}

fn split_header(header: &str) -> Result<(String, String), String> {
    let (name, value) = header
        .split_once(':')
        .ok_or_else(|| format!("expected \"NAME: VALUE\", got {:?}", header))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(String::from("header name must not be empty"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

fn parse_body(body: &str) -> Result<Body, String> {
    match serde_json::from_str(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(String::from("body must be a JSON object")),
        Err(e) => Err(e.to_string()),
    }
}
