// Copyright (C) 2023 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

use crate::cli::Cli;
use crate::config::RequestConfig;
use crate::constants;
use anyhow::Result;
use clap::Parser;
use flexi_logger::{self, FileSpec, LogSpecification, LoggerHandle};
use std::env::ArgsOs;
use std::path::Path;

pub enum SendTo {
    Null,
    Stderr,
}

/// Parses the command line, starts logging and assembles the request.
///
/// The returned handle must stay alive for as long as logging is wanted.
pub fn init(args: ArgsOs) -> Result<(RequestConfig, LoggerHandle)> {
    let cli = Cli::parse_from(args);
    let logger = init_logging_from_args(&cli)?;
    Ok((get_request_config(&cli)?, logger))
}

fn init_logging_from_args(cli: &Cli) -> Result<LoggerHandle> {
    let level = &cli.logging_level();
    let log_dir = cli.log_dir.as_deref().or(constants::ENV_LOG_DIR.as_deref());
    let send_to = if cli.display_log {
        SendTo::Stderr
    } else {
        SendTo::Null
    };

    init_logging(level, log_dir, send_to)
}

fn get_request_config(cli: &Cli) -> Result<RequestConfig> {
    let from_args = cli.to_request_config();
    match cli.config_file {
        Some(ref config_file) => Ok(RequestConfig::merge_two_configs(
            RequestConfig::from_file(config_file)?,
            from_args,
        )),
        None => Ok(from_args),
    }
}

fn init_logging(level: &str, log_dir: Option<&Path>, send_to: SendTo) -> Result<LoggerHandle> {
    let spec = LogSpecification::parse(level)?;
    let mut logger = flexi_logger::Logger::with(spec);

    logger = if let Some(dir) = log_dir {
        logger
            .log_to_file(make_log_file_spec(dir))
            .rotate(
                constants::log::FILE_MAX_SIZE,
                constants::log::FILE_NAMING,
                constants::log::FILE_CLEANUP,
            )
            .append()
    } else {
        logger.do_not_log()
    };

    logger = match send_to {
        SendTo::Null => logger
            .duplicate_to_stderr(flexi_logger::Duplicate::None)
            .duplicate_to_stdout(flexi_logger::Duplicate::None),
        SendTo::Stderr if log_dir.is_some() => {
            logger.duplicate_to_stderr(flexi_logger::Duplicate::All)
        }
        SendTo::Stderr => logger.log_to_stderr(),
    };

    Ok(logger.format(flexi_logger::detailed_format).start()?)
}

fn make_log_file_spec(log_dir: &Path) -> FileSpec {
    FileSpec::default()
        .directory(log_dir.to_owned())
        .suppress_timestamp()
        .basename(constants::log::FILE_BASENAME)
}
