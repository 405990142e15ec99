// Copyright (C) 2023 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

use anyhow::Result;
use gozzle::{http, setup};
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    let (config, _logger) = setup::init(std::env::args_os())?;
    let envelope = http::send_async(config).await?;
    println!("{} {}", envelope.status_code, envelope.status_text);
    println!("{}", String::from_utf8_lossy(&envelope.raw_body));
    info!("Success");
    Ok(())
}
