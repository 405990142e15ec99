// Copyright (C) 2023 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

#![allow(dead_code)]

use anyhow::Result as AnyhowResult;
use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

/// Answers one connection per scripted response, in order, and records what
/// it received. Every response closes its connection.
pub struct FakeServer {
    base: String,
    handle: JoinHandle<Vec<String>>,
}

impl FakeServer {
    pub fn start(responses: Vec<String>) -> AnyhowResult<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let base = format!("http://{}", listener.local_addr()?);
        let handle = thread::spawn(move || {
            let mut received = Vec::new();
            for response in responses {
                match serve_one(&listener, &response) {
                    Ok(request) => received.push(request),
                    Err(_) => break,
                }
            }
            received
        });
        Ok(Self { base, handle })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Waits until every scripted response went out.
    pub fn requests(self) -> Vec<String> {
        self.handle.join().unwrap_or_default()
    }
}

pub fn response(status_line: &str, headers: &[(&str, &str)], body: &str) -> String {
    let mut response = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n",
        status_line,
        body.len()
    );
    for (name, value) in headers {
        response.push_str(&format!("{}: {}\r\n", name, value));
    }
    response.push_str("\r\n");
    response.push_str(body);
    response
}

pub fn redirect(location: &str) -> String {
    response("302 Found", &[("Location", location)], "")
}

/// Redirect chain /hop1 -> /hop2 -> ... -> /hop{count}, then `last`.
pub fn redirect_chain(count: usize, last: String) -> Vec<String> {
    (1..=count)
        .map(|i| redirect(&format!("/hop{}", i)))
        .chain(std::iter::once(last))
        .collect()
}

/// Case-insensitive lookup in a raw HTTP/1.1 request.
pub fn header(request: &str, name: &str) -> Option<String> {
    let head = request.split("\r\n\r\n").next()?;
    head.lines().skip(1).find_map(|line| {
        let (n, v) = line.split_once(':')?;
        n.trim()
            .eq_ignore_ascii_case(name)
            .then(|| v.trim().to_string())
    })
}

pub fn header_count(request: &str, name: &str) -> usize {
    let head = request.split("\r\n\r\n").next().unwrap_or_default();
    head.lines()
        .skip(1)
        .filter_map(|line| line.split_once(':'))
        .filter(|(n, _)| n.trim().eq_ignore_ascii_case(name))
        .count()
}

pub fn body(request: &str) -> &str {
    request.split_once("\r\n\r\n").map(|(_, b)| b).unwrap_or_default()
}

fn serve_one(listener: &TcpListener, response: &str) -> std::io::Result<String> {
    let (mut stream, _addr) = listener.accept()?;
    let request = read_request(&mut stream)?;
    stream.write_all(response.as_bytes())?;
    stream.flush()?;
    let _ = stream.shutdown(Shutdown::Both);
    Ok(request)
}

fn read_request(stream: &mut TcpStream) -> std::io::Result<String> {
    let mut data = Vec::new();
    let mut buffer: [u8; 1024] = [0; 1024];
    loop {
        let len = stream.read(&mut buffer)?;
        if len == 0 {
            break;
        }
        data.extend_from_slice(&buffer[..len]);
        if let Some(end) = find_head_end(&data) {
            if data.len() >= end + content_length(&data[..end]) {
                break;
            }
        }
    }
    Ok(String::from_utf8_lossy(&data).into_owned())
}

fn find_head_end(data: &[u8]) -> Option<usize> {
    data.windows(4)
        .position(|w| w == b"\r\n\r\n")
        .map(|pos| pos + 4)
}

fn content_length(head: &[u8]) -> usize {
    header(&String::from_utf8_lossy(head), "content-length")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}
