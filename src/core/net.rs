// src/core/net.rs
// Blocking HTTPS with bearer auth. One request per call, no retry.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use serde_json::Value;

use crate::config::consts::{PREVIEW_CHARS, USER_AGENT};
use crate::error::{Error, Result};

pub fn client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()?)
}

pub fn get_json(client: &Client, url: &str, bearer: &str, query: &[(&str, String)]) -> Result<Value> {
    send(client.get(url).bearer_auth(bearer).query(query))
}

pub fn post_json(client: &Client, url: &str, bearer: &str, body: &Value) -> Result<Value> {
    send(client.post(url).bearer_auth(bearer).json(body))
}

fn send(req: RequestBuilder) -> Result<Value> {
    let resp = req.send()?;
    let status = resp.status();
    let url = resp.url().to_string();
    logf!("HTTP {url} -> {}", status.as_u16());

    let body = resp.text()?;
    let preview = preview(&body);
    logd!("Preview: {preview}");

    if !status.is_success() {
        return Err(Error::HttpStatus { status: status.as_u16(), url, preview });
    }

    serde_json::from_str(&body)
        .map_err(|e| Error::Upstream(format!("invalid JSON from {url}: {e}; body: {preview}")))
}

/// First `PREVIEW_CHARS` characters, never splitting a code point.
pub fn preview(body: &str) -> String {
    match body.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => s!(&body[..cut]),
        None => s!(body),
    }
}
