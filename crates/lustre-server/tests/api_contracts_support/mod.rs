// SPDX-License-Identifier: Apache-2.0
#![allow(dead_code)]

use lustre_server::{build_router, ApiConfig, AppState, StorageConfig};
use std::time::Duration;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

pub const BOUNDARY: &str = "lustre-test-boundary";

pub enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File(name, filename, bytes) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}

/// Server bound to an ephemeral port with its own storage roots. The
/// tempdir must outlive the test.
pub struct TestServer {
    pub addr: std::net::SocketAddr,
    pub state: AppState,
    pub dir: TempDir,
}

impl TestServer {
    pub fn upload_root(&self) -> std::path::PathBuf {
        self.dir.path().join("storage")
    }

    pub fn samples_root(&self) -> std::path::PathBuf {
        self.dir.path().join("sampleimage")
    }
}

pub fn fast_api_config() -> ApiConfig {
    ApiConfig {
        recommend_delay: Duration::ZERO,
        ..ApiConfig::default()
    }
}

pub async fn spawn_server(api: ApiConfig, samples: &[&str]) -> TestServer {
    let dir = tempfile::tempdir().expect("tempdir");
    let storage = StorageConfig {
        upload_root: dir.path().join("storage"),
        samples_root: dir.path().join("sampleimage"),
    };
    std::fs::create_dir_all(&storage.upload_root).expect("mkdir storage");
    std::fs::create_dir_all(&storage.samples_root).expect("mkdir samples");
    for name in samples {
        std::fs::write(storage.samples_root.join(name), name.as_bytes()).expect("write sample");
    }
    let state = AppState::with_config(storage, api);
    spawn_with_state(state, dir).await
}

pub async fn spawn_with_state(state: AppState, dir: TempDir) -> TestServer {
    let app = build_router(state.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });
    TestServer { addr, state, dir }
}

pub async fn send_raw(
    addr: std::net::SocketAddr,
    path: &str,
    headers: &[(&str, &str)],
) -> (u16, String, String) {
    send_raw_with_method(addr, "GET", path, headers, None).await
}

pub async fn send_json(
    addr: std::net::SocketAddr,
    path: &str,
    body: &str,
) -> (u16, String, String) {
    send_raw_with_method(
        addr,
        "POST",
        path,
        &[],
        Some(("application/json", body.as_bytes())),
    )
    .await
}

pub async fn send_multipart(
    addr: std::net::SocketAddr,
    path: &str,
    parts: &[Part<'_>],
) -> (u16, String, String) {
    let body = multipart_body(parts);
    let content_type = multipart_content_type();
    send_raw_with_method(addr, "POST", path, &[], Some((content_type.as_str(), body.as_slice()))).await
}

pub async fn send_raw_with_method(
    addr: std::net::SocketAddr,
    method: &str,
    path: &str,
    headers: &[(&str, &str)],
    body: Option<(&str, &[u8])>,
) -> (u16, String, String) {
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");
    let mut req = format!("{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n");
    match body {
        Some((content_type, payload)) => {
            req.push_str(&format!("Content-Type: {content_type}\r\n"));
            req.push_str(&format!("Content-Length: {}\r\n", payload.len()));
        }
        None if method == "POST" => req.push_str("Content-Length: 0\r\n"),
        None => {}
    }
    for (k, v) in headers {
        req.push_str(&format!("{k}: {v}\r\n"));
    }
    req.push_str("\r\n");
    let mut bytes = req.into_bytes();
    if let Some((_, payload)) = body {
        bytes.extend_from_slice(payload);
    }
    stream.write_all(&bytes).await.expect("write request");
    let mut response = Vec::new();
    stream
        .read_to_end(&mut response)
        .await
        .expect("read response");
    let response = String::from_utf8_lossy(&response).to_string();
    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("http response must have separator");
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .expect("http status");
    (status, head.to_string(), body.to_string())
}

pub fn header<'a>(head: &'a str, name: &str) -> Option<&'a str> {
    head.lines().find_map(|line| {
        let (k, v) = line.split_once(':')?;
        k.trim().eq_ignore_ascii_case(name).then(|| v.trim())
    })
}
