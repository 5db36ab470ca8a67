#![allow(dead_code)]

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

pub fn write_runtime_config(dir: &Path, content: &str) -> std::path::PathBuf {
    let path = dir.join("runtime.yaml");
    fs::write(&path, content).expect("Failed to write runtime.yaml");
    path
}

/// Request as seen by the test adapter
#[derive(Debug)]
pub struct CapturedRequest {
    pub head: String,
    pub body: String,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.head.lines().skip(1).find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.trim()
                .eq_ignore_ascii_case(name)
                .then(|| value.trim())
        })
    }

    pub fn request_line(&self) -> &str {
        self.head.lines().next().unwrap_or("")
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body is not JSON")
    }
}

/// Start an adapter that answers exactly one request.
///
/// Returns `None` when the sandbox forbids binding a local port.
pub async fn start_single_response_adapter(
    status: &str,
    body: &str,
) -> Option<(String, JoinHandle<CapturedRequest>)> {
    let listener = match TcpListener::bind("127.0.0.1:0").await {
        Ok(listener) => listener,
        Err(err) if err.kind() == ErrorKind::PermissionDenied => return None,
        Err(err) => panic!("failed to bind local test listener: {err}"),
    };
    let addr = listener.local_addr().unwrap();

    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Length: {}\r\nContent-Type: application/json\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
    .into_bytes();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        let _ = socket.write_all(&response).await;
        let _ = socket.shutdown().await;
        request
    });

    Some((format!("http://{addr}/adapter"), handle))
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> CapturedRequest {
    let mut raw = Vec::new();
    let mut buf = [0u8; 4096];

    loop {
        let n = socket.read(&mut buf).await.unwrap();
        if n == 0 {
            break;
        }
        raw.extend_from_slice(&buf[..n]);

        let text = String::from_utf8_lossy(&raw);
        if let Some(split) = text.find("\r\n\r\n") {
            let head = text[..split].to_string();
            let content_length = head
                .lines()
                .find_map(|line| {
                    let (key, value) = line.split_once(':')?;
                    key.trim()
                        .eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            let body_start = split + 4;
            if raw.len() >= body_start + content_length {
                let body = String::from_utf8_lossy(&raw[body_start..body_start + content_length])
                    .into_owned();
                return CapturedRequest { head, body };
            }
        }
    }

    let text = String::from_utf8_lossy(&raw).into_owned();
    CapturedRequest {
        head: text,
        body: String::new(),
    }
}
