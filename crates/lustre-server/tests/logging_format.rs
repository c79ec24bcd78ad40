// SPDX-License-Identifier: Apache-2.0

mod api_contracts_support;

use std::io;
use std::sync::{Arc, Mutex};

use api_contracts_support::{fast_api_config, send_raw, spawn_server};
use lustre_server::ApiConfig;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

struct BufferWriter(Arc<Mutex<Vec<u8>>>);

impl<'a> MakeWriter<'a> for SharedBuffer {
    type Writer = BufferWriter;

    fn make_writer(&'a self) -> Self::Writer {
        BufferWriter(Arc::clone(&self.0))
    }
}

impl io::Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .0
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "lock poisoned"))?;
        guard.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SharedBuffer {
    fn json_lines(&self) -> Vec<serde_json::Value> {
        let bytes = self.0.lock().expect("lock output").clone();
        String::from_utf8(bytes)
            .expect("utf8 log output")
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| serde_json::from_str(l).expect("json log line"))
            .collect()
    }
}

#[test]
fn structured_logging_format_is_valid_json() {
    let sink = SharedBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(sink.clone())
        .json()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        tracing::info!(
            target: "lustre_audit",
            request_id = "req-123",
            method = "POST",
            path = "/select",
            status = 200_u16,
            "audit"
        );
    });

    let lines = sink.json_lines();
    let parsed = lines.first().expect("log line");
    assert_eq!(parsed.get("level").and_then(|v| v.as_str()), Some("INFO"));
    assert_eq!(
        parsed.get("target").and_then(|v| v.as_str()),
        Some("lustre_audit")
    );
    let fields = parsed.get("fields").expect("fields object");
    assert_eq!(
        fields.get("request_id").and_then(|v| v.as_str()),
        Some("req-123")
    );
    assert_eq!(fields.get("path").and_then(|v| v.as_str()), Some("/select"));
}

// Single-threaded runtime so the thread-local subscriber sees the server task.
#[tokio::test(flavor = "current_thread")]
async fn audit_log_records_each_request_when_enabled() {
    let sink = SharedBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(sink.clone())
        .json()
        .with_max_level(Level::INFO)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let api = ApiConfig {
        enable_audit_log: true,
        ..fast_api_config()
    };
    let server = spawn_server(api, &[]).await;
    let (status, _, _) = send_raw(server.addr, "/cart", &[("x-request-id", "req-audit-7")]).await;
    assert_eq!(status, 200);

    let audit = sink
        .json_lines()
        .into_iter()
        .find(|line| line.get("target").and_then(|v| v.as_str()) == Some("lustre_audit"))
        .expect("audit line");
    let fields = audit.get("fields").expect("fields object");
    assert_eq!(fields.get("method").and_then(|v| v.as_str()), Some("GET"));
    assert_eq!(fields.get("path").and_then(|v| v.as_str()), Some("/cart"));
    assert_eq!(fields.get("status").and_then(|v| v.as_u64()), Some(200));
    assert_eq!(
        fields.get("request_id").and_then(|v| v.as_str()),
        Some("req-audit-7")
    );
}

#[tokio::test(flavor = "current_thread")]
async fn fallback_recommend_logs_the_effective_upload_id() {
    let sink = SharedBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(sink.clone())
        .json()
        .with_max_level(Level::INFO)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let server = spawn_server(fast_api_config(), &[]).await;
    let id = "0123456789abcdef0123456789abcdef";
    let body = format!("upload_id={id}");
    let (status, _, _) = api_contracts_support::send_raw_with_method(
        server.addr,
        "POST",
        "/recommend",
        &[],
        Some(("application/x-www-form-urlencoded", body.as_bytes())),
    )
    .await;
    assert_eq!(status, 200);

    let event = sink
        .json_lines()
        .into_iter()
        .find(|line| {
            line.get("fields")
                .and_then(|f| f.get("message"))
                .and_then(|v| v.as_str())
                == Some("fallback recommend")
        })
        .expect("fallback event");
    let fields = event.get("fields").expect("fields object");
    assert_eq!(fields.get("upload_id").and_then(|v| v.as_str()), Some(id));
    assert_eq!(fields.get("file_count").and_then(|v| v.as_u64()), Some(0));
}
