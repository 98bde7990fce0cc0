//! Remote table store client
//!
//! The synchronizer talks to a [`RemoteStore`]; [`PostgrestClient`] implements it
//! against a PostgREST-compatible endpoint (Supabase REST API).

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::infrastructure::config::RemoteConfig;

#[derive(Error, Debug)]
pub enum RemoteStoreError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Remote store error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Payload of {bytes} bytes exceeds the {limit} byte request limit")]
    PayloadTooLarge { bytes: usize, limit: usize },

    #[error("Failed to serialize rows: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Remote store is not configured: missing {field}")]
    NotConfigured { field: &'static str },
}

pub type RemoteStoreResult<T> = Result<T, RemoteStoreError>;

/// Insert-or-replace-by-key writes against named tables
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Upsert a batch of full rows into `table` as one call
    async fn upsert(&self, table: &str, rows: &[Value]) -> RemoteStoreResult<()>;
}

pub struct PostgrestClient {
    http: Client,
    base_url: String,
    api_key: String,
    conflict_key: String,
    max_payload_bytes: usize,
}

impl PostgrestClient {
    pub fn new(config: &RemoteConfig, conflict_key: &str) -> RemoteStoreResult<Self> {
        let base_url = config
            .url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(RemoteStoreError::NotConfigured { field: "remote.url" })?;
        let api_key = config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(RemoteStoreError::NotConfigured { field: "remote.api_key" })?;

        let mut builder = Client::builder().gzip(true);
        if let Some(seconds) = config.request_timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        Ok(Self {
            http: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            conflict_key: conflict_key.to_string(),
            max_payload_bytes: config.max_payload_bytes,
        })
    }

    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}?on_conflict={}", self.base_url, table, self.conflict_key)
    }

    /// Serialize a batch, rejecting bodies above the request limit
    pub fn encode_body(&self, rows: &[Value]) -> RemoteStoreResult<Vec<u8>> {
        let body = serde_json::to_vec(rows)?;
        if body.len() > self.max_payload_bytes {
            return Err(RemoteStoreError::PayloadTooLarge {
                bytes: body.len(),
                limit: self.max_payload_bytes,
            });
        }
        Ok(body)
    }
}

#[async_trait]
impl RemoteStore for PostgrestClient {
    async fn upsert(&self, table: &str, rows: &[Value]) -> RemoteStoreResult<()> {
        let body = self.encode_body(rows)?;
        let url = self.table_url(table);
        debug!("POST {} ({} rows, {} bytes)", url, rows.len(), body.len());

        let resp = self
            .http
            .post(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .body(body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RemoteStoreError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve one HTTP request with a fixed response; yields the raw request text
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);

                let text = String::from_utf8_lossy(&request).to_string();
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let content_length = text[..header_end]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if request.len() >= header_end + 4 + content_length {
                        break;
                    }
                }
            }

            let response = format!(
                "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            String::from_utf8_lossy(&request).to_string()
        });

        (format!("http://{addr}"), handle)
    }

    fn client_for(url: String) -> PostgrestClient {
        let config = RemoteConfig {
            url: Some(url),
            api_key: Some("service-key".to_string()),
            request_timeout_seconds: Some(5),
            ..RemoteConfig::default()
        };
        let mut client = PostgrestClient::new(&config, "id").unwrap();
        // Local stub; ignore any proxy configured in the environment
        client.http = Client::builder().no_proxy().build().unwrap();
        client
    }

    #[tokio::test]
    async fn test_upsert_sends_keyed_merge_request() {
        let (url, server) = serve_once("HTTP/1.1 201 Created", "").await;
        let client = client_for(url);

        client
            .upsert("vehicles", &[json!({"id": "vision", "name": "Vision"})])
            .await
            .unwrap();

        let request = server.await.unwrap();
        let lower = request.to_lowercase();
        assert!(request.starts_with("POST /rest/v1/vehicles?on_conflict=id HTTP/1.1"));
        assert!(lower.contains("apikey: service-key"));
        assert!(lower.contains("authorization: bearer service-key"));
        assert!(lower.contains("prefer: resolution=merge-duplicates,return=minimal"));
        assert!(request.ends_with(r#"[{"id":"vision","name":"Vision"}]"#));
    }

    #[tokio::test]
    async fn test_non_success_status_maps_to_api_error() {
        let (url, server) = serve_once(
            "HTTP/1.1 409 Conflict",
            r#"{"code":"23505","message":"duplicate key value"}"#,
        )
        .await;
        let client = client_for(url);

        let err = client
            .upsert("maintenance_templates", &[json!({"id": "electric"})])
            .await
            .unwrap_err();
        server.await.unwrap();

        match err {
            RemoteStoreError::Api { status, message } => {
                assert_eq!(status, 409);
                assert!(message.contains("duplicate key value"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    fn remote_config() -> RemoteConfig {
        RemoteConfig {
            url: Some("https://example.supabase.co/".to_string()),
            api_key: Some("service-key".to_string()),
            ..RemoteConfig::default()
        }
    }

    #[test]
    fn test_missing_credentials_are_rejected() {
        let config = RemoteConfig::default();
        assert!(matches!(
            PostgrestClient::new(&config, "id"),
            Err(RemoteStoreError::NotConfigured { field: "remote.url" })
        ));

        let config = RemoteConfig {
            api_key: Some("  ".to_string()),
            ..remote_config()
        };
        assert!(matches!(
            PostgrestClient::new(&config, "id"),
            Err(RemoteStoreError::NotConfigured { field: "remote.api_key" })
        ));
    }

    #[test]
    fn test_table_url() {
        let client = PostgrestClient::new(&remote_config(), "id").unwrap();
        assert_eq!(
            client.table_url("vehicles"),
            "https://example.supabase.co/rest/v1/vehicles?on_conflict=id"
        );
    }

    #[test]
    fn test_oversized_payload_is_rejected_before_sending() {
        let config = RemoteConfig {
            max_payload_bytes: 64,
            ..remote_config()
        };
        let client = PostgrestClient::new(&config, "id").unwrap();

        assert!(client.encode_body(&[json!({"id": "a"})]).is_ok());

        let rows: Vec<Value> = (0..10).map(|i| json!({"id": format!("vehicle-{i}")})).collect();
        match client.encode_body(&rows) {
            Err(RemoteStoreError::PayloadTooLarge { bytes, limit }) => {
                assert_eq!(limit, 64);
                assert!(bytes > 64);
            }
            other => panic!("expected PayloadTooLarge, got {other:?}"),
        }
    }
}
