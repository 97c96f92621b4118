use reqwest::{Client, Response, StatusCode};
use serde_json::Value;

/// Header the API expects the shared secret in.
pub const API_KEY_HEADER: &str = "X-API-Key";

#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API returned {status}: {detail}")]
    Status { status: StatusCode, detail: String },
}

pub struct EarthquakesClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl EarthquakesClient {
    pub fn new(base_url: &str, api_key: Option<&str>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.map(str::to_string),
        }
    }

    /// Liveness probe; needs no key.
    pub async fn health(&self) -> Result<Value, SdkError> {
        self.get_json("/health", &[]).await
    }

    /// Past day, all magnitudes.
    pub async fn feed(&self) -> Result<Value, SdkError> {
        self.get_json("/api/getEarthquakes", &[]).await
    }

    /// Feed for a window code (`H`, `D`, `W`, `M`) and threshold code
    /// (`4.5+`, `2.5+`, `1.0+`, `all`).
    pub async fn public_feed(&self, timebox: &str, magnitude: &str) -> Result<Value, SdkError> {
        self.get_json(
            "/api/public/earthquakes",
            &[("timebox", timebox), ("magnitude", magnitude)],
        )
        .await
    }

    async fn get_json(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, SdkError> {
        let mut req = self.client.get(format!("{}{}", self.base_url, path));
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(key) = &self.api_key {
            req = req.header(API_KEY_HEADER, key);
        }

        let resp = req.send().await?;
        Self::into_json(resp).await
    }

    async fn into_json(resp: Response) -> Result<Value, SdkError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp.json().await?);
        }

        // Error bodies are `{"detail": "..."}`; fall back to raw text.
        let text = resp.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<Value>(&text)
            .ok()
            .and_then(|v| v.get("detail").and_then(Value::as_str).map(str::to_string))
            .unwrap_or(text);

        Err(SdkError::Status { status, detail })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve a single canned response and hand back the base URL plus the
    /// raw request head once it has been read.
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            String::from_utf8_lossy(&head).into_owned()
        });

        (format!("http://{addr}"), handle)
    }

    #[tokio::test]
    async fn error_detail_is_extracted() {
        let (base, server) =
            serve_once("502 Bad Gateway", r#"{"detail":"usgs upstream error"}"#).await;
        let client = EarthquakesClient::new(&base, Some("k"));

        match client.public_feed("D", "4.5+").await {
            Err(SdkError::Status { status, detail }) => {
                assert_eq!(status, StatusCode::BAD_GATEWAY);
                assert_eq!(detail, "usgs upstream error");
            }
            other => panic!("expected status error, got {other:?}"),
        }

        let head = server.await.unwrap().to_ascii_lowercase();
        assert!(head.starts_with("get /api/public/earthquakes?timebox=d&magnitude=4.5%2b "));
        assert!(head.contains("x-api-key: k\r\n"));
    }

    #[tokio::test]
    async fn non_json_error_body_is_passed_through() {
        let (base, server) = serve_once("503 Service Unavailable", "upstream down").await;
        let client = EarthquakesClient::new(&base, None);

        match client.feed().await {
            Err(SdkError::Status { status, detail }) => {
                assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
                assert_eq!(detail, "upstream down");
            }
            other => panic!("expected status error, got {other:?}"),
        }

        let head = server.await.unwrap().to_ascii_lowercase();
        assert!(!head.contains("x-api-key"));
    }

    #[tokio::test]
    async fn success_body_is_returned() {
        let (base, _server) = serve_once("200 OK", r#"{"status":"ok"}"#).await;
        let client = EarthquakesClient::new(&base, None);
        assert_eq!(
            client.health().await.unwrap(),
            serde_json::json!({"status": "ok"})
        );
    }
}
