//! Webhook image service: POSTs the prompt as JSON and reads raw image bytes back.

use crate::error::{CanvasError, Result};
use crate::image::provider::ImageService;
use crate::image::types::{GeneratedImage, GenerationMetadata, GenerationRequest};
use async_trait::async_trait;
use std::time::{Duration, Instant};

/// Endpoint used when neither the builder nor the environment names one.
pub const DEFAULT_ENDPOINT: &str = "https://yohanhailet.app.n8n.cloud/webhook-test/image";

/// Environment variable that overrides [`DEFAULT_ENDPOINT`].
pub const ENDPOINT_ENV: &str = "PROMPTCANVAS_ENDPOINT";

/// Builder for WebhookProvider.
#[derive(Debug, Clone, Default)]
pub struct WebhookProviderBuilder {
    endpoint: Option<String>,
    timeout: Option<Duration>,
    client: Option<reqwest::Client>,
}

impl WebhookProviderBuilder {
    /// Builder with no endpoint set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the webhook URL.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Sets a request timeout. Unset means the transport default (none).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Uses a preconfigured HTTP client. Overrides `timeout`.
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Resolves the endpoint (builder, then `PROMPTCANVAS_ENDPOINT`, then the default)
    /// and creates the HTTP client.
    pub fn build(self) -> Result<WebhookProvider> {
        let endpoint = self
            .endpoint
            .or_else(|| std::env::var(ENDPOINT_ENV).ok())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let url = reqwest::Url::parse(&endpoint)
            .map_err(|e| CanvasError::InvalidRequest(format!("bad endpoint {endpoint:?}: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(CanvasError::InvalidRequest(format!(
                "endpoint must be http or https, got {}",
                url.scheme()
            )));
        }

        let client = match self.client {
            Some(client) => client,
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                builder.build()?
            }
        };

        Ok(WebhookProvider { client, url })
    }
}

/// Image service backed by a single webhook endpoint.
pub struct WebhookProvider {
    client: reqwest::Client,
    url: reqwest::Url,
}

impl WebhookProvider {
    /// Starts a [`WebhookProviderBuilder`].
    pub fn builder() -> WebhookProviderBuilder {
        WebhookProviderBuilder::new()
    }

    /// The endpoint requests go to.
    pub fn endpoint(&self) -> &str {
        self.url.as_str()
    }
}

#[async_trait]
impl ImageService for WebhookProvider {
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedImage> {
        request.validate()?;
        let start = Instant::now();

        tracing::debug!(
            endpoint = %self.url,
            prompt_len = request.prompt.len(),
            "submitting generation request"
        );

        // `.json()` sets `Content-Type: application/json`.
        let response = self
            .client
            .post(self.url.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(CanvasError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let data = response
            .bytes()
            .await
            .map_err(|e| CanvasError::Decode(format!("reading response body: {e}")))?;

        let duration_ms = start.elapsed().as_millis() as u64;
        tracing::debug!(
            status = status.as_u16(),
            bytes = data.len(),
            duration_ms,
            "generation complete"
        );

        GeneratedImage::from_bytes(
            data.to_vec(),
            GenerationMetadata {
                endpoint: Some(self.url.to_string()),
                status: Some(status.as_u16()),
                content_type,
                duration_ms: Some(duration_ms),
            },
        )
    }

    fn name(&self) -> &str {
        "Webhook"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageFormat;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    struct Captured {
        request_line: String,
        headers: Vec<(String, String)>,
        body: Vec<u8>,
    }

    impl Captured {
        fn header(&self, name: &str) -> Option<&str> {
            self.headers
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str())
        }
    }

    /// Serves exactly one request with the given status and body, then reports what it saw.
    async fn serve_once(status: u16, body: &'static [u8]) -> (String, oneshot::Receiver<Captured>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            let header_end = loop {
                let n = socket.read(&mut chunk).await.unwrap();
                assert!(n > 0, "client closed before sending headers");
                buf.extend_from_slice(&chunk[..n]);
                if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos;
                }
            };

            let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
            let mut lines = head.split("\r\n");
            let request_line = lines.next().unwrap_or_default().to_string();
            let headers: Vec<(String, String)> = lines
                .filter_map(|l| l.split_once(':'))
                .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
                .collect();
            let content_length = headers
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
                .and_then(|(_, v)| v.parse::<usize>().ok())
                .unwrap_or(0);

            let mut body_bytes = buf[header_end + 4..].to_vec();
            while body_bytes.len() < content_length {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                body_bytes.extend_from_slice(&chunk[..n]);
            }

            let reason = if status == 200 { "OK" } else { "Error" };
            let head = format!(
                "HTTP/1.1 {status} {reason}\r\n\
                 content-type: image/png\r\n\
                 content-length: {}\r\n\
                 connection: close\r\n\r\n",
                body.len()
            );
            socket.write_all(head.as_bytes()).await.unwrap();
            socket.write_all(body).await.unwrap();
            socket.shutdown().await.ok();

            let _ = tx.send(Captured {
                request_line,
                headers,
                body: body_bytes,
            });
        });

        (format!("http://{addr}/webhook/image"), rx)
    }

    /// A loopback URL with nothing listening behind it.
    async fn closed_endpoint() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}/webhook/image")
    }

    const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 1, 2, 3, 4];

    #[tokio::test]
    async fn test_posts_prompt_as_json() {
        let (url, rx) = serve_once(200, PNG).await;
        let provider = WebhookProvider::builder().endpoint(&url).build().unwrap();

        let image = provider
            .generate(&GenerationRequest::new("a cat"))
            .await
            .unwrap();
        assert_eq!(image.data, PNG);
        assert_eq!(image.format, Some(ImageFormat::Png));
        assert_eq!(image.metadata.status, Some(200));
        assert_eq!(image.metadata.content_type.as_deref(), Some("image/png"));

        let seen = rx.await.unwrap();
        assert!(seen.request_line.starts_with("POST /webhook/image "));
        assert_eq!(seen.header("content-type"), Some("application/json"));
        let body: serde_json::Value = serde_json::from_slice(&seen.body).unwrap();
        assert_eq!(body, serde_json::json!({ "prompt": "a cat" }));
    }

    #[tokio::test]
    async fn test_non_success_status_is_api_error() {
        let (url, _rx) = serve_once(500, b"internal").await;
        let provider = WebhookProvider::builder().endpoint(&url).build().unwrap();

        let err = provider
            .generate(&GenerationRequest::new("a cat"))
            .await
            .unwrap_err();
        match err {
            CanvasError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "internal");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_body_is_decode_error() {
        let (url, _rx) = serve_once(200, b"").await;
        let provider = WebhookProvider::builder().endpoint(&url).build().unwrap();

        let err = provider
            .generate(&GenerationRequest::new("a cat"))
            .await
            .unwrap_err();
        assert!(matches!(err, CanvasError::Decode(_)));
    }

    #[tokio::test]
    async fn test_blank_prompt_makes_no_request() {
        // Nothing listens here; a request would surface as a network error.
        let provider = WebhookProvider::builder()
            .endpoint(closed_endpoint().await)
            .build()
            .unwrap();
        let err = provider
            .generate(&GenerationRequest::new("   "))
            .await
            .unwrap_err();
        assert!(matches!(err, CanvasError::EmptyPrompt));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let provider = WebhookProvider::builder()
            .endpoint(closed_endpoint().await)
            .build()
            .unwrap();
        let err = provider
            .generate(&GenerationRequest::new("a cat"))
            .await
            .unwrap_err();
        assert!(matches!(err, CanvasError::Network(_)), "got {err:?}");
    }

    #[test]
    fn test_builder_rejects_bad_endpoint() {
        assert!(matches!(
            WebhookProvider::builder().endpoint("not a url").build(),
            Err(CanvasError::InvalidRequest(_))
        ));
        assert!(matches!(
            WebhookProvider::builder().endpoint("ftp://example.com/x").build(),
            Err(CanvasError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_explicit_endpoint_wins() {
        let provider = WebhookProvider::builder()
            .endpoint("https://example.com/hook")
            .build()
            .unwrap();
        assert_eq!(provider.endpoint(), "https://example.com/hook");
        assert_eq!(provider.name(), "Webhook");
    }
}
