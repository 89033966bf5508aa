//! HTTP gateway for OpenAI-compatible chat completion endpoints

use super::types::{ChatRequest, ChatResponse, parse_error_body};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use tribunal_application::{Completion, CompletionGateway, GatewayError};
use tribunal_domain::AgentRequest;

/// [`CompletionGateway`] over `POST {base_url}/chat/completions`.
///
/// The `reqwest::Client` is shared by every call and safe to use from
/// concurrent tasks.
pub struct OpenAiGateway {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl OpenAiGateway {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("tribunal/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GatewayError::Other(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            api_key,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn transport_error(error: reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::Network(error.to_string())
    }
}

#[async_trait]
impl CompletionGateway for OpenAiGateway {
    async fn complete(&self, request: &AgentRequest) -> Result<Completion, GatewayError> {
        let body = ChatRequest::from_agent_request(request);
        debug!(endpoint = %self.endpoint, model = body.model, "POST chat completion");

        let mut http = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            http = http.bearer_auth(key);
        }

        let response = http.send().await.map_err(transport_error)?;
        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            return Err(GatewayError::Http {
                status: status.as_u16(),
                body: parse_error_body(&text),
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| GatewayError::Other(format!("malformed completion body: {}", e)))?;
        let model = parsed.model.clone();

        Ok(Completion {
            content: parsed.into_text(),
            model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;
    use tribunal_domain::ErrorKind;

    /// Serve exactly one HTTP response; the handle yields the raw request.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}/v1", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            request
        });

        (base_url, handle)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf);
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
                if buf.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn agent_request() -> AgentRequest {
        AgentRequest::builder("You are a skeptic.", "Topic: AI meal planning app")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_successful_completion() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"{"model":"gpt-4o-mini","choices":[{"message":{"role":"assistant","content":"{\"pains\":[]}"}}]}"#,
        )
        .await;
        let gateway =
            OpenAiGateway::new(&base_url, Some("sk-test".into()), Duration::from_secs(5)).unwrap();

        let completion = gateway.complete(&agent_request()).await.unwrap();

        assert_eq!(completion.content.as_deref(), Some("{\"pains\":[]}"));
        assert_eq!(completion.model.as_deref(), Some("gpt-4o-mini"));

        let raw = server.await.unwrap();
        assert!(raw.starts_with("POST /v1/chat/completions"));
        assert!(raw.to_lowercase().contains("authorization: bearer sk-test"));
        assert!(raw.contains("Topic: AI meal planning app"));
    }

    #[tokio::test]
    async fn test_rate_limit_maps_to_http_error() {
        let (base_url, server) = serve_once(
            "429 Too Many Requests",
            r#"{"error":{"message":"Rate limit reached","type":"requests","code":"rate_limit_exceeded"}}"#,
        )
        .await;
        let gateway = OpenAiGateway::new(&base_url, None, Duration::from_secs(5)).unwrap();

        let error = gateway.complete(&agent_request()).await.unwrap_err();

        match &error {
            GatewayError::Http { status, body } => {
                assert_eq!(*status, 429);
                assert_eq!(body.message.as_deref(), Some("Rate limit reached"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(error.kind(), ErrorKind::RateLimitExceeded);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_quota_body_wins_over_status() {
        let (base_url, server) = serve_once(
            "429 Too Many Requests",
            r#"{"error":{"message":"You exceeded your current quota","type":"insufficient_quota","code":"insufficient_quota"}}"#,
        )
        .await;
        let gateway = OpenAiGateway::new(&base_url, None, Duration::from_secs(5)).unwrap();

        let error = gateway.complete(&agent_request()).await.unwrap_err();

        assert_eq!(error.kind(), ErrorKind::InsufficientQuota);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}/v1", listener.local_addr().unwrap());
        let server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
            drop(socket);
        });
        let gateway = OpenAiGateway::new(&base_url, None, Duration::from_millis(200)).unwrap();

        let error = gateway.complete(&agent_request()).await.unwrap_err();

        assert_eq!(error, GatewayError::Timeout);
        server.abort();
    }

    #[tokio::test]
    async fn test_refused_connection_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}/v1", listener.local_addr().unwrap());
        drop(listener);
        let gateway = OpenAiGateway::new(&base_url, None, Duration::from_secs(5)).unwrap();

        let error = gateway.complete(&agent_request()).await.unwrap_err();

        assert!(matches!(error, GatewayError::Network(_)));
    }

    #[test]
    fn test_endpoint_ignores_trailing_slash() {
        let gateway =
            OpenAiGateway::new("https://api.openai.com/v1/", None, Duration::from_secs(1)).unwrap();
        assert_eq!(gateway.endpoint(), "https://api.openai.com/v1/chat/completions");
    }
}
