//! HTTP adapter for the inference gateway port.

use crate::inference::error::{InferenceError, Result};
use crate::inference::protocol::InferenceRequest;
use async_trait::async_trait;
use curio_application::ports::inference_gateway::{GatewayError, InferenceGateway};
use curio_domain::Message;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Signs outgoing request bodies with a shared secret.
///
/// Deployments whose proxy verifies a keyed hash of the body plug one in;
/// without a configured secret the client carries no signer and requests go
/// out unsigned.
pub trait RequestSigner: Send + Sync {
    /// Produce the signature for `body`, sent in the `X-Signature` header.
    fn sign(&self, body: &[u8]) -> String;
}

/// reqwest-based client for the remote identification endpoint.
///
/// One POST per send: the full message history goes out as JSON and the
/// whole response body comes back verbatim as the reply text.
pub struct HttpInferenceClient {
    client: reqwest::Client,
    endpoint: String,
    signer: Option<Arc<dyn RequestSigner>>,
}

impl HttpInferenceClient {
    /// Create a client for `endpoint` with the given request timeout.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            signer: None,
        })
    }

    /// Attach a request signer.
    pub fn with_signer(mut self, signer: Arc<dyn RequestSigner>) -> Self {
        self.signer = Some(signer);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post_history(&self, history: &[Message]) -> Result<String> {
        let body = serde_json::to_vec(&InferenceRequest::from_history(history))?;
        debug!("POST {} ({} bytes)", self.endpoint, body.len());

        let mut request = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if let Some(signer) = &self.signer {
            request = request.header("X-Signature", signer.sign(&body));
        }

        let response = request.body(body).send().await.map_err(map_transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InferenceError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        // The endpoint replies with plain text, not JSON
        let reply = response.text().await.map_err(map_transport)?;
        info!("Endpoint replied with {} bytes", reply.len());
        Ok(reply)
    }
}

fn map_transport(e: reqwest::Error) -> InferenceError {
    if e.is_timeout() {
        InferenceError::Timeout
    } else {
        InferenceError::TransportError(e)
    }
}

#[async_trait]
impl InferenceGateway for HttpInferenceClient {
    async fn complete(&self, history: &[Message]) -> std::result::Result<String, GatewayError> {
        self.post_history(history).await.map_err(|e| match e {
            InferenceError::Timeout => GatewayError::Timeout,
            InferenceError::HttpStatus { status, body } => {
                GatewayError::RequestFailed(format!("HTTP {status}: {body}"))
            }
            InferenceError::SerializationError(e) => GatewayError::RequestFailed(e.to_string()),
            InferenceError::TransportError(e) => GatewayError::ConnectionError(e.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curio_domain::{ChatSession, Role};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    /// Read one HTTP request (headers + content-length body) off the socket.
    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            if let Some(header_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
                let content_length = headers
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Serve exactly one request with the given status line and body,
    /// returning what the client sent.
    fn one_shot_server(
        listener: TcpListener,
        status_line: &'static str,
        reply: &'static str,
    ) -> tokio::task::JoinHandle<String> {
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let head = format!(
                "{status_line}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n",
                reply.len()
            );
            socket.write_all(head.as_bytes()).await.unwrap();
            socket.write_all(reply.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            request
        })
    }

    fn question_session() -> ChatSession {
        let mut session = ChatSession::new();
        session
            .append_message(Role::User, Some("What is this?".to_string()), None)
            .unwrap();
        session
    }

    #[tokio::test]
    async fn test_posts_json_history_and_returns_raw_body() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = one_shot_server(listener, "HTTP/1.1 200 OK", "This is a Ming vase");

        let client =
            HttpInferenceClient::new(format!("http://{addr}"), Duration::from_secs(5)).unwrap();
        let session = question_session();

        let reply = client.complete(session.messages()).await.unwrap();
        assert_eq!(reply, "This is a Ming vase");

        let request = server.await.unwrap();
        assert!(request.starts_with("POST / HTTP/1.1"));
        assert!(request.to_lowercase().contains("content-type: application/json"));
        assert!(request.contains("\"role\":\"user\""));
        assert!(request.contains("\"message\":\"What is this?\""));
    }

    #[tokio::test]
    async fn test_error_status_surfaces_as_request_failed() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = one_shot_server(
            listener,
            "HTTP/1.1 500 Internal Server Error",
            "proxy exploded",
        );

        let client =
            HttpInferenceClient::new(format!("http://{addr}"), Duration::from_secs(5)).unwrap();
        let session = question_session();

        let result = client.complete(session.messages()).await;
        match result {
            Err(GatewayError::RequestFailed(detail)) => {
                assert!(detail.contains("500"));
                assert!(detail.contains("proxy exploded"));
            }
            other => panic!("expected RequestFailed, got {other:?}"),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_a_connection_error() {
        // Bind and drop to get a port nothing listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client =
            HttpInferenceClient::new(format!("http://{addr}"), Duration::from_secs(5)).unwrap();
        let session = question_session();

        let result = client.complete(session.messages()).await;
        assert!(matches!(result, Err(GatewayError::ConnectionError(_))));
    }

    #[tokio::test]
    async fn test_signer_adds_signature_header() {
        struct StaticSigner;
        impl RequestSigner for StaticSigner {
            fn sign(&self, _body: &[u8]) -> String {
                "sig-abc123".to_string()
            }
        }

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = one_shot_server(listener, "HTTP/1.1 200 OK", "ok");

        let client = HttpInferenceClient::new(format!("http://{addr}"), Duration::from_secs(5))
            .unwrap()
            .with_signer(Arc::new(StaticSigner));
        let session = question_session();

        client.complete(session.messages()).await.unwrap();

        let request = server.await.unwrap();
        assert!(request.to_lowercase().contains("x-signature: sig-abc123"));
    }
}
