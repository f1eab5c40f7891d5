use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use reqwest::Client;
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use tracing::debug;

use crate::error::PrismCentralError;

/// Build an `Authorization` header value for HTTP Basic authentication.
///
/// The credentials are joined with `:` and encoded with the standard padded
/// base64 alphabet. Colons inside either part are passed through untouched.
pub fn basic_auth_header(username: &str, password: &str) -> String {
    let encoded = STANDARD.encode(format!("{username}:{password}"));
    format!("Basic {encoded}")
}

/// Sends serialized trigger payloads to the remote endpoint.
///
/// One POST per call. No retries, no timeout beyond the client's defaults,
/// and the response body is never read.
#[derive(Debug, Clone, Default)]
pub struct TriggerDispatcher {
    client: Client,
}

impl TriggerDispatcher {
    /// Create a dispatcher with a default `reqwest::Client`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dispatcher around an existing client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// POST `body` to `url` with Basic-Auth credentials.
    ///
    /// Returns `Ok(())` only for HTTP 200.
    pub async fn send(
        &self,
        url: &str,
        username: &str,
        password: &str,
        body: Vec<u8>,
    ) -> Result<(), PrismCentralError> {
        debug!(url = %url, bytes = body.len(), "dispatching trigger");

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, basic_auth_header(username, password))
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(PrismCentralError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockTriggerServer;

    #[test]
    fn basic_auth_header_encodes_credentials() {
        assert_eq!(
            basic_auth_header("Aladdin", "open sesame"),
            "Basic QWxhZGRpbjpvcGVuIHNlc2FtZQ=="
        );
    }

    #[test]
    fn basic_auth_header_keeps_colons() {
        for (user, pass) in [
            ("admin", "p:ss:word"),
            ("do:main\\user", ""),
            ("", ":"),
            ("a b", "~!@#$%^&*()"),
        ] {
            let expected = format!("Basic {}", STANDARD.encode(format!("{user}:{pass}")));
            assert_eq!(basic_auth_header(user, pass), expected);

            let decoded = STANDARD
                .decode(basic_auth_header(user, pass).trim_start_matches("Basic "))
                .unwrap();
            assert_eq!(decoded, format!("{user}:{pass}").into_bytes());
        }
    }

    #[tokio::test]
    async fn send_success_on_200() {
        let server = MockTriggerServer::start().await;
        let url = server.url();
        let handle = tokio::spawn(async move { server.respond_once(200, "{}").await });

        let dispatcher = TriggerDispatcher::new();
        dispatcher
            .send(&url, "admin", "secret", br#"{"a":1}"#.to_vec())
            .await
            .unwrap();

        let request = handle.await.unwrap();
        assert_eq!(request.method, "POST");
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(
            request.header("authorization"),
            Some(basic_auth_header("admin", "secret").as_str())
        );
        assert_eq!(request.body, br#"{"a":1}"#);
    }

    #[tokio::test]
    async fn send_rejects_other_2xx() {
        let server = MockTriggerServer::start().await;
        let url = server.url();
        let handle = tokio::spawn(async move { server.respond_once(202, "").await });

        let err = TriggerDispatcher::new()
            .send(&url, "u", "p", b"{}".to_vec())
            .await
            .unwrap_err();
        handle.await.unwrap();

        assert!(matches!(
            err,
            PrismCentralError::UnexpectedStatus { status: 202 }
        ));
    }

    #[tokio::test]
    async fn send_server_error_is_unexpected_status() {
        let server = MockTriggerServer::start().await;
        let url = server.url();
        let handle = tokio::spawn(async move {
            server
                .respond_once(500, r#"{"error":"internal server error"}"#)
                .await
        });

        let err = TriggerDispatcher::new()
            .send(&url, "u", "p", b"{}".to_vec())
            .await
            .unwrap_err();
        handle.await.unwrap();

        assert!(matches!(
            err,
            PrismCentralError::UnexpectedStatus { status: 500 }
        ));
    }

    #[tokio::test]
    async fn send_connection_refused_is_transport() {
        let url = MockTriggerServer::closed_url().await;
        let err = TriggerDispatcher::new()
            .send(&url, "u", "p", b"{}".to_vec())
            .await
            .unwrap_err();
        assert!(matches!(err, PrismCentralError::Transport(_)));
    }

    #[tokio::test]
    async fn send_empty_url_is_transport() {
        let err = TriggerDispatcher::new()
            .send("", "u", "p", b"{}".to_vec())
            .await
            .unwrap_err();
        assert!(matches!(err, PrismCentralError::Transport(_)));
    }
}
