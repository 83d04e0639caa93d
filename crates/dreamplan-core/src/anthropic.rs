//! Minimal client for the Anthropic Messages API.
//!
//! One blocking round trip per call: no retry, no timeout override, no
//! streaming. The base URL is injectable so tests can point at a local fake.

use serde_json::{Value, json};

use crate::relay::RelayError;

/// Production endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
/// Fixed protocol-version header value.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";
/// Fixed model identifier.
pub const MODEL: &str = "claude-3-7-sonnet-20250219";
/// Fixed maximum output size.
pub const MAX_TOKENS: u32 = 4096;

/// HTTP client for the messages endpoint.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    http: reqwest::Client,
    base_url: String,
}

impl AnthropicClient {
    /// Client against the production API.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Client against a custom base URL (fakes in tests, proxies).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Send one user-role message and return the first text block of the
    /// reply.
    ///
    /// Non-success responses become [`RelayError::Upstream`] carrying the
    /// upstream status code and body verbatim.
    pub async fn complete(&self, api_key: &str, prompt: &str) -> Result<String, RelayError> {
        let url = format!("{}/v1/messages", self.base_url.trim_end_matches('/'));
        let body = json!({
            "model": MODEL,
            "max_tokens": MAX_TOKENS,
            "messages": [
                { "role": "user", "content": prompt }
            ]
        });

        let response = self
            .http
            .post(url)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| RelayError::Internal(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read response body".to_owned());
            return Err(RelayError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| RelayError::Internal(e.to_string()))?;

        payload["content"][0]["text"]
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| {
                RelayError::Internal("model response contained no text content".to_owned())
            })
    }
}

impl Default for AnthropicClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Json;
    use axum::http::HeaderMap;
    use axum::routing::post;

    /// Bind a fake messages endpoint on an ephemeral port and return its
    /// base URL.
    async fn fake_upstream(
        handler: impl Fn(HeaderMap, Json<Value>) -> (axum::http::StatusCode, Json<Value>)
        + Clone
        + Send
        + Sync
        + 'static,
    ) -> String {
        let app = axum::Router::new().route(
            "/v1/messages",
            post(move |headers: HeaderMap, body: Json<Value>| {
                let handler = handler.clone();
                async move { handler(headers, body) }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn complete_sends_the_fixed_protocol_fields() {
        let base = fake_upstream(|headers, Json(body)| {
            assert_eq!(headers.get("x-api-key").unwrap(), "sk-ant-test");
            assert_eq!(
                headers.get("anthropic-version").unwrap(),
                ANTHROPIC_VERSION
            );
            assert_eq!(body["model"], MODEL);
            assert_eq!(body["max_tokens"], MAX_TOKENS);
            assert_eq!(body["messages"][0]["role"], "user");
            assert_eq!(body["messages"][0]["content"], "hello");
            (
                axum::http::StatusCode::OK,
                Json(json!({"content": [{"type": "text", "text": "hi back"}]})),
            )
        })
        .await;

        let client = AnthropicClient::with_base_url(base);
        let reply = client.complete("sk-ant-test", "hello").await.unwrap();
        assert_eq!(reply, "hi back");
    }

    #[tokio::test]
    async fn non_success_status_is_forwarded_with_body() {
        let base = fake_upstream(|_, _| {
            (
                axum::http::StatusCode::UNAUTHORIZED,
                Json(json!({"error": {"type": "authentication_error"}})),
            )
        })
        .await;

        let client = AnthropicClient::with_base_url(base);
        let err = client.complete("bad-key", "hello").await.unwrap_err();
        match err {
            RelayError::Upstream { status, body } => {
                assert_eq!(status, 401);
                assert!(body.contains("authentication_error"));
            }
            other => panic!("expected Upstream, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn reply_without_text_content_is_an_internal_error() {
        let base = fake_upstream(|_, _| {
            (
                axum::http::StatusCode::OK,
                Json(json!({"content": []})),
            )
        })
        .await;

        let client = AnthropicClient::with_base_url(base);
        let err = client.complete("k", "hello").await.unwrap_err();
        assert!(matches!(err, RelayError::Internal(_)));
    }

    #[tokio::test]
    async fn unreachable_upstream_is_an_internal_error() {
        let client = AnthropicClient::with_base_url("http://127.0.0.1:1");
        let err = client.complete("k", "hello").await.unwrap_err();
        assert!(matches!(err, RelayError::Internal(_)));
    }
}
