//! HTTP client for `POST /api/generateFrame`
//!
//! Used by the command-line brief form to talk to a running server.

use crate::models::{ErrorBody, GenerationMode, GenerationRequest, GenerationResult};
use crate::{Error, Result};
use reqwest::Client;

/// Shown when the server's error response carries no message.
pub const GENERIC_FAILURE: &str = "Не вдалося згенерувати зображення";

pub struct GatewayClient {
    client: Client,
    base_url: String,
}

impl GatewayClient {
    pub fn new(base_url: String) -> Self {
        Self::new_with_client(base_url, Client::new())
    }

    pub fn new_with_client(base_url: String, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn generate_frame(
        &self,
        query: &str,
        mode: Option<GenerationMode>,
    ) -> Result<GenerationResult> {
        let request = GenerationRequest {
            query: Some(query.to_string()),
            mode,
        };
        let url = format!("{}/api/generateFrame", self.base_url);

        tracing::debug!("Sending generateFrame request to {}", url);

        let response = self.client.post(&url).json(&request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|body| body.error)
                .ok()
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| GENERIC_FAILURE.to_string());
            return Err(Error::Gateway {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_generate_frame_posts_query_and_parses_image() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/generateFrame"))
            .and(body_json(serde_json::json!({ "query": "camera test" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "imageUrl": "https://images.example.com/x.png"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GatewayClient::new(format!("{}/", server.uri()));
        let result = client.generate_frame("camera test", None).await.unwrap();

        assert_eq!(
            result,
            GenerationResult::Image {
                image_url: "https://images.example.com/x.png".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_generate_frame_sends_mode_when_given() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/generateFrame"))
            .and(body_json(
                serde_json::json!({ "query": "scene", "mode": "text" }),
            ))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "result": "frame" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = GatewayClient::new(server.uri());
        let result = client
            .generate_frame("scene", Some(GenerationMode::Text))
            .await
            .unwrap();

        assert_eq!(
            result,
            GenerationResult::Text {
                result: "frame".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_generate_frame_surfaces_server_error_message() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/generateFrame"))
            .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                "error": "Failed to generate image: Rate limit exceeded"
            })))
            .mount(&server)
            .await;

        let client = GatewayClient::new(server.uri());
        let err = client.generate_frame("scene", None).await.unwrap_err();

        match err {
            Error::Gateway { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "Failed to generate image: Rate limit exceeded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_generate_frame_falls_back_to_generic_message() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/generateFrame"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
            .mount(&server)
            .await;

        let client = GatewayClient::new(server.uri());
        let err = client.generate_frame("scene", None).await.unwrap_err();

        assert!(matches!(
            err,
            Error::Gateway { status: 502, ref message } if message == GENERIC_FAILURE
        ));
    }
}
