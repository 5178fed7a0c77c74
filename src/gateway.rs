//! Generation gateway
//!
//! Dispatches a [`GenerationRequest`] to exactly one provider operation and
//! maps the outcome onto the `{ imageUrl }` / `{ result }` / `{ error }`
//! envelopes. Requests are independent: no retry, no queueing, and a provider
//! failure ends the request immediately.

use crate::ai::{ChatService, ImageGenerationService, OpenAiChatClient, OpenAiImageClient};
use crate::models::{Config, ErrorBody, GenerationMode, GenerationRequest, GenerationResult};
use crate::reporting::{ErrorReporter, TracingReporter};
use crate::Error;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;
use tracing::{error, info, warn, Instrument};
use uuid::Uuid;

pub const IMAGE_QUERY_REQUIRED: &str = "Query (prompt) is required for image generation";
pub const IMAGE_INTERNAL_ERROR: &str = "Failed to generate image due to an internal server error";
pub const TEXT_QUERY_REQUIRED: &str = "Query is required";
pub const TEXT_GENERATION_FAILED: &str = "Failed to generate frame";

/// Error envelope returned to callers of the gateway.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} (status {status})")]
pub struct GatewayError {
    pub status: StatusCode,
    pub message: String,
}

impl GatewayError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// Injectable service bundle used to construct [`Gateway`] in tests/harnesses.
pub struct GatewayServices {
    pub image: Arc<dyn ImageGenerationService>,
    pub chat: Arc<dyn ChatService>,
    pub reporter: Arc<dyn ErrorReporter>,
}

pub struct Gateway {
    image: Arc<dyn ImageGenerationService>,
    chat: Arc<dyn ChatService>,
    reporter: Arc<dyn ErrorReporter>,
    default_mode: GenerationMode,
}

impl Gateway {
    pub fn with_services(services: GatewayServices, default_mode: GenerationMode) -> Self {
        Self {
            image: services.image,
            chat: services.chat,
            reporter: services.reporter,
            default_mode,
        }
    }

    /// Build OpenAI-backed services from configuration.
    pub fn from_config(config: &Config) -> Self {
        // Reuse one HTTP connection pool across provider clients.
        let http_client = reqwest::Client::new();

        info!(
            "Image provider: OpenAI (model: {}), chat provider: OpenAI (model: {})",
            config.image_model, config.chat_model
        );

        let image = OpenAiImageClient::new_with_client(
            config.openai_api_key.clone(),
            config.image_model.clone(),
            http_client.clone(),
        )
        .with_base_url(config.openai_base_url.clone());

        let chat = OpenAiChatClient::new_with_client(
            config.openai_api_key.clone(),
            config.chat_model.clone(),
            http_client,
        )
        .with_base_url(config.openai_base_url.clone());

        Self::with_services(
            GatewayServices {
                image: Arc::new(image),
                chat: Arc::new(chat),
                reporter: Arc::new(TracingReporter),
            },
            config.generation_mode,
        )
    }

    pub fn default_mode(&self) -> GenerationMode {
        self.default_mode
    }

    /// Run one generation request. The request's `mode` wins over the default.
    pub async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResult, GatewayError> {
        let mode = request.mode.unwrap_or(self.default_mode);
        let span = tracing::info_span!("generate_frame", request_id = %Uuid::new_v4(), %mode);

        async move {
            match mode {
                GenerationMode::Image => self.generate_image(request.query).await,
                GenerationMode::Text => self.generate_text(request.query).await,
            }
        }
        .instrument(span)
        .await
    }

    /// Answer a request whose body could not be decoded. The failure is
    /// reported and surfaces as the default mode's internal error.
    pub fn reject_body(&self, err: serde_json::Error) -> GatewayError {
        let err = Error::from(err);
        error!(error = %err, mode = %self.default_mode, "Failed to decode generateFrame request body");
        self.reporter.capture(&err, "decode_request");

        match self.default_mode {
            GenerationMode::Image => GatewayError::internal(IMAGE_INTERNAL_ERROR),
            GenerationMode::Text => GatewayError::internal(TEXT_GENERATION_FAILED),
        }
    }

    async fn generate_image(&self, query: Option<String>) -> Result<GenerationResult, GatewayError> {
        let Some(query) = query.filter(|q| !q.is_empty()) else {
            warn!("Empty query received for image generation");
            return Err(GatewayError::bad_request(IMAGE_QUERY_REQUIRED));
        };

        info!(query = %query, "Generating image for prompt");

        match self.image.generate_image(&query).await {
            Ok(image_url) => {
                info!(image_url = %image_url, "Image generated successfully");
                Ok(GenerationResult::Image { image_url })
            }
            Err(err) => {
                error!(error = %err, query = %query, "Error generating image");
                self.reporter.capture(&err, "generate_image");
                Err(image_failure(&err))
            }
        }
    }

    async fn generate_text(&self, query: Option<String>) -> Result<GenerationResult, GatewayError> {
        let Some(query) = query.filter(|q| !q.is_empty()) else {
            warn!("Empty query received for frame description");
            return Err(GatewayError::bad_request(TEXT_QUERY_REQUIRED));
        };

        info!(query = %query, "Generating frame description");

        match self.chat.describe_frame(&query).await {
            Ok(result) => {
                info!(result = %result, "Frame description generated successfully");
                Ok(GenerationResult::Text { result })
            }
            Err(err) => {
                error!(error = %err, query = %query, "Error generating frame description");
                self.reporter.capture(&err, "describe_frame");
                Err(GatewayError::internal(TEXT_GENERATION_FAILED))
            }
        }
    }
}

/// Structured provider errors keep their status and message; anything else
/// collapses to a generic 500.
fn image_failure(err: &Error) -> GatewayError {
    match err {
        Error::Api(api) => {
            error!(
                status = ?api.status,
                code = ?api.code,
                error_type = ?api.kind,
                message = %api.message,
                "OpenAI API error details"
            );
            let status = api
                .status
                .and_then(|status| StatusCode::from_u16(status).ok())
                .filter(|status| status.is_client_error() || status.is_server_error())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            GatewayError::new(status, format!("Failed to generate image: {}", api.message))
        }
        _ => GatewayError::internal(IMAGE_INTERNAL_ERROR),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{MockChatClient, MockImageGenerationClient};
    use crate::error::ApiError;
    use crate::reporting::MockErrorReporter;

    struct Probes {
        image: MockImageGenerationClient,
        chat: MockChatClient,
        reporter: MockErrorReporter,
    }

    fn build_gateway(
        image: MockImageGenerationClient,
        chat: MockChatClient,
        mode: GenerationMode,
    ) -> (Gateway, Probes) {
        let reporter = MockErrorReporter::new();
        let probes = Probes {
            image: image.clone(),
            chat: chat.clone(),
            reporter: reporter.clone(),
        };
        let gateway = Gateway::with_services(
            GatewayServices {
                image: Arc::new(image),
                chat: Arc::new(chat),
                reporter: Arc::new(reporter),
            },
            mode,
        );
        (gateway, probes)
    }

    #[tokio::test]
    async fn test_image_missing_query_is_bad_request_without_provider_call() {
        let (gateway, probes) = build_gateway(
            MockImageGenerationClient::new(),
            MockChatClient::new(),
            GenerationMode::Image,
        );

        for request in [
            GenerationRequest::default(),
            GenerationRequest::new(""),
        ] {
            let err = gateway.generate(request).await.unwrap_err();
            assert_eq!(err.status, StatusCode::BAD_REQUEST);
            assert_eq!(err.message, IMAGE_QUERY_REQUIRED);
        }

        assert_eq!(probes.image.get_call_count(), 0);
        assert_eq!(probes.reporter.get_capture_count(), 0);
    }

    #[tokio::test]
    async fn test_image_success_returns_first_url() {
        let (gateway, probes) = build_gateway(
            MockImageGenerationClient::new()
                .with_image_url("https://images.example.com/frame.png".to_string()),
            MockChatClient::new(),
            GenerationMode::Image,
        );

        let result = gateway
            .generate(GenerationRequest::new("camera on a crane"))
            .await
            .unwrap();

        assert_eq!(
            result,
            GenerationResult::Image {
                image_url: "https://images.example.com/frame.png".to_string()
            }
        );
        assert_eq!(probes.image.get_prompts(), vec!["camera on a crane".to_string()]);
        assert_eq!(probes.chat.get_call_count(), 0);
    }

    #[tokio::test]
    async fn test_image_structured_error_passes_status_through() {
        let (gateway, probes) = build_gateway(
            MockImageGenerationClient::new().with_api_error(
                ApiError::new(Some(429), "Rate limit exceeded")
                    .with_code("rate_limit_exceeded")
                    .with_kind("requests"),
            ),
            MockChatClient::new(),
            GenerationMode::Image,
        );

        let err = gateway
            .generate(GenerationRequest::new("film scene"))
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(err.message, "Failed to generate image: Rate limit exceeded");
        assert_eq!(probes.reporter.get_capture_count(), 1);
        assert_eq!(probes.reporter.get_captured()[0].0, "generate_image");
    }

    #[tokio::test]
    async fn test_image_structured_error_without_status_defaults_to_500() {
        let (gateway, _probes) = build_gateway(
            MockImageGenerationClient::new()
                .with_api_error(ApiError::new(None, "Connection error.")),
            MockChatClient::new(),
            GenerationMode::Image,
        );

        let err = gateway
            .generate(GenerationRequest::new("film scene"))
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Failed to generate image: Connection error.");
    }

    #[tokio::test]
    async fn test_image_unstructured_error_is_generic_500() {
        let (gateway, probes) = build_gateway(
            MockImageGenerationClient::new().with_failure("no data".to_string()),
            MockChatClient::new(),
            GenerationMode::Image,
        );

        let err = gateway
            .generate(GenerationRequest::new("film scene"))
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, IMAGE_INTERNAL_ERROR);
        assert_eq!(probes.reporter.get_capture_count(), 1);
    }

    #[tokio::test]
    async fn test_text_mode_success() {
        let (gateway, probes) = build_gateway(
            MockImageGenerationClient::new(),
            MockChatClient::new().with_description("Wide shot, 35mm, soft key".to_string()),
            GenerationMode::Text,
        );

        let result = gateway
            .generate(GenerationRequest::new("interview"))
            .await
            .unwrap();

        assert_eq!(
            result,
            GenerationResult::Text {
                result: "Wide shot, 35mm, soft key".to_string()
            }
        );
        assert_eq!(probes.image.get_call_count(), 0);
    }

    #[tokio::test]
    async fn test_text_mode_missing_query() {
        let (gateway, probes) = build_gateway(
            MockImageGenerationClient::new(),
            MockChatClient::new(),
            GenerationMode::Text,
        );

        let err = gateway
            .generate(GenerationRequest::default())
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, TEXT_QUERY_REQUIRED);
        assert_eq!(probes.chat.get_call_count(), 0);
    }

    #[tokio::test]
    async fn test_text_mode_ignores_provider_status() {
        let (gateway, probes) = build_gateway(
            MockImageGenerationClient::new(),
            MockChatClient::new().with_api_error(ApiError::new(Some(429), "Rate limit exceeded")),
            GenerationMode::Text,
        );

        let err = gateway
            .generate(GenerationRequest::new("interview"))
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, TEXT_GENERATION_FAILED);
        assert_eq!(probes.reporter.get_captured()[0].0, "describe_frame");
    }

    #[tokio::test]
    async fn test_request_mode_overrides_default() {
        let (gateway, probes) = build_gateway(
            MockImageGenerationClient::new(),
            MockChatClient::new(),
            GenerationMode::Image,
        );

        let result = gateway
            .generate(GenerationRequest::new("scene").with_mode(GenerationMode::Text))
            .await
            .unwrap();

        assert!(matches!(result, GenerationResult::Text { .. }));
        assert_eq!(probes.chat.get_call_count(), 1);
        assert_eq!(probes.image.get_call_count(), 0);
    }

    #[test]
    fn test_reject_body_reports_and_uses_mode_message() {
        let decode_err = || serde_json::from_str::<GenerationRequest>("{not json").unwrap_err();

        let (gateway, probes) = build_gateway(
            MockImageGenerationClient::new(),
            MockChatClient::new(),
            GenerationMode::Image,
        );
        let err = gateway.reject_body(decode_err());
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, IMAGE_INTERNAL_ERROR);
        assert_eq!(probes.reporter.get_captured()[0].0, "decode_request");

        let (gateway, probes) = build_gateway(
            MockImageGenerationClient::new(),
            MockChatClient::new(),
            GenerationMode::Text,
        );
        let err = gateway.reject_body(decode_err());
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, TEXT_GENERATION_FAILED);
        assert_eq!(probes.reporter.get_capture_count(), 1);
    }

    #[test]
    fn test_image_failure_ignores_non_error_status() {
        let err = image_failure(&Error::Api(ApiError::new(Some(200), "odd")));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
