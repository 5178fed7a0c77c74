use axum::body::Bytes;
use axum::extract::State;
use axum::Json;

use super::AppState;
use crate::gateway::GatewayError;
use crate::models::{GenerationRequest, GenerationResult};

/// handles POST /api/generateFrame
///
/// The body is decoded by hand so a missing or wrong `Content-Type` is
/// accepted and malformed JSON still answers with the `{ error }` envelope.
pub(crate) async fn generate_frame_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<GenerationResult>, GatewayError> {
    let request: GenerationRequest =
        serde_json::from_slice(&body).map_err(|err| state.gateway.reject_body(err))?;

    state.gateway.generate(request).await.map(Json)
}
