use crate::brp_client::BrpClient;
use crate::config::Config;
use crate::errors::AppError;
use crate::pipeline::{handle_family_inquiry, InquiryOutcome};
use crate::resources::ResourceStore;
use crate::xml::decode_envelope;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: ResourceStore,
    pub brp: BrpClient,
}

/// Health check endpoint for deployment probes.
pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "brp-stuf-api",
    }))
}

/// StUF-BG bevragen endpoint.
///
/// Accepts a raw `npsLv01-prs-GezinssituatieOpAdresAanvrager` SOAP envelope
/// and answers with the mapped La01 envelope. On any fail-soft abort,
/// including an undecodable body, the caller gets its own request bytes back
/// unchanged; only mapping and encoding failures surface as error responses.
pub async fn bevragen(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Response, AppError> {
    tracing::debug!("Received StUF bevragen request ({} bytes)", body.len());

    let envelope = match decode_envelope(&body) {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::error!("Inbound envelope could not be decoded: {}", e);
            return Ok(unanswered(body));
        }
    };

    match handle_family_inquiry(&state.store, &state.brp, &envelope).await? {
        InquiryOutcome::Answered(xml) => Ok((
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "application/xml"),
                (header::ACCEPT, "xml"),
            ],
            xml,
        )
            .into_response()),
        InquiryOutcome::Unanswered => Ok(unanswered(body)),
    }
}

/// Fail-soft response: the original inbound payload, unmodified.
fn unanswered(original: String) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/xml")],
        original,
    )
        .into_response()
}
