//! Forwarder handlers.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::Value;

use crate::api::state::AppState;
use crate::domain::{AddAliasRequest, DataResponse, EmailData, MessageResponse};
use crate::error::{AppError, Result};

/// Generate an alias and create its forwarder.
///
/// The request body's `domain` field carries the comma-separated options.
///
/// # Errors
///
/// Returns 400 for a malformed body, 412 for invalid options, and 500 when the
/// provider call fails.
pub async fn add(
    State(state): State<AppState>,
    payload: std::result::Result<Json<AddAliasRequest>, JsonRejection>,
) -> Result<Json<DataResponse<EmailData>>> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let created = state.forwarder_service.create(&request.domain).await?;

    Ok(Json(DataResponse::new(EmailData {
        email: created.email(),
    })))
}

/// List the forwarders of a domain, answering with the provider's status.
///
/// # Errors
///
/// Returns 500 when the provider call fails.
pub async fn list(
    State(state): State<AppState>,
    Path(domain): Path<String>,
) -> Result<(StatusCode, Json<Value>)> {
    let (status, forwarders) = state.forwarder_service.list(&domain).await?;
    Ok((status, Json(forwarders)))
}

/// Delete the forwarder for an `alias@domain` address.
///
/// # Errors
///
/// Returns 400 for a malformed address and 500 when the provider call fails.
pub async fn remove(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let status = state.forwarder_service.delete(&email).await?;
    Ok((status, Json(MessageResponse::new("Deleted."))))
}
