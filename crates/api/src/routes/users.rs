//! User registration handler.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use super::MessageResponse;
use crate::error::Result;
use crate::extract::JsonOrForm;
use crate::services::AuthService;
use crate::state::AppState;

/// Registration request body.
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// Register a new user.
///
/// # Errors
///
/// Returns 400 if the username is taken or either field is blank.
pub async fn register(
    State(state): State<AppState>,
    JsonOrForm(body): JsonOrForm<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let user = AuthService::new(state.pool())
        .register(&body.username, &body.password)
        .await?;

    tracing::info!(user_id = %user.id, username = %user.username, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User created successfully.")),
    ))
}
