//! Token issuance handler.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::extract::JsonOrForm;
use crate::services::AuthService;
use crate::state::AppState;

/// Login request body.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
}

/// Exchange credentials for an access token.
///
/// # Errors
///
/// Returns 401 for unknown users or wrong passwords, 400 for a malformed body.
pub async fn login(
    State(state): State<AppState>,
    JsonOrForm(body): JsonOrForm<LoginRequest>,
) -> Result<Json<TokenResponse>> {
    let user = AuthService::new(state.pool())
        .login(&body.username, &body.password)
        .await
        .inspect_err(|e| tracing::info!(username = %body.username, error = %e, "Login failed"))?;

    let access_token = state.tokens().issue(user.id)?;
    tracing::info!(user_id = %user.id, "Access token issued");

    Ok(Json(TokenResponse { access_token }))
}
