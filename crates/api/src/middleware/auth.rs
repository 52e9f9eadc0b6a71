//! Access token extractor.
//!
//! Guarded handlers add [`RequireAuth`] to their arguments. The token is read
//! from `Authorization: JWT <token>` (the `Bearer` scheme is accepted too),
//! verified, and resolved to a live user.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::error::{AppError, set_sentry_user};
use crate::models::User;
use crate::services::{AuthError, AuthService};
use crate::state::AppState;

/// Authorization schemes accepted for access tokens.
const TOKEN_SCHEMES: &[&str] = &["JWT", "Bearer"];

/// Extractor that requires a valid access token.
///
/// Rejects with `401 {"message": ...}` when the header is missing, the token
/// fails verification, or its subject no longer exists.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireAuth(user): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", user.username)
/// }
/// ```
pub struct RequireAuth(pub User);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingToken)?
            .to_str()
            .map_err(|_| AuthError::InvalidToken("non-ASCII authorization header".to_string()))?;

        let token = parse_authorization(header)?;
        let claims = state.tokens().verify(token)?;
        let user = AuthService::new(state.pool()).current_user(&claims).await?;

        set_sentry_user(&user.id, &user.username);
        tracing::debug!(user_id = %user.id, "Access token accepted");

        Ok(Self(user))
    }
}

/// Split `"<scheme> <token>"` and check the scheme.
fn parse_authorization(header: &str) -> Result<&str, AuthError> {
    let (scheme, token) = header
        .trim()
        .split_once(' ')
        .ok_or_else(|| AuthError::InvalidToken("expected '<scheme> <token>'".to_string()))?;

    if !TOKEN_SCHEMES
        .iter()
        .any(|accepted| scheme.eq_ignore_ascii_case(accepted))
    {
        return Err(AuthError::InvalidToken(format!(
            "unsupported authorization scheme '{scheme}'"
        )));
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::InvalidToken("empty token".to_string()));
    }

    Ok(token)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_jwt_scheme() {
        assert_eq!(parse_authorization("JWT abc.def.ghi").unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_parse_bearer_scheme() {
        assert_eq!(parse_authorization("bearer abc.def.ghi").unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_parse_rejects_unknown_scheme() {
        assert!(matches!(
            parse_authorization("Basic dXNlcjpwYXNz"),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_parse_rejects_bare_token() {
        assert!(parse_authorization("abc.def.ghi").is_err());
        assert!(parse_authorization("JWT   ").is_err());
    }
}
