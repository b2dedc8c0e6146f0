use axum::{extract::FromRequestParts, http::header};

use crate::{error::AppError, state::AppState};

/// Identity carried by a verified bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
    pub email: String,
}

/// Pulls the token out of `Authorization: Bearer <token>`. A missing header
/// or an empty token is a 401; anything else is checked by the verifier.
pub fn bearer_token(value: Option<&str>) -> Result<&str, AppError> {
    let missing = || AppError::Unauthorized("Token no proporcionado".into());
    let raw = value.ok_or_else(missing)?;
    let token = raw.split_whitespace().nth(1).ok_or_else(missing)?;
    Ok(token)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .map(|value| {
                value
                    .to_str()
                    .map_err(|_| AppError::Forbidden("Token inválido".into()))
            })
            .transpose()?;

        let token = bearer_token(header_value)?;
        let claims = state.tokens.verify(token)?;

        Ok(AuthUser {
            user_id: claims.id,
            email: claims.email,
        })
    }
}
