use chrono::{TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::{
    dto::auth::Claims,
    error::{AppError, AppResult},
};

/// Signing material for bearer tokens, built once from the shared secret.
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: TimeDelta,
}

impl TokenKeys {
    pub fn new(secret: &str, ttl: TimeDelta) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn issue(&self, user_id: &str, email: &str) -> AppResult<String> {
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

        let claims = Claims {
            id: user_id.to_string(),
            email: email.to_string(),
            iat: now.timestamp() as usize,
            exp: expiration.timestamp() as usize,
        };
        self.sign(&claims)
    }

    pub fn sign(&self, claims: &Claims) -> AppResult<String> {
        encode(&Header::default(), claims, &self.encoding)
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
    }

    /// Bad signature, malformed input and expiry all map to 403.
    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|err| {
                tracing::warn!(error = %err, "rejected bearer token");
                AppError::Forbidden("Token inválido".into())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_verifies_with_same_secret() {
        let keys = TokenKeys::new("s3cret", TimeDelta::hours(24));
        let token = keys.issue("u-1", "ana@example.com").unwrap();
        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.id, "u-1");
        assert_eq!(claims.email, "ana@example.com");
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn token_from_other_secret_is_forbidden() {
        let token = TokenKeys::new("one", TimeDelta::hours(24)).issue("u-1", "a@b.c").unwrap();
        let err = TokenKeys::new("two", TimeDelta::hours(24)).verify(&token).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn expired_token_is_forbidden() {
        let keys = TokenKeys::new("s3cret", TimeDelta::hours(24));
        let past = Utc::now() - TimeDelta::hours(3);
        let token = keys
            .sign(&Claims {
                id: "u-1".into(),
                email: "a@b.c".into(),
                iat: (past - TimeDelta::hours(24)).timestamp() as usize,
                exp: past.timestamp() as usize,
            })
            .unwrap();
        assert!(matches!(keys.verify(&token), Err(AppError::Forbidden(_))));
    }

    #[test]
    fn garbage_is_forbidden() {
        let keys = TokenKeys::new("s3cret", TimeDelta::hours(24));
        assert!(matches!(keys.verify("not-a-jwt"), Err(AppError::Forbidden(_))));
    }
}
