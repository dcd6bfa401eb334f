//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use wishhub_core::config::AuthConfig;
use wishhub_core::error::AppError;

use super::claims::Claims;

/// Validates bearer credentials against the shared identity-provider secret.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = config.leeway_seconds;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates a bearer token string.
    ///
    /// Checks signature validity and expiration.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::unauthenticated("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => {
                        AppError::unauthenticated("Invalid token format")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::unauthenticated("Invalid token signature")
                    }
                    _ => AppError::unauthenticated(format!("Token validation failed: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use uuid::Uuid;

    fn config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".to_string(),
            leeway_seconds: 5,
        }
    }

    fn token(secret: &str, exp_offset: i64) -> String {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4(),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            iat: now,
            exp: now + exp_offset,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("encode token")
    }

    #[test]
    fn accepts_valid_token() {
        let decoder = JwtDecoder::new(&config());
        let claims = decoder.decode(&token("test-secret", 3600)).expect("valid");
        assert_eq!(claims.name, "Alice");
        assert!(!claims.is_expired());
    }

    #[test]
    fn rejects_wrong_secret() {
        let decoder = JwtDecoder::new(&config());
        let err = decoder.decode(&token("other-secret", 3600)).unwrap_err();
        assert_eq!(err.kind, wishhub_core::error::ErrorKind::Unauthenticated);
    }

    #[test]
    fn rejects_expired_token() {
        let decoder = JwtDecoder::new(&config());
        let err = decoder.decode(&token("test-secret", -3600)).unwrap_err();
        assert_eq!(err.kind, wishhub_core::error::ErrorKind::Unauthenticated);
    }

    #[test]
    fn rejects_garbage() {
        let decoder = JwtDecoder::new(&config());
        assert!(decoder.decode("not-a-token").is_err());
    }
}
