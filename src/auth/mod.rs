pub mod guard;

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::models::user::Role;

/// Claims carried by the identity service's bearer tokens. The token only
/// proves identity; the caller's role always comes from the stored profile.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

/// Verified caller identity: token subject resolved to a stored profile
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub name: Option<String>,
}

impl AuthUser {
    /// Display name for audit records
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

/// Verifies bearer credentials issued by the identity service.
/// Signature and expiry checks only; profile resolution happens in the
/// auth middleware.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Decode and verify a bearer token. Any failure (bad signature,
    /// malformed, expired) collapses to a single error string; the caller
    /// maps it to an authentication failure.
    pub fn verify(&self, token: &str) -> Result<Claims, String> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| format!("Invalid bearer token: {}", e))?;
        Ok(token_data.claims)
    }
}

/// Extract the bearer token from an Authorization header value
pub fn extract_bearer(header_value: Option<&str>) -> Result<&str, String> {
    let value = header_value.ok_or_else(|| "Missing Authorization header".to_string())?;

    match value.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        Some(_) => Err("Empty bearer token".to_string()),
        None => Err("Authorization header must use Bearer token format".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn mint(secret: &str, exp_offset: Duration) -> String {
        let now = Utc::now();
        let claims = Claims {
            sub: "uid-1".to_string(),
            email: "dana@example.com".to_string(),
            exp: (now + exp_offset).timestamp(),
            iat: now.timestamp(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn verifies_valid_token() {
        let verifier = TokenVerifier::new("test-secret");
        let claims = verifier.verify(&mint("test-secret", Duration::hours(1))).unwrap();
        assert_eq!(claims.sub, "uid-1");
        assert_eq!(claims.email, "dana@example.com");
    }

    #[test]
    fn rejects_wrong_secret_and_expired() {
        let verifier = TokenVerifier::new("test-secret");
        assert!(verifier.verify(&mint("other-secret", Duration::hours(1))).is_err());
        assert!(verifier.verify(&mint("test-secret", Duration::hours(-1))).is_err());
        assert!(verifier.verify("not-a-token").is_err());
    }

    #[test]
    fn bearer_extraction() {
        assert_eq!(extract_bearer(Some("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
        assert!(extract_bearer(Some("Basic dXNlcg==")).is_err());
        assert!(extract_bearer(Some("Bearer   ")).is_err());
        assert!(extract_bearer(None).is_err());
    }
}
