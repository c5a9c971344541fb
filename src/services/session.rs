//! Stateless session tokens (JWT, HS256).

use anyhow::{Context, Result};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::account_service::UserSummary;

const SESSION_LIFETIME_DAYS: i64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

pub struct SessionTokens {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SessionTokens {
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn issue(&self, user: &UserSummary) -> Result<String> {
        let now = chrono::Utc::now();
        let claims = SessionClaims {
            user_id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: (now + chrono::Duration::days(SESSION_LIFETIME_DAYS)).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding).context("Failed to sign session token")
    }

    /// Returns the claims if the token is well-formed, correctly signed and
    /// not expired.
    pub fn verify(&self, token: &str) -> Option<SessionClaims> {
        decode::<SessionClaims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> UserSummary {
        UserSummary {
            id: 7,
            name: "Maxim Tsigalko".to_string(),
            email: "user@mail.com".to_string(),
        }
    }

    #[test]
    fn issued_token_verifies() {
        let tokens = SessionTokens::new("a-secret-long-enough-for-testing-purposes");
        let token = tokens.issue(&summary()).unwrap();
        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.email, "user@mail.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let issuer = SessionTokens::new("a-secret-long-enough-for-testing-purposes");
        let verifier = SessionTokens::new("a-different-secret-also-long-enough-here");
        let token = issuer.issue(&summary()).unwrap();
        assert!(verifier.verify(&token).is_none());
    }

    #[test]
    fn garbage_token_is_rejected() {
        let tokens = SessionTokens::new("a-secret-long-enough-for-testing-purposes");
        assert!(tokens.verify("not.a.jwt").is_none());
    }
}
