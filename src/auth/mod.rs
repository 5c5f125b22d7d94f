pub mod password;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::SecurityConfig;
use crate::types::Role;

pub use password::{check_password, hash_password, hash_password_blocking, verify_password, PasswordError};

/// Access tokens authorize `/api/*`; refresh tokens only buy a new pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account email
    pub sub: String,
    pub role: Role,
    pub kind: TokenKind,
    pub exp: i64,
    pub iat: i64,
    pub jti: Uuid,
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid JWT secret")]
    InvalidSecret,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Expected a {expected:?} token")]
    WrongKind { expected: TokenKind },
}

/// Signed credentials handed to the client after login or refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

/// HS256 signer and verifier built from the security config
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenIssuer {
    pub fn from_config(config: &SecurityConfig) -> Result<Self, JwtError> {
        if config.jwt_secret.is_empty() {
            return Err(JwtError::InvalidSecret);
        }
        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl: Duration::hours(config.jwt_expiry_hours as i64),
            refresh_ttl: Duration::days(config.refresh_expiry_days as i64),
        })
    }

    pub fn issue(&self, email: &str, role: Role) -> Result<TokenPair, JwtError> {
        Ok(TokenPair {
            access_token: self.sign(email, role, TokenKind::Access, self.access_ttl)?,
            refresh_token: self.sign(email, role, TokenKind::Refresh, self.refresh_ttl)?,
            token_type: "Bearer".to_string(),
            expires_in: self.access_ttl.num_seconds(),
        })
    }

    /// Verify signature and expiry, then check the token is of the expected kind
    pub fn validate(&self, token: &str, expected: TokenKind) -> Result<Claims, JwtError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|e| JwtError::InvalidToken(e.to_string()))?
            .claims;

        if claims.kind != expected {
            return Err(JwtError::WrongKind { expected });
        }
        Ok(claims)
    }

    fn sign(&self, email: &str, role: Role, kind: TokenKind, ttl: Duration) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            sub: email.to_string(),
            role,
            kind,
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::TokenGeneration(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn issuer() -> TokenIssuer {
        TokenIssuer::from_config(&AppConfig::development().security).unwrap()
    }

    #[test]
    fn access_token_round_trips_claims() {
        let issuer = issuer();
        let pair = issuer.issue("a@x.com", Role::Visitor).unwrap();
        assert_eq!(pair.token_type, "Bearer");
        assert_eq!(pair.expires_in, 24 * 3600);

        let claims = issuer.validate(&pair.access_token, TokenKind::Access).unwrap();
        assert_eq!(claims.sub, "a@x.com");
        assert_eq!(claims.role, Role::Visitor);
    }

    #[test]
    fn refresh_token_is_not_an_access_token() {
        let issuer = issuer();
        let pair = issuer.issue("s@x.com", Role::Supervisor).unwrap();
        assert!(matches!(
            issuer.validate(&pair.refresh_token, TokenKind::Access),
            Err(JwtError::WrongKind { expected: TokenKind::Access })
        ));
        assert!(issuer.validate(&pair.refresh_token, TokenKind::Refresh).is_ok());
    }

    #[test]
    fn tokens_from_another_secret_are_rejected() {
        let mut other = AppConfig::development().security;
        other.jwt_secret = "someone-else".to_string();
        let foreign = TokenIssuer::from_config(&other).unwrap();
        let pair = foreign.issue("a@x.com", Role::Visitor).unwrap();

        assert!(matches!(
            issuer().validate(&pair.access_token, TokenKind::Access),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn empty_secret_is_refused() {
        let config = AppConfig::production().security;
        assert!(matches!(TokenIssuer::from_config(&config), Err(JwtError::InvalidSecret)));
    }
}
