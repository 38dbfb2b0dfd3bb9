//! Password sign-in and session tokens (HS256 JWT).
//!
//! Auth is optional: without a configured password every request is allowed
//! and sign-in is refused.

use crate::domain::DomainError;
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

const SUBJECT: &str = "scheduler";

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

pub struct AuthService {
    password: Option<String>,
    keys: Option<Keys>,
    ttl_secs: i64,
}

impl AuthService {
    /// `secret` signs the tokens; without one the password is used.
    pub fn new(password: Option<String>, secret: Option<String>, ttl_hours: u64) -> Self {
        let password = password.filter(|p| !p.is_empty());
        let keys = password.as_ref().map(|p| {
            let secret = secret.filter(|s| !s.is_empty()).unwrap_or_else(|| p.clone());
            Keys {
                encoding: EncodingKey::from_secret(secret.as_bytes()),
                decoding: DecodingKey::from_secret(secret.as_bytes()),
            }
        });
        let ttl_secs = i64::try_from(ttl_hours.saturating_mul(3600)).unwrap_or(i64::MAX);
        Self {
            password,
            keys,
            ttl_secs,
        }
    }

    pub fn disabled() -> Self {
        Self::new(None, None, 0)
    }

    /// Lifetime of an issued token, in seconds.
    pub fn token_ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    /// Check the password and issue a session token.
    pub fn sign_in(&self, password: &str) -> Result<String, DomainError> {
        let Some(expected) = self.password.as_deref() else {
            return Err(DomainError::Auth("sign-in is not enabled".into()));
        };
        if password != expected {
            warn!("sign-in rejected: wrong password");
            return Err(DomainError::Auth("incorrect password".into()));
        }
        let token = self.issue(Utc::now().timestamp())?;
        info!(ttl_secs = self.ttl_secs, "issued session token");
        Ok(token)
    }

    fn issue(&self, issued_at: i64) -> Result<String, DomainError> {
        let keys = self
            .keys
            .as_ref()
            .ok_or_else(|| DomainError::Auth("sign-in is not enabled".into()))?;
        let claims = Claims {
            sub: SUBJECT.to_owned(),
            iat: issued_at,
            exp: issued_at.saturating_add(self.ttl_secs),
        };
        jsonwebtoken::encode(&Header::default(), &claims, &keys.encoding)
            .map_err(|e| DomainError::Auth(format!("failed to sign token: {}", e)))
    }

    /// Accept `token` if auth is disabled or it is a valid, unexpired token.
    pub fn verify(&self, token: Option<&str>) -> Result<(), DomainError> {
        let Some(keys) = self.keys.as_ref() else {
            return Ok(());
        };
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| DomainError::Auth("authentication required".into()))?;
        let data = jsonwebtoken::decode::<Claims>(token, &keys.decoding, &Validation::default())
            .map_err(|e| DomainError::Auth(format!("invalid token: {}", e)))?;
        if data.claims.sub != SUBJECT {
            return Err(DomainError::Auth("invalid token subject".into()));
        }
        Ok(())
    }
}
