//! Signed session tokens.
//!
//! The session is a HS256 JWT carried in the [`SESSION_COOKIE`] cookie
//! or an `Authorization: Bearer` header.  Verifying one yields the
//! [`Principal`] it was issued for; the role inside must be one of the
//! known roles or the token is rejected outright.

use chrono::{
    Duration,
    Utc,
};
use jsonwebtoken::{
    Algorithm,
    DecodingKey,
    EncodingKey,
    Header,
    Validation,
    decode,
    encode,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use zxcore::ac::{
    principal::Principal,
    role::Role,
};

use crate::error::Error;

pub const SESSION_COOKIE: &str = "admin_session";

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

impl From<Claims> for Principal {
    fn from(claims: Claims) -> Self {
        Principal::new(claims.sub, claims.email, Some(claims.name), claims.role)
    }
}

#[derive(Clone)]
pub struct TokenKeys {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    lifetime: Duration,
}

impl fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenKeys")
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .field("lifetime", &self.lifetime)
            .finish()
    }
}

impl TokenKeys {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            lifetime: Duration::hours(24),
        }
    }

    pub fn lifetime(mut self, val: Duration) -> Self {
        self.lifetime = val;
        self
    }

    pub fn issue(&self, principal: &Principal) -> Result<String, Error> {
        let now = Utc::now();
        let claims = Claims {
            sub: principal.id.clone(),
            email: principal.email.clone(),
            name: principal.name.clone(),
            role: principal.role,
            iat: now.timestamp(),
            exp: (now + self.lifetime).timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        log::debug!("issued session token for {}", principal.email);
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> Result<Principal, Error> {
        let validation = Validation::new(Algorithm::HS256);
        Ok(decode::<Claims>(token, &self.decoding_key, &validation)?
            .claims
            .into())
    }
}

#[cfg(test)]
mod test {
    use zxcore::ac::principal::Principal;
    use super::*;

    fn principal() -> Principal {
        Principal::new("42", "alice@example.com", Some("Alice".into()), Role::Media)
    }

    #[test]
    fn issue_verify() -> anyhow::Result<()> {
        let keys = TokenKeys::new(b"secret");
        let token = keys.issue(&principal())?;
        assert_eq!(keys.verify(&token)?, principal());
        Ok(())
    }

    #[test]
    fn wrong_secret() -> anyhow::Result<()> {
        let token = TokenKeys::new(b"secret").issue(&principal())?;
        assert!(matches!(
            TokenKeys::new(b"other").verify(&token),
            Err(Error::Token(_)),
        ));
        Ok(())
    }

    #[test]
    fn expired() -> anyhow::Result<()> {
        let keys = TokenKeys::new(b"secret")
            .lifetime(Duration::hours(-2));
        let token = keys.issue(&principal())?;
        assert!(keys.verify(&token).is_err());
        Ok(())
    }

    #[test]
    fn unknown_role() -> anyhow::Result<()> {
        let now = Utc::now().timestamp();
        let token = encode(
            &Header::new(Algorithm::HS256),
            &serde_json::json!({
                "sub": "1",
                "email": "mallory@example.com",
                "name": "mallory",
                "role": "root",
                "iat": now,
                "exp": now + 3600,
            }),
            &EncodingKey::from_secret(b"secret"),
        )?;
        assert!(TokenKeys::new(b"secret").verify(&token).is_err());
        Ok(())
    }

    #[test]
    fn garbage() {
        assert!(TokenKeys::new(b"secret").verify("not.a.token").is_err());
        assert!(TokenKeys::new(b"secret").verify("").is_err());
    }
}
