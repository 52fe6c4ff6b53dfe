use async_trait::async_trait;
use http::{
    HeaderMap,
    header,
};
use zxcore::ac::agent::Agent;

use crate::token::{
    SESSION_COOKIE,
    TokenKeys,
};

/// Supplies the agent behind a request.
///
/// This is where authentication is established; the guard only ever
/// consumes the resulting `Agent`.  Anything that cannot be verified
/// yields `Agent::Anonymous` rather than an error.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn identify(&self, headers: &HeaderMap) -> Agent;
}

/// Identifies agents from the signed session token.
#[derive(Clone, Debug)]
pub struct TokenIdentity {
    keys: TokenKeys,
}

impl TokenIdentity {
    pub fn new(keys: TokenKeys) -> Self {
        Self { keys }
    }
}

/// The bearer token if one is provided, otherwise the session cookie.
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    let bearer = headers.get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| match value.split_once(' ') {
            Some(("Bearer", token)) => Some(token.trim()),
            _ => None,
        });
    bearer.or_else(|| headers.get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value)
    )
    .filter(|token| !token.is_empty())
}

#[async_trait]
impl IdentityProvider for TokenIdentity {
    async fn identify(&self, headers: &HeaderMap) -> Agent {
        let Some(token) = session_token(headers) else {
            return Agent::Anonymous;
        };
        match self.keys.verify(token) {
            Ok(principal) => principal.into(),
            Err(e) => {
                log::warn!("rejected session token: {e}");
                Agent::Anonymous
            }
        }
    }
}

#[cfg(test)]
mod test {
    use http::HeaderValue;
    use zxcore::ac::{
        principal::Principal,
        role::Role,
    };
    use super::*;

    fn headers(pairs: &[(header::HeaderName, &str)]) -> anyhow::Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        for (name, value) in pairs {
            headers.append(name.clone(), HeaderValue::from_str(value)?);
        }
        Ok(headers)
    }

    #[test]
    fn token_sources() -> anyhow::Result<()> {
        assert_eq!(session_token(&HeaderMap::new()), None);
        assert_eq!(
            session_token(&headers(&[(header::COOKIE, "theme=dark; admin_session=abc; x=1")])?),
            Some("abc"),
        );
        assert_eq!(
            session_token(&headers(&[(header::COOKIE, "admin_session_old=abc")])?),
            None,
        );
        assert_eq!(
            session_token(&headers(&[(header::COOKIE, "admin_session=")])?),
            None,
        );
        assert_eq!(
            session_token(&headers(&[
                (header::COOKIE, "admin_session=from_cookie"),
                (header::AUTHORIZATION, "Bearer from_header"),
            ])?),
            Some("from_header"),
        );
        assert_eq!(
            session_token(&headers(&[(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")])?),
            None,
        );
        Ok(())
    }

    #[tokio::test]
    async fn identify() -> anyhow::Result<()> {
        let keys = TokenKeys::new(b"secret");
        let identity = TokenIdentity::new(keys.clone());
        let principal = Principal::new("3", "sam@example.com", None, Role::Sales);
        let token = keys.issue(&principal)?;

        let agent = identity.identify(
            &headers(&[(header::COOKIE, format!("admin_session={token}").as_str())])?
        ).await;
        assert_eq!(agent, Agent::Principal(principal));

        let agent = identity.identify(
            &headers(&[(header::COOKIE, "admin_session=forged")])?
        ).await;
        assert_eq!(agent, Agent::Anonymous);

        let agent = identity.identify(&HeaderMap::new()).await;
        assert_eq!(agent, Agent::Anonymous);
        Ok(())
    }
}
