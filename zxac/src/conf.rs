use clap::Args;
use std::{
    fs,
    path::PathBuf,
    sync::Arc,
};
use zxrbac::Builder as ZxRbacBuilder;

use crate::{
    error::Error,
    identity::TokenIdentity,
    platform::{
        Builder as PlatformBuilder,
        Platform,
    },
    token::TokenKeys,
};

/// Settings shared by the binaries for assembling a [`Platform`].
#[derive(Clone, Debug, Default, Args)]
pub struct PlatformArgs {
    /// Secret for signing session tokens.
    #[clap(long, value_name = "JWT_SECRET", env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: Option<String>,
    /// Used as the signing secret when JWT_SECRET is not set.
    #[clap(long, value_name = "ADMIN_PASSWORD", env = "ADMIN_PASSWORD", hide_env_values = true)]
    pub admin_password: Option<String>,
    /// Policy text replacing the built-in default policy.
    #[clap(long, value_name = "ZXAC_POLICY_FILE", env = "ZXAC_POLICY_FILE")]
    pub policy_file: Option<PathBuf>,
    /// Evaluate through casbin rather than the policy table.
    #[cfg(feature = "casbin")]
    #[clap(long)]
    pub casbin: bool,
}

impl PlatformArgs {
    pub fn secret(&self) -> Result<&[u8], Error> {
        [&self.jwt_secret, &self.admin_password]
            .into_iter()
            .flatten()
            .find(|secret| !secret.is_empty())
            .map(|secret| secret.as_bytes())
            .ok_or_else(|| Error::Misconfiguration(
                "neither JWT_SECRET nor ADMIN_PASSWORD is set".to_string()
            ))
    }

    pub fn token_keys(&self) -> Result<TokenKeys, Error> {
        Ok(TokenKeys::new(self.secret()?))
    }

    pub fn zxrbac_builder(&self) -> Result<ZxRbacBuilder, Error> {
        let builder = match &self.policy_file {
            Some(path) => {
                log::info!("loading policy from {}", path.display());
                ZxRbacBuilder::new()
                    .base_policy(&fs::read_to_string(path)?)
            }
            None => ZxRbacBuilder::new(),
        };
        #[cfg(feature = "casbin")]
        let builder = if self.casbin {
            builder.casbin()
        } else {
            builder
        };
        Ok(builder)
    }

    pub async fn build(&self) -> Result<Arc<Platform>, Error> {
        PlatformBuilder::new()
            .identity(TokenIdentity::new(self.token_keys()?))
            .zxrbac_builder(self.zxrbac_builder()?)
            .build()
            .await
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn secret() {
        let mut args = PlatformArgs::default();
        assert!(matches!(args.secret(), Err(Error::Misconfiguration(_))));

        args.admin_password = Some("hunter2".into());
        assert_eq!(args.secret().ok(), Some(&b"hunter2"[..]));

        args.jwt_secret = Some("".into());
        assert_eq!(args.secret().ok(), Some(&b"hunter2"[..]));

        args.jwt_secret = Some("signing".into());
        assert_eq!(args.secret().ok(), Some(&b"signing"[..]));
    }

    #[tokio::test]
    async fn missing_policy_file() {
        let args = PlatformArgs {
            jwt_secret: Some("signing".into()),
            policy_file: Some("/nonexistent/zxac/policy.txt".into()),
            .. Default::default()
        };
        assert!(matches!(args.build().await, Err(Error::Io(_))));
    }
}
