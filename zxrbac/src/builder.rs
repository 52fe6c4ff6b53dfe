use zxcore::ac::traits::Enforcer;
use crate::{
    error::Error,
    simple::TableEnforcer,
    table::{
        DEFAULT_POLICY,
        PolicyTable,
    },
};
#[cfg(feature = "casbin")]
use crate::casbin::{
    CasbinEnforcer,
    DEFAULT_MODEL,
};

#[derive(Clone, Debug, Default)]
pub(crate) enum Kind {
    #[default]
    Table,
    #[cfg(feature = "casbin")]
    Casbin {
        model: Box<str>,
    },
}

/// Builds a role-based access controller (RBAC) for the back-office.
///
/// Methods can be chained in order to set the configuration values.
/// The `Enforcer` is constructed by calling [`build`].
///
/// New instances of the builder can be obtained via `Builder::default`
/// or `Builder::new`.  The former provides an empty policy which denies
/// everything while the latter provides the default policy.
///
/// [`build`]: Builder::build
#[derive(Clone, Debug, Default)]
pub struct Builder {
    pub(crate) base_policy: Box<str>,
    pub(crate) kind: Kind,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            base_policy: DEFAULT_POLICY.into(),
            .. Default::default()
        }
    }

    pub fn base_policy(mut self, val: &str) -> Self {
        self.base_policy = val.into();
        self
    }

    #[cfg(feature = "casbin")]
    pub fn casbin(mut self) -> Self {
        self.kind = Kind::Casbin { model: DEFAULT_MODEL.into() };
        self
    }

    #[cfg(feature = "casbin")]
    pub fn casbin_model(mut self, val: &str) -> Self {
        self.kind = Kind::Casbin { model: val.into() };
        self
    }

    /// Parses the base policy into its table without building an
    /// enforcer.
    pub fn table(&self) -> Result<PolicyTable, Error> {
        PolicyTable::new(&self.base_policy)
    }

    pub async fn build(&self) -> Result<Box<dyn Enforcer>, Error> {
        log::trace!("building a {}Enforcer", self.kind);
        let table = self.table()?;
        Ok(match &self.kind {
            Kind::Table => Box::new(TableEnforcer::from(table)),
            #[cfg(feature = "casbin")]
            Kind::Casbin { model } => Box::new(
                CasbinEnforcer::new(&table, model).await?
            ),
        })
    }
}

mod display {
    use std::fmt::{Display, Formatter, Result};
    use super::Kind;

    impl Display for Kind {
        fn fmt(&self, f: &mut Formatter<'_>) -> Result {
            match self {
                Kind::Table => f.write_str("Table"),
                #[cfg(feature = "casbin")]
                Kind::Casbin { .. } => f.write_str("Casbin"),
            }
        }
    }
}

#[cfg(test)]
mod test {
    use zxcore::ac::{
        action::Action,
        agent::Agent,
        decision::Decision,
        principal::Principal,
        resource::Resource,
        role::Role,
    };
    use super::*;

    #[tokio::test]
    async fn default_denies_everything() -> anyhow::Result<()> {
        let enforcer = Builder::default().build().await?;
        let agent: Agent = Principal::new("1", "root@example.com", None, Role::SuperAdmin).into();
        assert_eq!(
            enforcer.enforce(&agent, Resource::Audit, Action::Read),
            Decision::Denied,
        );
        Ok(())
    }

    #[tokio::test]
    async fn custom_policy() -> anyhow::Result<()> {
        let enforcer = Builder::new()
            .base_policy("marketing, audit:read")
            .build()
            .await?;
        let marketing: Agent = Principal::new("2", "m@example.com", None, Role::Marketing).into();
        let root: Agent = Principal::new("1", "root@example.com", None, Role::SuperAdmin).into();
        assert_eq!(
            enforcer.enforce(&marketing, Resource::Audit, Action::Read),
            Decision::Allowed,
        );
        assert_eq!(
            enforcer.enforce(&root, Resource::Audit, Action::Read),
            Decision::Denied,
        );
        Ok(())
    }

    #[tokio::test]
    async fn bad_policy() {
        assert!(matches!(
            Builder::new()
                .base_policy("nobody, audit:read")
                .build()
                .await,
            Err(Error::Policy { line: 1, .. }),
        ));
    }

    #[cfg(feature = "casbin")]
    #[tokio::test]
    async fn casbin_kind() -> anyhow::Result<()> {
        let enforcer = Builder::new()
            .casbin()
            .build()
            .await?;
        let media: Agent = Principal::new("3", "press@example.com", None, Role::Media).into();
        assert_eq!(
            enforcer.enforce(&media, Resource::Blog, Action::Publish),
            Decision::Allowed,
        );
        assert_eq!(
            enforcer.enforce(&media, Resource::Sales, Action::Read),
            Decision::Denied,
        );
        Ok(())
    }
}
