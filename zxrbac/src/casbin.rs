use casbin::{
    CoreApi,
    DefaultModel,
    MemoryAdapter,
    MgmtApi,
};
use enumset::EnumSet;
use zxcore::ac::{
    action::Action,
    agent::Agent,
    decision::Decision,
    resource::Resource,
    role::Role,
    traits::Enforcer,
};

use crate::table::PolicyTable;

/// The casbin model for the admin back-office.
///
/// Only exact matches; the policy table has already expanded every
/// wildcard so none of the casbin key matching functions are used.
pub const DEFAULT_MODEL: &str = "\
[request_definition]
r = sub, res, act

[policy_definition]
p = sub, res, act

[policy_effect]
e = some(where (p.eft == allow))

[matchers]
m = r.sub == p.sub && r.res == p.res && r.act == p.act
";

/// Enforcer backed by casbin, loaded with every permit of a
/// [`PolicyTable`].
pub struct CasbinEnforcer {
    enforcer: casbin::Enforcer,
}

impl CasbinEnforcer {
    pub async fn new(
        table: &PolicyTable,
        model: &str,
    ) -> Result<Self, casbin::Error> {
        let m = DefaultModel::from_str(model).await?;
        let a = MemoryAdapter::default();
        let mut enforcer = casbin::Enforcer::new(m, a).await?;
        let policies = EnumSet::<Role>::all()
            .iter()
            .flat_map(|role| table.permits(role)
                .into_iter()
                .map(move |permit| vec![
                    role.to_string(),
                    permit.resource.to_string(),
                    permit.action.to_string(),
                ])
            )
            .collect::<Vec<_>>();
        let n = policies.len();
        if n > 0 {
            enforcer.add_named_policies("p", policies).await?;
        }
        log::debug!("new CasbinEnforcer set up with {n} policies");
        Ok(Self { enforcer })
    }

    fn to_subject(agent: &Agent) -> String {
        agent.role()
            .map(|role| role.to_string())
            .unwrap_or("-".to_string())
    }
}

impl Enforcer for CasbinEnforcer {
    fn enforce(
        &self,
        agent: &Agent,
        resource: Resource,
        action: Action,
    ) -> Decision {
        let result = self.enforcer.enforce((
            Self::to_subject(agent).as_str(),
            <&'static str>::from(resource),
            <&'static str>::from(action),
        ));
        let decision = match result {
            Ok(value) => Decision::from(value),
            Err(e) => {
                log::warn!("casbin failed to enforce, denying: {e}");
                Decision::Denied
            }
        };
        log::trace!("enforce on: agent={agent} resource={resource} action={action} -> {decision:?}");
        decision
    }
}

#[cfg(test)]
mod test {
    use zxcore::ac::principal::Principal;
    use crate::{
        simple::TableEnforcer,
        table::DEFAULT_POLICY,
    };
    use super::*;

    fn agents() -> Vec<Agent> {
        let mut agents = EnumSet::<Role>::all()
            .iter()
            .map(|role| Principal::new("1", "someone@example.com", None, role).into())
            .collect::<Vec<Agent>>();
        agents.push(Agent::Anonymous);
        agents
    }

    #[tokio::test]
    async fn agrees_with_table() -> anyhow::Result<()> {
        let table = PolicyTable::new(DEFAULT_POLICY)?;
        let casbin = CasbinEnforcer::new(&table, DEFAULT_MODEL).await?;
        let simple = TableEnforcer::from(table);
        for agent in agents() {
            for resource in EnumSet::<Resource>::all() {
                for action in EnumSet::<Action>::all() {
                    assert_eq!(
                        casbin.enforce(&agent, resource, action),
                        simple.enforce(&agent, resource, action),
                        "disagreement for {agent} {resource}:{action}",
                    );
                }
            }
        }
        Ok(())
    }

    #[tokio::test]
    async fn empty() -> anyhow::Result<()> {
        let table = PolicyTable::new("")?;
        let casbin = CasbinEnforcer::new(&table, DEFAULT_MODEL).await?;
        for agent in agents() {
            assert_eq!(
                casbin.enforce(&agent, Resource::Dashboard, Action::Read),
                Decision::Denied,
            );
        }
        Ok(())
    }
}
