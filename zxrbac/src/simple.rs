use std::sync::Arc;
use zxcore::ac::{
    action::Action,
    agent::Agent,
    decision::Decision,
    resource::Resource,
    traits::Enforcer,
};

use crate::table::PolicyTable;

/// Enforcer that does a direct lookup of the agent's role against the
/// [`PolicyTable`].  Anonymous agents are always denied.
#[derive(Clone, Debug)]
pub struct TableEnforcer {
    table: Arc<PolicyTable>,
}

impl TableEnforcer {
    pub fn new(table: impl Into<Arc<PolicyTable>>) -> Self {
        Self { table: table.into() }
    }

    pub fn table(&self) -> &PolicyTable {
        &self.table
    }
}

impl From<PolicyTable> for TableEnforcer {
    fn from(table: PolicyTable) -> Self {
        Self::new(table)
    }
}

impl Enforcer for TableEnforcer {
    fn enforce(
        &self,
        agent: &Agent,
        resource: Resource,
        action: Action,
    ) -> Decision {
        let decision: Decision = agent.role()
            .map(|role| self.table.is_granted(role, resource, action))
            .unwrap_or(false)
            .into();
        log::trace!("enforce on: agent={agent} resource={resource} action={action} -> {decision:?}");
        decision
    }
}
