use super::{
    action::Action,
    agent::Agent,
    decision::Decision,
    resource::Resource,
};

/// Classifies an agent's request to perform an action on a resource.
///
/// Implementations must be pure reads of immutable state: the same
/// inputs always produce the same decision, and anything that cannot be
/// positively matched against the policy is denied.
pub trait Enforcer: Send + Sync {
    fn enforce(
        &self,
        agent: &Agent,
        resource: Resource,
        action: Action,
    ) -> Decision;
}
