//! Static checks on a policy against the permits the application guards.
//!
//! A guarded permit that no role holds makes the guarded area
//! permanently unreachable.  At runtime that is indistinguishable from an
//! ordinary denial, so it has to be caught here instead.

use zxcore::ac::permit::Permit;

use crate::{
    error::Error,
    table::PolicyTable,
};

/// Returns the permits, in the order given and without duplicates, that
/// no role in the table holds.
pub fn unreachable_permits(
    table: &PolicyTable,
    guarded: impl IntoIterator<Item = Permit>,
) -> Vec<Permit> {
    let mut result = Vec::new();
    for permit in guarded {
        if table.roles_granting(permit).is_empty() && !result.contains(&permit) {
            result.push(permit);
        }
    }
    result
}

pub fn ensure_reachable(
    table: &PolicyTable,
    guarded: impl IntoIterator<Item = Permit>,
) -> Result<(), Error> {
    let unreachable = unreachable_permits(table, guarded);
    if unreachable.is_empty() {
        Ok(())
    } else {
        Err(Error::Unreachable(
            unreachable.iter()
                .map(Permit::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        ))
    }
}

#[cfg(test)]
mod test {
    use zxcore::ac::{
        action::Action,
        resource::Resource,
    };
    use crate::table::DEFAULT_POLICY;
    use super::*;

    #[test]
    fn default_policy_reaches_everything() -> anyhow::Result<()> {
        let table = PolicyTable::new(DEFAULT_POLICY)?;
        let guarded = [
            Permit::new(Resource::Users, Action::Read),
            Permit::new(Resource::Audit, Action::Read),
            Permit::new(Resource::Blog, Action::Publish),
        ];
        assert!(unreachable_permits(&table, guarded).is_empty());
        ensure_reachable(&table, guarded)?;
        Ok(())
    }

    #[test]
    fn flags_dead_permits() -> anyhow::Result<()> {
        let table = PolicyTable::new("\
            media, blog:*
            marketing, leads:read
        ")?;
        let guarded = [
            Permit::new(Resource::Blog, Action::Read),
            Permit::new(Resource::Audit, Action::Read),
            Permit::new(Resource::Leads, Action::Update),
            Permit::new(Resource::Audit, Action::Read),
        ];
        assert_eq!(
            unreachable_permits(&table, guarded),
            [
                Permit::new(Resource::Audit, Action::Read),
                Permit::new(Resource::Leads, Action::Update),
            ],
        );
        assert!(matches!(
            ensure_reachable(&table, guarded),
            Err(Error::Unreachable(s)) if s == "audit:read, leads:update",
        ));
        Ok(())
    }
}
