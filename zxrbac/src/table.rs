use enumset::EnumSet;
use std::{
    collections::HashMap,
    str::FromStr,
};
use zxcore::{
    ac::{
        action::{
            Action,
            Actions,
        },
        permit::Permit,
        resource::Resource,
        role::{
            Role,
            Roles,
        },
    },
    error::ValueError,
};

use crate::error::Error;

/// The default policy for the admin back-office.
///
/// One grant per line in the form of: role, grant
///
/// role - the name of the role held by an admin account.
/// grant - `*` for every resource and action, `resource:*` for every
///         action on a resource, or `resource:action` for exactly one.
///
/// Wildcards are only understood here; they are expanded into explicit
/// permits when the table is built.
pub const DEFAULT_POLICY: &str = "\
# super admins can do everything
super_admin, *

# admins run the business but only read the blog, no users or audit
admin, dashboard:*
admin, customers:*
admin, sales:*
admin, plans:*
admin, products:*
admin, leads:*
admin, referral_codes:*
admin, blog:read
admin, whitepapers:*
admin, seminars:*
admin, settings:*

# sales have no blog access
sales, dashboard:*
sales, customers:*
sales, sales:*
sales, products:*
sales, leads:*
sales, referral_codes:*

# marketing has no dashboard or analytics
marketing, plans:*
marketing, leads:read
marketing, whitepapers:*

# media looks after the blog exclusively
media, blog:*
media, whitepapers:*
";

#[derive(Clone, Copy, Debug, PartialEq)]
enum Grant {
    All,
    Resource(Resource),
    Permit(Permit),
}

impl FromStr for Grant {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "*" => Ok(Grant::All),
            s => match s.split_once(':') {
                Some((resource, "*")) => Ok(Grant::Resource(resource.trim().parse()?)),
                Some(_) => Ok(Grant::Permit(s.parse()?)),
                None => Err(ValueError::Malformed(s.to_string())),
            },
        }
    }
}

impl Grant {
    fn expand(&self) -> HashMap<Resource, Actions> {
        match self {
            Grant::All => EnumSet::<Resource>::all()
                .iter()
                .map(|resource| (resource, Actions::all()))
                .collect(),
            Grant::Resource(resource) => HashMap::from([(*resource, Actions::all())]),
            Grant::Permit(Permit { resource, action }) =>
                HashMap::from([(*resource, EnumSet::only(*action))]),
        }
    }
}

/// Static mapping from each role to the exact permits it holds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PolicyTable(HashMap<Role, HashMap<Resource, Actions>>);

impl PolicyTable {
    pub fn new(policy: &str) -> Result<Self, Error> {
        let mut table = HashMap::<Role, HashMap<Resource, Actions>>::new();
        let mut n = 0;
        for (idx, line) in policy.lines().enumerate() {
            let line = line
                .split('#')
                .next()
                .unwrap_or_default()
                .trim();
            if line.is_empty() {
                continue;
            }
            let err = |source| Error::Policy { line: idx + 1, source };
            let (role, grant) = line.split_once(',')
                .ok_or_else(|| err(ValueError::Malformed(line.to_string())))?;
            let role: Role = role.trim().parse().map_err(err)?;
            let grant: Grant = grant.parse().map_err(err)?;
            let entry = table.entry(role).or_default();
            for (resource, actions) in grant.expand() {
                *entry.entry(resource).or_default() |= actions;
            }
            n += 1;
        }
        log::debug!("new PolicyTable set up with {n} grants for {} roles", table.len());
        Ok(Self(table))
    }

    pub fn is_granted(&self, role: Role, resource: Resource, action: Action) -> bool {
        self.0.get(&role)
            .and_then(|resources| resources.get(&resource))
            .map(|actions| actions.contains(action))
            .unwrap_or(false)
    }

    /// All permits held by the role, with wildcards fully expanded.
    pub fn permits(&self, role: Role) -> Vec<Permit> {
        let Some(resources) = self.0.get(&role) else {
            return Vec::new();
        };
        // iterate the enum sets rather than the map for a stable order
        EnumSet::<Resource>::all()
            .iter()
            .filter_map(|resource| resources.get(&resource)
                .map(|actions| (resource, *actions))
            )
            .flat_map(|(resource, actions)| actions
                .iter()
                .map(move |action| Permit::new(resource, action))
            )
            .collect()
    }

    /// The roles that hold the given permit.
    pub fn roles_granting(&self, permit: Permit) -> Roles {
        self.0.keys()
            .copied()
            .filter(|role| self.is_granted(*role, permit.resource, permit.action))
            .collect()
    }

    /// The roles with at least one permit.
    pub fn roles(&self) -> Roles {
        self.0.iter()
            .filter(|(_, resources)| resources.values().any(|actions| !actions.is_empty()))
            .map(|(role, _)| *role)
            .collect()
    }
}

impl FromStr for PolicyTable {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_policy() -> anyhow::Result<()> {
        let table = PolicyTable::new(DEFAULT_POLICY)?;
        assert_eq!(table.roles(), Roles::all());

        // super admin holds every permit
        assert_eq!(
            table.permits(Role::SuperAdmin).len(),
            EnumSet::<Resource>::all().len() * Actions::all().len(),
        );
        assert!(table.is_granted(Role::SuperAdmin, Resource::Audit, Action::Read));

        assert!(table.is_granted(Role::Admin, Resource::Blog, Action::Read));
        assert!(!table.is_granted(Role::Admin, Resource::Blog, Action::Update));
        assert!(!table.is_granted(Role::Admin, Resource::Users, Action::Read));
        assert!(!table.is_granted(Role::Admin, Resource::Audit, Action::Read));

        assert!(!table.is_granted(Role::Sales, Resource::Blog, Action::Read));
        assert!(table.is_granted(Role::Sales, Resource::ReferralCodes, Action::Delete));

        assert!(table.is_granted(Role::Marketing, Resource::Leads, Action::Read));
        assert!(!table.is_granted(Role::Marketing, Resource::Leads, Action::Update));
        assert!(!table.is_granted(Role::Marketing, Resource::Dashboard, Action::Read));

        assert!(table.is_granted(Role::Media, Resource::Blog, Action::Publish));
        assert!(!table.is_granted(Role::Media, Resource::Dashboard, Action::Read));
        Ok(())
    }

    #[test]
    fn permits_listing() -> anyhow::Result<()> {
        let table = PolicyTable::new(DEFAULT_POLICY)?;
        let permits = table.permits(Role::Marketing)
            .iter()
            .map(Permit::to_string)
            .collect::<Vec<_>>();
        assert_eq!(permits, [
            "plans:read",
            "plans:write",
            "plans:create",
            "plans:update",
            "plans:delete",
            "plans:publish",
            "leads:read",
            "whitepapers:read",
            "whitepapers:write",
            "whitepapers:create",
            "whitepapers:update",
            "whitepapers:delete",
            "whitepapers:publish",
        ]);
        Ok(())
    }

    #[test]
    fn roles_granting() -> anyhow::Result<()> {
        let table = PolicyTable::new(DEFAULT_POLICY)?;
        assert_eq!(
            table.roles_granting(Permit::new(Resource::Users, Action::Read)),
            Roles::only(Role::SuperAdmin),
        );
        assert_eq!(
            table.roles_granting(Permit::new(Resource::Blog, Action::Read)),
            Role::SuperAdmin | Role::Admin | Role::Media,
        );
        Ok(())
    }

    #[test]
    fn empty() -> anyhow::Result<()> {
        let table = PolicyTable::new("# nothing\n\n")?;
        assert_eq!(table.roles(), Roles::empty());
        for role in Roles::all() {
            assert!(table.permits(role).is_empty());
        }
        assert!(!table.is_granted(Role::SuperAdmin, Resource::Audit, Action::Read));
        Ok(())
    }

    #[test]
    fn malformed() {
        assert!(matches!(
            PolicyTable::new("admin blog:read"),
            Err(Error::Policy { line: 1, source: ValueError::Malformed(_) }),
        ));
        assert!(matches!(
            PolicyTable::new("# roles\neditor, blog:read"),
            Err(Error::Policy { line: 2, source: ValueError::Unsupported(s) }) if s == "editor",
        ));
        assert!(matches!(
            PolicyTable::new("media, invoices:*"),
            Err(Error::Policy { line: 1, source: ValueError::Unsupported(s) }) if s == "invoices",
        ));
        assert!(matches!(
            PolicyTable::new("media, blog:approve"),
            Err(Error::Policy { line: 1, source: ValueError::Unsupported(s) }) if s == "approve",
        ));
        assert!(matches!(
            PolicyTable::new("media, blog"),
            Err(Error::Policy { line: 1, source: ValueError::Malformed(_) }),
        ));
        // one grant per line
        assert!(matches!(
            PolicyTable::new("media, blog:read\nmedia, blog:* whitepapers:*"),
            Err(Error::Policy { line: 2, .. }),
        ));
    }
}
