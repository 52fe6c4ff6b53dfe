use serde::{Deserialize, Serialize};
use std::{
    fmt,
    str::FromStr,
};

use crate::{
    ac::{
        action::Action,
        resource::Resource,
    },
    error::ValueError,
};

/// A single (resource, action) pair that a role may be granted.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
pub struct Permit {
    pub resource: Resource,
    pub action: Action,
}

impl Permit {
    pub const fn new(resource: Resource, action: Action) -> Self {
        Self { resource, action }
    }
}

impl From<(Resource, Action)> for Permit {
    fn from((resource, action): (Resource, Action)) -> Self {
        Self { resource, action }
    }
}

impl fmt::Display for Permit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.resource, self.action)
    }
}

impl FromStr for Permit {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (resource, action) = s.split_once(':')
            .ok_or_else(|| ValueError::Malformed(s.to_string()))?;
        Ok(Self {
            resource: resource.trim().parse()?,
            action: action.trim().parse()?,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display_parse() -> anyhow::Result<()> {
        let permit = Permit::new(Resource::ReferralCodes, Action::Delete);
        assert_eq!(permit.to_string(), "referral_codes:delete");
        assert_eq!(permit, "referral_codes:delete".parse()?);
        assert_eq!(
            "blog".parse::<Permit>(),
            Err(ValueError::Malformed("blog".to_string())),
        );
        // wildcards are not permits
        assert_eq!(
            "blog:*".parse::<Permit>(),
            Err(ValueError::Unsupported("*".to_string())),
        );
        Ok(())
    }
}
