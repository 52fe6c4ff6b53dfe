use std::{
    fmt,
    str::FromStr,
};
use crate::error::ValueError;
use super::Role;

impl Role {
    /// Ranking of the role; higher means more privileged.
    pub fn level(&self) -> u8 {
        match self {
            Role::SuperAdmin => 100,
            Role::Admin => 50,
            Role::Sales => 30,
            Role::Marketing => 20,
            Role::Media => 15,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "Super Admin",
            Role::Admin => "Admin",
            Role::Sales => "Sales",
            Role::Marketing => "Marketing",
            Role::Media => "Media",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "Full system access including all features and analytics",
            Role::Admin => "Full business operations access with dashboard and analytics",
            Role::Sales => "Customers, sales, and products management with analytics access",
            Role::Marketing => "Plans and whitepapers management (no dashboard or analytics)",
            Role::Media => "Exclusive blog and whitepapers management (no dashboard or analytics)",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(<&'static str>::from(*self))
    }
}

impl From<Role> for &'static str {
    fn from(role: Role) -> &'static str {
        match role {
            Role::SuperAdmin => "super_admin",
            Role::Admin => "admin",
            Role::Sales => "sales",
            Role::Marketing => "marketing",
            Role::Media => "media",
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> String {
        role.to_string()
    }
}

impl FromStr for Role {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_ref() {
            "super_admin" => Ok(Role::SuperAdmin),
            "admin" => Ok(Role::Admin),
            "sales" => Ok(Role::Sales),
            "marketing" => Ok(Role::Marketing),
            "media" => Ok(Role::Media),
            _ => Err(ValueError::Unsupported(s.to_string())),
        }
    }
}

pub fn is_valid_role(s: &str) -> bool {
    Role::from_str(s).is_ok()
}

#[cfg(feature = "clap")]
mod clap {
    use ::clap::{
        ValueEnum,
        builder::PossibleValue,
    };
    use super::*;

    impl ValueEnum for Role {
        fn value_variants<'a>() -> &'a [Self] {
            &[
                Role::SuperAdmin,
                Role::Admin,
                Role::Sales,
                Role::Marketing,
                Role::Media,
            ]
        }

        fn to_possible_value(&self) -> Option<PossibleValue> {
            Some(PossibleValue::new(<&'static str>::from(*self))
                .help(self.description()))
        }
    }
}
