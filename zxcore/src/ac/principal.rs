use serde::{Deserialize, Serialize};
use crate::ac::role::Role;

/// An authenticated admin account, as established by whatever verified
/// the session.  Nothing in the access control layer modifies it.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct Principal {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl Principal {
    /// Builds a principal, deriving the display name from the local
    /// part of the email address when no name is supplied.
    pub fn new(
        id: impl Into<String>,
        email: impl Into<String>,
        name: Option<String>,
        role: Role,
    ) -> Self {
        let email = email.into();
        let name = name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| email
                .split('@')
                .next()
                .unwrap_or_default()
                .to_string()
            );
        Self {
            id: id.into(),
            email,
            name,
            role,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_name() {
        let principal = Principal::new("1", "alice@example.com", None, Role::Media);
        assert_eq!(principal.name, "alice");
        let principal = Principal::new("1", "alice@example.com", Some("".into()), Role::Media);
        assert_eq!(principal.name, "alice");
        let principal = Principal::new("1", "alice@example.com", Some("Alice".into()), Role::Media);
        assert_eq!(principal.name, "Alice");
    }
}
