//! Rules about which roles may manage admin accounts of other roles.

use zxcore::ac::role::{
    Role,
    Roles,
};

/// Only super admins may manage roles, including other super admins.
pub fn can_manage_role(manager: Role, _target: Role) -> bool {
    manager == Role::SuperAdmin
}

/// The roles the given role may assign to new accounts.  Nobody may
/// create another super admin.
pub fn assignable_roles(role: Role) -> Roles {
    match role {
        Role::SuperAdmin => Roles::all() - Role::SuperAdmin,
        _ => Roles::empty(),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn management() {
        for target in Roles::all() {
            assert!(can_manage_role(Role::SuperAdmin, target));
            for manager in Roles::all() - Role::SuperAdmin {
                assert!(!can_manage_role(manager, target));
            }
        }
        assert_eq!(
            assignable_roles(Role::SuperAdmin),
            Role::Admin | Role::Sales | Role::Marketing | Role::Media,
        );
        assert_eq!(assignable_roles(Role::Admin), Roles::empty());
    }
}
