use enumset::{
    EnumSet,
    EnumSetType,
};
use serde::{Deserialize, Serialize};

/// The roles an admin account may hold.
///
/// This is a closed set; a role string that does not name one of these
/// variants cannot be turned into a `Role` and so can never be granted
/// anything.
#[derive(Debug, EnumSetType, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    Admin,
    Sales,
    Marketing,
    Media,
}

pub type Roles = EnumSet<Role>;

mod impls;
pub use impls::is_valid_role;
