//! Role based access control for the ZecurX admin back-office.
//!
//! The [`PolicyTable`] is built once from a policy text and never changes
//! afterwards.  Enforcers consult it to decide whether an agent may
//! perform an action on a resource; they only ever match exact
//! (role, resource, action) triples.

mod builder;
pub mod error;
pub mod manage;
pub mod simple;
pub mod table;
pub mod validate;

#[cfg(feature = "casbin")]
pub mod casbin;

pub use crate::{
    builder::Builder,
    table::PolicyTable,
};
pub use zxcore::ac::traits::Enforcer;
