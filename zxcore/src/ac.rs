pub mod action;
pub mod agent;
pub mod decision;
pub mod permit;
pub mod principal;
pub mod resource;
pub mod role;
pub mod traits;

pub use self::{
    action::Action,
    agent::Agent,
    decision::Decision,
    permit::Permit,
    principal::Principal,
    resource::Resource,
    role::Role,
};
