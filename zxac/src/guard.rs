//! The access guard.
//!
//! Every guarded request is evaluated from scratch against the enforcer;
//! nothing about an earlier decision is remembered.  The guard is
//! transport agnostic: it produces either the protected content or a
//! [`Denial`], and each transport adapter turns the denial into its own
//! kind of rejection.

use http::StatusCode;
use zxcore::ac::{
    agent::Agent,
    decision::Decision,
    permit::Permit,
    role::Role,
    traits::Enforcer,
};

pub const LOGIN_PAGE: &str = "/admin/login";
pub const DASHBOARD_PAGE: &str = "/admin";

/// Why access was refused.  The message of either variant is fixed and
/// says nothing about which roles would have been allowed.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Denial {
    #[error("Unauthorized: No valid session")]
    Unauthenticated,
    #[error("Forbidden: Insufficient permissions")]
    Forbidden(Role),
}

impl Denial {
    /// Status code for programmatic callers.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Denial::Unauthenticated => StatusCode::UNAUTHORIZED,
            Denial::Forbidden(_) => StatusCode::FORBIDDEN,
        }
    }

    /// Where an interactive caller is sent instead.
    pub fn redirect_location(&self) -> String {
        match self {
            Denial::Unauthenticated => LOGIN_PAGE.to_string(),
            Denial::Forbidden(role) => format!("{}?access_denied=1", landing_page(*role)),
        }
    }
}

/// The page each role lands on, which that role can always read.
pub fn landing_page(role: Role) -> &'static str {
    match role {
        Role::Media => "/admin/blog",
        Role::Marketing => "/admin/plans",
        Role::SuperAdmin | Role::Admin | Role::Sales => DASHBOARD_PAGE,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Guarded<T> {
    Allowed(T),
    Denied(Denial),
}

impl<T> Guarded<T> {
    pub fn into_result(self) -> Result<T, Denial> {
        match self {
            Guarded::Allowed(content) => Ok(content),
            Guarded::Denied(denial) => Err(denial),
        }
    }
}

/// Evaluates the agent against the required permit.
pub fn check(
    enforcer: &dyn Enforcer,
    agent: &Agent,
    permit: Permit,
) -> Result<(), Denial> {
    let role = agent.role()
        .ok_or(Denial::Unauthenticated)?;
    match enforcer.enforce(agent, permit.resource, permit.action) {
        Decision::Allowed => Ok(()),
        Decision::Denied => {
            log::debug!("access denied: agent={agent} permit={permit}");
            Err(Denial::Forbidden(role))
        }
    }
}

/// Produces the content only when the agent holds the permit.  The
/// content is never produced on denial.
pub fn guard<T>(
    enforcer: &dyn Enforcer,
    agent: &Agent,
    permit: Permit,
    content: impl FnOnce() -> T,
) -> Guarded<T> {
    match check(enforcer, agent, permit) {
        Ok(()) => Guarded::Allowed(content()),
        Err(denial) => Guarded::Denied(denial),
    }
}
