//! Maps request paths onto what they require of the agent.
//!
//! Two surfaces are guarded: the interactive dashboard under `/admin`
//! and the programmatic API under `/api/admin`.  Within each, sections
//! are matched by prefix in table order and the first match wins.

use http::Method;
use zxcore::ac::{
    action::Action,
    agent::Agent,
    permit::Permit,
    resource::Resource,
    traits::Enforcer,
};

use crate::guard::{
    self,
    Denial,
    DASHBOARD_PAGE,
    LOGIN_PAGE,
};

pub const API_ROOT: &str = "/api/admin";
/// Where the sign-in form posts; it has to work before any session exists.
pub const SIGN_IN_API: &str = "/api/admin/auth";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Surface {
    Dashboard,
    Api,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Requirement {
    /// The login page; reachable without a session.
    LoginPage,
    /// Reachable without a session and regardless of one.
    Public,
    /// Any verified principal.
    Authenticated,
    Permit(Permit),
    /// A method the API does not map to any action.
    Unsupported,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Route {
    pub surface: Surface,
    pub requirement: Requirement,
}

#[derive(Clone, Debug)]
struct Section {
    prefix: String,
    resource: Resource,
    publishable: bool,
}

impl Section {
    fn new(prefix: String, resource: Resource) -> Self {
        Self { prefix, resource, publishable: false }
    }
}

#[derive(Clone, Debug)]
pub struct RouteTable {
    pages: Vec<Section>,
    api: Vec<Section>,
}

const SECTIONS: &[(&str, Resource)] = &[
    ("users", Resource::Users),
    ("customers", Resource::Customers),
    ("sales", Resource::Sales),
    ("plans", Resource::Plans),
    ("products", Resource::Products),
    ("audit", Resource::Audit),
    ("blog", Resource::Blog),
    ("leads", Resource::Leads),
    ("whitepapers", Resource::Whitepapers),
    ("seminars", Resource::Seminars),
    ("settings", Resource::Settings),
    ("referral-codes", Resource::ReferralCodes),
    ("partner-referrals", Resource::ReferralCodes),
    ("system-test", Resource::SystemTest),
];

impl Default for RouteTable {
    fn default() -> Self {
        let pages = SECTIONS.iter()
            .map(|(name, resource)| Section::new(
                format!("{DASHBOARD_PAGE}/{name}"),
                *resource,
            ))
            .collect();
        let api = SECTIONS.iter()
            .chain([("dashboard", Resource::Dashboard)].iter())
            .map(|(name, resource)| Section {
                prefix: format!("{API_ROOT}/{name}"),
                resource: *resource,
                publishable: *resource == Resource::Blog,
            })
            .collect();
        Self { pages, api }
    }
}

/// Whether the path is the prefix itself or lies below it.
pub(crate) fn matches(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// The action a request method stands for, if any.
pub fn method_action(method: &Method) -> Option<Action> {
    match method.as_str() {
        "GET" | "HEAD" => Some(Action::Read),
        "POST" => Some(Action::Create),
        "PUT" | "PATCH" => Some(Action::Update),
        "DELETE" => Some(Action::Delete),
        _ => None,
    }
}

impl RouteTable {
    /// The permit guarding a dashboard page, if the page has one.
    pub fn page_permit(&self, path: &str) -> Option<Permit> {
        let path = normalize(path);
        if path == DASHBOARD_PAGE {
            return Some(Permit::new(Resource::Dashboard, Action::Read));
        }
        self.pages.iter()
            .find(|section| matches(path, &section.prefix))
            .map(|section| Permit::new(section.resource, Action::Read))
    }

    fn api_requirement(&self, method: &Method, path: &str) -> Requirement {
        if matches(path, SIGN_IN_API) {
            return Requirement::Public;
        }
        let Some(section) = self.api.iter()
            .find(|section| matches(path, &section.prefix))
        else {
            return Requirement::Authenticated;
        };
        match method_action(method) {
            Some(Action::Create) if section.publishable
                && path.rsplit('/').next() == Some("publish") =>
                Requirement::Permit(Permit::new(section.resource, Action::Publish)),
            Some(action) => Requirement::Permit(Permit::new(section.resource, action)),
            None => Requirement::Unsupported,
        }
    }

    /// Classifies a request; `None` means the path is not guarded at all.
    pub fn classify(&self, method: &Method, path: &str) -> Option<Route> {
        let path = normalize(path);
        if matches(path, API_ROOT) {
            Some(Route {
                surface: Surface::Api,
                requirement: self.api_requirement(method, path),
            })
        } else if path == LOGIN_PAGE {
            Some(Route {
                surface: Surface::Dashboard,
                requirement: Requirement::LoginPage,
            })
        } else if matches(path, DASHBOARD_PAGE) {
            Some(Route {
                surface: Surface::Dashboard,
                requirement: self.page_permit(path)
                    .map(Requirement::Permit)
                    .unwrap_or(Requirement::Authenticated),
            })
        } else {
            None
        }
    }

    /// Every permit some route may require.
    pub fn guarded_permits(&self) -> Vec<Permit> {
        let mut result = vec![Permit::new(Resource::Dashboard, Action::Read)];
        result.extend(self.pages.iter()
            .map(|section| Permit::new(section.resource, Action::Read)));
        for section in self.api.iter() {
            result.extend(
                [Action::Read, Action::Create, Action::Update, Action::Delete]
                    .into_iter()
                    .map(|action| Permit::new(section.resource, action))
            );
            if section.publishable {
                result.push(Permit::new(section.resource, Action::Publish));
            }
        }
        result
    }
}

fn normalize(path: &str) -> &str {
    match path.trim_end_matches('/') {
        "" => "/",
        path => path,
    }
}

/// Checks the agent against what a route requires.
pub fn authorize(
    enforcer: &dyn Enforcer,
    agent: &Agent,
    requirement: Requirement,
) -> Result<(), Denial> {
    match requirement {
        Requirement::LoginPage | Requirement::Public => Ok(()),
        Requirement::Authenticated => agent.role()
            .map(|_| ())
            .ok_or(Denial::Unauthenticated),
        Requirement::Permit(permit) => guard::check(enforcer, agent, permit),
        Requirement::Unsupported => Err(agent.role()
            .map(Denial::Forbidden)
            .unwrap_or(Denial::Unauthenticated)),
    }
}
