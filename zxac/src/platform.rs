use http::{
    HeaderMap,
    Method,
};
use std::sync::Arc;
use zxcore::ac::{
    action::{
        Action,
        Actions,
    },
    agent::Agent,
    decision::Decision,
    permit::Permit,
    resource::{
        Resource,
        Resources,
    },
    traits::Enforcer,
};
use zxrbac::Builder as ZxRbacBuilder;

use crate::{
    error::Error,
    guard::{
        self,
        Denial,
        Guarded,
    },
    identity::IdentityProvider,
    nav::{
        self,
        NavItem,
    },
    route::{
        self,
        Requirement,
        Route,
        RouteTable,
    },
};

#[derive(Default)]
pub struct Builder {
    enforcer: Option<Arc<dyn Enforcer>>,
    identity: Option<Arc<dyn IdentityProvider>>,
    zxrbac_builder: ZxRbacBuilder,
    routes: RouteTable,
    // refuse to build when a guarded permit is held by no role
    check_reachable: bool,
}

pub struct Platform {
    enforcer: Arc<dyn Enforcer>,
    identity: Arc<dyn IdentityProvider>,
    routes: RouteTable,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            zxrbac_builder: ZxRbacBuilder::new(),
            check_reachable: true,
            .. Default::default()
        }
    }

    /// Use this enforcer as is, instead of building one from the
    /// policy builder.  No reachability check applies to it.
    pub fn enforcer(mut self, val: impl Enforcer + 'static) -> Self {
        self.enforcer = Some(Arc::new(val));
        self
    }

    pub fn identity(mut self, val: impl IdentityProvider + 'static) -> Self {
        self.identity = Some(Arc::new(val));
        self
    }

    pub fn zxrbac_builder(mut self, val: ZxRbacBuilder) -> Self {
        self.zxrbac_builder = val;
        self
    }

    pub fn routes(mut self, val: RouteTable) -> Self {
        self.routes = val;
        self
    }

    pub fn check_reachable(mut self, val: bool) -> Self {
        self.check_reachable = val;
        self
    }

    pub async fn build(self) -> Result<Arc<Platform>, Error> {
        let identity = self.identity
            .ok_or_else(|| Error::Misconfiguration(
                "missing required identity provider".to_string()
            ))?;
        let enforcer = match self.enforcer {
            Some(enforcer) => enforcer,
            None => {
                if self.check_reachable {
                    zxrbac::validate::ensure_reachable(
                        &self.zxrbac_builder.table()?,
                        self.routes.guarded_permits(),
                    )?;
                }
                Arc::from(self.zxrbac_builder.build().await?)
            }
        };
        Ok(Arc::new(Platform {
            enforcer,
            identity,
            routes: self.routes,
        }))
    }
}

impl Platform {
    pub fn enforcer(&self) -> &dyn Enforcer {
        self.enforcer.as_ref()
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub async fn identify(&self, headers: &HeaderMap) -> Agent {
        self.identity.identify(headers).await
    }

    pub fn enforce(
        &self,
        agent: &Agent,
        resource: Resource,
        action: Action,
    ) -> Decision {
        self.enforcer.enforce(agent, resource, action)
    }

    pub fn guard<T>(
        &self,
        agent: &Agent,
        permit: Permit,
        content: impl FnOnce() -> T,
    ) -> Guarded<T> {
        guard::guard(self.enforcer(), agent, permit, content)
    }

    pub fn classify(&self, method: &Method, path: &str) -> Option<Route> {
        self.routes.classify(method, path)
    }

    pub fn authorize(
        &self,
        agent: &Agent,
        requirement: Requirement,
    ) -> Result<(), Denial> {
        route::authorize(self.enforcer(), agent, requirement)
    }

    pub fn navigation(&self, agent: &Agent) -> Vec<NavItem> {
        nav::navigation(self.enforcer(), agent)
    }

    /// Every permit the agent currently holds.
    pub fn permits(&self, agent: &Agent) -> Vec<Permit> {
        Resources::all()
            .iter()
            .flat_map(|resource| Actions::all()
                .iter()
                .map(move |action| Permit::new(resource, action))
            )
            .filter(|permit| self.enforce(agent, permit.resource, permit.action)
                .is_allowed())
            .collect()
    }
}
