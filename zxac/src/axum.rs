//! Adapters placing the access guard in front of an axum application.
//!
//! [`IdentityLayer`] resolves the agent behind each request and stores it
//! in the request extensions; [`GuardLayer`] classifies the request path
//! and turns any denial into the response appropriate for its surface,
//! a redirect for dashboard pages and a JSON error for the API.  The
//! identity layer must wrap the guard layer.

use ::axum::{
    Extension,
    Json,
    Router,
    extract::{
        FromRequestParts,
        Request,
    },
    response::{
        IntoResponse,
        Redirect,
        Response,
    },
    routing::get,
};
use http::{
    StatusCode,
    Uri,
    request::Parts,
};
use serde::Serialize;
use std::{
    convert::Infallible,
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};
use tower::{
    Layer,
    Service,
};
use zxcore::ac::{
    agent::Agent,
    permit::Permit,
    principal::Principal,
};

use crate::{
    guard::{
        Denial,
        DASHBOARD_PAGE,
        LOGIN_PAGE,
        landing_page,
    },
    nav::NavItem,
    platform::Platform,
    route::{
        API_ROOT,
        Requirement,
        Surface,
        matches,
    },
};

type BoxFuture<T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send>>;

impl IntoResponse for Denial {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            Json(serde_json::json!({ "error": self.to_string() })),
        ).into_response()
    }
}

/// The rejection for a denial on the given surface.
pub fn reject(surface: Surface, denial: Denial) -> Response {
    match surface {
        Surface::Dashboard => Redirect::to(&denial.redirect_location()).into_response(),
        Surface::Api => denial.into_response(),
    }
}

#[derive(Clone)]
pub struct IdentityLayer {
    platform: Arc<Platform>,
}

#[derive(Clone)]
pub struct IdentityService<S> {
    inner: S,
    platform: Arc<Platform>,
}

impl IdentityLayer {
    pub fn new(platform: Arc<Platform>) -> Self {
        Self { platform }
    }
}

impl<S> Layer<S> for IdentityLayer {
    type Service = IdentityService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        IdentityService {
            inner,
            platform: self.platform.clone(),
        }
    }
}

impl<S> Service<Request> for IdentityService<S>
where
    S: Service<Request> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<Self::Response, Self::Error>;

    #[inline]
    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request) -> Self::Future {
        let platform = self.platform.clone();
        // only the service that was polled ready may be called
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            let agent = platform.identify(req.headers()).await;
            req.extensions_mut().insert(agent);
            inner.call(req).await
        })
    }
}

#[derive(Clone)]
pub struct GuardLayer {
    platform: Arc<Platform>,
}

#[derive(Clone)]
pub struct GuardService<S> {
    inner: S,
    platform: Arc<Platform>,
}

impl GuardLayer {
    pub fn new(platform: Arc<Platform>) -> Self {
        Self { platform }
    }
}

impl<S> Layer<S> for GuardLayer {
    type Service = GuardService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        GuardService {
            inner,
            platform: self.platform.clone(),
        }
    }
}

impl<S> Service<Request> for GuardService<S>
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = BoxFuture<Self::Response, Self::Error>;

    #[inline]
    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        // an agent missing from the extensions means no identity layer
        // ran, which can only be treated as anonymous
        let agent = req.extensions()
            .get::<Agent>()
            .cloned()
            .unwrap_or_default();
        let outcome = self.platform
            .classify(req.method(), req.uri().path())
            .map(|route| match route.requirement {
                Requirement::LoginPage if !agent.is_anonymous() =>
                    Err(Redirect::to(DASHBOARD_PAGE).into_response()),
                requirement => self.platform
                    .authorize(&agent, requirement)
                    .map_err(|denial| {
                        log::info!(
                            "denied {} {} to {agent}: {denial}",
                            req.method(),
                            req.uri().path(),
                        );
                        reject(route.surface, denial)
                    }),
            })
            .unwrap_or(Ok(()));

        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        Box::pin(async move {
            match outcome {
                Ok(()) => inner.call(req).await,
                Err(response) => Ok(response),
            }
        })
    }
}

/// The agent the identity layer resolved for this request.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CurrentAgent(pub Agent);

impl<S> FromRequestParts<S> for CurrentAgent
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.extensions.get::<Agent>().cloned().unwrap_or_default()))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionInfo {
    #[serde(flatten)]
    pub principal: Principal,
    pub role_name: &'static str,
    pub landing_page: &'static str,
}

pub async fn session(
    CurrentAgent(agent): CurrentAgent,
) -> Result<Json<SessionInfo>, Denial> {
    let principal = agent.principal()
        .cloned()
        .ok_or(Denial::Unauthenticated)?;
    Ok(Json(SessionInfo {
        role_name: principal.role.display_name(),
        landing_page: landing_page(principal.role),
        principal,
    }))
}

pub async fn navigation(
    Extension(platform): Extension<Arc<Platform>>,
    CurrentAgent(agent): CurrentAgent,
) -> Json<Vec<NavItem>> {
    Json(platform.navigation(&agent))
}

pub async fn permissions(
    Extension(platform): Extension<Arc<Platform>>,
    CurrentAgent(agent): CurrentAgent,
) -> Json<Vec<Permit>> {
    Json(platform.permits(&agent))
}

// Page rendering happens elsewhere; by the time a request arrives here
// the guard has already let it through.
async fn fallback(
    CurrentAgent(agent): CurrentAgent,
    uri: Uri,
) -> Response {
    let path = uri.path();
    if matches(path, API_ROOT) {
        (
            StatusCode::NOT_IMPLEMENTED,
            Json(serde_json::json!({ "error": "Not implemented" })),
        ).into_response()
    } else if path.trim_end_matches('/') == LOGIN_PAGE {
        "ZecurX admin login".into_response()
    } else if matches(path, DASHBOARD_PAGE) {
        match agent.principal() {
            Some(principal) => format!("ZecurX admin {path} for {}", principal.name)
                .into_response(),
            None => StatusCode::NOT_FOUND.into_response(),
        }
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

/// The admin back-office application with the guard in place.
pub fn router(platform: Arc<Platform>) -> Router {
    Router::new()
        .route("/api/admin/session", get(session))
        .route("/api/admin/navigation", get(navigation))
        .route("/api/admin/permissions", get(permissions))
        .fallback(fallback)
        .layer(Extension(platform.clone()))
        .layer(GuardLayer::new(platform.clone()))
        .layer(IdentityLayer::new(platform))
}
