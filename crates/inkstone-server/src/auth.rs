// ABOUTME: Token authentication for the authoring surface of the blog.
// ABOUTME: AuthContext answers "is this request authenticated"; AuthLayer guards authoring routes.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, Response, StatusCode, header};
use tower::{Layer, Service};

/// Name of the cookie that carries the auth token after a form login.
pub const SESSION_COOKIE: &str = "inkstone_session";

/// The authentication collaborator. Holds the configured token, if any,
/// and decides whether a request counts as authenticated. With no token
/// configured the service is single-user local and everything passes.
#[derive(Clone)]
pub struct AuthContext {
    token: Option<Arc<String>>,
}

impl AuthContext {
    /// Create a context from the configured token.
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.map(Arc::new),
        }
    }

    /// Whether a token is configured at all.
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Check whether the configured token matches a candidate value.
    pub fn token_matches(&self, candidate: &str) -> bool {
        match &self.token {
            Some(token) => token.as_str() == candidate,
            None => true,
        }
    }

    /// Whether the request is authenticated: either an
    /// `Authorization: Bearer <token>` header or the session cookie.
    pub fn is_authenticated(&self, headers: &HeaderMap) -> bool {
        let Some(token) = &self.token else {
            return true;
        };

        if let Some(auth) = headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
            let expected = format!("Bearer {}", token);
            if auth == expected {
                return true;
            }
        }

        if let Some(cookies) = headers.get(header::COOKIE).and_then(|v| v.to_str().ok()) {
            for pair in cookies.split(';') {
                if let Some(value) = pair.trim().strip_prefix(SESSION_COOKIE)
                    && let Some(value) = value.strip_prefix('=')
                    && value == token.as_str()
                {
                    return true;
                }
            }
        }

        false
    }
}

/// Whether a request targets the authoring surface. Reads, the login
/// routes, and the health check stay public.
fn requires_auth(method: &Method, path: &str) -> bool {
    if path == "/write" {
        return true;
    }
    if path.starts_with("/web/posts") {
        return path.ends_with("/edit") || *method != Method::GET;
    }
    false
}

/// A tower Layer that applies token authentication to authoring routes.
#[derive(Clone)]
pub struct AuthLayer {
    ctx: AuthContext,
}

impl AuthLayer {
    /// Create a new AuthLayer around the auth context.
    pub fn new(ctx: AuthContext) -> Self {
        Self { ctx }
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthMiddleware {
            inner,
            ctx: self.ctx.clone(),
        }
    }
}

/// The middleware service that checks authentication on authoring routes.
#[derive(Clone)]
pub struct AuthMiddleware<S> {
    inner: S,
    ctx: AuthContext,
}

impl<S> Service<Request<Body>> for AuthMiddleware<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let path = req.uri().path().to_string();

        if !requires_auth(req.method(), &path) || self.ctx.is_authenticated(req.headers()) {
            let mut inner = self.inner.clone();
            return Box::pin(async move { inner.call(req).await });
        }

        Box::pin(async move {
            let resp = Response::builder()
                .status(StatusCode::UNAUTHORIZED)
                .header("content-type", "text/html; charset=utf-8")
                .body(Body::from(
                    "<p class=\"error-msg\">Sign in to write posts.</p>",
                ))
                .unwrap();
            Ok(resp)
        })
    }
}
