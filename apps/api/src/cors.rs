//! Cross-origin policy: an explicit allow-list enforced before any route logic.
//!
//! `reject_disallowed_origin` refuses foreign origins outright (preflights included);
//! `OriginPolicy::cors_layer` decorates allowed responses with CORS headers.

use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;

use crate::errors::AppError;

#[derive(Debug, Clone)]
pub struct OriginPolicy {
    allowed: HashSet<String>,
}

impl OriginPolicy {
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: origins.into_iter().map(Into::into).collect(),
        }
    }

    /// No origin, an allow-listed origin, or a same-origin request passes.
    pub fn allows(&self, origin: Option<&str>, host: Option<&str>) -> bool {
        match origin {
            None => true,
            Some(origin) => self.allowed.contains(origin) || is_same_origin(origin, host),
        }
    }

    pub fn cors_layer(&self) -> CorsLayer {
        let origins: Vec<HeaderValue> = self
            .allowed
            .iter()
            .filter(|o| {
                if o.as_str() == "*" {
                    warn!("Ignoring wildcard in explicit origin allow-list");
                }
                o.as_str() != "*"
            })
            .filter_map(|o| match HeaderValue::from_str(o) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring unparseable allowed origin: {o}");
                    None
                }
            })
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    }
}

/// True when the origin's authority equals the request's host (`Host` header or URI authority).
fn is_same_origin(origin: &str, host: Option<&str>) -> bool {
    let Some(host) = host else {
        return false;
    };
    let authority = origin
        .strip_prefix("https://")
        .or_else(|| origin.strip_prefix("http://"));
    authority.is_some_and(|a| a.eq_ignore_ascii_case(host))
}

/// Middleware: rejects requests from origins outside the policy before routing.
pub async fn reject_disallowed_origin(
    State(policy): State<Arc<OriginPolicy>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let headers = request.headers();
    let origin = headers.get(header::ORIGIN).map(|v| v.to_str().unwrap_or_default());
    // HTTP/2 requests carry the authority in the URI instead of a Host header.
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| request.uri().authority().map(|a| a.as_str()));

    if !policy.allows(origin, host) {
        return Err(AppError::CorsRejected(origin.unwrap_or_default().to_string()));
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> OriginPolicy {
        OriginPolicy::new(["https://portfolio.visiomediatech.com", "http://localhost:5173"])
    }

    #[test]
    fn test_missing_origin_is_allowed() {
        assert!(policy().allows(None, None));
    }

    #[test]
    fn test_listed_origin_is_allowed() {
        assert!(policy().allows(Some("http://localhost:5173"), None));
    }

    #[test]
    fn test_unlisted_origin_is_rejected() {
        assert!(!policy().allows(Some("https://evil.example.com"), None));
    }

    #[test]
    fn test_origin_match_is_exact() {
        assert!(!policy().allows(Some("http://localhost:5173/"), None));
        assert!(!policy().allows(Some("https://localhost:5173"), None));
    }

    #[test]
    fn test_wildcard_entry_is_not_a_catch_all() {
        let policy = OriginPolicy::new(["*", "http://localhost:5173"]);
        let _layer = policy.cors_layer();
        assert!(!policy.allows(Some("https://evil.example.com"), None));
        assert!(policy.allows(Some("http://localhost:5173"), None));
    }

    #[test]
    fn test_same_origin_is_allowed() {
        assert!(policy().allows(Some("https://gateway.internal:3000"), Some("gateway.internal:3000")));
    }

    #[test]
    fn test_same_origin_requires_host_match() {
        assert!(!policy().allows(Some("https://gateway.internal"), Some("other.internal")));
        assert!(!is_same_origin("gateway.internal", Some("gateway.internal")));
    }
}
