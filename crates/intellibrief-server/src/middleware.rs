use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use intellibrief_core::UserId;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";
/// Set by the upstream identity proxy for authenticated callers.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Newtype wrapping a request ID string, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// The caller's identity as asserted by the identity proxy, if any.
#[derive(Debug, Clone, Default)]
pub struct Caller(pub Option<UserId>);

impl Caller {
    /// Prefers an explicit id from the request body over the header identity.
    #[must_use]
    pub fn or_body(&self, body_user_id: Option<&str>) -> Option<UserId> {
        body_user_id
            .and_then(UserId::parse)
            .or_else(|| self.0.clone())
    }
}

/// Axum middleware that extracts or generates a request ID.
///
/// If the incoming request has an `x-request-id` header, that value is used.
/// Otherwise a new `UUIDv4` is generated. The ID is:
/// - Inserted into request extensions as [`RequestId`]
/// - Set on the response as the `x-request-id` header
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert(REQUEST_ID_HEADER, val);
    }

    res
}

/// Records the `x-user-id` header as a [`Caller`] extension.
///
/// A missing or blank header yields an anonymous caller.
pub async fn caller_identity(mut req: Request, next: Next) -> Response {
    let caller = Caller(caller_from_headers(req.headers()));
    req.extensions_mut().insert(caller);
    next.run(req).await
}

fn caller_from_headers(headers: &HeaderMap) -> Option<UserId> {
    headers
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(UserId::parse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caller_reads_trimmed_header() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_ID_HEADER, HeaderValue::from_static(" user-7 "));
        assert_eq!(
            caller_from_headers(&headers).as_ref().map(UserId::as_str),
            Some("user-7")
        );
    }

    #[test]
    fn blank_header_is_anonymous() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_ID_HEADER, HeaderValue::from_static("   "));
        assert!(caller_from_headers(&headers).is_none());
        assert!(caller_from_headers(&HeaderMap::new()).is_none());
    }

    #[test]
    fn body_user_id_wins_over_header() {
        let caller = Caller(UserId::parse("header-user"));
        assert_eq!(
            caller.or_body(Some("body-user")).as_ref().map(UserId::as_str),
            Some("body-user")
        );
        assert_eq!(
            caller.or_body(Some("  ")).as_ref().map(UserId::as_str),
            Some("header-user")
        );
        assert_eq!(
            caller.or_body(None).as_ref().map(UserId::as_str),
            Some("header-user")
        );
    }
}
