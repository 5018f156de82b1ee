//! Request correlation.
//!
//! Every request carries an id: the inbound `x-request-id` header when
//! a proxy already assigned one, a fresh UUID otherwise. The id is
//! stored in the request extensions for span fields and echoed on the
//! response so clients can quote it.

use axum::http::{HeaderMap, HeaderValue};
use axum::{extract::Request, middleware::Next, response::Response};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlation id attached to each request.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

pub async fn request_id_middleware(mut req: Request, next: Next) -> Response {
    let id = inbound_id(req.headers()).unwrap_or_else(|| Uuid::new_v4().to_string());

    req.extensions_mut().insert(RequestId(id.clone()));

    match HeaderValue::from_str(&id) {
        Ok(value) => {
            req.headers_mut().insert(REQUEST_ID_HEADER, value.clone());
            let mut response = next.run(req).await;
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
            response
        }
        Err(_) => next.run(req).await,
    }
}

/// Accept a proxy-assigned id only when it is usable as a header value
/// and short enough to not bloat log lines.
fn inbound_id(headers: &HeaderMap) -> Option<String> {
    let id = headers.get(REQUEST_ID_HEADER)?.to_str().ok()?.trim();
    (!id.is_empty() && id.len() <= 128).then(|| id.to_string())
}
