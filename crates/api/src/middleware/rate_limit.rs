//! Global request rate limiting for `/api`.

use axum::extract::{Request, State};
use axum::http::{HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;

use crate::error::AppError;
use crate::extract::{client_ip, peer_addr};
use crate::state::AppState;

pub const RATE_LIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
pub const RATE_LIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");

/// Count the request against the caller's global window and reject it with
/// `429` once the window is exhausted. Allowed responses carry the window
/// budget in `X-RateLimit-Limit` and `X-RateLimit-Remaining`.
///
/// Requests whose address cannot be resolved pass through; endpoints that
/// need an address reject them on their own.
pub async fn global_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(ip) = client_ip(request.headers(), peer_addr(request.extensions())) else {
        tracing::debug!("Skipping rate limit for request without client address");
        return Ok(next.run(request).await);
    };

    let limiter = &state.global_limiter;
    limiter.check(&ip).await?;
    let mut response = next.run(request).await;

    match limiter.info(&ip).await {
        Ok(Some(info)) => {
            let headers = response.headers_mut();
            headers.insert(
                RATE_LIMIT_LIMIT,
                HeaderValue::from(limiter.config().max_requests),
            );
            headers.insert(RATE_LIMIT_REMAINING, HeaderValue::from(info.remaining));
        }
        Ok(None) => {}
        Err(err) => tracing::debug!(error = %err, "Rate limit info unavailable"),
    }
    Ok(response)
}
