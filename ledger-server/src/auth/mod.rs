//! Caller identity
//!
//! Authentication itself lives in the fronting access-control proxy; by the
//! time a request reaches this service the user is already verified and the
//! proxy forwards the identity as headers. The core records that identity on
//! every write and performs no authorization of its own. It must never read
//! ambient session state, so the extracted [`CurrentUser`] is passed down
//! explicitly everywhere.

use axum::{extract::Request, middleware::Next, response::Response};

use crate::utils::AppError;

/// Identity header set by the access-control proxy
pub const USER_ID_HEADER: &str = "x-user-id";
/// Optional display name header
pub const USER_NAME_HEADER: &str = "x-user-name";

/// The authenticated caller
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub display_name: String,
}

/// Middleware: lift the forwarded identity into a request extension, or
/// reject the request when it is missing.
pub async fn require_identity(mut req: Request, next: Next) -> Result<Response, AppError> {
    let id = req
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(AppError::Unauthorized)?
        .to_string();

    let display_name = req
        .headers()
        .get(USER_NAME_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .unwrap_or("")
        .to_string();

    req.extensions_mut().insert(CurrentUser { id, display_name });
    Ok(next.run(req).await)
}
