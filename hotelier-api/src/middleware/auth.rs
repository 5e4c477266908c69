use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};
use hotelier_shared::Role;
use serde::{Deserialize, Serialize};

use crate::{error::AppError, state::AppState};

// ============================================================================
// JWT Claims
// ============================================================================

/// Payload of every session token: `{id, role, hotelId?, iat, exp}`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    pub id: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel_id: Option<i32>,
    pub iat: usize,
    pub exp: usize,
}

/// Claims of a valid staff bearer token, if the request carries one.
/// Missing, invalid and non-staff tokens all yield `None`.
pub fn staff_claims(state: &AppState, headers: &HeaderMap) -> Option<SessionClaims> {
    let bearer = headers.typed_get::<Authorization<Bearer>>()?;
    state
        .tokens
        .verify(bearer.token())
        .ok()
        .filter(|claims| claims.role.is_staff())
}

// ============================================================================
// Staff Authentication Middleware
// ============================================================================

pub async fn staff_auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // 1. Extract bearer token
    let bearer = req
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .ok_or_else(|| AppError::AuthenticationError("Missing bearer token".to_string()))?;

    // 2. Verify signature and expiry
    let claims = state
        .tokens
        .verify(bearer.token())
        .map_err(|e| AppError::AuthenticationError(format!("Invalid token: {}", e)))?;

    // 3. Only hotel staff manage customer records
    if !claims.role.is_staff() {
        return Err(AppError::AuthorizationError(
            "Staff role required".to_string(),
        ));
    }

    // 4. Inject claims
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
