use axum::{
    extract::State,
    Json,
    routing::post,
    Router,
};
use axum_extra::extract::WithRejection;
use hotelier_core::credentials;
use hotelier_shared::{LoginRequest, LoginResponse};
use tracing::info;

use crate::{error::AppError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/employee/login", post(login_employee))
}

/// POST /employee/login
async fn login_employee(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<LoginRequest>, AppError>,
) -> Result<Json<LoginResponse>, AppError> {
    let employee = credentials::authenticate(state.employees.as_ref(), &req).await?;
    let token = state.tokens.issue_employee(&employee)?;

    info!(role = %employee.role, hotel_id = employee.hotel_id, "Employee logged in");

    Ok(Json(LoginResponse {
        token,
        user: employee.profile(),
    }))
}
