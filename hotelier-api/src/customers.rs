use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post, put},
    Extension,
    Json,
    Router,
};
use axum_extra::extract::WithRejection;
use hotelier_shared::{CreateCustomerResponse, Customer, CustomerForm};
use tracing::info;

use crate::{
    error::AppError,
    middleware::auth::{staff_auth_middleware, staff_claims, SessionClaims},
    state::AppState,
};

/// Registration and lookup are open; listing and mutation need a staff token.
/// Anonymous lookups never see card fields.
pub fn routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/customers", post(create_customer))
        .route("/customers/{id}", get(get_customer));

    let staff = Router::new()
        .route("/customers", get(list_customers))
        .route("/customers/{id}", put(update_customer).delete(delete_customer))
        .route_layer(axum::middleware::from_fn_with_state(state, staff_auth_middleware));

    public.merge(staff)
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /customers
async fn create_customer(
    State(state): State<AppState>,
    WithRejection(Json(form), _): WithRejection<Json<CustomerForm>, AppError>,
) -> Result<(StatusCode, Json<CreateCustomerResponse>), AppError> {
    let customer = state.customers.create(&form).await?;
    let token = state.tokens.issue_customer(customer.id)?;

    Ok((
        StatusCode::CREATED,
        Json(CreateCustomerResponse {
            id: customer.id,
            token,
            message: "Customer created successfully".to_string(),
        }),
    ))
}

/// GET /customers/{id}
async fn get_customer(
    State(state): State<AppState>,
    headers: HeaderMap,
    WithRejection(Path(customer_id), _): WithRejection<Path<i32>, AppError>,
) -> Result<Json<Customer>, AppError> {
    let mut customer = state.customers.get(customer_id).await?;
    if staff_claims(&state, &headers).is_none() {
        customer.payment = None;
    }
    Ok(Json(customer))
}

/// GET /customers
async fn list_customers(State(state): State<AppState>) -> Result<Json<Vec<Customer>>, AppError> {
    Ok(Json(state.customers.list().await?))
}

/// PUT /customers/{id}
async fn update_customer(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
    WithRejection(Path(customer_id), _): WithRejection<Path<i32>, AppError>,
    WithRejection(Json(form), _): WithRejection<Json<CustomerForm>, AppError>,
) -> Result<Json<Customer>, AppError> {
    let customer = state.customers.update(customer_id, &form).await?;
    info!(customer_id, hotel_id = ?claims.hotel_id, "Customer edited by staff");
    Ok(Json(customer))
}

/// DELETE /customers/{id}
async fn delete_customer(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
    WithRejection(Path(customer_id), _): WithRejection<Path<i32>, AppError>,
) -> Result<StatusCode, AppError> {
    state.customers.delete(customer_id).await?;
    info!(customer_id, hotel_id = ?claims.hotel_id, "Customer removed by staff");
    Ok(StatusCode::NO_CONTENT)
}
