//! Customer handlers.

use axum::{
    extract::{Extension, Path, State},
    http::{header::LOCATION, StatusCode},
    response::{IntoResponse, Json},
    routing::get,
    Router,
};

use common::{AppError, AppResult};
use domain::{Customer, CustomerId};

use crate::extractors::AppJson;
use crate::middleware::CurrentClient;
use crate::state::AppState;

/// Create customer routes
pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_customers).post(create_customer))
        .route(
            "/:id",
            get(get_customer).put(replace_customer).delete(delete_customer),
        )
}

fn parse_id(raw: &str) -> AppResult<CustomerId> {
    raw.parse().map_err(AppError::from)
}

/// List all customers
#[utoipa::path(
    get,
    path = "/customers",
    tag = "Customers",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All stored customers", body = Vec<Customer>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_customers(State(state): State<AppState>) -> AppResult<Json<Vec<Customer>>> {
    let customers = state.customer_service.list_customers().await?;
    Ok(Json(customers))
}

/// Get customer by ID
#[utoipa::path(
    get,
    path = "/customers/{id}",
    tag = "Customers",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Customer ID")
    ),
    responses(
        (status = 200, description = "Customer", body = Customer),
        (status = 400, description = "Malformed customer ID"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Customer>> {
    let customer = state.customer_service.get_customer(parse_id(&id)?).await?;
    Ok(Json(customer))
}

/// Create customer; the store assigns the ID
#[utoipa::path(
    post,
    path = "/customers",
    tag = "Customers",
    security(("bearer_auth" = [])),
    request_body = Customer,
    responses(
        (status = 201, description = "Customer created", body = Customer,
            headers(("Location" = String, description = "URI of the new customer"))),
        (status = 400, description = "Missing customer type or malformed body"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_customer(
    Extension(client): Extension<CurrentClient>,
    State(state): State<AppState>,
    AppJson(customer): AppJson<Customer>,
) -> AppResult<impl IntoResponse> {
    let created = state.customer_service.create_customer(customer).await?;

    let id = created
        .id()
        .ok_or_else(|| AppError::internal("Store returned a customer without an id"))?;
    tracing::debug!(customer_id = %id, client_id = %client.client_id, "Created via API");
    let location = format!("/customers/{}", id);

    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(created)))
}

/// Replace customer in full
#[utoipa::path(
    put,
    path = "/customers/{id}",
    tag = "Customers",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Customer ID")
    ),
    request_body = Customer,
    responses(
        (status = 204, description = "Customer replaced"),
        (status = 400, description = "Missing customer type or malformed body"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn replace_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(customer): AppJson<Customer>,
) -> AppResult<StatusCode> {
    state
        .customer_service
        .replace_customer(parse_id(&id)?, customer)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete customer (succeeds whether or not it exists)
#[utoipa::path(
    delete,
    path = "/customers/{id}",
    tag = "Customers",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Customer ID")
    ),
    responses(
        (status = 204, description = "Customer deleted"),
        (status = 400, description = "Malformed customer ID"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.customer_service.delete_customer(parse_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}
