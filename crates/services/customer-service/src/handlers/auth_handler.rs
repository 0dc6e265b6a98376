//! OAuth2 token endpoint (client-credentials grant).

use axum::{extract::State, response::Json, routing::post, Form, Router};
use axum_extra::{
    headers::{authorization::Basic, Authorization},
    TypedHeader,
};
use serde::Deserialize;
use utoipa::ToSchema;

use common::{AppError, AppResult};
use domain::GRANT_TYPE_CLIENT_CREDENTIALS;

use crate::service::TokenResponse;
use crate::state::AppState;

/// Token request form
#[derive(Debug, Deserialize, ToSchema)]
pub struct TokenRequest {
    /// Must be `client_credentials`
    #[schema(example = "client_credentials")]
    pub grant_type: String,
    /// Space separated subset of the client's scopes; all of them if absent
    #[schema(example = "customers")]
    pub scope: Option<String>,
}

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/token", post(issue_token))
}

/// Exchange client credentials for an access token
#[utoipa::path(
    post,
    path = "/oauth/token",
    tag = "Authentication",
    security(("basic_auth" = [])),
    request_body(content = TokenRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Access token issued", body = TokenResponse),
        (status = 400, description = "Unsupported grant type or invalid scope"),
        (status = 401, description = "Invalid client credentials")
    )
)]
pub async fn issue_token(
    State(state): State<AppState>,
    credentials: Option<TypedHeader<Authorization<Basic>>>,
    Form(request): Form<TokenRequest>,
) -> AppResult<Json<TokenResponse>> {
    let TypedHeader(Authorization(basic)) = credentials.ok_or(AppError::Unauthorized)?;

    if request.grant_type != GRANT_TYPE_CLIENT_CREDENTIALS {
        return Err(AppError::bad_request(format!(
            "Unsupported grant type: {}",
            request.grant_type
        )));
    }

    let token = state
        .authenticator
        .issue_token(basic.username(), basic.password(), request.scope.as_deref())?;

    Ok(Json(token))
}
