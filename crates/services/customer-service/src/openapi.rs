//! OpenAPI documentation.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::handlers::auth_handler::TokenRequest;
use crate::service::TokenResponse;
use domain::{Address, Customer, CustomerType, Gender, MaritalStatus, PhoneType};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::auth_handler::issue_token,
        crate::handlers::customer_handler::list_customers,
        crate::handlers::customer_handler::get_customer,
        crate::handlers::customer_handler::create_customer,
        crate::handlers::customer_handler::replace_customer,
        crate::handlers::customer_handler::delete_customer,
    ),
    components(
        schemas(
            TokenRequest,
            TokenResponse,
            Customer,
            Address,
            CustomerType,
            Gender,
            MaritalStatus,
            PhoneType,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "OAuth2 client-credentials token endpoint"),
        (name = "Customers", description = "Customer management endpoints"),
    )
)]
pub struct ApiDoc;

/// Security scheme modifier.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
            components.add_security_scheme(
                "basic_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Basic).build()),
            );
        }
    }
}
