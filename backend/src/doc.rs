//! OpenAPI documents for the two services.
//!
//! [`AuthApiDoc`] covers registration and login; [`VehicleApiDoc`] covers
//! the listing endpoints and declares the `BearerToken` scheme used by the
//! purchase route. Both include the health probes. Swagger UI serves them in
//! debug builds and `openapi-dump` prints them for tooling.

use crate::domain::{Vehicle, VehicleStatus};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::{LoginRequest, LoginResponse, RegisterRequest, RegisteredUser};
use crate::inbound::http::vehicles::{PurchaseResponse, VehiclePayload};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer security scheme referenced by protected operations.
pub const BEARER_SCHEME: &str = "BearerToken";

/// Adds the JWT bearer scheme issued by `POST /login`.
struct BearerSecurityAddon;

impl Modify for BearerSecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token returned by POST /login on the auth service."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the auth service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Marketplace auth API",
        description = "Account registration and token issuance."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        RegisterRequest,
        RegisteredUser,
        LoginRequest,
        LoginResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct AuthApiDoc;

/// OpenAPI document for the vehicle service.
#[derive(OpenApi)]
#[openapi(
    modifiers(&BearerSecurityAddon),
    info(
        title = "Marketplace vehicle API",
        description = "Vehicle listings, edits and purchases."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    paths(
        crate::inbound::http::vehicles::create_vehicle,
        crate::inbound::http::vehicles::update_vehicle,
        crate::inbound::http::vehicles::buy_vehicle,
        crate::inbound::http::vehicles::list_for_sale,
        crate::inbound::http::vehicles::list_sold,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Vehicle,
        VehicleStatus,
        VehiclePayload,
        PurchaseResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "vehicles", description = "Vehicle listings"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct VehicleApiDoc;
