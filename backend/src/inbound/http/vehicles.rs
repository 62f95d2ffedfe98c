//! Vehicle service handlers.
//!
//! ```text
//! POST /vehicles {"brand":"Toyota","model":"Corolla","year":2020,"color":"Black","price":85000}
//! PUT  /vehicles/{id} {"price":80000}
//! POST /vehicles/{id}/buy   (Authorization: Bearer <token>)
//! GET  /vehicles/forsale
//! GET  /vehicles/sold
//! ```
//!
//! The listing routes are registered before `/vehicles/{id}` routes so the
//! literal segments win.

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{Error, Vehicle, VehicleChanges, VehicleDraft, VehicleStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{BearerClaims, WriteAccess};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::VehicleHttpState;
use crate::inbound::http::validation::{map_vehicle_error, parse_vehicle_id};

/// Message returned with a completed purchase.
pub const PURCHASE_COMPLETED_MESSAGE: &str = "purchase completed";

/// Listing fields. Required on create, optional on edit.
#[derive(Debug, Default, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct VehiclePayload {
    #[schema(example = "Toyota")]
    pub brand: Option<String>,
    #[schema(example = "Corolla")]
    pub model: Option<String>,
    #[schema(example = 2020)]
    pub year: Option<i32>,
    #[schema(example = "Black")]
    pub color: Option<String>,
    #[schema(example = 85000.0)]
    pub price: Option<f64>,
}

impl TryFrom<&VehiclePayload> for VehicleDraft {
    type Error = Error;

    fn try_from(value: &VehiclePayload) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            value.brand.as_deref(),
            value.model.as_deref(),
            value.year,
            value.color.as_deref(),
            value.price,
        )
        .map_err(map_vehicle_error)
    }
}

impl TryFrom<&VehiclePayload> for VehicleChanges {
    type Error = Error;

    fn try_from(value: &VehiclePayload) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            value.brand.as_deref(),
            value.model.as_deref(),
            value.year,
            value.color.as_deref(),
            value.price,
        )
        .map_err(map_vehicle_error)
    }
}

/// Outcome of a successful purchase.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PurchaseResponse {
    #[schema(example = "purchase completed")]
    pub message: String,
    pub vehicle: Vehicle,
}

/// List a vehicle for sale.
#[utoipa::path(
    post,
    path = "/vehicles",
    request_body = VehiclePayload,
    responses(
        (status = 201, description = "Vehicle listed", body = Vehicle),
        (status = 400, description = "Invalid vehicle", body = ErrorSchema),
        (status = 401, description = "Token required when writes are guarded", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["vehicles"],
    operation_id = "createVehicle",
    security([])
)]
#[post("/vehicles")]
pub async fn create_vehicle(
    state: web::Data<VehicleHttpState>,
    _access: WriteAccess,
    payload: web::Json<VehiclePayload>,
) -> ApiResult<HttpResponse> {
    let draft = VehicleDraft::try_from(&payload.into_inner())?;
    let vehicle = state.commands.create(draft).await?;
    Ok(HttpResponse::Created().json(vehicle))
}

/// Edit a listing that is still for sale.
#[utoipa::path(
    put,
    path = "/vehicles/{id}",
    params(("id" = String, Path, description = "Vehicle UUID")),
    request_body = VehiclePayload,
    responses(
        (status = 200, description = "Updated vehicle", body = Vehicle),
        (status = 400, description = "Invalid id or field", body = ErrorSchema),
        (status = 403, description = "Vehicle already sold", body = ErrorSchema),
        (status = 404, description = "Vehicle not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["vehicles"],
    operation_id = "updateVehicle",
    security([])
)]
#[put("/vehicles/{id}")]
pub async fn update_vehicle(
    state: web::Data<VehicleHttpState>,
    _access: WriteAccess,
    path: web::Path<String>,
    payload: web::Json<VehiclePayload>,
) -> ApiResult<web::Json<Vehicle>> {
    let id = parse_vehicle_id(&path)?;
    let changes = VehicleChanges::try_from(&payload.into_inner())?;
    let vehicle = state.commands.update(&id, changes).await?;
    Ok(web::Json(vehicle))
}

/// Buy a listing as the token holder.
#[utoipa::path(
    post,
    path = "/vehicles/{id}/buy",
    params(("id" = String, Path, description = "Vehicle UUID")),
    responses(
        (status = 200, description = "Purchase completed", body = PurchaseResponse),
        (status = 400, description = "Invalid id or vehicle already sold", body = ErrorSchema),
        (status = 401, description = "Token not provided", body = ErrorSchema),
        (status = 403, description = "Invalid or expired token", body = ErrorSchema),
        (status = 404, description = "Vehicle not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["vehicles"],
    operation_id = "buyVehicle",
    security(("BearerToken" = []))
)]
#[post("/vehicles/{id}/buy")]
pub async fn buy_vehicle(
    state: web::Data<VehicleHttpState>,
    claims: BearerClaims,
    path: web::Path<String>,
) -> ApiResult<web::Json<PurchaseResponse>> {
    let buyer = claims.require_user_id()?;
    let id = parse_vehicle_id(&path)?;
    let vehicle = state.commands.purchase(&id, buyer).await?;
    info!(vehicle_id = %id, buyer_id = %buyer, "purchase completed");
    Ok(web::Json(PurchaseResponse {
        message: PURCHASE_COMPLETED_MESSAGE.to_owned(),
        vehicle,
    }))
}

/// Listings still for sale, cheapest first.
#[utoipa::path(
    get,
    path = "/vehicles/forsale",
    responses(
        (status = 200, description = "Vehicles for sale", body = [Vehicle]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["vehicles"],
    operation_id = "listVehiclesForSale",
    security([])
)]
#[get("/vehicles/forsale")]
pub async fn list_for_sale(
    state: web::Data<VehicleHttpState>,
) -> ApiResult<web::Json<Vec<Vehicle>>> {
    let vehicles = state.queries.list_by_status(VehicleStatus::ForSale).await?;
    Ok(web::Json(vehicles))
}

/// Sold listings, cheapest first.
#[utoipa::path(
    get,
    path = "/vehicles/sold",
    responses(
        (status = 200, description = "Sold vehicles", body = [Vehicle]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["vehicles"],
    operation_id = "listSoldVehicles",
    security([])
)]
#[get("/vehicles/sold")]
pub async fn list_sold(state: web::Data<VehicleHttpState>) -> ApiResult<web::Json<Vec<Vehicle>>> {
    let vehicles = state.queries.list_by_status(VehicleStatus::Sold).await?;
    Ok(web::Json(vehicles))
}

/// Register every vehicle route in matching order.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_for_sale)
        .service(list_sold)
        .service(create_vehicle)
        .service(update_vehicle)
        .service(buy_vehicle);
}
