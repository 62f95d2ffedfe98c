//! Listing, editing and buying vehicles.
//!
//! The sale guard lives in the repository's conditional writes; this service
//! only decides how each repository outcome is reported to callers. Editing
//! a sold listing is `Forbidden`, buying one is a `Conflict`.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{error, info};

use crate::domain::ports::{VehicleCommand, VehicleQuery, VehicleRepository, VehicleRepositoryError};
use crate::domain::{Error, UserId, Vehicle, VehicleChanges, VehicleDraft, VehicleId, VehicleStatus};

/// Message returned when buying a listing that is already sold.
pub const ALREADY_SOLD_MESSAGE: &str = "vehicle already sold";
/// Message returned when editing a listing that is already sold.
pub const SOLD_NOT_EDITABLE_MESSAGE: &str = "a sold vehicle cannot be edited";
/// Message returned for unknown listing ids.
pub const VEHICLE_NOT_FOUND_MESSAGE: &str = "vehicle not found";

/// Domain service behind the vehicle endpoints.
#[derive(Clone)]
pub struct VehicleService<R> {
    vehicles: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> VehicleService<R> {
    pub fn new(vehicles: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { vehicles, clock }
    }
}

/// Failures that mean the same thing for every operation.
fn map_store_failure(error: VehicleRepositoryError) -> Error {
    match error {
        VehicleRepositoryError::Rejected { message } => Error::invalid_request(message),
        VehicleRepositoryError::Connection { message } => {
            error!(%message, "vehicle store unavailable");
            Error::service_unavailable("vehicle store unavailable")
        }
        VehicleRepositoryError::NotFound { .. } => Error::not_found(VEHICLE_NOT_FOUND_MESSAGE),
        other @ (VehicleRepositoryError::Query { .. }
        | VehicleRepositoryError::AlreadySold { .. }) => {
            error!(error = %other, "vehicle store operation failed");
            Error::internal(other.to_string())
        }
    }
}

#[async_trait]
impl<R> VehicleCommand for VehicleService<R>
where
    R: VehicleRepository,
{
    async fn create(&self, draft: VehicleDraft) -> Result<Vehicle, Error> {
        let listing = Vehicle::list(VehicleId::random(), draft, self.clock.utc());
        let stored = self
            .vehicles
            .create(&listing)
            .await
            .map_err(|err| match err {
                VehicleRepositoryError::Rejected { .. } => {
                    Error::invalid_request("vehicle could not be created")
                }
                other => map_store_failure(other),
            })?;
        info!(vehicle_id = %stored.id, "vehicle listed");
        Ok(stored)
    }

    async fn update(&self, id: &VehicleId, changes: VehicleChanges) -> Result<Vehicle, Error> {
        self.vehicles
            .update_for_sale(id, &changes, self.clock.utc())
            .await
            .map_err(|err| match err {
                VehicleRepositoryError::AlreadySold { .. } => {
                    Error::forbidden(SOLD_NOT_EDITABLE_MESSAGE)
                }
                other => map_store_failure(other),
            })
    }

    async fn purchase(&self, id: &VehicleId, buyer: UserId) -> Result<Vehicle, Error> {
        let sold = self
            .vehicles
            .mark_sold(id, buyer, self.clock.utc())
            .await
            .map_err(|err| match err {
                VehicleRepositoryError::AlreadySold { .. } => Error::conflict(ALREADY_SOLD_MESSAGE),
                other => map_store_failure(other),
            })?;
        info!(vehicle_id = %sold.id, buyer_id = %buyer, "vehicle sold");
        Ok(sold)
    }
}

#[async_trait]
impl<R> VehicleQuery for VehicleService<R>
where
    R: VehicleRepository,
{
    async fn list_by_status(&self, status: VehicleStatus) -> Result<Vec<Vehicle>, Error> {
        self.vehicles
            .list_by_status(status)
            .await
            .map_err(map_store_failure)
    }
}

#[cfg(test)]
mod tests;
