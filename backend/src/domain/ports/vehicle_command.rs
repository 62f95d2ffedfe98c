//! Driving port for listing mutations.
use async_trait::async_trait;

use crate::domain::{Error, UserId, Vehicle, VehicleChanges, VehicleDraft, VehicleId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VehicleCommand: Send + Sync {
    /// List a new vehicle for sale.
    async fn create(&self, draft: VehicleDraft) -> Result<Vehicle, Error>;

    /// Edit a listing that has not been sold.
    async fn update(&self, id: &VehicleId, changes: VehicleChanges) -> Result<Vehicle, Error>;

    /// Sell a listing to `buyer`.
    async fn purchase(&self, id: &VehicleId, buyer: UserId) -> Result<Vehicle, Error>;
}
