//! Driving port for listing reads.
use async_trait::async_trait;

use crate::domain::{Error, Vehicle, VehicleStatus};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VehicleQuery: Send + Sync {
    /// Listings in `status`, cheapest first.
    async fn list_by_status(&self, status: VehicleStatus) -> Result<Vec<Vehicle>, Error>;
}
