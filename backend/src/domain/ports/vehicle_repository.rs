//! Driven port for vehicle listing storage.
//!
//! Both mutating operations are conditional on the listing still being for
//! sale. Adapters must perform the check and the write as one atomic step so
//! concurrent callers cannot both succeed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{UserId, Vehicle, VehicleChanges, VehicleId, VehicleStatus};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by vehicle repository adapters.
    pub enum VehicleRepositoryError {
        /// The store could not be reached.
        Connection { message: String } => "vehicle repository connection failed: {message}",
        /// A query or mutation failed during execution.
        Query { message: String } => "vehicle repository query failed: {message}",
        /// The store refused the values (constraint violation).
        Rejected { message: String } => "vehicle rejected by store: {message}",
        /// No listing has this id.
        NotFound { id: String } => "vehicle {id} not found",
        /// The listing is already sold and cannot change.
        AlreadySold { id: String } => "vehicle {id} already sold",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VehicleRepository: Send + Sync {
    /// Persist a new listing and return it as stored.
    async fn create(&self, vehicle: &Vehicle) -> Result<Vehicle, VehicleRepositoryError>;

    /// Fetch a listing by id.
    async fn find_by_id(&self, id: &VehicleId) -> Result<Option<Vehicle>, VehicleRepositoryError>;

    /// Apply `changes` to a listing that is still for sale.
    async fn update_for_sale(
        &self,
        id: &VehicleId,
        changes: &VehicleChanges,
        now: DateTime<Utc>,
    ) -> Result<Vehicle, VehicleRepositoryError>;

    /// Mark a for-sale listing as sold to `buyer`.
    async fn mark_sold(
        &self,
        id: &VehicleId,
        buyer: UserId,
        now: DateTime<Utc>,
    ) -> Result<Vehicle, VehicleRepositoryError>;

    /// All listings in `status`, cheapest first.
    async fn list_by_status(
        &self,
        status: VehicleStatus,
    ) -> Result<Vec<Vehicle>, VehicleRepositoryError>;
}
