//! `VehicleRepository` over a mutex-guarded map.
//!
//! The conditional edit and sale run under one lock, matching the atomic
//! `UPDATE ... WHERE status = 'FOR_SALE'` the Diesel adapter issues.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{VehicleRepository, VehicleRepositoryError};
use crate::domain::{UserId, Vehicle, VehicleChanges, VehicleId, VehicleStatus};

#[derive(Default)]
pub struct InMemoryVehicleRepository {
    vehicles: Mutex<HashMap<VehicleId, Vehicle>>,
}

impl InMemoryVehicleRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored copy of a listing, for assertions.
    #[must_use]
    pub fn get(&self, id: &VehicleId) -> Option<Vehicle> {
        self.lock().get(id).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<VehicleId, Vehicle>> {
        self.vehicles
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn mutate_for_sale(
        &self,
        id: &VehicleId,
        change: impl FnOnce(&mut Vehicle) -> Result<(), crate::domain::AlreadySold>,
    ) -> Result<Vehicle, VehicleRepositoryError> {
        let mut vehicles = self.lock();
        let vehicle = vehicles
            .get_mut(id)
            .ok_or_else(|| VehicleRepositoryError::not_found(id.to_string()))?;
        change(vehicle).map_err(|_| VehicleRepositoryError::already_sold(id.to_string()))?;
        Ok(vehicle.clone())
    }
}

#[async_trait]
impl VehicleRepository for InMemoryVehicleRepository {
    async fn create(&self, vehicle: &Vehicle) -> Result<Vehicle, VehicleRepositoryError> {
        self.lock().insert(vehicle.id, vehicle.clone());
        Ok(vehicle.clone())
    }

    async fn find_by_id(&self, id: &VehicleId) -> Result<Option<Vehicle>, VehicleRepositoryError> {
        Ok(self.get(id))
    }

    async fn update_for_sale(
        &self,
        id: &VehicleId,
        changes: &VehicleChanges,
        now: DateTime<Utc>,
    ) -> Result<Vehicle, VehicleRepositoryError> {
        self.mutate_for_sale(id, |vehicle| vehicle.apply(changes, now))
    }

    async fn mark_sold(
        &self,
        id: &VehicleId,
        buyer: UserId,
        now: DateTime<Utc>,
    ) -> Result<Vehicle, VehicleRepositoryError> {
        self.mutate_for_sale(id, |vehicle| vehicle.sell_to(buyer, now))
    }

    async fn list_by_status(
        &self,
        status: VehicleStatus,
    ) -> Result<Vec<Vehicle>, VehicleRepositoryError> {
        let mut listed: Vec<Vehicle> = self
            .lock()
            .values()
            .filter(|vehicle| vehicle.status == status)
            .cloned()
            .collect();
        listed.sort_by(|a, b| {
            a.price
                .total_cmp(&b.price)
                .then_with(|| a.id.as_uuid().cmp(b.id.as_uuid()))
        });
        Ok(listed)
    }
}
