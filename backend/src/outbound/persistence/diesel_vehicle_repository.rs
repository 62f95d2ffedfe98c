//! PostgreSQL `VehicleRepository` backed by Diesel.
//!
//! Edits and sales are single `UPDATE ... WHERE status = 'FOR_SALE'
//! RETURNING *` statements. When no row comes back the listing is reloaded
//! to tell a missing id apart from one that is already sold.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use tracing::warn;

use crate::domain::ports::{VehicleRepository, VehicleRepositoryError};
use crate::domain::{UserId, Vehicle, VehicleChanges, VehicleId, VehicleStatus};

use super::error_mapping::{StoreFailure, classify_diesel_error, classify_pool_error};
use super::models::{NewVehicleRow, VehicleChangeset, VehicleRow};
use super::pool::DbPool;
use super::schema::vehicles;

/// Diesel-backed vehicle listings.
#[derive(Clone)]
pub struct DieselVehicleRepository {
    pool: DbPool,
}

impl DieselVehicleRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_port_error(failure: StoreFailure) -> VehicleRepositoryError {
    match failure {
        StoreFailure::Connection(message) => VehicleRepositoryError::connection(message),
        StoreFailure::Rejected(message) => VehicleRepositoryError::rejected(message),
        StoreFailure::UniqueViolation(constraint) => VehicleRepositoryError::query(format!(
            "unique violation on {}",
            constraint.as_deref().unwrap_or("unknown constraint")
        )),
        StoreFailure::Query(message) => VehicleRepositoryError::query(message),
    }
}

fn map_diesel_error(error: diesel::result::Error) -> VehicleRepositoryError {
    to_port_error(classify_diesel_error(error))
}

fn row_to_vehicle(row: VehicleRow) -> Result<Vehicle, VehicleRepositoryError> {
    let status: VehicleStatus = row.status.parse().map_err(|err| {
        warn!(vehicle_id = %row.id, %err, "stored vehicle has unknown status");
        VehicleRepositoryError::query(format!("vehicle {}: {err}", row.id))
    })?;
    Ok(Vehicle {
        id: VehicleId::from_uuid(row.id),
        brand: row.brand,
        model: row.model,
        year: row.year,
        color: row.color,
        price: row.price,
        status,
        buyer_id: row.buyer_id.map(UserId::from_uuid),
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

/// Explain why a conditional update touched no row.
async fn explain_missed_update(
    conn: &mut AsyncPgConnection,
    id: &VehicleId,
) -> VehicleRepositoryError {
    let status = vehicles::table
        .filter(vehicles::id.eq(*id.as_uuid()))
        .select(vehicles::status)
        .first::<String>(conn)
        .await
        .optional();

    match status {
        Ok(None) => VehicleRepositoryError::not_found(id.to_string()),
        Ok(Some(status)) if status == VehicleStatus::Sold.as_str() => {
            VehicleRepositoryError::already_sold(id.to_string())
        }
        Ok(Some(status)) => VehicleRepositoryError::query(format!(
            "conditional update on vehicle {id} matched no row while status is {status}"
        )),
        Err(err) => map_diesel_error(err),
    }
}

#[async_trait]
impl VehicleRepository for DieselVehicleRepository {
    async fn create(&self, vehicle: &Vehicle) -> Result<Vehicle, VehicleRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| to_port_error(classify_pool_error(err)))?;

        let row = NewVehicleRow {
            id: *vehicle.id.as_uuid(),
            brand: &vehicle.brand,
            model: &vehicle.model,
            year: vehicle.year,
            color: &vehicle.color,
            price: vehicle.price,
            status: vehicle.status.as_str(),
            buyer_id: vehicle.buyer_id.map(|buyer| *buyer.as_uuid()),
            created_at: vehicle.created_at,
            updated_at: vehicle.updated_at,
        };

        let stored = diesel::insert_into(vehicles::table)
            .values(&row)
            .returning(VehicleRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_vehicle(stored)
    }

    async fn find_by_id(&self, id: &VehicleId) -> Result<Option<Vehicle>, VehicleRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| to_port_error(classify_pool_error(err)))?;

        vehicles::table
            .filter(vehicles::id.eq(*id.as_uuid()))
            .select(VehicleRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_vehicle)
            .transpose()
    }

    async fn update_for_sale(
        &self,
        id: &VehicleId,
        changes: &VehicleChanges,
        now: DateTime<Utc>,
    ) -> Result<Vehicle, VehicleRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| to_port_error(classify_pool_error(err)))?;

        let changeset = VehicleChangeset {
            brand: changes.brand.as_deref(),
            model: changes.model.as_deref(),
            year: changes.year,
            color: changes.color.as_deref(),
            price: changes.price,
            updated_at: now,
        };

        let updated = diesel::update(
            vehicles::table
                .filter(vehicles::id.eq(*id.as_uuid()))
                .filter(vehicles::status.eq(VehicleStatus::ForSale.as_str())),
        )
        .set(&changeset)
        .returning(VehicleRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        match updated {
            Some(row) => row_to_vehicle(row),
            None => Err(explain_missed_update(&mut *conn, id).await),
        }
    }

    async fn mark_sold(
        &self,
        id: &VehicleId,
        buyer: UserId,
        now: DateTime<Utc>,
    ) -> Result<Vehicle, VehicleRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| to_port_error(classify_pool_error(err)))?;

        let sold = diesel::update(
            vehicles::table
                .filter(vehicles::id.eq(*id.as_uuid()))
                .filter(vehicles::status.eq(VehicleStatus::ForSale.as_str())),
        )
        .set((
            vehicles::status.eq(VehicleStatus::Sold.as_str()),
            vehicles::buyer_id.eq(Some(*buyer.as_uuid())),
            vehicles::updated_at.eq(now),
        ))
        .returning(VehicleRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        match sold {
            Some(row) => row_to_vehicle(row),
            None => Err(explain_missed_update(&mut *conn, id).await),
        }
    }

    async fn list_by_status(
        &self,
        status: VehicleStatus,
    ) -> Result<Vec<Vehicle>, VehicleRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| to_port_error(classify_pool_error(err)))?;

        let rows = vehicles::table
            .filter(vehicles::status.eq(status.as_str()))
            .order((vehicles::price.asc(), vehicles::id.asc()))
            .select(VehicleRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_vehicle).collect()
    }
}
