//! Vehicle listings and their sale lifecycle.
//!
//! A listing starts `FOR_SALE` and moves to `SOLD` exactly once, when a
//! purchase succeeds. A sold listing is frozen: its descriptive fields and
//! buyer never change again.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::UserId;

/// Earliest model year accepted for a listing.
pub const MIN_YEAR: i32 = 1;
/// Latest model year accepted for a listing.
pub const MAX_YEAR: i32 = 9999;

/// Stable vehicle identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(Uuid);

impl VehicleId {
    /// Parse an identifier from its hyphenated form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, VehicleValidationError> {
        Uuid::parse_str(id.as_ref().trim())
            .map(Self)
            .map_err(|_| VehicleValidationError::InvalidId)
    }

    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Sale state of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleStatus {
    ForSale,
    Sold,
}

impl VehicleStatus {
    /// Database and wire spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ForSale => "FOR_SALE",
            Self::Sold => "SOLD",
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a stored status string is not one of the two known values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown vehicle status: {0}")]
pub struct UnknownVehicleStatus(pub String);

impl FromStr for VehicleStatus {
    type Err = UnknownVehicleStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FOR_SALE" => Ok(Self::ForSale),
            "SOLD" => Ok(Self::Sold),
            other => Err(UnknownVehicleStatus(other.to_owned())),
        }
    }
}

/// Field-level validation failures for vehicle input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VehicleValidationError {
    #[error("vehicle id must be a valid UUID")]
    InvalidId,
    #[error("{field} is required")]
    Missing { field: &'static str },
    #[error("{field} must not be blank")]
    Blank { field: &'static str },
    #[error("year must be between 1 and 9999, got {year}")]
    YearOutOfRange { year: i32 },
    #[error("price must be a finite, non-negative number")]
    InvalidPrice { price: f64 },
}

impl VehicleValidationError {
    /// Payload field the failure refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::InvalidId => "id",
            Self::Missing { field } | Self::Blank { field } => *field,
            Self::YearOutOfRange { .. } => "year",
            Self::InvalidPrice { .. } => "price",
        }
    }
}

/// Raised by the lifecycle guards on a sold listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("vehicle already sold")]
pub struct AlreadySold;

/// A listing as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    #[schema(value_type = String, format = Uuid)]
    pub id: VehicleId,
    #[schema(example = "Toyota")]
    pub brand: String,
    #[schema(example = "Corolla")]
    pub model: String,
    #[schema(example = 2020)]
    pub year: i32,
    #[schema(example = "Black")]
    pub color: String,
    #[schema(example = 85000.0)]
    pub price: f64,
    pub status: VehicleStatus,
    #[schema(value_type = Option<String>, format = Uuid)]
    pub buyer_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vehicle {
    /// New `FOR_SALE` listing built from a validated draft.
    #[must_use]
    pub fn list(id: VehicleId, draft: VehicleDraft, now: DateTime<Utc>) -> Self {
        let VehicleDraft {
            brand,
            model,
            year,
            color,
            price,
        } = draft;
        Self {
            id,
            brand,
            model,
            year,
            color,
            price,
            status: VehicleStatus::ForSale,
            buyer_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[must_use]
    pub fn is_sold(&self) -> bool {
        self.status == VehicleStatus::Sold
    }

    /// Apply `changes` if the listing is still for sale.
    pub fn apply(
        &mut self,
        changes: &VehicleChanges,
        now: DateTime<Utc>,
    ) -> Result<(), AlreadySold> {
        if self.is_sold() {
            return Err(AlreadySold);
        }
        if let Some(brand) = &changes.brand {
            self.brand.clone_from(brand);
        }
        if let Some(model) = &changes.model {
            self.model.clone_from(model);
        }
        if let Some(year) = changes.year {
            self.year = year;
        }
        if let Some(color) = &changes.color {
            self.color.clone_from(color);
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        self.updated_at = now;
        Ok(())
    }

    /// Record the sale to `buyer` if the listing is still for sale.
    pub fn sell_to(&mut self, buyer: UserId, now: DateTime<Utc>) -> Result<(), AlreadySold> {
        if self.is_sold() {
            return Err(AlreadySold);
        }
        self.status = VehicleStatus::Sold;
        self.buyer_id = Some(buyer);
        self.updated_at = now;
        Ok(())
    }
}

fn required_text(
    field: &'static str,
    value: Option<&str>,
) -> Result<String, VehicleValidationError> {
    let raw = value.ok_or(VehicleValidationError::Missing { field })?;
    optional_text(field, Some(raw)).map(|text| text.unwrap_or_default())
}

fn optional_text(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<String>, VehicleValidationError> {
    match value.map(str::trim) {
        None => Ok(None),
        Some("") => Err(VehicleValidationError::Blank { field }),
        Some(text) => Ok(Some(text.to_owned())),
    }
}

fn check_year(year: i32) -> Result<i32, VehicleValidationError> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(year)
    } else {
        Err(VehicleValidationError::YearOutOfRange { year })
    }
}

fn check_price(price: f64) -> Result<f64, VehicleValidationError> {
    if price.is_finite() && price >= 0.0 {
        Ok(price)
    } else {
        Err(VehicleValidationError::InvalidPrice { price })
    }
}

/// Validated input for a new listing.
///
/// # Examples
/// ```
/// use marketplace::domain::VehicleDraft;
///
/// let draft = VehicleDraft::try_from_parts(
///     Some("Toyota"), Some("Corolla"), Some(2020), Some("Black"), Some(85_000.0),
/// ).unwrap();
/// assert_eq!(draft.brand, "Toyota");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleDraft {
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub color: String,
    pub price: f64,
}

impl VehicleDraft {
    pub fn try_from_parts(
        brand: Option<&str>,
        model: Option<&str>,
        year: Option<i32>,
        color: Option<&str>,
        price: Option<f64>,
    ) -> Result<Self, VehicleValidationError> {
        Ok(Self {
            brand: required_text("brand", brand)?,
            model: required_text("model", model)?,
            year: check_year(year.ok_or(VehicleValidationError::Missing { field: "year" })?)?,
            color: required_text("color", color)?,
            price: check_price(price.ok_or(VehicleValidationError::Missing { field: "price" })?)?,
        })
    }
}

/// Partial edit of a listing; `None` leaves the field as it is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleChanges {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub color: Option<String>,
    pub price: Option<f64>,
}

impl VehicleChanges {
    pub fn try_from_parts(
        brand: Option<&str>,
        model: Option<&str>,
        year: Option<i32>,
        color: Option<&str>,
        price: Option<f64>,
    ) -> Result<Self, VehicleValidationError> {
        Ok(Self {
            brand: optional_text("brand", brand)?,
            model: optional_text("model", model)?,
            year: year.map(check_year).transpose()?,
            color: optional_text("color", color)?,
            price: price.map(check_price).transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp")
    }

    #[fixture]
    fn draft() -> VehicleDraft {
        VehicleDraft::try_from_parts(
            Some("Toyota"),
            Some("Corolla"),
            Some(2020),
            Some("Black"),
            Some(85_000.0),
        )
        .expect("valid draft")
    }

    #[fixture]
    fn listed(draft: VehicleDraft, now: DateTime<Utc>) -> Vehicle {
        Vehicle::list(VehicleId::random(), draft, now)
    }

    #[rstest]
    #[case(None, Some(2020), Some(1.0), "brand")]
    #[case(Some("  "), Some(2020), Some(1.0), "brand")]
    #[case(Some("VW"), None, Some(1.0), "year")]
    #[case(Some("VW"), Some(0), Some(1.0), "year")]
    #[case(Some("VW"), Some(2020), Some(-1.0), "price")]
    #[case(Some("VW"), Some(2020), Some(f64::NAN), "price")]
    #[case(Some("VW"), Some(2020), None, "price")]
    fn draft_rejects_bad_fields(
        #[case] brand: Option<&str>,
        #[case] year: Option<i32>,
        #[case] price: Option<f64>,
        #[case] field: &str,
    ) {
        let err = VehicleDraft::try_from_parts(brand, Some("Golf"), year, Some("Red"), price)
            .expect_err("draft must be rejected");
        assert_eq!(err.field(), field);
    }

    #[rstest]
    fn draft_trims_text(draft: VehicleDraft) {
        let trimmed = VehicleDraft::try_from_parts(
            Some(" Toyota "),
            Some("Corolla\t"),
            Some(2020),
            Some(" Black"),
            Some(85_000.0),
        )
        .expect("valid draft");
        assert_eq!(trimmed, draft);
    }

    #[rstest]
    fn listing_starts_for_sale_without_buyer(listed: Vehicle, now: DateTime<Utc>) {
        assert_eq!(listed.status, VehicleStatus::ForSale);
        assert!(listed.buyer_id.is_none());
        assert_eq!(listed.created_at, now);
    }

    #[rstest]
    fn apply_updates_only_supplied_fields(mut listed: Vehicle, now: DateTime<Utc>) {
        let changes = VehicleChanges::try_from_parts(None, None, None, Some("Blue"), Some(80_000.0))
            .expect("valid changes");
        let later = now + chrono::Duration::seconds(5);
        listed.apply(&changes, later).expect("editable");
        assert_eq!(listed.color, "Blue");
        assert!((listed.price - 80_000.0).abs() < f64::EPSILON);
        assert_eq!(listed.brand, "Toyota");
        assert_eq!(listed.updated_at, later);
    }

    #[rstest]
    fn sold_vehicle_is_frozen(mut listed: Vehicle, now: DateTime<Utc>) {
        let buyer = UserId::random();
        listed.sell_to(buyer, now).expect("first sale succeeds");
        let snapshot = listed.clone();

        let edit = VehicleChanges {
            price: Some(1.0),
            ..VehicleChanges::default()
        };
        assert_eq!(listed.apply(&edit, now), Err(AlreadySold));
        assert_eq!(listed.sell_to(UserId::random(), now), Err(AlreadySold));
        assert_eq!(listed, snapshot);
        assert_eq!(listed.buyer_id, Some(buyer));
    }

    #[rstest]
    fn changes_reject_blank_text() {
        let err = VehicleChanges::try_from_parts(None, Some(" "), None, None, None)
            .expect_err("blank model rejected");
        assert_eq!(err, VehicleValidationError::Blank { field: "model" });
    }

    #[rstest]
    #[case(VehicleStatus::ForSale, "\"FOR_SALE\"")]
    #[case(VehicleStatus::Sold, "\"SOLD\"")]
    fn status_wire_spelling(#[case] status: VehicleStatus, #[case] json: &str) {
        assert_eq!(serde_json::to_string(&status).expect("serialise"), json);
        assert_eq!(status.as_str().parse::<VehicleStatus>(), Ok(status));
    }

    #[rstest]
    fn vehicle_json_is_camel_case(listed: Vehicle) {
        let value = serde_json::to_value(&listed).expect("serialise");
        assert_eq!(value["status"], "FOR_SALE");
        assert!(value["buyerId"].is_null());
        assert!(value.get("createdAt").is_some());
    }
}
