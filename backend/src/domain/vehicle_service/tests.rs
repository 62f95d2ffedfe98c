//! Outcome mapping for the vehicle service.

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::MockVehicleRepository;
use crate::test_support::FixtureClock;
use chrono::{DateTime, Utc};
use mockall::predicate::{always, eq};
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
fn listing(draft: VehicleDraft, now: DateTime<Utc>) -> Vehicle {
    Vehicle::list(VehicleId::random(), draft, now)
}

fn service(
    repo: MockVehicleRepository,
    now: DateTime<Utc>,
) -> VehicleService<MockVehicleRepository> {
    VehicleService::new(Arc::new(repo), Arc::new(FixtureClock::at(now)))
}

#[rstest]
#[tokio::test]
async fn create_persists_a_for_sale_listing(draft: VehicleDraft, now: DateTime<Utc>) {
    let mut repo = MockVehicleRepository::new();
    repo.expect_create()
        .withf(move |vehicle| {
            vehicle.status == VehicleStatus::ForSale
                && vehicle.buyer_id.is_none()
                && vehicle.created_at == now
                && vehicle.brand == "Toyota"
        })
        .times(1)
        .returning(|vehicle| Ok(vehicle.clone()));

    let created = service(repo, now)
        .create(draft)
        .await
        .expect("creation succeeds");

    assert_eq!(created.status, VehicleStatus::ForSale);
}

#[rstest]
#[tokio::test]
async fn create_rejection_is_invalid_request(draft: VehicleDraft, now: DateTime<Utc>) {
    let mut repo = MockVehicleRepository::new();
    repo.expect_create()
        .returning(|_| Err(VehicleRepositoryError::rejected("price check failed")));

    let err = service(repo, now)
        .create(draft)
        .await
        .expect_err("store rejection surfaces");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[case(VehicleRepositoryError::already_sold("x"), ErrorCode::Forbidden)]
#[case(VehicleRepositoryError::not_found("x"), ErrorCode::NotFound)]
#[case(VehicleRepositoryError::query("boom"), ErrorCode::InternalError)]
#[case(VehicleRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[tokio::test]
async fn update_maps_repository_outcomes(
    now: DateTime<Utc>,
    #[case] failure: VehicleRepositoryError,
    #[case] expected: ErrorCode,
) {
    let id = VehicleId::random();
    let mut repo = MockVehicleRepository::new();
    repo.expect_update_for_sale()
        .with(eq(id), always(), eq(now))
        .times(1)
        .returning(move |_, _, _| Err(failure.clone()));

    let changes = VehicleChanges {
        price: Some(12_000.0),
        ..VehicleChanges::default()
    };
    let err = service(repo, now)
        .update(&id, changes)
        .await
        .expect_err("failure surfaces");

    assert_eq!(err.code(), expected);
}

#[rstest]
#[tokio::test]
async fn update_returns_the_edited_listing(listing: Vehicle, now: DateTime<Utc>) {
    let id = listing.id;
    let mut repo = MockVehicleRepository::new();
    repo.expect_update_for_sale()
        .returning(move |_, changes, at| {
            let mut edited = listing.clone();
            edited.apply(changes, at).expect("listing is for sale");
            Ok(edited)
        });

    let changes = VehicleChanges {
        color: Some("Blue".to_owned()),
        ..VehicleChanges::default()
    };
    let edited = service(repo, now)
        .update(&id, changes)
        .await
        .expect("edit succeeds");

    assert_eq!(edited.color, "Blue");
}

#[rstest]
#[tokio::test]
async fn purchase_records_the_buyer(listing: Vehicle, now: DateTime<Utc>) {
    let id = listing.id;
    let buyer = UserId::random();
    let mut repo = MockVehicleRepository::new();
    repo.expect_mark_sold()
        .with(eq(id), eq(buyer), eq(now))
        .times(1)
        .returning(move |_, buyer, at| {
            let mut sold = listing.clone();
            sold.sell_to(buyer, at).expect("listing is for sale");
            Ok(sold)
        });

    let sold = service(repo, now)
        .purchase(&id, buyer)
        .await
        .expect("purchase succeeds");

    assert_eq!(sold.status, VehicleStatus::Sold);
    assert_eq!(sold.buyer_id, Some(buyer));
}

#[rstest]
#[tokio::test]
async fn purchasing_a_sold_listing_is_a_conflict(now: DateTime<Utc>) {
    let mut repo = MockVehicleRepository::new();
    repo.expect_mark_sold()
        .returning(|id, _, _| Err(VehicleRepositoryError::already_sold(id.to_string())));

    let err = service(repo, now)
        .purchase(&VehicleId::random(), UserId::random())
        .await
        .expect_err("second sale rejected");

    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(err.message(), ALREADY_SOLD_MESSAGE);
}

#[rstest]
#[tokio::test]
async fn purchasing_unknown_listing_is_not_found(now: DateTime<Utc>) {
    let mut repo = MockVehicleRepository::new();
    repo.expect_mark_sold()
        .returning(|id, _, _| Err(VehicleRepositoryError::not_found(id.to_string())));

    let err = service(repo, now)
        .purchase(&VehicleId::random(), UserId::random())
        .await
        .expect_err("missing listing");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[case(VehicleStatus::ForSale)]
#[case(VehicleStatus::Sold)]
#[tokio::test]
async fn list_passes_status_through(now: DateTime<Utc>, #[case] status: VehicleStatus) {
    let mut repo = MockVehicleRepository::new();
    repo.expect_list_by_status()
        .with(eq(status))
        .times(1)
        .returning(|_| Ok(Vec::new()));

    let listed = service(repo, now)
        .list_by_status(status)
        .await
        .expect("listing succeeds");

    assert!(listed.is_empty());
}
