//! Cross-service flow: a token issued by the auth app buys a listing on the
//! vehicle app. Both apps share one signing secret and in-memory storage.

use std::sync::Arc;

use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{test as actix_test, web};
use chrono::{Duration, Utc};
use marketplace::domain::{AccountService, VehicleService};
use marketplace::inbound::http::health::HealthState;
use marketplace::inbound::http::state::{AuthHttpState, BearerAuth, VehicleHttpState};
use marketplace::outbound::security::JwtTokenCodec;
use marketplace::server::{build_auth_app, build_vehicle_app};
use marketplace::test_support::{
    FixtureClock, InMemoryUserRepository, InMemoryVehicleRepository, PlaintextPasswordHasher,
};
use mockable::{Clock, DefaultClock};
use rstest::rstest;
use serde_json::{Value, json};

const SECRET: &[u8] = b"shared-flow-secret";

async fn body_json(response: ServiceResponse) -> Value {
    let body = actix_test::read_body(response).await;
    if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    }
}

fn vehicle_state() -> VehicleHttpState {
    let service = Arc::new(VehicleService::new(
        Arc::new(InMemoryVehicleRepository::new()),
        Arc::new(DefaultClock),
    ));
    VehicleHttpState::new(service.clone(), service)
}

fn bearer_auth(require_for_writes: bool) -> BearerAuth {
    BearerAuth::new(Arc::new(JwtTokenCodec::new(SECRET)))
        .requiring_auth_for_writes(require_for_writes)
}

/// Register and log in on a fresh auth app, returning `(user_id, token)`.
async fn issue_token() -> (String, String) {
    issue_token_at(Arc::new(DefaultClock)).await
}

async fn issue_token_at(clock: Arc<dyn Clock>) -> (String, String) {
    let service = Arc::new(AccountService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(PlaintextPasswordHasher),
        Arc::new(JwtTokenCodec::new(SECRET)),
        clock,
    ));
    let auth = AuthHttpState::new(service.clone(), service);
    let app = actix_test::init_service(build_auth_app(
        web::Data::new(HealthState::new()),
        web::Data::new(auth),
    ))
    .await;

    let registered = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/register")
            .set_json(json!({"name": "Grace", "email": "grace@example.com", "password": "pw"}))
            .to_request(),
    )
    .await;
    let user_id = body_json(registered).await["id"]
        .as_str()
        .expect("user id")
        .to_owned();
    let logged_in = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/login")
            .set_json(json!({"email": "grace@example.com", "password": "pw"}))
            .to_request(),
    )
    .await;
    let token = body_json(logged_in).await["token"]
        .as_str()
        .expect("token")
        .to_owned();
    (user_id, token)
}

fn listing(brand: &str, price: u32) -> Value {
    json!({"brand": brand, "model": "Base", "year": 2021, "color": "Grey", "price": price})
}

async fn listing_id(created: ServiceResponse) -> String {
    body_json(created).await["id"]
        .as_str()
        .expect("listing id")
        .to_owned()
}

fn prices(listed: &Value) -> Vec<f64> {
    listed
        .as_array()
        .expect("array body")
        .iter()
        .filter_map(|vehicle| vehicle["price"].as_f64())
        .collect()
}

#[rstest]
#[actix_web::test]
async fn bought_listing_moves_from_for_sale_to_sold() {
    let (user_id, token) = issue_token().await;
    let app = actix_test::init_service(build_vehicle_app(
        web::Data::new(HealthState::new()),
        web::Data::new(vehicle_state()),
        web::Data::new(bearer_auth(false)),
    ))
    .await;

    let mut ids = Vec::new();
    for (brand, price) in [("Audi", 30_000), ("Fiat", 9_000), ("Ford", 15_000)] {
        let created = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/vehicles")
                .set_json(listing(brand, price))
                .to_request(),
        )
        .await;
        assert_eq!(created.status(), StatusCode::CREATED);
        ids.push(listing_id(created).await);
    }
    let ford = ids.last().expect("three listings").clone();

    let bought = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/vehicles/{ford}/buy"))
            .insert_header((AUTHORIZATION, format!("Bearer {token}")))
            .to_request(),
    )
    .await;
    assert_eq!(bought.status(), StatusCode::OK);
    let purchase = body_json(bought).await;
    assert_eq!(purchase["vehicle"]["status"], "SOLD");
    assert_eq!(purchase["vehicle"]["buyerId"], user_id.as_str());

    let request = actix_test::TestRequest::get()
        .uri("/vehicles/forsale")
        .to_request();
    let for_sale = actix_test::call_service(&app, request).await;
    let request = actix_test::TestRequest::get()
        .uri("/vehicles/sold")
        .to_request();
    let sold = actix_test::call_service(&app, request).await;
    assert_eq!(prices(&body_json(for_sale).await), vec![9_000.0, 30_000.0]);
    assert_eq!(prices(&body_json(sold).await), vec![15_000.0]);

    let again = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/vehicles/{ford}/buy"))
            .insert_header((AUTHORIZATION, format!("Bearer {token}")))
            .to_request(),
    )
    .await;
    assert_eq!(again.status(), StatusCode::BAD_REQUEST);

    let edit = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/vehicles/{ford}"))
            .set_json(json!({"price": 1}))
            .to_request(),
    )
    .await;
    assert_eq!(edit.status(), StatusCode::FORBIDDEN);
}

#[rstest]
#[case(None, StatusCode::UNAUTHORIZED)]
#[case(Some("Bearer not-a-jwt"), StatusCode::FORBIDDEN)]
#[case(Some("Basic Z3JhY2U6cHc="), StatusCode::UNAUTHORIZED)]
#[actix_web::test]
async fn purchase_requires_a_valid_bearer(
    #[case] authorization: Option<&str>,
    #[case] expected: StatusCode,
) {
    let app = actix_test::init_service(build_vehicle_app(
        web::Data::new(HealthState::new()),
        web::Data::new(vehicle_state()),
        web::Data::new(bearer_auth(false)),
    ))
    .await;
    let created = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/vehicles")
            .set_json(listing("Fiat", 9_000))
            .to_request(),
    )
    .await;
    let id = listing_id(created).await;

    let mut request = actix_test::TestRequest::post().uri(&format!("/vehicles/{id}/buy"));
    if let Some(value) = authorization {
        request = request.insert_header((AUTHORIZATION, value));
    }
    let response = actix_test::call_service(&app, request.to_request()).await;

    assert_eq!(response.status(), expected);
}

#[rstest]
#[actix_web::test]
async fn guarded_writes_accept_issued_tokens() {
    let (_, token) = issue_token().await;
    let app = actix_test::init_service(build_vehicle_app(
        web::Data::new(HealthState::new()),
        web::Data::new(vehicle_state()),
        web::Data::new(bearer_auth(true)),
    ))
    .await;

    let anonymous = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/vehicles")
            .set_json(listing("Fiat", 9_000))
            .to_request(),
    )
    .await;
    let authorised = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/vehicles")
            .insert_header((AUTHORIZATION, format!("Bearer {token}")))
            .set_json(listing("Fiat", 9_000))
            .to_request(),
    )
    .await;

    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(authorised.status(), StatusCode::CREATED);
}

#[rstest]
#[actix_web::test]
async fn expired_token_is_forbidden() {
    let clock = FixtureClock::at(Utc::now() - Duration::hours(3));
    let (_, token) = issue_token_at(Arc::new(clock)).await;
    let app = actix_test::init_service(build_vehicle_app(
        web::Data::new(HealthState::new()),
        web::Data::new(vehicle_state()),
        web::Data::new(bearer_auth(false)),
    ))
    .await;
    let created = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/vehicles")
            .set_json(listing("Fiat", 9_000))
            .to_request(),
    )
    .await;
    let id = listing_id(created).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/vehicles/{id}/buy"))
            .insert_header((AUTHORIZATION, format!("Bearer {token}")))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["code"], "forbidden");
}
