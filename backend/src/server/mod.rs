//! Server construction and middleware wiring for both binaries.

mod config;
mod state_builders;

pub use config::{
    BuildMode, ConfigError, DatabaseSettings, ServerSettings, ServiceKind, settings_from_env,
};
pub use state_builders::{build_auth_state, build_bearer_auth, build_vehicle_state};

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::{AuthApiDoc, VehicleApiDoc};
use crate::inbound::http::error::json_config;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::{AuthHttpState, BearerAuth, VehicleHttpState};
use crate::inbound::http::users::{login, register};
use crate::inbound::http::vehicles;
use crate::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Apply pending migrations when enabled, then open the connection pool.
///
/// # Errors
/// Returns [`std::io::Error`] wrapping the migration or pool failure.
pub async fn prepare_database(database: &DatabaseSettings) -> std::io::Result<DbPool> {
    if database.run_migrations {
        run_pending_migrations(&database.url)
            .await
            .map_err(std::io::Error::other)?;
    }
    let config = PoolConfig::new(database.url.clone()).with_max_size(database.max_connections);
    DbPool::new(config).await.map_err(std::io::Error::other)
}

/// Build the auth service application.
///
/// Exposed so integration tests can drive the same routing and middleware
/// with in-memory ports.
pub fn build_auth_app(
    health_state: web::Data<HealthState>,
    auth_state: web::Data<AuthHttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(auth_state)
        .app_data(json_config())
        .wrap(Trace)
        .service(register)
        .service(login)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(
        SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", AuthApiDoc::openapi()),
    );

    app
}

/// Build the vehicle service application.
pub fn build_vehicle_app(
    health_state: web::Data<HealthState>,
    vehicle_state: web::Data<VehicleHttpState>,
    bearer_auth: web::Data<BearerAuth>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(vehicle_state)
        .app_data(bearer_auth)
        .app_data(json_config())
        .wrap(Trace)
        .configure(vehicles::configure)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(
        SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", VehicleApiDoc::openapi()),
    );

    app
}

/// Bind the auth service and mark it ready.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_auth_server(
    health_state: web::Data<HealthState>,
    settings: &ServerSettings,
    pool: &DbPool,
) -> std::io::Result<Server> {
    let auth_state = web::Data::new(build_auth_state(pool, settings));
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_auth_app(server_health_state.clone(), auth_state.clone())
    })
    .bind(settings.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

/// Bind the vehicle service and mark it ready.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_vehicle_server(
    health_state: web::Data<HealthState>,
    settings: &ServerSettings,
    pool: &DbPool,
) -> std::io::Result<Server> {
    let vehicle_state = web::Data::new(build_vehicle_state(pool));
    let bearer_auth = web::Data::new(build_bearer_auth(settings));
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_vehicle_app(
            server_health_state.clone(),
            vehicle_state.clone(),
            bearer_auth.clone(),
        )
    })
    .bind(settings.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
