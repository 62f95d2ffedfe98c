//! Vehicle service entry-point: listings, edits and purchases.

use actix_web::web;
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use marketplace::inbound::http::health::HealthState;
use marketplace::server::{
    BuildMode, ServiceKind, create_vehicle_server, prepare_database, settings_from_env,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = settings_from_env(
        &DefaultEnv::new(),
        BuildMode::from_debug_assertions(),
        ServiceKind::Vehicle,
    )
    .map_err(std::io::Error::other)?;
    let pool = prepare_database(&settings.database).await?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_vehicle_server(health_state, &settings, &pool)?;
    info!(addr = %settings.bind_addr, "vehicle service listening");
    server.await
}
