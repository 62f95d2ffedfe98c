//! Environment-driven settings for both services.
//!
//! Everything is read through [`mockable::Env`] so tests can inject a
//! `MockEnv`. Release builds refuse to start with the development signing
//! secret unless `JWT_ALLOW_INSECURE_DEFAULT` explicitly allows it.

use std::net::{IpAddr, SocketAddr};

use mockable::Env;
use tracing::warn;
use zeroize::Zeroizing;

use crate::outbound::persistence::DEFAULT_MAX_CONNECTIONS;
use crate::outbound::security::DEFAULT_BCRYPT_COST;

pub(crate) const HOST_ENV: &str = "HOST";
pub(crate) const PORT_ENV: &str = "PORT";
pub(crate) const DATABASE_URL_ENV: &str = "DATABASE_URL";
pub(crate) const DATABASE_MAX_CONNECTIONS_ENV: &str = "DATABASE_MAX_CONNECTIONS";
pub(crate) const JWT_SECRET_ENV: &str = "JWT_SECRET";
pub(crate) const JWT_ALLOW_INSECURE_DEFAULT_ENV: &str = "JWT_ALLOW_INSECURE_DEFAULT";
pub(crate) const BCRYPT_COST_ENV: &str = "BCRYPT_COST";
pub(crate) const REQUIRE_AUTH_FOR_WRITES_ENV: &str = "VEHICLE_REQUIRE_AUTH_FOR_WRITES";
pub(crate) const RUN_MIGRATIONS_ENV: &str = "RUN_MIGRATIONS";

const DEFAULT_HOST: IpAddr = IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED);
/// Signing secret used only when no `JWT_SECRET` is configured.
const DEV_FALLBACK_SECRET: &str = "fallback_secret";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

/// Build mode used to decide how strict validation is.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate the development secret with a warning.
    Debug,
    /// Release builds require a configured secret.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Which binary is being configured; decides the default port.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ServiceKind {
    Auth,
    Vehicle,
}

impl ServiceKind {
    #[must_use]
    pub const fn default_port(self) -> u16 {
        match self {
            Self::Auth => 7001,
            Self::Vehicle => 7000,
        }
    }
}

/// Errors raised while reading configuration.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// Release build without a signing secret.
    #[error("JWT_SECRET must be set in release builds")]
    InsecureSecret,
}

/// Database connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub run_migrations: bool,
}

/// Settings shared by both binaries.
pub struct ServerSettings {
    pub bind_addr: SocketAddr,
    pub database: DatabaseSettings,
    pub jwt_secret: Zeroizing<String>,
    pub bcrypt_cost: u32,
    pub require_auth_for_writes: bool,
}

impl std::fmt::Debug for ServerSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerSettings")
            .field("bind_addr", &self.bind_addr)
            .field("database_max_connections", &self.database.max_connections)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("require_auth_for_writes", &self.require_auth_for_writes)
            .finish_non_exhaustive()
    }
}

/// Read the settings for `service` from `env`.
///
/// ```rust
/// use marketplace::server::{BuildMode, ServiceKind, settings_from_env};
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "DATABASE_URL" => Some("postgres://localhost/marketplace".to_owned()),
///     "JWT_SECRET" => Some("s3cret".to_owned()),
///     _ => None,
/// });
///
/// let settings = settings_from_env(&env, BuildMode::Release, ServiceKind::Vehicle).unwrap();
/// assert_eq!(settings.bind_addr.port(), 7000);
/// ```
pub fn settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    service: ServiceKind,
) -> Result<ServerSettings, ConfigError> {
    let bind_addr = SocketAddr::new(host_from_env(env)?, port_from_env(env, service)?);
    let database = DatabaseSettings {
        url: env
            .string(DATABASE_URL_ENV)
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::MissingEnv {
                name: DATABASE_URL_ENV,
            })?,
        max_connections: parse_or(env, DATABASE_MAX_CONNECTIONS_ENV, DEFAULT_MAX_CONNECTIONS, |v| {
            v.parse::<u32>().ok().filter(|n| *n > 0)
        }, "a positive integer")?,
        run_migrations: parse_or(env, RUN_MIGRATIONS_ENV, true, parse_bool, BOOL_EXPECTED)?,
    };

    Ok(ServerSettings {
        bind_addr,
        database,
        jwt_secret: jwt_secret_from_env(env, mode)?,
        bcrypt_cost: parse_or(
            env,
            BCRYPT_COST_ENV,
            DEFAULT_BCRYPT_COST,
            |v| v.parse::<u32>().ok().filter(|cost| BCRYPT_COST_RANGE.contains(cost)),
            "an integer between 4 and 31",
        )?,
        require_auth_for_writes: parse_or(
            env,
            REQUIRE_AUTH_FOR_WRITES_ENV,
            false,
            parse_bool,
            BOOL_EXPECTED,
        )?,
    })
}

fn host_from_env<E: Env>(env: &E) -> Result<IpAddr, ConfigError> {
    parse_or(
        env,
        HOST_ENV,
        DEFAULT_HOST,
        |v| v.parse().ok(),
        "an IP address",
    )
}

fn port_from_env<E: Env>(env: &E, service: ServiceKind) -> Result<u16, ConfigError> {
    parse_or(
        env,
        PORT_ENV,
        service.default_port(),
        |v| v.parse().ok(),
        "a port number",
    )
}

fn jwt_secret_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<Zeroizing<String>, ConfigError> {
    if let Some(secret) = env.string(JWT_SECRET_ENV).filter(|s| !s.is_empty()) {
        return Ok(Zeroizing::new(secret));
    }
    let allow_insecure = parse_or(
        env,
        JWT_ALLOW_INSECURE_DEFAULT_ENV,
        false,
        parse_bool,
        BOOL_EXPECTED,
    )?;
    if mode.is_debug() || allow_insecure {
        warn!("JWT_SECRET not set; using the development signing secret");
        Ok(Zeroizing::new(DEV_FALLBACK_SECRET.to_owned()))
    } else {
        Err(ConfigError::InsecureSecret)
    }
}

/// Read `name`, falling back to `default` when unset and failing on values
/// `parse` rejects.
fn parse_or<E, T, F>(
    env: &E,
    name: &'static str,
    default: T,
    parse: F,
    expected: &'static str,
) -> Result<T, ConfigError>
where
    E: Env,
    F: Fn(&str) -> Option<T>,
{
    match env.string(name) {
        None => Ok(default),
        Some(value) => parse(value.trim()).ok_or(ConfigError::InvalidEnv {
            name,
            value,
            expected,
        }),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
