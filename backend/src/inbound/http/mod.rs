//! HTTP inbound adapter exposing the REST endpoints of both services.

pub mod auth;
pub mod cache_control;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod users;
pub mod validation;
pub mod vehicles;

pub use error::ApiResult;
