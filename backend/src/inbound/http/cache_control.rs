//! Cache-control policies shared by handlers.

use actix_web::http::header::{self, HeaderName};

/// Responses that must never be stored, such as probes and issued tokens.
pub const NO_STORE: &str = "no-store";

/// Header tuple for [`NO_STORE`].
pub const fn no_store_header() -> (HeaderName, &'static str) {
    (header::CACHE_CONTROL, NO_STORE)
}
