//! Print both OpenAPI documents as one JSON object keyed by service.

use marketplace::doc::{AuthApiDoc, VehicleApiDoc};
use utoipa::OpenApi;

fn main() -> Result<(), serde_json::Error> {
    let documents = serde_json::json!({
        "auth": AuthApiDoc::openapi(),
        "vehicle": VehicleApiDoc::openapi(),
    });
    println!("{}", serde_json::to_string_pretty(&documents)?);
    Ok(())
}
