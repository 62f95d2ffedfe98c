//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every field-level failure becomes an `invalid_request` error whose
//! `details` name the offending field and a stable machine code.

use serde_json::json;

use crate::domain::{
    Error, LoginValidationError, RegistrationValidationError, VehicleId, VehicleValidationError,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    BlankField,
    InvalidUuid,
    OutOfRange,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::BlankField => "blank_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::OutOfRange => "out_of_range",
        }
    }
}

fn field_error(field: &str, code: ErrorCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: &str) -> Error {
    field_error(
        field,
        ErrorCode::MissingField,
        format!("missing required field: {field}"),
    )
}

pub(crate) fn map_registration_error(err: RegistrationValidationError) -> Error {
    field_error(err.field(), ErrorCode::MissingField, err.to_string())
}

pub(crate) fn map_login_error(err: LoginValidationError) -> Error {
    missing_field_error(err.field())
}

pub(crate) fn map_vehicle_error(err: VehicleValidationError) -> Error {
    let code = match err {
        VehicleValidationError::InvalidId => ErrorCode::InvalidUuid,
        VehicleValidationError::Missing { .. } => ErrorCode::MissingField,
        VehicleValidationError::Blank { .. } => ErrorCode::BlankField,
        VehicleValidationError::YearOutOfRange { .. }
        | VehicleValidationError::InvalidPrice { .. } => ErrorCode::OutOfRange,
    };
    field_error(err.field(), code, err.to_string())
}

/// Parse a vehicle id taken from the request path.
pub(crate) fn parse_vehicle_id(raw: &str) -> Result<VehicleId, Error> {
    if raw.trim().is_empty() {
        return Err(missing_field_error("id"));
    }
    VehicleId::new(raw).map_err(map_vehicle_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode as DomainCode;
    use rstest::rstest;
    use serde_json::Value;

    fn detail<'a>(error: &'a Error, key: &str) -> Option<&'a str> {
        error
            .details()
            .and_then(|d| d.get(key))
            .and_then(Value::as_str)
    }

    #[rstest]
    fn missing_field_names_the_field() {
        let err = missing_field_error("brand");
        assert_eq!(err.code(), DomainCode::InvalidRequest);
        assert_eq!(detail(&err, "field"), Some("brand"));
        assert_eq!(detail(&err, "code"), Some("missing_field"));
    }

    #[rstest]
    #[case(RegistrationValidationError::MissingName, "name")]
    #[case(RegistrationValidationError::MissingEmail, "email")]
    #[case(RegistrationValidationError::MissingPassword, "password")]
    fn registration_errors_carry_field_details(
        #[case] err: RegistrationValidationError,
        #[case] field: &str,
    ) {
        let mapped = map_registration_error(err);
        assert_eq!(detail(&mapped, "field"), Some(field));
        assert_eq!(detail(&mapped, "code"), Some("missing_field"));
    }

    #[rstest]
    #[case(LoginValidationError::EmptyEmail, "email")]
    #[case(LoginValidationError::EmptyPassword, "password")]
    fn login_errors_name_the_missing_field(#[case] err: LoginValidationError, #[case] field: &str) {
        let mapped = map_login_error(err);
        assert_eq!(mapped.code(), DomainCode::InvalidRequest);
        assert_eq!(detail(&mapped, "field"), Some(field));
        assert_eq!(detail(&mapped, "code"), Some("missing_field"));
    }

    #[rstest]
    #[case(VehicleValidationError::Missing { field: "price" }, "price", "missing_field")]
    #[case(VehicleValidationError::Blank { field: "color" }, "color", "blank_field")]
    #[case(VehicleValidationError::YearOutOfRange { year: 0 }, "year", "out_of_range")]
    #[case(VehicleValidationError::InvalidPrice { price: -1.0 }, "price", "out_of_range")]
    fn vehicle_errors_carry_field_details(
        #[case] err: VehicleValidationError,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let mapped = map_vehicle_error(err);
        assert_eq!(mapped.code(), DomainCode::InvalidRequest);
        assert_eq!(detail(&mapped, "field"), Some(field));
        assert_eq!(detail(&mapped, "code"), Some(code));
    }

    #[rstest]
    #[case("", "missing_field")]
    #[case("  ", "missing_field")]
    #[case("not-a-uuid", "invalid_uuid")]
    fn bad_path_ids_are_rejected(#[case] raw: &str, #[case] code: &str) {
        let err = parse_vehicle_id(raw).expect_err("id rejected");
        assert_eq!(detail(&err, "field"), Some("id"));
        assert_eq!(detail(&err, "code"), Some(code));
    }

    #[rstest]
    fn well_formed_path_ids_parse() {
        let id = parse_vehicle_id("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id");
        assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    }
}
