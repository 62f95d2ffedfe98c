//! Auth service handlers: registration and login.
//!
//! ```text
//! POST /register {"name":"Ada","email":"ada@example.com","password":"pw"}
//! POST /login {"email":"ada@example.com","password":"pw"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, LoginCredentials, RegistrationDetails, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::no_store_header;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::AuthHttpState;
use crate::inbound::http::validation::{map_login_error, map_registration_error};

/// Registration request body. Absent fields are reported as missing.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    #[schema(example = "correct horse battery staple")]
    pub password: Option<String>,
}

impl TryFrom<&RegisterRequest> for RegistrationDetails {
    type Error = Error;

    fn try_from(value: &RegisterRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            value.name.as_deref().unwrap_or_default(),
            value.email.as_deref().unwrap_or_default(),
            value.password.as_deref().unwrap_or_default(),
        )
        .map_err(map_registration_error)
    }
}

/// Public view of a newly registered user.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RegisteredUser {
    #[schema(value_type = String, format = Uuid)]
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<User> for RegisteredUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.into(),
            email: user.email.into(),
        }
    }
}

/// Login request body.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    pub password: Option<String>,
}

impl TryFrom<&LoginRequest> for LoginCredentials {
    type Error = Error;

    fn try_from(value: &LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            value.email.as_deref().unwrap_or_default(),
            value.password.as_deref().unwrap_or_default(),
        )
        .map_err(map_login_error)
    }
}

/// Token issued at login.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LoginResponse {
    /// HS256 JWT valid for one hour.
    pub token: String,
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = RegisteredUser),
        (status = 400, description = "Missing field or duplicate email", body = ErrorSchema),
        (status = 503, description = "User store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<AuthHttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let details = RegistrationDetails::try_from(&payload.into_inner())?;
    let user = state.registration.register(&details).await?;
    Ok(HttpResponse::Created().json(RegisteredUser::from(user)))
}

/// Exchange credentials for a bearer token.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Missing email or password", body = ErrorSchema),
        (status = 401, description = "Invalid password", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<AuthHttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from(&payload.into_inner())?;
    let token = state.login.login(&credentials).await?;
    Ok(HttpResponse::Ok()
        .insert_header(no_store_header())
        .json(LoginResponse {
            token: token.into(),
        }))
}
