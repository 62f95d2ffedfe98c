//! Registration and login inputs.
//!
//! Handlers hand raw strings to these constructors before calling a port, so
//! the services only ever see validated values. Passwords are wrapped in
//! [`Zeroizing`] and wiped when dropped.

use std::fmt;

use zeroize::Zeroizing;

use super::{EmailAddress, UserName};

/// Why a registration payload was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationValidationError {
    MissingName,
    MissingEmail,
    MissingPassword,
}

impl RegistrationValidationError {
    /// Payload field the failure refers to.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::MissingName => "name",
            Self::MissingEmail => "email",
            Self::MissingPassword => "password",
        }
    }
}

impl fmt::Display for RegistrationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "name, email and password are all required")
    }
}

impl std::error::Error for RegistrationValidationError {}

/// Validated registration request.
///
/// # Examples
/// ```
/// use marketplace::domain::RegistrationDetails;
///
/// let details = RegistrationDetails::try_from_parts(" Ada ", "Ada@example.com", "pw").unwrap();
/// assert_eq!(details.name().as_ref(), "Ada");
/// assert_eq!(details.email().as_ref(), "Ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationDetails {
    name: UserName,
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl RegistrationDetails {
    pub fn try_from_parts(
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, RegistrationValidationError> {
        let name = UserName::new(name).map_err(|_| RegistrationValidationError::MissingName)?;
        let email =
            EmailAddress::new(email).map_err(|_| RegistrationValidationError::MissingEmail)?;
        if password.is_empty() {
            return Err(RegistrationValidationError::MissingPassword);
        }
        Ok(Self {
            name,
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn name(&self) -> &UserName {
        &self.name
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Why a login payload was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginValidationError {
    EmptyEmail,
    EmptyPassword,
}

impl LoginValidationError {
    /// Payload field the failure refers to.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::EmptyEmail => "email",
            Self::EmptyPassword => "password",
        }
    }
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} must not be empty", self.field())
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is trimmed the same way as at registration and is otherwise
///   unchecked, so an unknown address reaches the user lookup.
/// - `password` is non-empty and keeps caller whitespace verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email = EmailAddress::new(email).map_err(|_| LoginValidationError::EmptyEmail)?;
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
