//! Login credentials accepted by the login port.
//!
//! Handlers hand raw payload strings to [`LoginCredentials::try_from_parts`]
//! so that the domain owns the normalisation rules.

use zeroize::Zeroizing;

use super::{Error, Username, UserValidationError};

/// Reasons a login payload is rejected before any account lookup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("username is too long")]
    UsernameTooLong,
    #[error("password must not be empty")]
    EmptyPassword,
}

impl From<LoginValidationError> for Error {
    fn from(value: LoginValidationError) -> Self {
        let field = match value {
            LoginValidationError::EmptyPassword => "password",
            _ => "username",
        };
        Error::invalid_request(value.to_string())
            .with_details(serde_json::json!({ "field": field }))
    }
}

/// Credentials submitted by a caller.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty; whitespace is kept verbatim and the buffer is
///   wiped on drop.
///
/// # Examples
/// ```
/// use todo_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" admin ", "password").unwrap();
/// assert_eq!(creds.username().as_ref(), "admin");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: Username,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let username = Username::new(username).map_err(|err| match err {
            UserValidationError::UsernameTooLong { .. } => LoginValidationError::UsernameTooLong,
            _ => LoginValidationError::EmptyUsername,
        })?;
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Trimmed username.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Password as supplied.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyUsername)]
    #[case("   ", "pw", LoginValidationError::EmptyUsername)]
    #[case("user", "", LoginValidationError::EmptyPassword)]
    fn rejects_incomplete_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn rejects_overlong_username() {
        let long = "u".repeat(200);
        let err = LoginCredentials::try_from_parts(&long, "pw").expect_err("too long");
        assert_eq!(err, LoginValidationError::UsernameTooLong);
    }

    #[rstest]
    #[case("  admin  ", " secret ")]
    #[case("alice", "correct horse battery staple")]
    fn keeps_password_verbatim(#[case] username: &str, #[case] password: &str) {
        let creds = LoginCredentials::try_from_parts(username, password)
            .expect("valid inputs should succeed");
        assert_eq!(creds.username().as_ref(), username.trim());
        assert_eq!(creds.password(), password);
    }

    #[rstest]
    fn validation_errors_become_invalid_requests() {
        let err: Error = LoginValidationError::EmptyPassword.into();
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            err.details(),
            Some(&serde_json::json!({ "field": "password" }))
        );
    }
}
