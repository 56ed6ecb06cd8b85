//! Credential primitives.
//!
//! Handlers turn raw request strings into these types before calling the
//! Authenticating concept, so blank inputs never reach the hasher.

use std::fmt;

use zeroize::Zeroizing;

use super::{UserValidationError, Username};

/// Raised when login or registration input is malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Username missing, blank, or otherwise invalid.
    Username(UserValidationError),
    /// Password was empty.
    EmptyPassword,
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Username(err) => fmt::Display::fmt(err, f),
            Self::EmptyPassword => write!(f, "Username and password must be non-empty!"),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

/// Plain-text password held in a zeroising buffer.
///
/// Whitespace is preserved so credential comparisons match exactly what the
/// user typed.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Construct a password, rejecting empty input.
    pub fn new(raw: &str) -> Result<Self, CredentialsValidationError> {
        if raw.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self(Zeroizing::new(raw.to_owned())))
    }

    /// Borrow the secret.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(..)")
    }
}

/// Validated username/password pair used for registration and login.
///
/// # Examples
/// ```
/// use focusfeed::domain::Credentials;
///
/// let creds = Credentials::try_from_parts("  ada ", "hunter2").unwrap();
/// assert_eq!(creds.username().as_ref(), "ada");
/// assert_eq!(creds.password().expose(), "hunter2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    username: Username,
    password: Password,
}

impl Credentials {
    /// Validate raw inputs.
    pub fn try_from_parts(
        username: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let username = Username::new(username).map_err(CredentialsValidationError::Username)?;
        let password = Password::new(password)?;
        Ok(Self { username, password })
    }

    /// Username as entered, trimmed.
    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Password as entered.
    #[must_use]
    pub fn password(&self) -> &Password {
        &self.password
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw")]
    #[case("   ", "pw")]
    #[case("ada", "")]
    fn blank_inputs_use_the_shared_message(#[case] username: &str, #[case] password: &str) {
        let err = Credentials::try_from_parts(username, password).expect_err("invalid");
        assert_eq!(err.to_string(), "Username and password must be non-empty!");
    }

    #[test]
    fn password_whitespace_is_preserved() {
        let creds = Credentials::try_from_parts("ada", "  spaced  ").expect("valid");
        assert_eq!(creds.password().expose(), "  spaced  ");
    }

    #[test]
    fn password_debug_is_redacted() {
        let password = Password::new("secret").expect("valid");
        assert_eq!(format!("{password:?}"), "Password(..)");
    }
}
