//! Domain-specific errors for the finance tracker.
//!
//! Contains error variants for common failure cases like:
//! - Input validation (empty fields, mismatched passwords, non-positive amounts)
//! - Account errors (duplicate username, bad credentials)
//! - Storage errors (unreadable or unwritable backing files)

use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum Error {
    AmountMustBePositive,
    AmountOutOfRange,
    DuplicateUsername,
    EmptyPassword,
    EmptyUsername,
    InvalidCredentials,
    InvalidUsername,
    NoAccounts,
    PasswordMismatch,
    PasswordHash(bcrypt::BcryptError),
    Persistence {
        path: PathBuf,
        source: io::Error,
    },
    StoreUnavailable {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Error {
    /// True for failures caused by bad caller input rather than by storage.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::AmountMustBePositive
                | Error::AmountOutOfRange
                | Error::EmptyPassword
                | Error::EmptyUsername
                | Error::InvalidUsername
                | Error::PasswordMismatch
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::AmountMustBePositive => write!(f, "amount must be greater than zero"),
            Error::AmountOutOfRange => write!(f, "amount is too large to record"),
            Error::DuplicateUsername => write!(f, "username already exists"),
            Error::EmptyPassword => write!(f, "password must not be empty"),
            Error::EmptyUsername => write!(f, "username must not be empty"),
            Error::InvalidCredentials => write!(f, "invalid username or password"),
            Error::InvalidUsername => {
                write!(f, "username must not contain path separators or NUL")
            }
            Error::NoAccounts => write!(f, "no accounts found, please create an account"),
            Error::PasswordMismatch => write!(f, "passwords do not match"),
            Error::PasswordHash(e) => write!(f, "password hashing failed: {}", e),
            Error::Persistence { path, source } => {
                write!(f, "cannot access {}: {}", path.display(), source)
            }
            Error::StoreUnavailable { path, source } => {
                write!(f, "{} is not a valid store file: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::PasswordHash(e) => Some(e),
            Error::Persistence { source, .. } => Some(source),
            Error::StoreUnavailable { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<bcrypt::BcryptError> for Error {
    fn from(e: bcrypt::BcryptError) -> Self {
        Error::PasswordHash(e)
    }
}
