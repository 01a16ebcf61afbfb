//! User data model.
//!
//! Users are immutable once created: the identifier is supplied by the caller,
//! while the username and email must each be unique across the store.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned by the user constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    EmptyUsername,
    EmptyEmail,
}

impl UserValidationError {
    /// Name of the field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyId => "id",
            Self::EmptyUsername => "username",
            Self::EmptyEmail => "email",
        }
    }
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

fn non_blank(value: String, error: UserValidationError) -> Result<String, UserValidationError> {
    if value.trim().is_empty() {
        Err(error)
    } else {
        Ok(value)
    }
}

/// Stable user identifier chosen by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        non_blank(id.into(), UserValidationError::EmptyId).map(Self)
    }

    /// Generate a new random [`UserId`] backed by a UUID v4.
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Login handle, unique across all users.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(username: impl Into<String>) -> Result<Self, UserValidationError> {
        non_blank(username.into(), UserValidationError::EmptyUsername).map(Self)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Contact address, unique across all users and used as a secondary lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and construct an [`Email`].
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        non_blank(email.into(), UserValidationError::EmptyEmail).map(Self)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

macro_rules! impl_string_conversions {
    ($($ty:ident),* $(,)?) => {
        $(
            impl AsRef<str> for $ty {
                fn as_ref(&self) -> &str {
                    self.as_str()
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }

            impl From<$ty> for String {
                fn from(value: $ty) -> Self {
                    value.0
                }
            }

            impl TryFrom<String> for $ty {
                type Error = UserValidationError;

                fn try_from(value: String) -> Result<Self, Self::Error> {
                    Self::new(value)
                }
            }
        )*
    };
}

impl_string_conversions!(UserId, Username, Email);

/// Application user.
///
/// ## Invariants
/// - `id`, `username` and `email` are non-empty once trimmed of whitespace.
/// - Uniqueness of each field is enforced by the store, not by this type.
///
/// # Examples
/// ```
/// use unhash::domain::User;
///
/// let user = User::try_from_strings("u-1", "ada", "ada@example.com").expect("valid user");
/// assert_eq!(user.email().as_ref(), "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    id: UserId,
    username: Username,
    email: Email,
}

impl User {
    /// Build a new [`User`] from validated components.
    pub fn new(id: UserId, username: Username, email: Email) -> Self {
        Self {
            id,
            username,
            email,
        }
    }

    /// Fallible constructor enforcing the non-empty field invariants.
    pub fn try_from_strings(
        id: impl Into<String>,
        username: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self::new(
            UserId::new(id)?,
            Username::new(username)?,
            Email::new(email)?,
        ))
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn email(&self) -> &Email {
        &self.email
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
struct UserDto {
    id: String,
    username: String,
    email: String,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let User {
            id,
            username,
            email,
        } = value;
        Self {
            id: id.into(),
            username: username.into(),
            email: email.into(),
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        User::try_from_strings(value.id, value.username, value.email)
    }
}
