//! Namespaced cache keys.
//!
//! Keys are versioned so a payload format change can move to `v2` without
//! reading stale entries. Users are cached under both their id and their
//! email; hash jobs live in their own namespace.

use std::fmt;

use crate::domain::{Email, HashJobId, UserId};

/// Key under which a cached entity is stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Key for a user looked up by identifier.
    ///
    /// # Examples
    /// ```
    /// use unhash::domain::{UserId, ports::CacheKey};
    ///
    /// let id = UserId::new("42").expect("id");
    /// assert_eq!(CacheKey::user_id(&id).as_str(), "user:v1:id:42");
    /// ```
    pub fn user_id(id: &UserId) -> Self {
        Self(format!("user:v1:id:{id}"))
    }

    /// Key for a user looked up by email.
    pub fn user_email(email: &Email) -> Self {
        Self(format!("user:v1:email:{email}"))
    }

    /// Key for a hash job.
    pub fn hash_job(id: &HashJobId) -> Self {
        Self(format!("hashjob:v1:id:{id}"))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
