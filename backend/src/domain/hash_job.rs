//! Hash job data model.
//!
//! A hash job is a batch of opaque hash tokens submitted on behalf of a user.
//! Identifiers are always generated by the service; the status is fixed at
//! `pending` on creation and there is no transition logic.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

/// Validation errors returned by the hash job constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashJobValidationError {
    EmptyId,
    EmptyOwnerId,
    EmptyHashes,
    MissingOwner,
}

impl HashJobValidationError {
    /// Name of the field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyId => "id",
            Self::EmptyOwnerId | Self::MissingOwner => "ownerId",
            Self::EmptyHashes => "hashes",
        }
    }
}

impl fmt::Display for HashJobValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "hash job id must not be empty"),
            Self::EmptyOwnerId => write!(f, "hash job owner id must not be empty"),
            Self::EmptyHashes => write!(f, "hash job must contain at least one hash"),
            Self::MissingOwner => write!(f, "hash job requires an existing owner"),
        }
    }
}

impl std::error::Error for HashJobValidationError {}

/// Identifier of a hash job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HashJobId(String);

impl HashJobId {
    /// Validate and construct a [`HashJobId`].
    pub fn new(id: impl Into<String>) -> Result<Self, HashJobValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(HashJobValidationError::EmptyId);
        }
        Ok(Self(id))
    }

    /// Generate a new random identifier backed by a UUID v4.
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for HashJobId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for HashJobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HashJobId> for String {
    fn from(value: HashJobId) -> Self {
        value.0
    }
}

impl TryFrom<String> for HashJobId {
    type Error = HashJobValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Processing state of a hash job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashJobStatus {
    #[default]
    Pending,
    Running,
    Done,
    Error,
}

/// A batch of hashes owned by a user.
///
/// ## Invariants
/// - `hashes` is non-empty and keeps submission order.
/// - `owner_id` refers to a user that existed when the job was created.
///
/// # Examples
/// ```
/// use unhash::domain::{HashJob, HashJobStatus, UserId};
///
/// let owner = UserId::new("u-1").expect("owner id");
/// let job = HashJob::pending(owner, vec!["5f4dcc3b".to_owned()]).expect("valid job");
/// assert_eq!(job.status(), HashJobStatus::Pending);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HashJobDto", into = "HashJobDto")]
pub struct HashJob {
    id: HashJobId,
    owner_id: UserId,
    status: HashJobStatus,
    hashes: Vec<String>,
}

impl HashJob {
    /// Build a job from validated parts, rejecting an empty hash list.
    pub fn new(
        id: HashJobId,
        owner_id: UserId,
        status: HashJobStatus,
        hashes: Vec<String>,
    ) -> Result<Self, HashJobValidationError> {
        if hashes.is_empty() {
            return Err(HashJobValidationError::EmptyHashes);
        }
        Ok(Self {
            id,
            owner_id,
            status,
            hashes,
        })
    }

    /// Build a freshly submitted job with a generated id and `pending` status.
    pub fn pending(owner_id: UserId, hashes: Vec<String>) -> Result<Self, HashJobValidationError> {
        Self::new(HashJobId::random(), owner_id, HashJobStatus::Pending, hashes)
    }

    pub fn id(&self) -> &HashJobId {
        &self.id
    }

    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    pub fn status(&self) -> HashJobStatus {
        self.status
    }

    pub fn hashes(&self) -> &[String] {
        &self.hashes
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HashJobDto {
    id: String,
    owner_id: String,
    #[serde(default)]
    status: HashJobStatus,
    hashes: Vec<String>,
}

impl From<HashJob> for HashJobDto {
    fn from(value: HashJob) -> Self {
        Self {
            id: value.id.into(),
            owner_id: value.owner_id.into(),
            status: value.status,
            hashes: value.hashes,
        }
    }
}

impl TryFrom<HashJobDto> for HashJob {
    type Error = HashJobValidationError;

    fn try_from(value: HashJobDto) -> Result<Self, Self::Error> {
        let id = HashJobId::new(value.id)?;
        let owner_id =
            UserId::new(value.owner_id).map_err(|_| HashJobValidationError::EmptyOwnerId)?;
        HashJob::new(id, owner_id, value.status, value.hashes)
    }
}
