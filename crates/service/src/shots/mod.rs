use std::fmt;

use async_trait::async_trait;

use crate::errors::ServiceError;

/// A logged shot. The payload is opaque: whatever JSON the client sent is
/// stored and echoed back verbatim.
pub type Shot = serde_json::Value;

/// Position of a shot in the store at request time.
///
/// Not a durable key: deleting an earlier shot shifts every later id down by one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShotId(pub usize);

impl ShotId {
    /// Parse a path segment. Only plain ASCII digits are accepted; anything
    /// else (`-1`, `+1`, ` 1`, `abc`) yields `None`, which callers treat as
    /// not found.
    pub fn parse(segment: &str) -> Option<Self> {
        if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        segment.parse::<usize>().ok().map(ShotId)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ShotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// CRUD contract over the ordered shot collection.
#[async_trait]
pub trait ShotRepository: Send + Sync {
    /// All shots in insertion order.
    async fn list(&self) -> Vec<Shot>;
    /// Append to the end; returns the stored value and the new length.
    async fn create(&self, shot: Shot) -> (Shot, usize);
    /// Replace the shot at `id` wholesale.
    async fn update(&self, id: ShotId, shot: Shot) -> Result<Shot, ServiceError>;
    /// Remove the shot at `id`, shifting later shots down; returns the
    /// remaining length.
    async fn delete(&self, id: ShotId) -> Result<usize, ServiceError>;
    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
