//! Domain types for the venue hierarchy.
//!
//! A venue is a node in a parent-pointer hierarchy. Only the identifier and
//! the parent pointer matter to traversal; every other attribute is kept as an
//! opaque JSON payload and passed through unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Unique identifier for a venue
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VenueId(pub String);

impl VenueId {
    /// Create a new venue ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VenueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for VenueId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for VenueId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A venue record as held by the backing store.
///
/// The wire shape matches the document store: `id`, an optional `parentId`,
/// and any number of additional attributes which land in [`Venue::payload`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    /// Unique identifier for the venue
    pub id: VenueId,

    /// Parent venue, absent for a sovereign venue
    #[serde(rename = "parentId", default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<VenueId>,

    /// Opaque attributes (template, display data, ...)
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Venue {
    /// Create a venue with an empty payload.
    pub fn new(id: impl Into<VenueId>, parent_id: Option<VenueId>) -> Self {
        Self {
            id: id.into(),
            parent_id,
            payload: Map::new(),
        }
    }

    /// Builder-style helper to attach a payload attribute.
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.payload.insert(key.to_string(), value.into());
        self
    }

    /// The parent pointer, if any.
    ///
    /// An empty `parentId` is treated the same as a missing one.
    pub fn parent(&self) -> Option<&VenueId> {
        self.parent_id.as_ref().filter(|id| !id.as_str().is_empty())
    }

    /// Returns `true` if this venue has no parent.
    pub fn is_sovereign(&self) -> bool {
        self.parent().is_none()
    }

    /// Display name from the payload, if present.
    pub fn name(&self) -> Option<&str> {
        self.payload.get("name").and_then(Value::as_str)
    }

    /// Template kind from the payload, if present.
    pub fn template(&self) -> Option<&str> {
        self.payload.get("template").and_then(Value::as_str)
    }

    /// Validate the record before it enters a store.
    ///
    /// # Errors
    ///
    /// Returns a description of the problem when the ID is blank or padded
    /// with whitespace.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.as_str().trim().is_empty() {
            return Err("venue id cannot be empty".to_string());
        }
        if self.id.as_str() != self.id.as_str().trim() {
            return Err(format!(
                "venue id '{}' has leading or trailing whitespace",
                self.id
            ));
        }
        Ok(())
    }
}
