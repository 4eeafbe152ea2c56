//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// User identifier (typically from the auth provider).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a new UserId, returning an error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::empty_field("user_id"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable nudge rule identifier, e.g. `"save_first_deal"`.
///
/// Shared between fired nudge records and the per-user dismissal set, so a
/// dismissed rule can be filtered out on later runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NudgeId(String);

impl NudgeId {
    /// Creates a new NudgeId, returning an error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::empty_field("nudge_id"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NudgeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NudgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for an activated intervention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterventionId(Uuid);

impl InterventionId {
    /// Creates a new random InterventionId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an InterventionId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for InterventionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for InterventionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for InterventionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Profile revision counter for optimistic concurrency.
///
/// Bumped on every aggregate mutation; stores reject a write whose expected
/// revision no longer matches the persisted one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Revision(u32);

impl Revision {
    /// Initial revision (1) for a freshly created profile.
    pub fn initial() -> Self {
        Self(1)
    }

    /// Creates a revision from a raw value; zero is not a valid revision.
    pub fn from_u32(value: u32) -> Result<Self, ValidationError> {
        if value == 0 {
            return Err(ValidationError::out_of_range("revision", 1, i32::MAX, 0));
        }
        Ok(Self(value))
    }

    /// Returns the next revision.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// Returns the inner value.
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl Default for Revision {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_accepts_non_empty_string() {
        let id = UserId::new("user-123").unwrap();
        assert_eq!(id.as_str(), "user-123");
    }

    #[test]
    fn user_id_rejects_empty_string() {
        let result = UserId::new("");
        assert!(result.is_err());
        match result {
            Err(ValidationError::EmptyField { field }) => assert_eq!(field, "user_id"),
            _ => panic!("Expected EmptyField error"),
        }
    }

    #[test]
    fn nudge_id_borrows_as_str_for_set_lookup() {
        use std::collections::BTreeSet;

        let mut set = BTreeSet::new();
        set.insert(NudgeId::new("save_first_deal").unwrap());

        assert!(set.contains("save_first_deal"));
        assert!(!set.contains("create_watchlist"));
    }

    #[test]
    fn nudge_id_rejects_empty_string() {
        assert!(NudgeId::new("").is_err());
    }

    #[test]
    fn intervention_id_generates_unique_values() {
        let id1 = InterventionId::new();
        let id2 = InterventionId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn intervention_id_parses_from_valid_string() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: InterventionId = uuid_str.parse().unwrap();
        assert_eq!(id.to_string(), uuid_str);
    }

    #[test]
    fn revision_starts_at_one() {
        assert_eq!(Revision::initial().as_u32(), 1);
    }

    #[test]
    fn revision_rejects_zero() {
        assert!(Revision::from_u32(0).is_err());
        assert_eq!(Revision::from_u32(7).unwrap().as_u32(), 7);
    }

    #[test]
    fn revision_next_increments() {
        let r = Revision::initial().next().next();
        assert_eq!(r.as_u32(), 3);
    }
}
