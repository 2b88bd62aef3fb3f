//! The opaque employee identifier.
//!
//! Participant ids are supplied by the operator (typically an employee
//! number read off a badge) and are never generated or validated by the
//! core. The newtype exists so an id cannot be confused with a display
//! name at a call site. Uniqueness is deliberately NOT enforced: the
//! event operator owns that policy.

use serde::{Deserialize, Serialize};

/// Opaque, caller-supplied participant identifier.
///
/// Wraps the raw string without interpreting it. Two participants may
/// share an id; the ledger addresses participants by position, not id.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EmployeeId(String);

impl EmployeeId {
    /// Wrap a raw identifier string.
    pub const fn new(raw: String) -> Self {
        Self(raw)
    }

    /// Return the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the raw string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl core::fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EmployeeId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for EmployeeId {
    fn from(raw: &str) -> Self {
        Self(raw.to_owned())
    }
}

impl From<EmployeeId> for String {
    fn from(id: EmployeeId) -> Self {
        id.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_raw_string() {
        let id = EmployeeId::from("A-042");
        assert_eq!(id.to_string(), "A-042");
        assert_eq!(id.as_str(), "A-042");
    }

    #[test]
    fn serializes_transparently() {
        let id = EmployeeId::from("001");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"001\"");

        let back: EmployeeId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn duplicate_ids_compare_equal() {
        // Uniqueness is caller policy; the type itself permits duplicates.
        assert_eq!(EmployeeId::from("007"), EmployeeId::from("007"));
    }
}
