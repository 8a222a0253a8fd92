//! Member model.
//!
//! A member is a volunteer with a capability set and a per-period
//! availability flag. Members are immutable after ingestion for the
//! lifetime of one loaded roster and replaced wholesale on reload.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A raw ingested row: one record per member, as supplied by the
/// spreadsheet-loading collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberRecord {
    /// Member identity (display name).
    pub name: String,
    /// Raw capability-code string (e.g. "K, C / Usher").
    pub capability_codes: String,
    /// One presence flag per service period.
    pub availability: Vec<bool>,
}

/// A normalized member: identity, capability tags, and availability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// Unique display name.
    pub name: String,
    /// Role-category tags this member can serve in.
    pub capabilities: BTreeSet<String>,
    /// Per-period availability, fixed length = number of periods.
    pub availability: Vec<bool>,
}

impl MemberRecord {
    /// Creates a record.
    pub fn new(
        name: impl Into<String>,
        capability_codes: impl Into<String>,
        availability: Vec<bool>,
    ) -> Self {
        Self {
            name: name.into(),
            capability_codes: capability_codes.into(),
            availability,
        }
    }
}

impl Member {
    /// Creates a member with no capabilities and no availability.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            capabilities: BTreeSet::new(),
            availability: Vec::new(),
        }
    }

    /// Adds a capability tag.
    pub fn with_capability(mut self, tag: impl Into<String>) -> Self {
        self.capabilities.insert(tag.into());
        self
    }

    /// Sets the availability flags.
    pub fn with_availability(mut self, availability: Vec<bool>) -> Self {
        self.availability = availability;
        self
    }

    /// Whether the member carries the given capability tag.
    pub fn has_capability(&self, tag: &str) -> bool {
        self.capabilities.contains(tag)
    }

    /// Whether the member is available in the given period.
    ///
    /// Out-of-range periods are unavailable.
    pub fn is_available(&self, period: usize) -> bool {
        self.availability.get(period).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_builder() {
        let m = Member::new("Ann")
            .with_capability("Keyboard")
            .with_capability("Coordinator")
            .with_availability(vec![true, false, true]);

        assert_eq!(m.name, "Ann");
        assert!(m.has_capability("Keyboard"));
        assert!(!m.has_capability("Bass"));
        assert!(m.is_available(0));
        assert!(!m.is_available(1));
    }

    #[test]
    fn test_out_of_range_period_unavailable() {
        let m = Member::new("Bo").with_availability(vec![true]);
        assert!(!m.is_available(5));
    }

    #[test]
    fn test_duplicate_capability_collapses() {
        let m = Member::new("Cy")
            .with_capability("Sound")
            .with_capability("Sound");
        assert_eq!(m.capabilities.len(), 1);
    }
}
