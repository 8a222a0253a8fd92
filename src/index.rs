//! Member and availability indexing.
//!
//! Builds the two read-only indices the engine runs on:
//!
//! - [`MemberIndex`]: normalized members in ingestion order, with a
//!   name lookup.
//! - [`AvailabilityIndex`]: per (period, role) ordered candidate lists,
//!   derived from capabilities, availability flags, and the role
//!   catalog's eligibility rules.
//!
//! Ingestion failures abort construction — a partial index is never
//! installed. Unrecognized capability codes are ignored (logged), not
//! errors.

use log::{debug, warn};
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

use crate::models::{Member, MemberRecord, RoleKind, RosterConfig};

/// A structured ingestion failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    /// A record has a blank identity.
    #[error("record {row} has an empty member name")]
    EmptyName {
        /// Zero-based record index.
        row: usize,
    },
    /// Two records share the same identity.
    #[error("duplicate member name '{name}'")]
    DuplicateMember {
        /// The repeated name.
        name: String,
    },
    /// A record's availability flags do not cover every period.
    #[error("member '{name}' has {found} availability flags, expected {expected}")]
    AvailabilityLength {
        /// The member whose flags are wrong.
        name: String,
        /// Number of periods being scheduled.
        expected: usize,
        /// Number of flags supplied.
        found: usize,
    },
}

/// Normalized members in ingestion order.
#[derive(Debug, Clone, Default)]
pub struct MemberIndex {
    members: Vec<Member>,
    by_name: HashMap<String, usize>,
}

impl MemberIndex {
    /// Builds the index from ingested records.
    ///
    /// All-or-nothing: any error aborts construction (spec'd propagation
    /// policy — no half-built index is ever returned).
    pub fn build(
        records: &[MemberRecord],
        config: &RosterConfig,
        period_count: usize,
    ) -> Result<Self, IngestError> {
        let mut members = Vec::with_capacity(records.len());
        let mut by_name = HashMap::with_capacity(records.len());

        for (row, record) in records.iter().enumerate() {
            let name = record.name.trim();
            if name.is_empty() {
                return Err(IngestError::EmptyName { row });
            }
            if by_name.contains_key(name) {
                return Err(IngestError::DuplicateMember { name: name.into() });
            }
            if record.availability.len() != period_count {
                return Err(IngestError::AvailabilityLength {
                    name: name.into(),
                    expected: period_count,
                    found: record.availability.len(),
                });
            }

            let member = Member {
                name: name.to_string(),
                capabilities: parse_capabilities(&record.capability_codes, config),
                availability: record.availability.clone(),
            };
            by_name.insert(member.name.clone(), members.len());
            members.push(member);
        }

        debug!(
            "indexed {} members across {} periods",
            members.len(),
            period_count
        );
        Ok(Self { members, by_name })
    }

    /// Looks up a member by name.
    pub fn get(&self, name: &str) -> Option<&Member> {
        self.by_name.get(name).map(|&i| &self.members[i])
    }

    /// Whether the named member carries the capability tag.
    ///
    /// Unknown names have no capabilities.
    pub fn has_capability(&self, name: &str, tag: &str) -> bool {
        self.get(name).map(|m| m.has_capability(tag)).unwrap_or(false)
    }

    /// Members in ingestion order.
    pub fn iter(&self) -> impl Iterator<Item = &Member> {
        self.members.iter()
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the index holds no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Parses a raw capability-code string into capability tags.
///
/// Codes are split on commas, slashes, and newlines, uppercased, and
/// looked up in the configured code map. Parentheses are stripped.
/// Codes with no mapping are skipped.
fn parse_capabilities(codes: &str, config: &RosterConfig) -> BTreeSet<String> {
    let mut tags = BTreeSet::new();
    let cleaned: String = codes
        .chars()
        .filter(|c| *c != '(' && *c != ')')
        .map(|c| if c == '/' || c == '\n' { ',' } else { c })
        .collect();

    for code in cleaned.split(',') {
        let code = code.trim().to_uppercase();
        if code.is_empty() {
            continue;
        }
        match config.capability_codes.get(&code) {
            Some(tag) => {
                tags.insert(tag.clone());
            }
            None => warn!("ignoring unrecognized capability code '{code}'"),
        }
    }
    tags
}

/// Per (period, role) ordered candidate lists.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityIndex {
    lists: HashMap<(usize, String), Vec<String>>,
    period_count: usize,
}

impl AvailabilityIndex {
    /// Derives candidate lists from the member index and role catalog.
    ///
    /// - Rotation roles get the full rotation pool every period,
    ///   regardless of any member's availability.
    /// - The coordinator role gets no list; its candidates are derived
    ///   live from band-role occupancy by the constraint engine.
    /// - Every other role lists members (in ingestion order) that carry
    ///   the role's capability and are available in the period.
    pub fn build(members: &MemberIndex, config: &RosterConfig, period_count: usize) -> Self {
        let mut lists = HashMap::new();

        for period in 0..period_count {
            for role in &config.roles {
                let key = (period, role.name.clone());
                match role.kind {
                    RoleKind::Rotation => {
                        lists.insert(key, config.rotation_pool.clone());
                    }
                    RoleKind::Coordinator => {
                        lists.insert(key, Vec::new());
                    }
                    RoleKind::Standard => {
                        let Some(capability) = role.capability.as_deref() else {
                            lists.insert(key, Vec::new());
                            continue;
                        };
                        let eligible: Vec<String> = members
                            .iter()
                            .filter(|m| m.is_available(period) && m.has_capability(capability))
                            .map(|m| m.name.clone())
                            .collect();
                        lists.insert(key, eligible);
                    }
                }
            }
        }

        Self {
            lists,
            period_count,
        }
    }

    /// The ordered candidate list for a cell. Unknown cells are empty.
    pub fn candidates(&self, period: usize, role: &str) -> &[String] {
        self.lists
            .get(&(period, role.to_string()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of candidates for a cell.
    pub fn list_len(&self, period: usize, role: &str) -> usize {
        self.candidates(period, role).len()
    }

    /// Number of periods the index covers.
    pub fn period_count(&self) -> usize {
        self.period_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RosterConfig {
        RosterConfig::default_catalog()
    }

    fn record(name: &str, codes: &str, availability: Vec<bool>) -> MemberRecord {
        MemberRecord::new(name, codes, availability)
    }

    #[test]
    fn test_build_preserves_ingestion_order() {
        let records = vec![
            record("Zoe", "K", vec![true]),
            record("Ann", "K", vec![true]),
        ];
        let members = MemberIndex::build(&records, &config(), 1).unwrap();
        let names: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Zoe", "Ann"]);

        let index = AvailabilityIndex::build(&members, &config(), 1);
        assert_eq!(index.candidates(0, "Keyboard"), ["Zoe", "Ann"]);
    }

    #[test]
    fn test_capability_parsing_separators() {
        let records = vec![record("Ann", "k / c\nppt, bogus", vec![true])];
        let members = MemberIndex::build(&records, &config(), 1).unwrap();
        let ann = members.get("Ann").unwrap();

        assert!(ann.has_capability("Keyboard"));
        assert!(ann.has_capability("Coordinator"));
        assert!(ann.has_capability("Presentation"));
        assert_eq!(ann.capabilities.len(), 3); // "bogus" ignored
    }

    #[test]
    fn test_parenthesized_codes() {
        let records = vec![record("Bo", "B (G)", vec![true])];
        let members = MemberIndex::build(&records, &config(), 1).unwrap();
        // "B (G)" cleans to "B G" — one unmapped token, no tags expected
        // beyond what the map recognizes.
        let bo = members.get("Bo").unwrap();
        assert!(!bo.has_capability("Bass"));

        let records = vec![record("Bo", "B, (G)", vec![true])];
        let members = MemberIndex::build(&records, &config(), 1).unwrap();
        let bo = members.get("Bo").unwrap();
        assert!(bo.has_capability("Bass"));
        assert!(bo.has_capability("Guitar"));
    }

    #[test]
    fn test_empty_name_rejected() {
        let records = vec![record("  ", "K", vec![true])];
        let err = MemberIndex::build(&records, &config(), 1).unwrap_err();
        assert_eq!(err, IngestError::EmptyName { row: 0 });
    }

    #[test]
    fn test_duplicate_member_rejected() {
        let records = vec![
            record("Ann", "K", vec![true]),
            record("Ann", "B", vec![true]),
        ];
        let err = MemberIndex::build(&records, &config(), 1).unwrap_err();
        assert_eq!(
            err,
            IngestError::DuplicateMember {
                name: "Ann".into()
            }
        );
    }

    #[test]
    fn test_availability_length_rejected() {
        let records = vec![record("Ann", "K", vec![true])];
        let err = MemberIndex::build(&records, &config(), 3).unwrap_err();
        assert_eq!(
            err,
            IngestError::AvailabilityLength {
                name: "Ann".into(),
                expected: 3,
                found: 1
            }
        );
    }

    #[test]
    fn test_unavailable_member_excluded() {
        let records = vec![record("Ann", "K", vec![true, false])];
        let members = MemberIndex::build(&records, &config(), 2).unwrap();
        let index = AvailabilityIndex::build(&members, &config(), 2);

        assert_eq!(index.candidates(0, "Keyboard"), ["Ann"]);
        assert!(index.candidates(1, "Keyboard").is_empty());
    }

    #[test]
    fn test_usher_roles_share_one_pool() {
        let records = vec![record("Uma", "U", vec![true])];
        let members = MemberIndex::build(&records, &config(), 1).unwrap();
        let index = AvailabilityIndex::build(&members, &config(), 1);

        for usher in ["Usher 1", "Usher 2", "Usher 3"] {
            assert_eq!(index.candidates(0, usher), ["Uma"]);
        }
    }

    #[test]
    fn test_rotation_lists_ignore_availability() {
        // No members at all — rotation lists are still the full pool.
        let members = MemberIndex::build(&[], &config(), 2).unwrap();
        let index = AvailabilityIndex::build(&members, &config(), 2);

        let cfg = config();
        for period in 0..2 {
            assert_eq!(index.candidates(period, "Cleanup 1"), cfg.rotation_pool);
            assert_eq!(index.candidates(period, "Cleanup 2"), cfg.rotation_pool);
        }
    }

    #[test]
    fn test_coordinator_list_empty() {
        let records = vec![record("Ann", "K, C", vec![true])];
        let members = MemberIndex::build(&records, &config(), 1).unwrap();
        let index = AvailabilityIndex::build(&members, &config(), 1);
        assert!(index.candidates(0, "Coordinator").is_empty());
    }

    #[test]
    fn test_unknown_cell_empty() {
        let members = MemberIndex::build(&[], &config(), 1).unwrap();
        let index = AvailabilityIndex::build(&members, &config(), 1);
        assert!(index.candidates(9, "Keyboard").is_empty());
        assert!(index.candidates(0, "No Such Role").is_empty());
    }
}
