//! Derived workload summary.
//!
//! Recomputed from scratch off the live grid; consumed by dashboard and
//! export collaborators. Serving load counts standard roles only — the
//! coordinator role decorates an existing band assignment and rotation
//! duty tracks its own pool — and the instrumentation-mode label
//! classifies each period's band line-up.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::index::MemberIndex;
use crate::models::{AssignmentGrid, RoleKind, RosterConfig};

/// Classification of a period's band line-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceMode {
    /// No bass, and not both drums and keyboard.
    Incomplete,
    /// Drums and keyboard present, bass absent.
    Acoustic,
    /// Bass present.
    Full,
}

/// Per-member and per-rotation-name serving statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkloadSummary {
    /// Standard (non-rotation, non-coordinator) assignments per member.
    pub serving_counts: HashMap<String, usize>,
    /// Rotation assignments per rotation-pool name.
    pub rotation_counts: HashMap<String, usize>,
    /// Per period: member → assigned role. When a member holds both the
    /// coordinator cell and a band cell, the band role wins.
    pub assigned_roles: Vec<HashMap<String, String>>,
}

impl WorkloadSummary {
    /// Computes the summary for the current grid.
    ///
    /// Every indexed member and every rotation-pool name appears in the
    /// counts, including those serving zero times. Cell values unknown
    /// to the index (manual overrides) are skipped, not errors.
    pub fn calculate(config: &RosterConfig, members: &MemberIndex, grid: &AssignmentGrid) -> Self {
        let mut serving_counts: HashMap<String, usize> =
            members.iter().map(|m| (m.name.clone(), 0)).collect();
        let mut rotation_counts: HashMap<String, usize> = config
            .rotation_pool
            .iter()
            .map(|name| (name.clone(), 0))
            .collect();
        let mut assigned_roles = vec![HashMap::new(); grid.period_count()];

        for period in 0..grid.period_count() {
            for role in &config.roles {
                let Some(member) = grid.get(period, &role.name) else {
                    continue;
                };
                assigned_roles[period].insert(member.to_string(), role.name.clone());
                match role.kind {
                    RoleKind::Rotation => {
                        if let Some(count) = rotation_counts.get_mut(member) {
                            *count += 1;
                        }
                    }
                    RoleKind::Standard => {
                        if let Some(count) = serving_counts.get_mut(member) {
                            *count += 1;
                        }
                    }
                    RoleKind::Coordinator => {}
                }
            }
        }

        Self {
            serving_counts,
            rotation_counts,
            assigned_roles,
        }
    }

    /// A member's serving count (zero for unknown names).
    pub fn count_of(&self, member: &str) -> usize {
        self.serving_counts.get(member).copied().unwrap_or(0)
    }

    /// A rotation-pool name's duty count (zero for unknown names).
    pub fn rotation_count_of(&self, name: &str) -> usize {
        self.rotation_counts.get(name).copied().unwrap_or(0)
    }

    /// The role a member holds in a period, if any.
    pub fn role_of(&self, period: usize, member: &str) -> Option<&str> {
        self.assigned_roles
            .get(period)?
            .get(member)
            .map(String::as_str)
    }
}

/// Derives the instrumentation-mode label for a period.
///
/// Bass present → [`ServiceMode::Full`]; drums and keyboard present with
/// bass absent → [`ServiceMode::Acoustic`]; otherwise
/// [`ServiceMode::Incomplete`]. Catalogs without an instrumentation
/// section are always incomplete.
pub fn service_mode(config: &RosterConfig, grid: &AssignmentGrid, period: usize) -> ServiceMode {
    let Some(instr) = &config.instrumentation else {
        return ServiceMode::Incomplete;
    };
    if grid.get(period, &instr.bass).is_some() {
        return ServiceMode::Full;
    }
    let has_drums = grid.get(period, &instr.drums).is_some();
    let has_keys = grid.get(period, &instr.keyboard).is_some();
    if has_drums && has_keys {
        ServiceMode::Acoustic
    } else {
        ServiceMode::Incomplete
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MemberRecord;

    fn fixture() -> (RosterConfig, MemberIndex, AssignmentGrid) {
        let config = RosterConfig::default_catalog();
        let records = vec![
            MemberRecord::new("Ann", "K, C", vec![true, true]),
            MemberRecord::new("Bo", "B", vec![true, true]),
            MemberRecord::new("Dee", "D", vec![true, true]),
        ];
        let members = MemberIndex::build(&records, &config, 2).unwrap();
        let grid = AssignmentGrid::empty(&["Week 1".into(), "Week 2".into()]);
        (config, members, grid)
    }

    #[test]
    fn test_serving_counts() {
        let (config, members, mut grid) = fixture();
        grid.set(0, "Keyboard", Some("Ann"));
        grid.set(0, "Coordinator", Some("Ann")); // never counts toward load
        grid.set(1, "Keyboard", Some("Ann"));
        grid.set(1, "Bass", Some("Bo"));

        let summary = WorkloadSummary::calculate(&config, &members, &grid);
        assert_eq!(summary.count_of("Ann"), 2);
        assert_eq!(summary.count_of("Bo"), 1);
        assert_eq!(summary.count_of("Dee"), 0);
        assert_eq!(summary.count_of("Nobody"), 0);
    }

    #[test]
    fn test_rotation_counts_separate() {
        let (config, members, mut grid) = fixture();
        grid.set(0, "Cleanup 1", Some("Group A"));
        grid.set(1, "Cleanup 2", Some("Group A"));

        let summary = WorkloadSummary::calculate(&config, &members, &grid);
        assert_eq!(summary.rotation_count_of("Group A"), 2);
        assert_eq!(summary.rotation_count_of("Group B"), 0);
        // Rotation duty never bleeds into member serving counts.
        assert_eq!(summary.count_of("Group A"), 0);
    }

    #[test]
    fn test_assigned_roles_band_wins_over_coordinator() {
        let (config, members, mut grid) = fixture();
        grid.set(0, "Keyboard", Some("Ann"));
        grid.set(0, "Coordinator", Some("Ann"));

        let summary = WorkloadSummary::calculate(&config, &members, &grid);
        assert_eq!(summary.role_of(0, "Ann"), Some("Keyboard"));
        assert_eq!(summary.role_of(1, "Ann"), None);
    }

    #[test]
    fn test_manual_override_skipped_in_counts() {
        let (config, members, mut grid) = fixture();
        grid.set(0, "Sound", Some("Visitor"));

        let summary = WorkloadSummary::calculate(&config, &members, &grid);
        assert_eq!(summary.count_of("Visitor"), 0);
        // Still visible in the per-period role map.
        assert_eq!(summary.role_of(0, "Visitor"), Some("Sound"));
    }

    #[test]
    fn test_service_modes() {
        let (config, _, mut grid) = fixture();
        assert_eq!(service_mode(&config, &grid, 0), ServiceMode::Incomplete);

        grid.set(0, "Drums", Some("Dee"));
        assert_eq!(service_mode(&config, &grid, 0), ServiceMode::Incomplete);

        grid.set(0, "Keyboard", Some("Ann"));
        assert_eq!(service_mode(&config, &grid, 0), ServiceMode::Acoustic);

        grid.set(0, "Bass", Some("Bo"));
        assert_eq!(service_mode(&config, &grid, 0), ServiceMode::Full);
    }

    #[test]
    fn test_service_mode_without_instrumentation() {
        let config = RosterConfig::new();
        let grid = AssignmentGrid::empty(&["Week 1".into()]);
        assert_eq!(service_mode(&config, &grid, 0), ServiceMode::Incomplete);
    }
}
