//! Assignment grid (the sole mutable state) and constraint violations.
//!
//! The grid maps each (period, role) cell to an optional member identity.
//! Stored identities are always marker-free: the cosmetic coordinator
//! marker is attached by the presentation layer on the way out and never
//! participates in comparisons.
//!
//! Violations are detect-and-surface signals. They never block the edit
//! that produced them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The mutable assignment state: one optional member per (period, role).
///
/// Absent keys are empty cells. Writes outside the period range are
/// ignored, never rejected with an error — the grid is edited by UI
/// callbacks that must not fail.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssignmentGrid {
    period_labels: Vec<String>,
    cells: Vec<BTreeMap<String, String>>,
}

/// A constraint violation surfaced against one cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Violation classification.
    pub kind: ViolationKind,
    /// Period index of the flagged cell.
    pub period: usize,
    /// Role name of the flagged cell.
    pub role: String,
    /// The member identity involved.
    pub member: String,
    /// Human-readable description.
    pub message: String,
}

/// Classification of constraint violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationKind {
    /// The same identity occupies two or more non-coordinator cells in
    /// one period.
    Duplicate,
    /// The coordinator cell holds a member not occupying any band role
    /// in the period.
    CoordinatorNotInBand,
    /// The bass cell is occupied while the keyboard cell is empty.
    InstrumentLockConflict,
}

impl AssignmentGrid {
    /// Creates an empty grid for the given period labels.
    pub fn empty(period_labels: &[String]) -> Self {
        Self {
            cells: vec![BTreeMap::new(); period_labels.len()],
            period_labels: period_labels.to_vec(),
        }
    }

    /// Number of periods.
    pub fn period_count(&self) -> usize {
        self.period_labels.len()
    }

    /// Period labels in order.
    pub fn period_labels(&self) -> &[String] {
        &self.period_labels
    }

    /// The occupant of a cell, if any.
    pub fn get(&self, period: usize, role: &str) -> Option<&str> {
        self.cells.get(period)?.get(role).map(String::as_str)
    }

    /// Sets or clears a cell. An empty-string value clears the cell.
    pub fn set(&mut self, period: usize, role: &str, value: Option<&str>) {
        let Some(row) = self.cells.get_mut(period) else {
            return;
        };
        match value {
            Some(v) if !v.trim().is_empty() => {
                row.insert(role.to_string(), v.trim().to_string());
            }
            _ => {
                row.remove(role);
            }
        }
    }

    /// Clears every cell, keeping the period sequence.
    pub fn clear(&mut self) {
        for row in &mut self.cells {
            row.clear();
        }
    }

    /// All occupied cells of a period: (role, member) pairs.
    pub fn occupants(&self, period: usize) -> impl Iterator<Item = (&str, &str)> {
        self.cells
            .get(period)
            .into_iter()
            .flat_map(|row| row.iter().map(|(r, m)| (r.as_str(), m.as_str())))
    }

    /// Roles held by a member in a period.
    pub fn roles_of(&self, period: usize, member: &str) -> Vec<&str> {
        self.occupants(period)
            .filter(|(_, m)| *m == member)
            .map(|(r, _)| r)
            .collect()
    }

    /// Total number of occupied cells.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().map(BTreeMap::len).sum()
    }

    /// Full (period, role) → member snapshot for render/export consumers.
    pub fn snapshot(&self) -> Vec<(String, BTreeMap<String, String>)> {
        self.period_labels
            .iter()
            .cloned()
            .zip(self.cells.iter().cloned())
            .collect()
    }
}

impl Violation {
    /// Creates a duplicate-occupancy violation.
    pub fn duplicate(period: usize, role: impl Into<String>, member: impl Into<String>) -> Self {
        let member = member.into();
        Self {
            kind: ViolationKind::Duplicate,
            period,
            role: role.into(),
            message: format!("'{member}' holds more than one role in this period"),
            member,
        }
    }

    /// Creates a coordinator-not-in-band violation.
    pub fn coordinator_not_in_band(
        period: usize,
        role: impl Into<String>,
        member: impl Into<String>,
    ) -> Self {
        let member = member.into();
        Self {
            kind: ViolationKind::CoordinatorNotInBand,
            period,
            role: role.into(),
            message: format!("coordinator '{member}' does not occupy a band role"),
            member,
        }
    }

    /// Creates an instrument-lock conflict violation.
    pub fn instrument_lock(
        period: usize,
        role: impl Into<String>,
        member: impl Into<String>,
    ) -> Self {
        let member = member.into();
        Self {
            kind: ViolationKind::InstrumentLockConflict,
            period,
            role: role.into(),
            message: format!("'{member}' is assigned while the keyboard cell is empty"),
            member,
        }
    }
}
