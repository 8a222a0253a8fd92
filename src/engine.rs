//! Constraint and candidate engine.
//!
//! Pure, total functions over the live [`AssignmentGrid`]: candidate
//! computation for a cell about to be edited, whole-grid validation,
//! instrument-lock queries and enforcement, and the cosmetic coordinator
//! marker.
//!
//! None of these functions fail for any reachable grid state — a cell
//! holding a manually-typed name unknown to the member index is
//! preserved and reported as-is, and candidate exhaustion yields an
//! empty list, not an error.

use std::collections::BTreeSet;

use crate::index::{AvailabilityIndex, MemberIndex};
use crate::models::{AssignmentGrid, RoleKind, RosterConfig, Violation};

/// Cosmetic suffix shown on every cell of a period that holds the
/// period's current coordinator. Presentation-only: stored identities
/// never carry it, and all comparisons strip it first.
pub const COORDINATOR_MARKER: &str = " (C)";

/// Removes the coordinator marker, if present.
pub fn strip_marker(value: &str) -> &str {
    value.strip_suffix(COORDINATOR_MARKER).unwrap_or(value)
}

/// Decorates a member name with the coordinator marker when the name is
/// the period's current coordinator.
pub fn decorated(
    config: &RosterConfig,
    grid: &AssignmentGrid,
    period: usize,
    name: &str,
) -> String {
    let coordinator = config
        .coordinator()
        .and_then(|r| grid.get(period, &r.name));
    if coordinator == Some(name) {
        format!("{name}{COORDINATOR_MARKER}")
    } else {
        name.to_string()
    }
}

/// Computes the valid candidate set for the cell (period, role).
///
/// - Coordinator role: distinct members currently occupying a band role
///   in the period whose capability set includes the coordinator tag,
///   sorted by name.
/// - Rotation roles: the fixed pool in its original order, minus members
///   busy in another non-coordinator cell of the period.
/// - Other roles: the availability list minus busy members, sorted by
///   name.
///
/// The cell's current value is always included, so re-opening a selector
/// never hides the existing choice — even a manual override unknown to
/// the index.
pub fn candidates(
    config: &RosterConfig,
    index: &AvailabilityIndex,
    members: &MemberIndex,
    grid: &AssignmentGrid,
    period: usize,
    role: &str,
) -> Vec<String> {
    let Some(role_def) = config.role(role) else {
        return Vec::new();
    };
    let current = grid.get(period, role);

    let mut list = match role_def.kind {
        RoleKind::Coordinator => {
            let capability = config.coordinator_capability().unwrap_or(&role_def.name);
            let eligible: BTreeSet<String> = config
                .band_roles()
                .filter_map(|band| grid.get(period, &band.name))
                .filter(|occupant| members.has_capability(occupant, capability))
                .map(String::from)
                .collect();
            eligible.into_iter().collect()
        }
        _ => {
            let busy: BTreeSet<&str> = grid
                .occupants(period)
                .filter(|(r, _)| *r != role && !config.is_coordinator(r))
                .map(|(_, member)| member)
                .collect();
            let mut list: Vec<String> = index
                .candidates(period, role)
                .iter()
                .filter(|name| !busy.contains(name.as_str()) || Some(name.as_str()) == current)
                .cloned()
                .collect();
            // Rotation lists keep their original pool order.
            if role_def.kind != RoleKind::Rotation {
                list.sort();
            }
            list
        }
    };

    if let Some(current) = current {
        if !list.iter().any(|name| name == current) {
            list.push(current.to_string());
            if role_def.kind != RoleKind::Rotation {
                list.sort();
            }
        }
    }
    list
}

/// Validates the whole grid, returning every violation found.
///
/// Per period: duplicate occupancy among non-coordinator cells (every
/// occurrence flagged), a coordinator not occupying any band role, and a
/// non-empty bass cell while the keyboard cell is empty. Pure over the
/// grid: running it twice on an unchanged grid yields identical flags.
pub fn validate(config: &RosterConfig, grid: &AssignmentGrid) -> Vec<Violation> {
    let mut violations = Vec::new();

    for period in 0..grid.period_count() {
        // Duplicate detection across non-coordinator cells.
        for role in &config.roles {
            if role.kind == RoleKind::Coordinator {
                continue;
            }
            let Some(member) = grid.get(period, &role.name) else {
                continue;
            };
            let occurrences = config
                .roles
                .iter()
                .filter(|r| r.kind != RoleKind::Coordinator)
                .filter(|r| grid.get(period, &r.name) == Some(member))
                .count();
            if occurrences >= 2 {
                violations.push(Violation::duplicate(period, &role.name, member));
            }
        }

        // Coordinator must match one of the period's band-role occupants.
        if let Some(coordinator) = config.coordinator() {
            if let Some(member) = grid.get(period, &coordinator.name) {
                let in_band = config
                    .band_roles()
                    .any(|band| grid.get(period, &band.name) == Some(member));
                if !in_band {
                    violations.push(Violation::coordinator_not_in_band(
                        period,
                        &coordinator.name,
                        member,
                    ));
                }
            }
        }

        // Transient lock conflict: bass occupied, keyboard empty.
        if let Some(instr) = &config.instrumentation {
            if grid.get(period, &instr.keyboard).is_none() {
                if let Some(member) = grid.get(period, &instr.bass) {
                    violations.push(Violation::instrument_lock(period, &instr.bass, member));
                }
            }
        }
    }

    violations
}

/// Cells currently disabled for editing: the bass cell of every period
/// whose keyboard cell is empty.
pub fn locked_cells(config: &RosterConfig, grid: &AssignmentGrid) -> Vec<(usize, String)> {
    let Some(instr) = &config.instrumentation else {
        return Vec::new();
    };
    (0..grid.period_count())
        .filter(|&period| grid.get(period, &instr.keyboard).is_none())
        .map(|period| (period, instr.bass.clone()))
        .collect()
}

/// Enforcement half of the instrument lock: force-clears the bass cell
/// of every period whose keyboard cell is empty. Returns the cleared
/// (period, member) pairs.
pub fn apply_instrument_lock(
    config: &RosterConfig,
    grid: &mut AssignmentGrid,
) -> Vec<(usize, String)> {
    let Some(instr) = config.instrumentation.clone() else {
        return Vec::new();
    };
    let mut cleared = Vec::new();
    for period in 0..grid.period_count() {
        if grid.get(period, &instr.keyboard).is_some() {
            continue;
        }
        if let Some(member) = grid.get(period, &instr.bass).map(String::from) {
            grid.set(period, &instr.bass, None);
            cleared.push((period, member));
        }
    }
    cleared
}
