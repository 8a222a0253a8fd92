//! One-shot greedy draft generation.
//!
//! # Algorithm
//!
//! Per period, independently except for the cross-period fairness state:
//!
//! 1. Order roles by ascending candidate-pool size (scarcest first);
//!    the coordinator role is always resolved last, by auto-fill.
//! 2. For each role, drop candidates already assigned in this period,
//!    shuffle, and pick: rotation roles take the first candidate; other
//!    roles take the minimum of `burnout * 10 + recency penalty`, ties
//!    falling back to the shuffled order.
//! 3. Instrument-lock post-pass: an empty keyboard cell revokes the bass
//!    assignment and refunds the bassist's burnout credit.
//! 4. Coordinator auto-fill: the first band-role occupant (catalog order)
//!    carrying the coordinator capability.
//!
//! Deterministic up to the injected random source; pass a seeded RNG for
//! reproducible output.

use log::debug;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::{HashMap, HashSet};

use crate::index::{AvailabilityIndex, MemberIndex};
use crate::models::{AssignmentGrid, RoleKind, RosterConfig};

/// Penalty multiplier per prior assignment in this draft pass.
const BURNOUT_WEIGHT: u32 = 10;
/// Penalty for having served a non-rotation role in the preceding period.
const RECENCY_PENALTY: u32 = 50;

/// Draft-pass fairness state, discarded once the draft completes.
#[derive(Debug, Default)]
struct FairnessState {
    /// Non-rotation assignments made so far, per member.
    burnout: HashMap<String, u32>,
    /// Last period index in which each member took a non-rotation role.
    last_assigned: HashMap<String, usize>,
}

impl FairnessState {
    fn score(&self, member: &str, period: usize) -> u32 {
        let burnout = self.burnout.get(member).copied().unwrap_or(0);
        let recent = period > 0 && self.last_assigned.get(member) == Some(&(period - 1));
        burnout * BURNOUT_WEIGHT + if recent { RECENCY_PENALTY } else { 0 }
    }

    fn credit(&mut self, member: &str, period: usize) {
        *self.burnout.entry(member.to_string()).or_insert(0) += 1;
        self.last_assigned.insert(member.to_string(), period);
    }

    /// Undoes one assignment credit. Saturates at zero: a revoked
    /// assignment never pushes a member below "never served".
    fn refund(&mut self, member: &str) {
        if let Some(count) = self.burnout.get_mut(member) {
            *count = count.saturating_sub(1);
        }
    }
}

/// One-shot greedy roster generator.
///
/// Produces a complete initial [`AssignmentGrid`] from the availability
/// index. The result is a draft, not a solution: it honors the busy
/// exclusion and the instrument lock but makes no optimality claim.
///
/// # Example
///
/// ```
/// use auto_roster::draft::DraftGenerator;
/// use auto_roster::index::{AvailabilityIndex, MemberIndex};
/// use auto_roster::models::{MemberRecord, RosterConfig};
///
/// let config = RosterConfig::default_catalog();
/// let records = vec![MemberRecord::new("Ann", "K, C", vec![true])];
/// let members = MemberIndex::build(&records, &config, 1).unwrap();
/// let index = AvailabilityIndex::build(&members, &config, 1);
///
/// let grid = DraftGenerator::new().generate_seeded(
///     &config,
///     &members,
///     &index,
///     &["Week 1".into()],
///     42,
/// );
/// assert_eq!(grid.get(0, "Keyboard"), Some("Ann"));
/// assert_eq!(grid.get(0, "Coordinator"), Some("Ann"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DraftGenerator;

impl DraftGenerator {
    /// Creates a generator.
    pub fn new() -> Self {
        Self
    }

    /// Generates a draft with a seeded RNG (reproducible).
    pub fn generate_seeded(
        &self,
        config: &RosterConfig,
        members: &MemberIndex,
        index: &AvailabilityIndex,
        period_labels: &[String],
        seed: u64,
    ) -> AssignmentGrid {
        let mut rng = SmallRng::seed_from_u64(seed);
        self.generate(config, members, index, period_labels, &mut rng)
    }

    /// Generates a draft using the given random source for tie-breaking.
    pub fn generate<R: Rng>(
        &self,
        config: &RosterConfig,
        members: &MemberIndex,
        index: &AvailabilityIndex,
        period_labels: &[String],
        rng: &mut R,
    ) -> AssignmentGrid {
        let mut grid = AssignmentGrid::empty(period_labels);
        let mut fairness = FairnessState::default();

        for period in 0..period_labels.len() {
            self.fill_period(config, index, &mut grid, &mut fairness, period, rng);
            self.apply_instrument_lock(config, &mut grid, &mut fairness, period);
            self.auto_fill_coordinator(config, members, &mut grid, period);
        }

        debug!(
            "draft complete: {} of {} cells filled",
            grid.filled_count(),
            period_labels.len() * config.roles.len()
        );
        grid
    }

    /// Step 1 + 2: scarcity-ordered greedy fill for one period.
    fn fill_period<R: Rng>(
        &self,
        config: &RosterConfig,
        index: &AvailabilityIndex,
        grid: &mut AssignmentGrid,
        fairness: &mut FairnessState,
        period: usize,
        rng: &mut R,
    ) {
        let mut assigned: HashSet<String> = HashSet::new();

        // Scarcest candidate pool first; stable sort keeps catalog order
        // on ties. Coordinator is excluded and resolved last.
        let mut roles: Vec<_> = config.assignable_roles().collect();
        roles.sort_by_key(|role| index.list_len(period, &role.name));

        for role in roles {
            let mut candidates: Vec<String> = index
                .candidates(period, &role.name)
                .iter()
                .filter(|name| !assigned.contains(*name))
                .cloned()
                .collect();
            if candidates.is_empty() {
                continue;
            }

            candidates.shuffle(rng);
            let winner = if role.kind == RoleKind::Rotation {
                candidates[0].clone()
            } else {
                // Stable sort preserves the shuffled order among ties.
                candidates.sort_by_key(|name| fairness.score(name, period));
                let winner = candidates[0].clone();
                fairness.credit(&winner, period);
                winner
            };

            grid.set(period, &role.name, Some(&winner));
            assigned.insert(winner);
        }
    }

    /// Step 3: revoke the bass assignment when the keyboard cell is empty.
    fn apply_instrument_lock(
        &self,
        config: &RosterConfig,
        grid: &mut AssignmentGrid,
        fairness: &mut FairnessState,
        period: usize,
    ) {
        let Some(instr) = &config.instrumentation else {
            return;
        };
        if grid.get(period, &instr.keyboard).is_some() {
            return;
        }
        if let Some(bassist) = grid.get(period, &instr.bass).map(String::from) {
            grid.set(period, &instr.bass, None);
            fairness.refund(&bassist);
        }
    }

    /// Step 4: seed the coordinator cell from the band roles.
    ///
    /// Does not consume a candidate slot, bypasses the busy exclusion,
    /// and leaves the fairness state untouched.
    fn auto_fill_coordinator(
        &self,
        config: &RosterConfig,
        members: &MemberIndex,
        grid: &mut AssignmentGrid,
        period: usize,
    ) {
        let Some(coordinator) = config.coordinator().map(|r| r.name.clone()) else {
            return;
        };
        let Some(capability) = config.coordinator_capability().map(String::from) else {
            return;
        };

        let pick = config
            .band_roles()
            .filter_map(|role| grid.get(period, &role.name))
            .find(|occupant| members.has_capability(occupant, &capability))
            .map(String::from);
        grid.set(period, &coordinator, pick.as_deref());
    }
}
