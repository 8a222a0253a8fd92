//! Single-writer editing session.
//!
//! Owns the indices and the grid for one loaded roster and re-derives
//! consistency after every cell edit, in order: instrument-lock
//! enforcement, whole-grid validation, then summary invalidation.
//! Candidate computation stays on-demand (it is pure), and the workload
//! summary is coalesced — recomputed at most once per burst of edits,
//! on the next read, never served stale.
//!
//! Everything is synchronous and single-threaded: there is exactly one
//! writer and no concurrent access, so no locking.

use rand::Rng;

use crate::draft::DraftGenerator;
use crate::engine;
use crate::index::{AvailabilityIndex, IngestError, MemberIndex};
use crate::models::{AssignmentGrid, MemberRecord, RosterConfig, Violation};
use crate::summary::WorkloadSummary;

/// One interactive roster-editing session.
///
/// # Example
///
/// ```
/// use auto_roster::models::{MemberRecord, RosterConfig};
/// use auto_roster::session::RosterSession;
///
/// let mut session = RosterSession::new(RosterConfig::default_catalog());
/// session.load(
///     &[MemberRecord::new("Ann", "K, C", vec![true])],
///     &["Week 1".into()],
/// )?;
/// session.generate_draft(42);
/// assert_eq!(session.grid().get(0, "Keyboard"), Some("Ann"));
/// # Ok::<(), auto_roster::index::IngestError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RosterSession {
    config: RosterConfig,
    members: MemberIndex,
    index: AvailabilityIndex,
    grid: AssignmentGrid,
    violations: Vec<Violation>,
    // None = invalidated by an edit, recomputed on next read.
    summary: Option<WorkloadSummary>,
}

impl RosterSession {
    /// Creates a session with no roster loaded.
    pub fn new(config: RosterConfig) -> Self {
        Self {
            config,
            members: MemberIndex::default(),
            index: AvailabilityIndex::default(),
            grid: AssignmentGrid::default(),
            violations: Vec::new(),
            summary: None,
        }
    }

    /// Ingests member records and resets the grid for the given periods.
    ///
    /// All-or-nothing: on error the previously loaded roster (if any)
    /// stays installed untouched.
    pub fn load(
        &mut self,
        records: &[MemberRecord],
        period_labels: &[String],
    ) -> Result<(), IngestError> {
        let members = MemberIndex::build(records, &self.config, period_labels.len())?;
        self.index = AvailabilityIndex::build(&members, &self.config, period_labels.len());
        self.members = members;
        self.grid = AssignmentGrid::empty(period_labels);
        self.refresh();
        Ok(())
    }

    /// Replaces the grid with a fresh seeded draft.
    pub fn generate_draft(&mut self, seed: u64) {
        let labels = self.grid.period_labels().to_vec();
        self.grid =
            DraftGenerator::new().generate_seeded(&self.config, &self.members, &self.index, &labels, seed);
        self.refresh();
    }

    /// Replaces the grid with a draft driven by the given random source.
    pub fn generate_draft_with<R: Rng>(&mut self, rng: &mut R) {
        let labels = self.grid.period_labels().to_vec();
        self.grid =
            DraftGenerator::new().generate(&self.config, &self.members, &self.index, &labels, rng);
        self.refresh();
    }

    /// Edits one cell.
    ///
    /// The incoming value may carry the cosmetic coordinator marker; it
    /// is stripped before storage. Unknown roles and out-of-range
    /// periods are ignored. The edit is never refused — violations it
    /// causes are surfaced by [`violations`](Self::violations).
    pub fn set_cell(&mut self, period: usize, role: &str, value: Option<&str>) {
        if self.config.role(role).is_none() {
            return;
        }
        self.grid.set(period, role, value.map(engine::strip_marker));
        self.refresh();
    }

    /// Clears every cell.
    pub fn clear_grid(&mut self) {
        self.grid.clear();
        self.refresh();
    }

    /// The valid candidate set for a cell, clean identities, in display
    /// order.
    pub fn candidates(&self, period: usize, role: &str) -> Vec<String> {
        engine::candidates(
            &self.config,
            &self.index,
            &self.members,
            &self.grid,
            period,
            role,
        )
    }

    /// The candidate set decorated for display (coordinator marker
    /// attached where it applies).
    pub fn display_candidates(&self, period: usize, role: &str) -> Vec<String> {
        self.candidates(period, role)
            .iter()
            .map(|name| engine::decorated(&self.config, &self.grid, period, name))
            .collect()
    }

    /// A cell's value decorated for display.
    pub fn display_value(&self, period: usize, role: &str) -> Option<String> {
        self.grid
            .get(period, role)
            .map(|name| engine::decorated(&self.config, &self.grid, period, name))
    }

    /// Current violations, refreshed after every edit.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Whether a cell is currently disabled for editing.
    pub fn is_locked(&self, period: usize, role: &str) -> bool {
        engine::locked_cells(&self.config, &self.grid)
            .iter()
            .any(|(p, r)| *p == period && r == role)
    }

    /// The workload summary for the current grid.
    ///
    /// Coalesced: a burst of edits invalidates it once, and the next
    /// read recomputes it from the latest state.
    pub fn summary(&mut self) -> &WorkloadSummary {
        self.summary
            .get_or_insert_with(|| WorkloadSummary::calculate(&self.config, &self.members, &self.grid))
    }

    /// The live grid.
    pub fn grid(&self) -> &AssignmentGrid {
        &self.grid
    }

    /// The loaded member index.
    pub fn members(&self) -> &MemberIndex {
        &self.members
    }

    /// The session's configuration.
    pub fn config(&self) -> &RosterConfig {
        &self.config
    }

    /// Post-edit re-derivation: enforce locks, revalidate, invalidate
    /// the summary.
    fn refresh(&mut self) {
        engine::apply_instrument_lock(&self.config, &mut self.grid);
        self.violations = engine::validate(&self.config, &self.grid);
        self.summary = None;
    }
}
