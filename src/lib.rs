//! Roster assignment engine for recurring duty rosters.
//!
//! Assigns volunteers to a fixed catalog of named service roles across a
//! sequence of service periods, subject to capability, availability, and
//! exclusivity constraints, and keeps the assignment internally
//! consistent while a human edits it.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `RosterConfig` (role catalog), `Member`,
//!   `AssignmentGrid`, `Violation`
//! - **`index`**: Ingestion into the member and availability indices
//! - **`draft`**: One-shot seedable greedy draft generation
//! - **`engine`**: Candidate computation, validation, instrument lock,
//!   coordinator decoration
//! - **`summary`**: Workload counts and the instrumentation-mode label
//! - **`session`**: Single-writer editing session tying it all together
//!
//! # Architecture
//!
//! Data flows one way during generation (member index → availability
//! index → draft → grid) and bidirectionally during editing (grid ↔
//! constraint engine, re-derived on every cell edit). The draft is a
//! greedy heuristic, not a solver: violations are detected and surfaced,
//! never rejected.

pub mod draft;
pub mod engine;
pub mod index;
pub mod models;
pub mod session;
pub mod summary;
