//! Roster domain models.
//!
//! Core data types for the assignment engine: the immutable role
//! catalog/configuration, normalized members, the mutable assignment
//! grid, and constraint violations.

mod grid;
mod member;
mod role;

pub use grid::{AssignmentGrid, Violation, ViolationKind};
pub use member::{Member, MemberRecord};
pub use role::{Category, Instrumentation, Role, RoleKind, RosterConfig};
