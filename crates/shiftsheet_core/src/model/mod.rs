//! Schedule domain model.
//!
//! # Responsibility
//! - Define the grid, month view and weekly summary records shared by
//!   parsing, resolution and aggregation.
//!
//! # Invariants
//! - Grids and month views are immutable once built.
//! - Summary records are built fresh per request and never persisted.

pub mod day;
pub mod grid;
