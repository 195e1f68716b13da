//! Grid parsing: person-name classification and header/person location.
//!
//! # Responsibility
//! - Decide which free-text cells denote people.
//! - Find the day header and the people rows without fixed coordinates.
//!
//! # Invariants
//! - Parsing never mutates the input grid.
//! - A grid without a recognizable header row is rejected, never guessed.

pub mod locator;
pub mod name;
