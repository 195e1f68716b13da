//! Cell and code resolution.
//!
//! # Responsibility
//! - Read a person's raw assignment for one day of a located month.
//! - Resolve assignment codes to descriptions and owning organizations.
//!
//! # Invariants
//! - Resolution is total: unknown people, days and codes degrade to
//!   "free" or passthrough, never to an error.

pub mod assignment;
pub mod codes;
