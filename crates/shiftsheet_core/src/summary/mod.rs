//! Weekly summary aggregation.
//!
//! # Responsibility
//! - Group a person's week by organization into compact text lines.
//! - Decide each person's main organization for the week.
//!
//! # See also
//! - `resolve::codes` for how codes map to organizations.

pub mod aggregate;
pub mod weekly;
