//! Catalog domain model.
//!
//! # Responsibility
//! - Define the project record consumed by the filter engine.
//!
//! # Invariants
//! - Every project is identified by a stable `ProjectId`.
//! - Tags are opaque labels; the model never normalizes them.

pub mod project;
