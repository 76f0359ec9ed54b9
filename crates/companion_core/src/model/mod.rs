//! Domain model for curriculum notes and device-local progress.
//!
//! # Responsibility
//! - Define the records shared by the matcher, the tracker and the QA flow.
//!
//! # Invariants
//! - Curriculum notes are immutable once loaded into a catalog.
//! - A progress record never holds duplicate chapters or duplicate days.

pub mod note;
pub mod progress;
