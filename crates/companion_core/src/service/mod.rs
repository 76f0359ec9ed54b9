//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repositories and the storage port into use-case APIs.
//! - Keep CLI and UI layers decoupled from storage details.

pub mod clock;
pub mod curriculum_qa;
pub mod note_matcher;
pub mod sample_prompts;
pub mod streak_tracker;
