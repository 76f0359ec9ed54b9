//! Repository layer: catalog access and the progress storage port.
//!
//! # Responsibility
//! - Define the data access contracts services are written against.
//! - Isolate SQLite details from matching and streak logic.
//!
//! # Invariants
//! - Catalog repositories are read-only from the services' point of view.
//! - The progress store addresses whole records by key; no partial updates.

pub mod catalog_repo;
pub mod progress_store;
pub mod static_catalog;
