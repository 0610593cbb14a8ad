//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define data access contracts for contacts.
//! - Isolate SQLite statements and transaction handling from the service.
//!
//! # Invariants
//! - Repository APIs return raw store errors; classification is left to
//!   the service layer.

pub mod contact_repo;
