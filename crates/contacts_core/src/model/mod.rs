//! Domain model for the contacts store.
//!
//! # Responsibility
//! - Define the contact record and the partial-update request shape.
//!
//! # Invariants
//! - A contact id is assigned by the store and never changes afterwards.

pub mod contact;
