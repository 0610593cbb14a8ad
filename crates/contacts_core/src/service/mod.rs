//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Translate store failures into the domain error vocabulary.

pub mod contact_service;
