//! Contact domain model.
//!
//! # Responsibility
//! - Define the canonical contact record.
//! - Define the partial update request used by write paths.
//!
//! # Invariants
//! - `id` is assigned by the store on insert and is immutable afterwards.
//! - `UNASSIGNED_CONTACT_ID` marks a contact that has not been stored yet.

use serde::{Deserialize, Serialize};

/// Store-generated contact identifier.
pub type ContactId = i64;

/// Id carried by contacts that have not been inserted yet.
pub const UNASSIGNED_CONTACT_ID: ContactId = 0;

/// Canonical contact record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Primary key generated by the store.
    pub id: ContactId,
    pub name: String,
    pub phone: String,
}

impl Contact {
    /// Creates a contact that is not stored yet.
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self::with_id(UNASSIGNED_CONTACT_ID, name, phone)
    }

    /// Creates a contact with a known id, e.g. a row read back from storage.
    pub fn with_id(id: ContactId, name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            phone: phone.into(),
        }
    }
}

/// Partial update for one stored contact.
///
/// `None` leaves the field unchanged; `Some("")` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPatch {
    pub id: ContactId,
    pub name: Option<String>,
    pub phone: Option<String>,
}

impl ContactPatch {
    /// Creates a patch that changes nothing yet.
    pub fn new(id: ContactId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Returns whether the patch carries no field changes.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone.is_none()
    }
}

/// Legacy form-style update: an empty field means "leave unchanged".
impl From<Contact> for ContactPatch {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id,
            name: Some(contact.name).filter(|value| !value.is_empty()),
            phone: Some(contact.phone).filter(|value| !value.is_empty()),
        }
    }
}
