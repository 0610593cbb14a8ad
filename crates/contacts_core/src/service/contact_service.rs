//! Contact use-case service.
//!
//! # Responsibility
//! - Provide CRUD entry points for callers outside the persistence boundary.
//! - Log every outcome and translate store failures into `ServiceError`.
//!
//! # Invariants
//! - Raw store errors never escape this service; callers only see the domain
//!   kind plus the contact id.
//! - Underlying error text is written to the log, never to the returned error.
//! - Listing swallows the store "no rows" condition into an empty result.

use crate::db::DbError;
use crate::logging::sanitize_message;
use crate::model::contact::{Contact, ContactId, ContactPatch};
use crate::repo::contact_repo::ContactRepository;
use log::{debug, error, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

const MAX_LOGGED_ERROR_CHARS: usize = 240;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Domain error kinds exposed past the service boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceError {
    /// Unclassified store failure. Details are only in the log.
    Internal,
    /// Contact does not exist.
    NotFound(ContactId),
    /// Unique constraint violation.
    AlreadyExists(ContactId),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Internal => write!(f, "internal error"),
            Self::NotFound(id) => write!(f, "[id={id}] contact not found"),
            Self::AlreadyExists(id) => write!(f, "[id={id}] contact already exists"),
        }
    }
}

impl Error for ServiceError {}

/// Use-case service wrapper for contact CRUD operations.
pub struct ContactService<R: ContactRepository> {
    repo: R,
}

impl<R: ContactRepository> ContactService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists all contacts. An empty store is not an error.
    pub fn list_contacts(&self) -> ServiceResult<Vec<Contact>> {
        match self.repo.list_contacts() {
            Ok(contacts) => {
                debug!(
                    "event=contacts_list module=service status=ok count={}",
                    contacts.len()
                );
                Ok(contacts)
            }
            Err(err) if err.is_no_rows() => {
                warn!("event=contacts_list module=service status=empty result=no_contacts");
                Ok(Vec::new())
            }
            Err(err) => {
                log_failure("contacts_list", None, &err);
                Err(ServiceError::Internal)
            }
        }
    }

    /// Gets one contact by id.
    pub fn get_contact(&self, id: ContactId) -> ServiceResult<Contact> {
        self.repo
            .get_contact(id)
            .inspect(|_| debug!("event=contact_get module=service status=ok id={id}"))
            .map_err(|err| {
                log_failure("contact_get", Some(id), &err);
                classify_lookup(id, &err)
            })
    }

    /// Stores a new contact and returns its generated id.
    ///
    /// Errors carry `contact.id`, which is unassigned for fresh contacts.
    pub fn create_contact(&self, contact: &Contact) -> ServiceResult<ContactId> {
        self.repo
            .create_contact(contact)
            .inspect(|id| debug!("event=contact_create module=service status=ok id={id}"))
            .map_err(|err| {
                log_failure("contact_create", Some(contact.id), &err);
                classify_write(contact.id, &err)
            })
    }

    /// Applies a partial update and returns the stored contact.
    pub fn update_contact(&self, patch: &ContactPatch) -> ServiceResult<Contact> {
        self.repo
            .update_contact(patch)
            .inspect(|_| {
                debug!(
                    "event=contact_update module=service status=ok id={}",
                    patch.id
                )
            })
            .map_err(|err| {
                log_failure("contact_update", Some(patch.id), &err);
                classify_write(patch.id, &err)
            })
    }

    /// Updates a contact using the form-style convention where an empty
    /// field means "leave unchanged".
    pub fn update_contact_fields(&self, contact: Contact) -> ServiceResult<Contact> {
        self.update_contact(&ContactPatch::from(contact))
    }

    /// Deletes one contact by id.
    pub fn delete_contact(&self, id: ContactId) -> ServiceResult<()> {
        self.repo
            .delete_contact(id)
            .inspect(|_| debug!("event=contact_delete module=service status=ok id={id}"))
            .map_err(|err| {
                log_failure("contact_delete", Some(id), &err);
                classify_lookup(id, &err)
            })
    }
}

fn classify_lookup(id: ContactId, err: &DbError) -> ServiceError {
    if err.is_no_rows() {
        ServiceError::NotFound(id)
    } else {
        ServiceError::Internal
    }
}

fn classify_write(id: ContactId, err: &DbError) -> ServiceError {
    if err.is_unique_violation() {
        ServiceError::AlreadyExists(id)
    } else {
        classify_lookup(id, err)
    }
}

fn log_failure(event: &str, id: Option<ContactId>, err: &DbError) {
    let detail = sanitize_message(&err.to_string(), MAX_LOGGED_ERROR_CHARS);
    match id {
        Some(id) => error!("event={event} module=service status=error id={id} error={detail}"),
        None => error!("event={event} module=service status=error error={detail}"),
    }
}

#[cfg(test)]
mod tests {
    use super::{classify_lookup, classify_write, ServiceError};
    use crate::db::DbError;
    use rusqlite::ffi;

    #[test]
    fn unique_violation_maps_to_already_exists_only_on_writes() {
        let err = DbError::Sqlite(rusqlite::Error::SqliteFailure(
            ffi::Error::new(ffi::SQLITE_CONSTRAINT_UNIQUE),
            None,
        ));
        assert_eq!(classify_write(4, &err), ServiceError::AlreadyExists(4));
        assert_eq!(classify_lookup(4, &err), ServiceError::Internal);
    }

    #[test]
    fn display_hides_store_details() {
        assert_eq!(ServiceError::NotFound(1).to_string(), "[id=1] contact not found");
        assert_eq!(ServiceError::Internal.to_string(), "internal error");
    }
}
