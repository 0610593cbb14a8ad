//! Contact repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide ordered CRUD statements over the `contacts` table.
//! - Own transaction boundaries for write operations.
//!
//! # Invariants
//! - Store errors are returned unmodified; no domain translation happens here.
//! - Every write runs in its own transaction that rolls back unless the
//!   success path commits it.
//! - Missing rows surface as `rusqlite::Error::QueryReturnedNoRows`.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::{DbError, DbResult};
use crate::model::contact::{Contact, ContactId, ContactPatch};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};

const CONTACT_COLUMNS: [&str; 3] = ["id", "name", "phone"];

/// Repository interface for contact CRUD operations.
pub trait ContactRepository {
    /// Reads every stored contact ordered by id.
    fn list_contacts(&self) -> DbResult<Vec<Contact>>;
    /// Reads one contact by id.
    fn get_contact(&self, id: ContactId) -> DbResult<Contact>;
    /// Inserts name and phone, returning the generated id.
    fn create_contact(&self, contact: &Contact) -> DbResult<ContactId>;
    /// Applies a partial update and returns the row as stored afterwards.
    fn update_contact(&self, patch: &ContactPatch) -> DbResult<Contact>;
    /// Deletes one contact by id.
    fn delete_contact(&self, id: ContactId) -> DbResult<()>;
}

/// SQLite-backed contact repository.
pub struct SqliteContactRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContactRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema version is not the latest.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the `contacts`
    ///   table does not have the expected shape.
    pub fn try_new(conn: &'conn Connection) -> DbResult<Self> {
        ensure_contacts_connection_ready(conn)?;
        Ok(Self { conn })
    }

    /// Runs `op` inside an immediate transaction.
    ///
    /// The transaction guard rolls back on drop, so any error returned by `op`
    /// (or by the commit) leaves no partial write behind. After a successful
    /// commit the drop is a no-op.
    fn in_write_tx<T>(
        &self,
        op: impl FnOnce(&Transaction<'_>) -> rusqlite::Result<T>,
    ) -> DbResult<T> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let value = op(&tx)?;
        tx.commit()?;
        Ok(value)
    }
}

impl ContactRepository for SqliteContactRepository<'_> {
    fn list_contacts(&self) -> DbResult<Vec<Contact>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, phone FROM contacts ORDER BY id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut contacts = Vec::new();

        while let Some(row) = rows.next()? {
            contacts.push(parse_contact_row(row)?);
        }

        Ok(contacts)
    }

    fn get_contact(&self, id: ContactId) -> DbResult<Contact> {
        let contact = self.conn.query_row(
            "SELECT id, name, phone FROM contacts WHERE id = ?1;",
            [id],
            parse_contact_row,
        )?;
        Ok(contact)
    }

    fn create_contact(&self, contact: &Contact) -> DbResult<ContactId> {
        self.in_write_tx(|tx| {
            tx.query_row(
                "INSERT INTO contacts (name, phone) VALUES (?1, ?2) RETURNING id;",
                params![contact.name.as_str(), contact.phone.as_str()],
                |row| row.get(0),
            )
        })
    }

    fn update_contact(&self, patch: &ContactPatch) -> DbResult<Contact> {
        self.in_write_tx(|tx| match (patch.name.as_deref(), patch.phone.as_deref()) {
            (None, Some(phone)) => tx.query_row(
                "UPDATE contacts SET phone = ?1 WHERE id = ?2 RETURNING id, name, phone;",
                params![phone, patch.id],
                parse_contact_row,
            ),
            (Some(name), None) => tx.query_row(
                "UPDATE contacts SET name = ?1 WHERE id = ?2 RETURNING id, name, phone;",
                params![name, patch.id],
                parse_contact_row,
            ),
            (Some(name), Some(phone)) => tx.query_row(
                "UPDATE contacts SET name = ?1, phone = ?2 WHERE id = ?3 RETURNING id, name, phone;",
                params![name, phone, patch.id],
                parse_contact_row,
            ),
            (None, None) => tx.query_row(
                "SELECT id, name, phone FROM contacts WHERE id = ?1;",
                [patch.id],
                parse_contact_row,
            ),
        })
    }

    fn delete_contact(&self, id: ContactId) -> DbResult<()> {
        self.in_write_tx(|tx| {
            let changed = tx.execute("DELETE FROM contacts WHERE id = ?1;", [id])?;
            if changed == 0 {
                return Err(rusqlite::Error::QueryReturnedNoRows);
            }
            Ok(())
        })
    }
}

fn parse_contact_row(row: &Row<'_>) -> rusqlite::Result<Contact> {
    Ok(Contact {
        id: row.get("id")?,
        name: row.get("name")?,
        phone: row.get("phone")?,
    })
}

fn ensure_contacts_connection_ready(conn: &Connection) -> DbResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(DbError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "contacts")? {
        return Err(DbError::MissingRequiredTable("contacts"));
    }

    for column in CONTACT_COLUMNS {
        if !table_has_column(conn, "contacts", column)? {
            return Err(DbError::MissingRequiredColumn {
                table: "contacts",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> DbResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::SqliteContactRepository;
    use crate::db::open_db_in_memory;

    fn row_count(conn: &rusqlite::Connection) -> i64 {
        conn.query_row("SELECT COUNT(*) FROM contacts;", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn failed_write_transaction_leaves_no_partial_rows() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteContactRepository::try_new(&conn).unwrap();

        let result: crate::db::DbResult<()> = repo.in_write_tx(|tx| {
            tx.execute(
                "INSERT INTO contacts (name, phone) VALUES ('Ann', '111');",
                [],
            )?;
            tx.execute(
                "INSERT INTO contacts (name, phone) VALUES ('Bob', '222');",
                [],
            )?;
            Err(rusqlite::Error::QueryReturnedNoRows)
        });

        assert!(result.unwrap_err().is_no_rows());
        assert_eq!(row_count(&conn), 0);
        assert!(conn.is_autocommit());
    }

    #[test]
    fn successful_write_transaction_is_committed() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteContactRepository::try_new(&conn).unwrap();

        repo.in_write_tx(|tx| {
            tx.execute(
                "INSERT INTO contacts (name, phone) VALUES ('Ann', '111');",
                [],
            )
        })
        .unwrap();

        assert_eq!(row_count(&conn), 1);
        assert!(conn.is_autocommit());
    }
}
