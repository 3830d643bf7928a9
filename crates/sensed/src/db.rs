//! SQLite-backed ticket store.
//!
//! Every operation opens its own connection through `with_connection` and
//! closes it when the closure returns, on success and on error alike.
//! Location: /var/lib/supportsense/support_tickets.db (system) or
//! ~/.local/share/supportsense/support_tickets.db (user)

use crate::seed::sample_tickets;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::types::{Type, Value};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use sense_shared::error::Result as SenseResult;
use sense_shared::{
    Category, FieldChange, NewTicket, Priority, SenseError, Ticket, TicketPatch, TicketStore,
};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// How long a connection waits on a locked database
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const SELECT_COLUMNS: &str = "id, text, source, priority, category, status, assigned_to, \
                              customer_rating, created_at";

/// Ticket store backed by SQLite
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: PathBuf,
}

impl SqliteStore {
    /// Open or create the store at `path` and ensure the schema exists
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }
        }

        info!("Opening ticket database at: {}", path.display());

        let store = Self {
            db_path: path.to_path_buf(),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Run `f` on a fresh connection that is closed afterwards
    fn with_connection<T>(
        &self,
        f: impl FnOnce(&mut Connection) -> rusqlite::Result<T>,
    ) -> SenseResult<T> {
        let mut conn = Connection::open(&self.db_path).map_err(storage_error)?;
        conn.busy_timeout(BUSY_TIMEOUT).map_err(storage_error)?;

        let result = f(&mut conn).map_err(storage_error);
        drop(conn);
        result
    }

    fn init_schema(&self) -> Result<()> {
        self.with_connection(|conn| {
            conn.execute(
                r#"
                CREATE TABLE IF NOT EXISTS tickets (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    text TEXT NOT NULL,
                    source TEXT NOT NULL DEFAULT 'web',
                    priority TEXT NOT NULL DEFAULT 'medium',
                    category TEXT NOT NULL DEFAULT 'General',
                    status TEXT NOT NULL DEFAULT 'new',
                    assigned_to TEXT NOT NULL DEFAULT '',
                    customer_rating INTEGER NOT NULL DEFAULT 0,
                    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
                )
                "#,
                [],
            )?;
            conn.execute(
                "CREATE INDEX IF NOT EXISTS idx_tickets_priority ON tickets(priority)",
                [],
            )?;
            Ok(())
        })
        .context("Failed to initialize ticket schema")
    }

    /// Drop all tickets and recreate the table
    pub fn reset(&self) -> Result<()> {
        warn!("Resetting ticket database at {}", self.db_path.display());
        self.with_connection(|conn| {
            conn.execute("DROP TABLE IF EXISTS tickets", [])?;
            Ok(())
        })
        .context("Failed to drop tickets table")?;
        self.init_schema()
    }

    /// Insert the sample tickets if the table is empty. Returns rows added.
    pub fn seed_samples(&self) -> Result<usize> {
        let inserted = self
            .with_connection(|conn| {
                let count: i64 =
                    conn.query_row("SELECT COUNT(*) FROM tickets", [], |row| row.get(0))?;
                if count > 0 {
                    return Ok(0);
                }

                let samples = sample_tickets(Utc::now());
                let tx = conn.transaction()?;
                for sample in &samples {
                    tx.execute(
                        r#"
                        INSERT INTO tickets
                            (id, text, source, priority, category, status, assigned_to, customer_rating, created_at)
                        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                        "#,
                        params![
                            sample.id,
                            sample.text,
                            sample.source,
                            sample.priority.as_str(),
                            sample.category.as_str(),
                            sample.status,
                            sample.assigned_to,
                            sample.customer_rating,
                            sample.created_at
                        ],
                    )?;
                }
                tx.commit()?;
                Ok(samples.len())
            })
            .context("Failed to seed sample tickets")?;

        if inserted > 0 {
            info!("Seeded {} sample tickets", inserted);
        }
        Ok(inserted)
    }
}

fn storage_error(e: rusqlite::Error) -> SenseError {
    SenseError::Storage(e.to_string())
}

fn conversion_error(index: usize, value: &str, what: &str) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        index,
        Type::Text,
        format!("unknown {}: {}", what, value).into(),
    )
}

fn row_to_ticket(row: &Row<'_>) -> rusqlite::Result<Ticket> {
    let priority: String = row.get(3)?;
    let category: String = row.get(4)?;
    let created_at: DateTime<Utc> = row.get(8)?;

    let priority =
        Priority::parse(&priority).ok_or_else(|| conversion_error(3, &priority, "priority"))?;
    // Rows written by older tools may carry labels outside the fixed set.
    let category = Category::parse(&category).unwrap_or_else(|| {
        debug!("Unknown category {:?}, reading as General", category);
        Category::General
    });

    Ok(Ticket {
        id: row.get(0)?,
        text: row.get(1)?,
        source: row.get(2)?,
        priority,
        category,
        status: row.get(5)?,
        assigned_to: row.get(6)?,
        customer_rating: row.get(7)?,
        created_at,
    })
}

fn select_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<Ticket>> {
    conn.query_row(
        &format!("SELECT {} FROM tickets WHERE id = ?1", SELECT_COLUMNS),
        params![id],
        row_to_ticket,
    )
    .optional()
}

fn change_value(change: &FieldChange) -> Value {
    match change {
        FieldChange::Status(s) | FieldChange::AssignedTo(s) => Value::Text(s.clone()),
        FieldChange::CustomerRating(n) => Value::Integer(*n),
    }
}

impl TicketStore for SqliteStore {
    fn create(&self, new: NewTicket) -> SenseResult<Ticket> {
        let created_at = Utc::now();
        self.with_connection(|conn| {
            conn.execute(
                "INSERT INTO tickets (text, source, priority, category, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    new.text,
                    new.source,
                    new.priority.as_str(),
                    new.category.as_str(),
                    created_at
                ],
            )?;
            let id = conn.last_insert_rowid();
            select_by_id(conn, id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    fn list(&self) -> SenseResult<Vec<Ticket>> {
        self.with_connection(|conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {} FROM tickets ORDER BY id", SELECT_COLUMNS))?;
            let rows = stmt.query_map([], row_to_ticket)?;
            rows.collect()
        })
    }

    fn get(&self, id: i64) -> SenseResult<Option<Ticket>> {
        self.with_connection(|conn| select_by_id(conn, id))
    }

    fn update(&self, id: i64, patch: &TicketPatch) -> SenseResult<Ticket> {
        let changes = patch.changes();

        let updated = self.with_connection(|conn| {
            let tx = conn.transaction()?;

            if select_by_id(&tx, id)?.is_none() {
                return Ok(None);
            }

            if !changes.is_empty() {
                let assignments: Vec<String> = changes
                    .iter()
                    .map(|c| format!("{} = ?", c.column()))
                    .collect();
                let sql = format!("UPDATE tickets SET {} WHERE id = ?", assignments.join(", "));

                let mut values: Vec<Value> = changes.iter().map(change_value).collect();
                values.push(Value::Integer(id));

                debug!("Executing query: {} for ticket #{}", sql, id);
                tx.execute(&sql, params_from_iter(values))?;
            }

            let ticket = select_by_id(&tx, id)?;
            tx.commit()?;
            Ok(ticket)
        })?;

        updated.ok_or(SenseError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_temp() -> (tempfile::TempDir, SqliteStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::open(&dir.path().join("tickets.db")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_seed_only_once() {
        let (_dir, store) = open_temp();
        assert_eq!(store.seed_samples().unwrap(), 4);
        assert_eq!(store.seed_samples().unwrap(), 0);
        assert_eq!(store.list().unwrap().len(), 4);
    }

    #[test]
    fn test_reset_clears_rows() {
        let (_dir, store) = open_temp();
        store.seed_samples().unwrap();
        store.reset().unwrap();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_category_reads_as_general() {
        let (_dir, store) = open_temp();
        store
            .with_connection(|conn| {
                conn.execute(
                    "INSERT INTO tickets (text, priority, category) VALUES ('legacy', 'low', 'Feedback')",
                    [],
                )
            })
            .unwrap();

        let tickets = store.list().unwrap();
        assert_eq!(tickets[0].category, Category::General);
        assert_eq!(tickets[0].source, "web");
    }
}
