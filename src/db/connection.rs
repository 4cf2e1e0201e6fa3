use rusqlite::Connection;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::projector::ReservationError;

pub const SCHEMA_SQL: &str = include_str!("../../sql/schema.sql");

// Thread-local connections, one per database path.
thread_local! {
    static DB_CONNS: RefCell<HashMap<PathBuf, Connection>> = RefCell::new(HashMap::new());
}

#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open or fetch this thread's connection to `path` and run `f(conn)`.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, ReservationError>
    where
        F: FnOnce(&mut Connection) -> Result<T, ReservationError>,
    {
        DB_CONNS
            .try_with(|cell| {
                let mut conns = cell.borrow_mut();
                if !conns.contains_key(&self.path) {
                    let conn = Connection::open(&self.path)
                        .map_err(|e| ReservationError::Store(format!("open db failed: {e}")))?;
                    conns.insert(self.path.clone(), conn);
                }
                match conns.get_mut(&self.path) {
                    Some(conn) => f(conn),
                    None => Err(ReservationError::Store("connection slot vanished".into())),
                }
            })
            .map_err(|_| ReservationError::Store("thread-local connection unavailable".into()))?
    }
}

/// Apply the bundled schema. Safe to run on every start.
pub fn init_db(db: &Database) -> Result<(), ReservationError> {
    db.with_conn(|conn| {
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| ReservationError::Store(format!("failed to apply schema: {e}")))
    })?;

    tracing::info!(path = %db.path().display(), "database initialized");
    Ok(())
}
