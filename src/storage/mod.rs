//! The persistent key-value backend.
//!
//! Every piece of state this crate owns - the diary entry collection, the
//! access PIN, the password-generator history and settings - lives in a
//! string-keyed store of UTF-8 text values. The stores in [`crate::diary`]
//! and [`crate::keygen`] serialize whole documents (a JSON array or object)
//! and write them under a single key, so each write replaces one document
//! atomically and the last writer wins.
//!
//! # Module Structure
//!
//! - `schema`: table definition and initialization
//! - [`SqliteBackend`]: the durable backend, one `kv` table in a SQLite file
//! - [`MemoryBackend`]: a volatile backend for tests and scratch callers

pub mod schema;

use crate::constants;
use crate::errors::{AppError, AppResult, StorageError};
use rusqlite::Connection;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// String-keyed get/set/remove over UTF-8 text values.
///
/// This is the seam between the stores and their persistence: production
/// code uses [`SqliteBackend`], tests usually use [`MemoryBackend`] or a
/// deliberately failing implementation.
pub trait StorageBackend {
    /// Returns the value stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Removes the value stored under `key`. Removing an absent key is not
    /// an error.
    fn remove(&self, key: &str) -> AppResult<()>;
}

/// Durable key-value backend over a single SQLite file.
///
/// Holds one connection: the crate models exactly one logical actor (see
/// the concurrency notes in the crate docs), so there is no pool.
pub struct SqliteBackend {
    conn: Connection,
}

impl SqliteBackend {
    /// Opens or creates the store at `path`.
    ///
    /// The `kv` table is created if missing; opening an existing store is a
    /// no-op on the schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the database file cannot be opened or the schema
    /// cannot be created.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use diario::storage::SqliteBackend;
    /// use std::path::Path;
    ///
    /// let backend = SqliteBackend::open(Path::new("/tmp/diario.db"))?;
    /// # Ok::<(), diario::errors::AppError>(())
    /// ```
    pub fn open(path: &Path) -> AppResult<Self> {
        debug!("Opening key-value store at: {:?}", path);

        let conn = Connection::open(path).map_err(StorageError::Sqlite)?;
        schema::create_tables(&conn)?;

        info!("Key-value store opened");
        Ok(SqliteBackend { conn })
    }

    /// Opens a throwaway in-memory store.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory().map_err(StorageError::Sqlite)?;
        schema::create_tables(&conn)?;
        Ok(SqliteBackend { conn })
    }
}

impl StorageBackend for SqliteBackend {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let result = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get(0)
            });

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StorageError::Sqlite(e).into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.conn
            .execute(
                r#"
                INSERT INTO kv (key, value) VALUES (?1, ?2)
                ON CONFLICT(key) DO UPDATE SET value = excluded.value
                "#,
                [key, value],
            )
            .map_err(StorageError::Sqlite)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", [key])
            .map_err(StorageError::Sqlite)?;
        Ok(())
    }
}

/// Volatile key-value backend backed by a `HashMap`.
///
/// Same contract as [`SqliteBackend`] without durability. Useful for unit
/// tests and doc examples.
///
/// # Examples
///
/// ```
/// use diario::storage::{MemoryBackend, StorageBackend};
///
/// let backend = MemoryBackend::new();
/// backend.set("greeting", "hello")?;
/// assert_eq!(backend.get("greeting")?, Some("hello".to_string()));
/// backend.remove("greeting")?;
/// assert_eq!(backend.get("greeting")?, None);
/// # Ok::<(), diario::errors::AppError>(())
/// ```
#[derive(Debug, Default)]
pub struct MemoryBackend {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryBackend {
    /// Creates an empty in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        self.values.borrow_mut().remove(key);
        Ok(())
    }
}

/// Ensures the data directory exists, creating it if necessary.
///
/// Newly created directories get `0o700` permissions on Unix: the store
/// holds private journal text and the access PIN.
///
/// # Errors
///
/// Returns:
/// - `AppError::Config` if the provided path is not absolute
/// - `AppError::Io` if directory creation or permission setting fails
pub fn ensure_data_directory_exists(data_dir: &Path) -> AppResult<()> {
    if !data_dir.is_absolute() {
        return Err(AppError::Config(format!(
            "Data directory path must be absolute: {}",
            data_dir.display()
        )));
    }

    if !data_dir.exists() {
        fs::create_dir_all(data_dir).map_err(|e| {
            AppError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to create data directory: {}", e),
            ))
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let permissions = fs::Permissions::from_mode(constants::DEFAULT_DIR_PERMISSIONS);
            fs::set_permissions(data_dir, permissions).map_err(|e| {
                AppError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to set permissions on data directory: {}", e),
                ))
            })?;
            debug!("Set 0o700 permissions on data directory");
        }
    }

    Ok(())
}

/// A backend whose every operation fails, for exercising the soft-failure
/// paths of the stores.
#[cfg(test)]
pub(crate) struct BrokenBackend;

#[cfg(test)]
impl StorageBackend for BrokenBackend {
    fn get(&self, _key: &str) -> AppResult<Option<String>> {
        Err(AppError::Io(std::io::Error::other("backend offline")))
    }

    fn set(&self, _key: &str, _value: &str) -> AppResult<()> {
        Err(AppError::Io(std::io::Error::other("backend offline")))
    }

    fn remove(&self, _key: &str) -> AppResult<()> {
        Err(AppError::Io(std::io::Error::other("backend offline")))
    }
}
