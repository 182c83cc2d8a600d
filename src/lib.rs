/*!
# Diario

Diario is the storage and query core of a small PIN-gated diary application,
together with the persistence pieces of its password-generator companion
app. The UI layer is an external caller: it drives the stores below, shows
their results, and re-reads after every mutation.

## Core Features

- Diary entries: create, update, delete, list newest-first, query by month
- A single stored access PIN with set/verify
- Permissive `DD/MM/YYYY` date handling and calendar-grid derivation
- Display filtering by day or month, ordered by the user-entered date
- Random password generation with a persisted history and settings

## Architecture

The codebase follows a modular architecture with clear separation of concerns:

- `config`: data-directory resolution from environment variables
- `storage`: the persistent key-value backend and its schema
- `dates`: date parsing, formatting and calendar arithmetic
- `diary`: the entry collection and the credential gate
- `filter`: display-side selection and ordering
- `keygen`: password generation and the companion app's persistence
- `errors`: error handling infrastructure

## Concurrency model

There is exactly one logical actor: a single local user driving one
foreground view. Every mutation rewrites a whole stored document, so
concurrent writers would silently lose the earlier write (last-write-wins).
That is a documented limitation, not a bug; a reimplementation with real
multi-writer access needs per-record storage instead.

## Usage Example

```rust
use diario::diary::{CredentialGate, EntryDraft, EntryStore};
use diario::storage::MemoryBackend;

let backend = MemoryBackend::new();

let gate = CredentialGate::new(&backend);
gate.set_pin("1234");
assert!(gate.verify_pin("1234"));

let store = EntryStore::new(&backend);
let entry = store
    .add_entry(EntryDraft {
        date: "07/10/2025".to_string(),
        text: "Hello".to_string(),
        ..EntryDraft::default()
    })
    .expect("in-memory write cannot fail");

assert_eq!(store.get_entries()[0].id, entry.id);
```
*/

/// Configuration loading and management
pub mod config;
/// Constants used throughout the crate
pub mod constants;
/// Date parsing, formatting and calendar arithmetic
pub mod dates;
/// Diary entries, their store and the credential gate
pub mod diary;
/// Error types and utilities for error handling
pub mod errors;
/// Display-side filtering and ordering of entries
pub mod filter;
/// Password generation and companion-app persistence
pub mod keygen;
/// The persistent key-value backend
pub mod storage;

// Re-export important types for convenience
pub use config::Config;
pub use diary::{CredentialGate, Entry, EntryDraft, EntryPatch, EntryStore};
pub use errors::{AppError, AppResult};
pub use filter::EntryFilter;
pub use keygen::{GeneratorSettings, KeygenStore, PasswordKind, PasswordRecord};
pub use storage::{MemoryBackend, SqliteBackend, StorageBackend};
