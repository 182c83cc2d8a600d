//! Diary entries and the store that owns them.
//!
//! The whole collection is persisted as one JSON array under a single
//! backend key. Every mutation is a read-modify-write of that document:
//! load, change, write the whole thing back. There is no per-record update
//! and no locking - the crate models a single local user driving one
//! foreground view, so the last writer wins and that is the documented
//! contract (see the crate docs). Reads sort by creation time, newest
//! first, regardless of the order entries were persisted in.
//!
//! The public operations never return an error: a broken backend yields an
//! empty list, a `None` or a `false`, and the failure is logged. The list
//! view must never crash because storage hiccupped.

pub mod credential;

use crate::constants;
use crate::errors::{AppResult, StorageError};
use crate::storage::StorageBackend;
use chrono::{DateTime, Datelike, Local, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use tracing::{debug, warn};

pub use credential::CredentialGate;

fn default_bg_color() -> String {
    constants::DEFAULT_ENTRY_COLOR.to_string()
}

/// One diary record.
///
/// `date` is the user-editable display date in `DD/MM/YYYY` form; it is
/// free text and may not parse (see [`crate::dates::parse_date`]).
/// `created_at` is set once at creation and never changes; `updated_at`
/// stays absent until the first update. Serialized field names match the
/// stored wire format (`bgColor`, `createdAt`, `updatedAt`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Unique id, derived from the creation timestamp in epoch milliseconds.
    pub id: String,
    /// Display date as entered by the user.
    pub date: String,
    /// Optional short topic line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    /// The entry body.
    pub text: String,
    /// Background color tag, one of [`crate::constants::ENTRY_COLORS`].
    #[serde(default = "default_bg_color")]
    pub bg_color: String,
    /// ISO-8601 creation instant, immutable.
    pub created_at: String,
    /// ISO-8601 instant of the last update, absent until the first one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Entry {
    /// The creation instant in the local timezone, if `created_at` parses.
    pub fn created_at_local(&self) -> Option<DateTime<Local>> {
        DateTime::parse_from_rfc3339(&self.created_at)
            .ok()
            .map(|dt| dt.with_timezone(&Local))
    }

    /// Millisecond sort key; unparseable timestamps sort last.
    pub(crate) fn created_at_millis(&self) -> i64 {
        DateTime::parse_from_rfc3339(&self.created_at)
            .map(|dt| dt.timestamp_millis())
            .unwrap_or(i64::MIN)
    }
}

/// The caller-supplied fields of a new entry.
///
/// Validation of the required fields is the caller's job - the store
/// persists whatever it is handed. [`EntryDraft::has_required_fields`] is
/// the check a view performs before calling
/// [`EntryStore::add_entry`].
#[derive(Debug, Clone, Default)]
pub struct EntryDraft {
    /// Display date in `DD/MM/YYYY` form.
    pub date: String,
    /// Optional short topic line.
    pub theme: Option<String>,
    /// The entry body.
    pub text: String,
    /// Background color tag; `pink` when absent.
    pub bg_color: Option<String>,
}

impl EntryDraft {
    /// Whether both required fields survive trimming.
    pub fn has_required_fields(&self) -> bool {
        !self.date.trim().is_empty() && !self.text.trim().is_empty()
    }

    /// A copy with surrounding whitespace stripped from the text fields,
    /// the way the entry form cleans its inputs before saving.
    pub fn trimmed(&self) -> EntryDraft {
        EntryDraft {
            date: self.date.trim().to_string(),
            theme: self.theme.as_ref().map(|t| t.trim().to_string()),
            text: self.text.trim().to_string(),
            bg_color: self.bg_color.clone(),
        }
    }
}

/// A shallow patch for [`EntryStore::update_entry`].
///
/// Only the supplied fields are merged onto the stored entry; `id` and
/// `created_at` are not editable.
#[derive(Debug, Clone, Default)]
pub struct EntryPatch {
    pub date: Option<String>,
    pub theme: Option<String>,
    pub text: Option<String>,
    pub bg_color: Option<String>,
}

/// Owns the persisted diary entry collection.
///
/// # Examples
///
/// ```
/// use diario::diary::{EntryDraft, EntryStore};
/// use diario::storage::MemoryBackend;
///
/// let backend = MemoryBackend::new();
/// let store = EntryStore::new(&backend);
///
/// let entry = store
///     .add_entry(EntryDraft {
///         date: "07/10/2025".to_string(),
///         text: "Hello".to_string(),
///         ..EntryDraft::default()
///     })
///     .expect("in-memory write cannot fail");
///
/// assert_eq!(entry.bg_color, "pink");
/// assert_eq!(store.get_entries().len(), 1);
/// ```
pub struct EntryStore<'a, B: StorageBackend> {
    backend: &'a B,
}

impl<'a, B: StorageBackend> EntryStore<'a, B> {
    /// Creates a store over the given backend.
    pub fn new(backend: &'a B) -> Self {
        EntryStore { backend }
    }

    /// Returns all entries, newest `created_at` first.
    ///
    /// Fails soft: any backend or parse error yields an empty list. The
    /// caller cannot distinguish "no entries" from "storage broken"; that
    /// is the intended contract for the list view.
    pub fn get_entries(&self) -> Vec<Entry> {
        match self.load_sorted() {
            Ok(entries) => entries,
            Err(err) => {
                warn!("Failed to load diary entries: {}", err);
                Vec::new()
            }
        }
    }

    /// Creates an entry from `draft` and persists the grown collection.
    ///
    /// The id is the creation instant in epoch milliseconds - good enough
    /// for a single user typing, not a uniqueness guarantee under
    /// same-millisecond writes. Returns the created entry, or `None` when
    /// the backend write fails.
    pub fn add_entry(&self, draft: EntryDraft) -> Option<Entry> {
        match self.try_add_entry(draft) {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!("Failed to add diary entry: {}", err);
                None
            }
        }
    }

    /// Shallow-merges `patch` onto the entry with the given id and stamps
    /// `updated_at`.
    ///
    /// Returns `true` even when no entry matches: update does not signal
    /// "not found", and callers must not rely on it to detect a missing
    /// id. Returns `false` only when the backend fails.
    pub fn update_entry(&self, id: &str, patch: &EntryPatch) -> bool {
        match self.try_update_entry(id, patch) {
            Ok(()) => true,
            Err(err) => {
                warn!("Failed to update diary entry {}: {}", id, err);
                false
            }
        }
    }

    /// Removes the entry with the given id and persists the shrunk
    /// collection.
    ///
    /// Removing an absent id still reports success, so a second delete of
    /// the same id is a no-op that returns `true`.
    pub fn delete_entry(&self, id: &str) -> bool {
        match self.try_delete_entry(id) {
            Ok(()) => true,
            Err(err) => {
                warn!("Failed to delete diary entry {}: {}", id, err);
                false
            }
        }
    }

    /// Entries whose creation instant falls in the given local month.
    ///
    /// `month0` is 0-based. Fails soft like [`EntryStore::get_entries`].
    pub fn entries_by_month(&self, month0: u32, year: i32) -> Vec<Entry> {
        self.get_entries()
            .into_iter()
            .filter(|entry| {
                entry
                    .created_at_local()
                    .map(|dt| dt.month0() == month0 && dt.year() == year)
                    .unwrap_or(false)
            })
            .collect()
    }

    fn try_add_entry(&self, draft: EntryDraft) -> AppResult<Entry> {
        let mut entries = self.load_sorted()?;

        let now = Utc::now();
        let entry = Entry {
            id: now.timestamp_millis().to_string(),
            date: draft.date,
            theme: draft.theme,
            text: draft.text,
            bg_color: draft.bg_color.unwrap_or_else(default_bg_color),
            created_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            updated_at: None,
        };

        debug!("Adding diary entry {}", entry.id);
        entries.insert(0, entry.clone());
        self.persist(&entries)?;
        Ok(entry)
    }

    fn try_update_entry(&self, id: &str, patch: &EntryPatch) -> AppResult<()> {
        let mut entries = self.load_sorted()?;

        for entry in entries.iter_mut().filter(|entry| entry.id == id) {
            if let Some(date) = &patch.date {
                entry.date = date.clone();
            }
            if let Some(theme) = &patch.theme {
                entry.theme = Some(theme.clone());
            }
            if let Some(text) = &patch.text {
                entry.text = text.clone();
            }
            if let Some(bg_color) = &patch.bg_color {
                entry.bg_color = bg_color.clone();
            }
            entry.updated_at = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));
        }

        self.persist(&entries)
    }

    fn try_delete_entry(&self, id: &str) -> AppResult<()> {
        let mut entries = self.load_sorted()?;
        entries.retain(|entry| entry.id != id);
        self.persist(&entries)
    }

    fn load_sorted(&self) -> AppResult<Vec<Entry>> {
        let mut entries: Vec<Entry> = match self.backend.get(constants::ENTRIES_KEY)? {
            Some(json) => serde_json::from_str(&json).map_err(StorageError::Serialization)?,
            None => Vec::new(),
        };

        // Stable sort: entries created in the same millisecond keep their
        // stored (most-recently-prepended-first) order.
        entries.sort_by_key(|entry| Reverse(entry.created_at_millis()));
        Ok(entries)
    }

    fn persist(&self, entries: &[Entry]) -> AppResult<()> {
        let json = serde_json::to_string(entries).map_err(StorageError::Serialization)?;
        self.backend.set(constants::ENTRIES_KEY, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{BrokenBackend, MemoryBackend};
    use std::thread;
    use std::time::Duration;

    fn draft(date: &str, text: &str) -> EntryDraft {
        EntryDraft {
            date: date.to_string(),
            text: text.to_string(),
            ..EntryDraft::default()
        }
    }

    fn seeded_backend(json: &str) -> MemoryBackend {
        let backend = MemoryBackend::new();
        backend.set(constants::ENTRIES_KEY, json).unwrap();
        backend
    }

    const TWO_ENTRIES: &str = r#"[
        {"id":"100","date":"15/10/2025","text":"older","bgColor":"blue",
         "createdAt":"2025-10-15T12:00:00.000Z"},
        {"id":"200","date":"16/11/2025","text":"newer","bgColor":"green",
         "createdAt":"2025-11-16T12:00:00.000Z"}
    ]"#;

    #[test]
    fn test_get_entries_empty_store() {
        let backend = MemoryBackend::new();
        let store = EntryStore::new(&backend);
        assert!(store.get_entries().is_empty());
    }

    #[test]
    fn test_get_entries_sorts_newest_first() {
        // Stored oldest-first on purpose: read-time sorting is the contract.
        let backend = seeded_backend(TWO_ENTRIES);
        let store = EntryStore::new(&backend);

        let entries = store.get_entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, "200");
        assert_eq!(entries[1].id, "100");
    }

    #[test]
    fn test_get_entries_fails_soft_on_corrupt_document() {
        let backend = seeded_backend("this is not json");
        let store = EntryStore::new(&backend);
        assert!(store.get_entries().is_empty());
    }

    #[test]
    fn test_get_entries_fails_soft_on_broken_backend() {
        let backend = BrokenBackend;
        let store = EntryStore::new(&backend);
        assert!(store.get_entries().is_empty());
    }

    #[test]
    fn test_add_entry_fills_defaults() {
        let backend = MemoryBackend::new();
        let store = EntryStore::new(&backend);

        let entry = store.add_entry(draft("07/10/2025", "Hello")).unwrap();

        assert!(!entry.id.is_empty());
        assert_eq!(entry.date, "07/10/2025");
        assert_eq!(entry.text, "Hello");
        assert_eq!(entry.bg_color, "pink");
        assert_eq!(entry.theme, None);
        assert_eq!(entry.updated_at, None);
        assert!(DateTime::parse_from_rfc3339(&entry.created_at).is_ok());
    }

    #[test]
    fn test_add_entry_keeps_supplied_color() {
        let backend = MemoryBackend::new();
        let store = EntryStore::new(&backend);

        let entry = store
            .add_entry(EntryDraft {
                bg_color: Some("lavender".to_string()),
                ..draft("07/10/2025", "Hello")
            })
            .unwrap();

        assert_eq!(entry.bg_color, "lavender");
    }

    #[test]
    fn test_add_entry_grows_collection_by_one_newest_first() {
        let backend = MemoryBackend::new();
        let store = EntryStore::new(&backend);

        store.add_entry(draft("01/10/2025", "first")).unwrap();
        let before = store.get_entries().len();

        let added = store.add_entry(draft("02/10/2025", "second")).unwrap();
        let entries = store.get_entries();

        assert_eq!(entries.len(), before + 1);
        assert_eq!(entries[0].id, added.id);
        assert_eq!(entries[0].text, "second");
    }

    #[test]
    fn test_add_entry_fails_soft_on_broken_backend() {
        let backend = BrokenBackend;
        let store = EntryStore::new(&backend);
        assert!(store.add_entry(draft("07/10/2025", "Hello")).is_none());
    }

    #[test]
    fn test_update_entry_merges_and_stamps_updated_at() {
        let backend = seeded_backend(TWO_ENTRIES);
        let store = EntryStore::new(&backend);

        let patch = EntryPatch {
            text: Some("rewritten".to_string()),
            ..EntryPatch::default()
        };
        assert!(store.update_entry("100", &patch));

        let entries = store.get_entries();
        let updated = entries.iter().find(|e| e.id == "100").unwrap();

        assert_eq!(updated.text, "rewritten");
        // Untouched fields survive the merge.
        assert_eq!(updated.date, "15/10/2025");
        assert_eq!(updated.bg_color, "blue");
        assert_eq!(updated.created_at, "2025-10-15T12:00:00.000Z");
        // ISO-8601 strings of the same shape compare chronologically.
        let updated_at = updated.updated_at.as_deref().unwrap();
        assert!(updated_at >= updated.created_at.as_str());
    }

    #[test]
    fn test_update_entry_leaves_other_entries_alone() {
        let backend = seeded_backend(TWO_ENTRIES);
        let store = EntryStore::new(&backend);

        let patch = EntryPatch {
            text: Some("rewritten".to_string()),
            ..EntryPatch::default()
        };
        store.update_entry("100", &patch);

        let entries = store.get_entries();
        let untouched = entries.iter().find(|e| e.id == "200").unwrap();
        assert_eq!(untouched.text, "newer");
        assert_eq!(untouched.updated_at, None);
    }

    #[test]
    fn test_update_entry_missing_id_still_succeeds() {
        let backend = seeded_backend(TWO_ENTRIES);
        let store = EntryStore::new(&backend);

        let patch = EntryPatch {
            text: Some("ghost".to_string()),
            ..EntryPatch::default()
        };
        assert!(store.update_entry("does-not-exist", &patch));

        let entries = store.get_entries();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.text != "ghost"));
        assert!(entries.iter().all(|e| e.updated_at.is_none()));
    }

    #[test]
    fn test_update_entry_fails_on_broken_backend() {
        let backend = BrokenBackend;
        let store = EntryStore::new(&backend);
        assert!(!store.update_entry("100", &EntryPatch::default()));
    }

    #[test]
    fn test_delete_entry_removes_and_is_idempotent() {
        let backend = seeded_backend(TWO_ENTRIES);
        let store = EntryStore::new(&backend);

        assert!(store.delete_entry("100"));
        let entries = store.get_entries();
        assert_eq!(entries.len(), 1);
        assert!(entries.iter().all(|e| e.id != "100"));

        // Second delete matches nothing and still reports success.
        assert!(store.delete_entry("100"));
        assert_eq!(store.get_entries().len(), 1);
    }

    #[test]
    fn test_delete_entry_fails_on_broken_backend() {
        let backend = BrokenBackend;
        let store = EntryStore::new(&backend);
        assert!(!store.delete_entry("100"));
    }

    #[test]
    fn test_entries_by_month_filters_on_created_at() {
        // Noon UTC in mid-month stays in the same local month for any
        // realistic timezone offset.
        let backend = seeded_backend(TWO_ENTRIES);
        let store = EntryStore::new(&backend);

        let october = store.entries_by_month(9, 2025);
        assert_eq!(october.len(), 1);
        assert_eq!(october[0].id, "100");

        assert!(store.entries_by_month(0, 2025).is_empty());
        assert!(store.entries_by_month(9, 2024).is_empty());
    }

    #[test]
    fn test_entries_by_month_fails_soft_on_broken_backend() {
        let backend = BrokenBackend;
        let store = EntryStore::new(&backend);
        assert!(store.entries_by_month(9, 2025).is_empty());
    }

    #[test]
    fn test_add_then_delete_round_trip() {
        let backend = MemoryBackend::new();
        let store = EntryStore::new(&backend);

        let first = store.add_entry(draft("01/10/2025", "first")).unwrap();
        // Entry ids come from the millisecond clock; space the writes out
        // so the two ids differ.
        thread::sleep(Duration::from_millis(5));
        let second = store.add_entry(draft("02/10/2025", "second")).unwrap();
        assert_ne!(first.id, second.id);

        assert!(store.delete_entry(&first.id));
        let entries = store.get_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, second.id);
    }

    #[test]
    fn test_entry_wire_format_uses_camel_case() {
        let entry = Entry {
            id: "1".to_string(),
            date: "07/10/2025".to_string(),
            theme: None,
            text: "Hello".to_string(),
            bg_color: "pink".to_string(),
            created_at: "2025-10-07T12:00:00.000Z".to_string(),
            updated_at: None,
        };

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"bgColor\":\"pink\""));
        assert!(json.contains("\"createdAt\":"));
        // Absent optionals stay off the wire.
        assert!(!json.contains("theme"));
        assert!(!json.contains("updatedAt"));
    }

    #[test]
    fn test_entry_deserializes_with_missing_color() {
        let entry: Entry = serde_json::from_str(
            r#"{"id":"1","date":"07/10/2025","text":"x",
                "createdAt":"2025-10-07T12:00:00.000Z"}"#,
        )
        .unwrap();
        assert_eq!(entry.bg_color, "pink");
    }

    #[test]
    fn test_draft_required_fields_and_trimming() {
        assert!(draft("07/10/2025", "Hello").has_required_fields());
        assert!(!draft("  ", "Hello").has_required_fields());
        assert!(!draft("07/10/2025", "").has_required_fields());

        let trimmed = EntryDraft {
            date: " 07/10/2025 ".to_string(),
            theme: Some(" Um dia especial ".to_string()),
            text: "  Hello  ".to_string(),
            bg_color: None,
        }
        .trimmed();
        assert_eq!(trimmed.date, "07/10/2025");
        assert_eq!(trimmed.theme.as_deref(), Some("Um dia especial"));
        assert_eq!(trimmed.text, "Hello");
    }
}
