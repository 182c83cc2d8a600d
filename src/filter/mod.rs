//! Selecting and ordering entries for display.
//!
//! The list view narrows the collection by a single date or a single month
//! (never both) and re-sorts the survivors by their user-entered `date`
//! field. Display order can therefore differ from storage order: users
//! backdate entries, and a backdated entry belongs where its date says, not
//! where its creation time landed it.

use crate::dates;
use crate::diary::Entry;
use chrono::Datelike;
use std::cmp::Reverse;
use std::collections::HashSet;

/// A display filter. Selecting a date clears any month selection and vice
/// versa, so there is exactly one active variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryFilter {
    /// Keep entries whose `date` field parses to exactly this day.
    Date(chrono::NaiveDate),
    /// Keep entries whose `date` field parses into this 0-based month.
    Month { month0: u32, year: i32 },
}

/// Selects and orders entries for display.
///
/// With no filter every entry passes through. Entries whose `date` field
/// does not parse never match a filter. The result is ordered descending
/// by the parsed `date` field, falling back to the creation instant for
/// entries whose date is unparseable; ties keep the input order.
///
/// # Examples
///
/// ```
/// use diario::diary::{EntryDraft, EntryStore};
/// use diario::filter::{filter_entries, EntryFilter};
/// use diario::storage::MemoryBackend;
///
/// let backend = MemoryBackend::new();
/// let store = EntryStore::new(&backend);
/// let _ = store.add_entry(EntryDraft {
///     date: "25/12/2024".to_string(),
///     text: "Natal".to_string(),
///     ..EntryDraft::default()
/// });
///
/// let entries = store.get_entries();
/// let december = filter_entries(&entries, Some(&EntryFilter::Month { month0: 11, year: 2024 }));
/// assert_eq!(december.len(), 1);
///
/// let january = filter_entries(&entries, Some(&EntryFilter::Month { month0: 0, year: 2024 }));
/// assert!(january.is_empty());
/// ```
pub fn filter_entries(entries: &[Entry], filter: Option<&EntryFilter>) -> Vec<Entry> {
    let mut selected: Vec<Entry> = entries
        .iter()
        .filter(|entry| matches_filter(entry, filter))
        .cloned()
        .collect();

    selected.sort_by_key(|entry| Reverse(display_sort_key(entry)));
    selected
}

fn matches_filter(entry: &Entry, filter: Option<&EntryFilter>) -> bool {
    match filter {
        None => true,
        Some(EntryFilter::Date(target)) => {
            dates::parse_date(&entry.date).is_some_and(|date| date == *target)
        }
        Some(EntryFilter::Month { month0, year }) => dates::parse_date(&entry.date)
            .is_some_and(|date| date.month0() == *month0 && date.year() == *year),
    }
}

/// Millisecond key on the local wall-clock scale: parsed dates count as
/// midnight, unparseable ones fall back to the creation instant.
fn display_sort_key(entry: &Entry) -> i64 {
    if let Some(date) = dates::parse_date(&entry.date) {
        return date
            .and_hms_opt(0, 0, 0)
            .map_or(i64::MIN, |dt| dt.and_utc().timestamp_millis());
    }

    entry.created_at_local().map_or(i64::MIN, |dt| {
        dt.naive_local().and_utc().timestamp_millis()
    })
}

/// The days of the given local month that have at least one entry, judged
/// by creation instant. Feeds the calendar's entry markers.
pub fn days_with_entries(entries: &[Entry], month0: u32, year: i32) -> HashSet<u32> {
    entries
        .iter()
        .filter_map(|entry| entry.created_at_local())
        .filter(|dt| dt.month0() == month0 && dt.year() == year)
        .map(|dt| dt.day())
        .collect()
}

/// Whether any entry was created on the given local day.
pub fn has_entry_on_day(entries: &[Entry], day: u32, month0: u32, year: i32) -> bool {
    days_with_entries(entries, month0, year).contains(&day)
}
