//! Password generation and the companion app's persistence.
//!
//! Passwords are drawn uniformly, with replacement, from a fixed alphabet
//! chosen by [`PasswordKind`]. The randomness comes from [`rand::thread_rng`],
//! an ordinary pseudo-random source: fine for suggesting throwaway app
//! passwords, unsuitable for security-critical secrets. Do not swap in a
//! cryptographic source without revisiting the tests, which assume
//! uniform-over-alphabet sampling.
//!
//! [`KeygenStore`] persists the generated-password history and the
//! generator settings. Loads fail soft (empty history, default settings);
//! saves propagate their errors so the caller can tell the user the write
//! was lost. The store imposes no cap on the history - keeping only the
//! [`crate::constants::HISTORY_LIMIT`] most recent records is the caller's
//! job, done through [`remember`].

use crate::constants;
use crate::errors::{AppResult, StorageError};
use crate::storage::StorageBackend;
use chrono::Local;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// The character classes a password can be drawn from.
///
/// Serialized by its lowercase wire key (`numbers`, `letters`, `mixed`,
/// `complete`), the form the settings document stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordKind {
    /// Digits only.
    Numbers,
    /// Upper- and lowercase letters.
    Letters,
    /// Letters and digits.
    Mixed,
    /// Letters, digits and symbols.
    Complete,
}

/// Every kind, in the order the picker displays them.
pub const PASSWORD_TYPES: [PasswordKind; 4] = [
    PasswordKind::Numbers,
    PasswordKind::Letters,
    PasswordKind::Mixed,
    PasswordKind::Complete,
];

impl PasswordKind {
    /// The alphabet passwords of this kind are drawn from.
    pub fn alphabet(self) -> &'static str {
        match self {
            PasswordKind::Numbers => constants::NUMBER_CHARS,
            PasswordKind::Letters => constants::LETTER_CHARS,
            PasswordKind::Mixed => constants::MIXED_CHARS,
            PasswordKind::Complete => constants::COMPLETE_CHARS,
        }
    }

    /// The wire key stored in the settings document.
    pub fn key(self) -> &'static str {
        match self {
            PasswordKind::Numbers => "numbers",
            PasswordKind::Letters => "letters",
            PasswordKind::Mixed => "mixed",
            PasswordKind::Complete => "complete",
        }
    }

    /// Display label shown in the picker.
    pub fn label(self) -> &'static str {
        match self {
            PasswordKind::Numbers => "Apenas Números",
            PasswordKind::Letters => "Apenas Letras",
            PasswordKind::Mixed => "Letras e Números",
            PasswordKind::Complete => "Completa",
        }
    }

    /// Short description of the alphabet, shown under the label.
    pub fn description(self) -> &'static str {
        match self {
            PasswordKind::Numbers => "0-9",
            PasswordKind::Letters => "A-Z, a-z",
            PasswordKind::Mixed => "A-Z, a-z, 0-9",
            PasswordKind::Complete => "Letras, números e símbolos",
        }
    }

    /// Resolves a wire key, falling back to [`PasswordKind::Numbers`] for
    /// anything unknown.
    pub fn from_key(key: &str) -> Self {
        match key {
            "letters" => PasswordKind::Letters,
            "mixed" => PasswordKind::Mixed,
            "complete" => PasswordKind::Complete,
            _ => PasswordKind::Numbers,
        }
    }
}

/// Draws `length` characters uniformly, with replacement, from the kind's
/// alphabet.
///
/// A zero length yields an empty string. Not cryptographically secure; see
/// the module docs.
///
/// # Examples
///
/// ```
/// use diario::keygen::{generate_password, PasswordKind};
///
/// let pin = generate_password(8, PasswordKind::Numbers);
/// assert_eq!(pin.len(), 8);
/// assert!(pin.chars().all(|c| c.is_ascii_digit()));
///
/// assert_eq!(generate_password(0, PasswordKind::Numbers), "");
/// ```
pub fn generate_password(length: usize, kind: PasswordKind) -> String {
    let alphabet = kind.alphabet().as_bytes();
    let mut rng = rand::thread_rng();

    (0..length)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())] as char)
        .collect()
}

/// One generated password, as displayed in the history list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PasswordRecord {
    /// Unique id, derived from the generation timestamp in epoch
    /// milliseconds.
    pub id: String,
    /// The generated password.
    pub password: String,
    /// Display label of the kind it was drawn from.
    #[serde(rename = "type")]
    pub type_label: String,
    /// Requested length.
    pub length: usize,
    /// Generation day, `DD/MM/YYYY`.
    pub date: String,
    /// Generation time of day, `HH:MM:SS`.
    pub time: String,
    /// Generation instant in epoch milliseconds.
    pub timestamp: i64,
}

/// Builds the history record for a freshly generated password.
pub fn create_password_entry(password: &str, kind: PasswordKind, length: usize) -> PasswordRecord {
    let now = Local::now();
    PasswordRecord {
        id: now.timestamp_millis().to_string(),
        password: password.to_string(),
        type_label: kind.label().to_string(),
        length,
        date: now.format(constants::DISPLAY_DATE_FORMAT).to_string(),
        time: now.format(constants::DISPLAY_TIME_FORMAT).to_string(),
        timestamp: now.timestamp_millis(),
    }
}

/// Prepends `record` to `history` and keeps only the
/// [`crate::constants::HISTORY_LIMIT`] most recent records.
///
/// This is the caller-side truncation the store itself does not perform.
pub fn remember(record: PasswordRecord, history: &[PasswordRecord]) -> Vec<PasswordRecord> {
    let mut updated = Vec::with_capacity(history.len() + 1);
    updated.push(record);
    updated.extend_from_slice(history);
    updated.truncate(constants::HISTORY_LIMIT);
    updated
}

/// The generator's persisted knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorSettings {
    /// Which alphabet to draw from.
    #[serde(default = "default_password_kind")]
    pub password_type: PasswordKind,
    /// How many characters to draw.
    #[serde(default = "default_password_length")]
    pub password_length: u32,
}

fn default_password_kind() -> PasswordKind {
    PasswordKind::Numbers
}

fn default_password_length() -> u32 {
    constants::DEFAULT_PASSWORD_LENGTH
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        GeneratorSettings {
            password_type: default_password_kind(),
            password_length: default_password_length(),
        }
    }
}

/// Persists the password history and generator settings.
///
/// # Examples
///
/// ```
/// use diario::keygen::{
///     create_password_entry, generate_password, remember, KeygenStore, PasswordKind,
/// };
/// use diario::storage::MemoryBackend;
///
/// let backend = MemoryBackend::new();
/// let store = KeygenStore::new(&backend);
///
/// let settings = store.load_settings();
/// let password = generate_password(settings.password_length as usize, settings.password_type);
/// let record = create_password_entry(&password, settings.password_type, password.len());
///
/// let history = remember(record, &store.load_history());
/// store.save_history(&history)?;
/// assert_eq!(store.load_history().len(), 1);
/// # Ok::<(), diario::errors::AppError>(())
/// ```
pub struct KeygenStore<'a, B: StorageBackend> {
    backend: &'a B,
}

impl<'a, B: StorageBackend> KeygenStore<'a, B> {
    /// Creates a store over the given backend.
    pub fn new(backend: &'a B) -> Self {
        KeygenStore { backend }
    }

    /// The stored history, most recent first as persisted.
    ///
    /// Fails soft: missing key, corrupt document or backend failure all
    /// yield an empty list.
    pub fn load_history(&self) -> Vec<PasswordRecord> {
        match self.try_load_history() {
            Ok(history) => history,
            Err(err) => {
                warn!("Failed to load password history: {}", err);
                Vec::new()
            }
        }
    }

    /// Persists the full history, replacing the stored document.
    ///
    /// Unlike the loads this propagates failure: a lost write is worth a
    /// message to the user.
    pub fn save_history(&self, history: &[PasswordRecord]) -> AppResult<()> {
        let json = serde_json::to_string(history).map_err(StorageError::Serialization)?;
        self.backend.set(constants::KEYGEN_HISTORY_KEY, &json)
    }

    /// The stored settings, or the defaults (`numbers`, length 6) when
    /// missing, corrupt or unreadable.
    pub fn load_settings(&self) -> GeneratorSettings {
        match self.try_load_settings() {
            Ok(settings) => settings,
            Err(err) => {
                warn!("Failed to load generator settings: {}", err);
                GeneratorSettings::default()
            }
        }
    }

    /// Persists the settings, replacing the stored document.
    pub fn save_settings(&self, settings: &GeneratorSettings) -> AppResult<()> {
        let json = serde_json::to_string(settings).map_err(StorageError::Serialization)?;
        self.backend.set(constants::KEYGEN_SETTINGS_KEY, &json)
    }

    /// Removes both stored documents.
    pub fn clear_all(&self) -> AppResult<()> {
        self.backend.remove(constants::KEYGEN_HISTORY_KEY)?;
        self.backend.remove(constants::KEYGEN_SETTINGS_KEY)
    }

    fn try_load_history(&self) -> AppResult<Vec<PasswordRecord>> {
        match self.backend.get(constants::KEYGEN_HISTORY_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json).map_err(StorageError::Serialization)?),
            None => Ok(Vec::new()),
        }
    }

    fn try_load_settings(&self) -> AppResult<GeneratorSettings> {
        match self.backend.get(constants::KEYGEN_SETTINGS_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json).map_err(StorageError::Serialization)?),
            None => Ok(GeneratorSettings::default()),
        }
    }
}
