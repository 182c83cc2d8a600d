//! The stored access PIN.
//!
//! One PIN gates the diary view. It is stored verbatim and compared with
//! plain string equality: no hashing, no normalization, no constant-time
//! comparison. That is a known weak point carried over deliberately - a
//! silently hashed replacement would stop verifying against PINs already
//! on disk. Treat the PIN as a convenience latch, not a security boundary.

use crate::constants;
use crate::storage::StorageBackend;
use tracing::warn;

/// Owns the single stored PIN.
///
/// # Examples
///
/// ```
/// use diario::diary::CredentialGate;
/// use diario::storage::MemoryBackend;
///
/// let backend = MemoryBackend::new();
/// let gate = CredentialGate::new(&backend);
///
/// assert!(!gate.has_pin());
/// assert!(!gate.verify_pin("1234"));
///
/// assert!(gate.set_pin("1234"));
/// assert!(gate.verify_pin("1234"));
/// assert!(!gate.verify_pin("4321"));
/// ```
pub struct CredentialGate<'a, B: StorageBackend> {
    backend: &'a B,
}

impl<'a, B: StorageBackend> CredentialGate<'a, B> {
    /// Creates a gate over the given backend.
    pub fn new(backend: &'a B) -> Self {
        CredentialGate { backend }
    }

    /// Stores `pin` verbatim, replacing any previous value.
    ///
    /// Returns `false` only when the backend write fails.
    pub fn set_pin(&self, pin: &str) -> bool {
        match self.backend.set(constants::PASSWORD_KEY, pin) {
            Ok(()) => true,
            Err(err) => {
                warn!("Failed to store PIN: {}", err);
                false
            }
        }
    }

    /// The stored PIN, or `None` when unset or the backend fails.
    pub fn pin(&self) -> Option<String> {
        match self.backend.get(constants::PASSWORD_KEY) {
            Ok(value) => value,
            Err(err) => {
                warn!("Failed to read PIN: {}", err);
                None
            }
        }
    }

    /// Whether a non-empty PIN has been stored.
    ///
    /// This is the first-run check: no PIN sends the caller to the
    /// set-a-PIN flow, an existing one to the login flow. An empty stored
    /// string counts as "no PIN".
    pub fn has_pin(&self) -> bool {
        self.pin().is_some_and(|pin| !pin.is_empty())
    }

    /// Whether `candidate` exactly equals the stored PIN.
    ///
    /// Always `false` against an absent credential, whatever the
    /// candidate.
    pub fn verify_pin(&self, candidate: &str) -> bool {
        match self.pin() {
            Some(stored) => stored == candidate,
            None => false,
        }
    }
}
