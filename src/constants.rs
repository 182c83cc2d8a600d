//! Constants used throughout the application.
//!
//! This module contains all constants used in the diario crate, organized
//! into logical groups. Having constants centralized makes them easier to
//! find, modify, and reference consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "diario";

// Storage Keys
/// Key under which the access PIN is stored.
pub const PASSWORD_KEY: &str = "@diary_password";
/// Key under which the diary entry collection is stored (JSON array).
pub const ENTRIES_KEY: &str = "@diary_entries";
/// Key under which the generated-password history is stored (JSON array).
pub const KEYGEN_HISTORY_KEY: &str = "@KeyGen:passwords";
/// Key under which the password-generator settings are stored (JSON object).
pub const KEYGEN_SETTINGS_KEY: &str = "@KeyGen:settings";

// Configuration Keys & Environment Variables
/// Environment variable for specifying the diario data directory.
pub const ENV_VAR_DIARIO_DIR: &str = "DIARIO_DIR";
/// Standard environment variable for the user's home directory.
pub const ENV_VAR_HOME: &str = "HOME";
/// Default sub-directory name for the data directory within the user's home.
pub const DEFAULT_DATA_SUBDIR: &str = ".diario";

// File System Parameters
/// File name of the key-value store database inside the data directory.
pub const DB_FILE_NAME: &str = "diario.db";
/// Default POSIX permissions for the data directory (owner read/write/execute).
#[cfg(unix)]
pub const DEFAULT_DIR_PERMISSIONS: u32 = 0o700;

// Date/Time Logic
/// Display format for entry dates (`DD/MM/YYYY`).
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";
/// Display format for record times (`HH:MM:SS`).
pub const DISPLAY_TIME_FORMAT: &str = "%H:%M:%S";
/// Month names as shown in the calendar header.
pub const MONTHS: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];
/// Weekday abbreviations for the calendar grid, Sunday first.
pub const DAYS_OF_WEEK: [&str; 7] = ["Dom", "Seg", "Ter", "Qua", "Qui", "Sex", "Sáb"];

// Entry Palette
/// Background color tags an entry may carry.
pub const ENTRY_COLORS: [&str; 5] = ["pink", "blue", "green", "lavender", "peach"];
/// Color assigned to entries created without an explicit color.
pub const DEFAULT_ENTRY_COLOR: &str = "pink";

// Password Generator
/// How many generated passwords callers keep in the history.
pub const HISTORY_LIMIT: usize = 5;
/// Default generated-password length when no settings are stored.
pub const DEFAULT_PASSWORD_LENGTH: u32 = 6;
/// Digits alphabet.
pub const NUMBER_CHARS: &str = "0123456789";
/// Upper- and lowercase letters alphabet.
pub const LETTER_CHARS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
/// Letters and digits alphabet.
pub const MIXED_CHARS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
/// Letters, digits and symbols alphabet.
pub const COMPLETE_CHARS: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*";
