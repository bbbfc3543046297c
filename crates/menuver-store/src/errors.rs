//! Error helpers for menuver-store
//!
//! Every store failure is an `ExError` so callers see one error type across
//! crate boundaries.

use menuver_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration_checksum")
        .with_message(format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ))
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// A stored row holds a value the domain model cannot represent
pub fn corrupt_row(table: &str, id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("hydrate")
        .with_entity_id(id)
        .with_message(format!("Corrupt row in {}: {}", table, reason))
}

/// Create a not-found error for a version id
pub fn version_not_found(version_id: &str) -> ExError {
    ExError::new(ExErrorKind::NotFound)
        .with_version_id(version_id)
        .with_message(format!("Version not found: {}", version_id))
}
