//! Error handling utilities for repositories

use reactions_core::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Validate a SQL identifier before interpolating it into a statement
///
/// Aggregate column and table names are built from compile-time `Reactable`
/// constants and configured reaction types, but they still pass through
/// string formatting, so reject anything that is not a plain identifier.
pub fn ensure_identifier(ident: &str) -> Result<(), DomainError> {
    let mut chars = ident.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(DomainError::ValidationError(format!(
            "invalid SQL identifier: {ident:?}"
        )))
    }
}
