//! PostgreSQL repository implementations of the store traits.

pub mod directory;
pub mod file;

pub use directory::DirectoryRepository;
pub use file::FileRepository;

use assethub_core::error::{AppError, ErrorKind};

/// Wrap a failed read.
pub(crate) fn read_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Database, context, e)
}

/// Map a failed write, turning constraint violations into domain errors.
///
/// Unique violations on the chain indexes mean a concurrent revision won
/// the race. Foreign-key violations mean a referenced directory or
/// predecessor vanished or sits in another project.
pub(crate) fn write_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| {
        if let sqlx::Error::Database(ref db_err) = e {
            match db_err.kind() {
                sqlx::error::ErrorKind::UniqueViolation => {
                    return AppError::conflict(format!(
                        "{context}: concurrent modification ({})",
                        db_err.constraint().unwrap_or("unique constraint")
                    ));
                }
                sqlx::error::ErrorKind::ForeignKeyViolation => {
                    return AppError::validation(format!(
                        "{context}: referenced directory is missing or belongs to another project"
                    ));
                }
                sqlx::error::ErrorKind::CheckViolation => {
                    return AppError::validation(format!(
                        "{context}: {} violated",
                        db_err.constraint().unwrap_or("check constraint")
                    ));
                }
                _ => {}
            }
        }
        AppError::with_source(ErrorKind::Database, context, e)
    }
}

/// Build an `ILIKE` pattern matching `term` as a literal substring.
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}
