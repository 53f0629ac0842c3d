//! # assethub-entity
//!
//! Domain entity models for AssetHub. Every struct in this crate is either
//! a database row, a write payload, or a listing query. Row types derive
//! `sqlx::FromRow`.

pub mod directory;
pub mod file;
pub mod ordering;

pub use directory::{CreateDirectory, Directory, DirectoryQuery, DirectorySort};
pub use file::{CreateFile, File, FileQuery, FileSort, ReviseFile};
pub use ordering::{ListOrder, SortKey};

/// Longest accepted directory or file name, in characters.
pub const MAX_NAME_LEN: usize = 255;

/// Trim a user-supplied name and check it against the naming rules.
///
/// Returns the trimmed name, or a description of what is wrong with it.
pub fn normalize_name(raw: &str) -> Result<String, &'static str> {
    let name = raw.trim();
    if name.is_empty() {
        return Err("name cannot be empty");
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err("name is longer than 255 characters");
    }
    if name.contains('/') || name.contains('\0') {
        return Err("name cannot contain '/' or NUL");
    }
    Ok(name.to_string())
}
