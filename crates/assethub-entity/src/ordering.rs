//! Typed list ordering.
//!
//! Listing endpoints accept `ordering=name` / `ordering=-created_at`. Each
//! entity declares which keys it supports through [`SortKey`]; unknown keys
//! are rejected instead of being interpolated into SQL.

use std::fmt::Debug;

use assethub_core::error::AppError;
use assethub_core::result::AppResult;
use assethub_core::types::sorting::{SortDirection, SortField};

/// A column an entity can be ordered by.
pub trait SortKey: Copy + Debug + PartialEq + Send + Sync + 'static {
    /// Parse a public field name.
    fn from_field(field: &str) -> Option<Self>;

    /// The SQL column this key sorts on.
    fn column(&self) -> &'static str;

    /// The key used when no ordering is requested.
    fn default_key() -> Self;
}

/// A validated ordering for one listing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListOrder<K: SortKey> {
    /// Primary sort key.
    pub key: K,
    /// Direction applied to the primary key.
    pub direction: SortDirection,
}

impl<K: SortKey> Default for ListOrder<K> {
    fn default() -> Self {
        Self {
            key: K::default_key(),
            direction: SortDirection::Asc,
        }
    }
}

impl<K: SortKey> ListOrder<K> {
    /// Parse an optional `ordering` parameter.
    pub fn parse(raw: Option<&str>) -> AppResult<Self> {
        let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
            return Ok(Self::default());
        };
        let sort = SortField::parse(raw);
        let key = K::from_field(&sort.field)
            .ok_or_else(|| AppError::validation(format!("Unsupported ordering '{raw}'")))?;
        Ok(Self {
            key,
            direction: sort.direction,
        })
    }

    /// Render the `ORDER BY` clause body. Ties break on name, created_at, then id.
    pub fn to_sql(&self) -> String {
        format!(
            "{} {}, name ASC, created_at ASC, id ASC",
            self.key.column(),
            self.direction.as_sql()
        )
    }

    /// Apply the direction to an ascending comparison.
    pub fn directed(&self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}
