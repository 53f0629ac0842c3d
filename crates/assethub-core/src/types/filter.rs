//! Scope filters for listing queries.
//!
//! A listing parameter such as `parent` or `directory` has three states:
//! omitted entirely, the literal sentinel `"null"` meaning "explicitly
//! unset", or a concrete identifier. [`ScopeFilter`] keeps them apart.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

/// Literal query value meaning "no parent / no directory".
pub const NULL_SENTINEL: &str = "null";

/// Three-state filter on a nullable reference column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum ScopeFilter<T> {
    /// No filtering on this column.
    Any,
    /// Only rows where the column is unset.
    Unset,
    /// Only rows where the column equals the given value.
    Is(T),
}

impl<T> Default for ScopeFilter<T> {
    fn default() -> Self {
        Self::Any
    }
}

impl<T> ScopeFilter<T>
where
    T: FromStr,
{
    /// Parse a raw query parameter.
    ///
    /// `None` or a blank value → [`ScopeFilter::Any`], `"null"` →
    /// [`ScopeFilter::Unset`], anything else must parse as `T`.
    pub fn parse(field: &str, raw: Option<&str>) -> AppResult<Self> {
        match raw.map(str::trim).filter(|value| !value.is_empty()) {
            None => Ok(Self::Any),
            Some(NULL_SENTINEL) => Ok(Self::Unset),
            Some(value) => value.parse::<T>().map(Self::Is).map_err(|_| {
                AppError::validation(format!(
                    "Invalid {field}: expected an identifier or '{NULL_SENTINEL}'"
                ))
            }),
        }
    }
}

impl<T: PartialEq> ScopeFilter<T> {
    /// Check whether a nullable column value passes this filter.
    pub fn matches(&self, value: Option<&T>) -> bool {
        match self {
            Self::Any => true,
            Self::Unset => value.is_none(),
            Self::Is(expected) => value == Some(expected),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::id::DirectoryId;

    #[test]
    fn test_parse_three_states() {
        let id = DirectoryId::new();
        let raw = id.to_string();

        assert_eq!(
            ScopeFilter::<DirectoryId>::parse("parent", None).unwrap(),
            ScopeFilter::Any
        );
        assert_eq!(
            ScopeFilter::<DirectoryId>::parse("parent", Some("null")).unwrap(),
            ScopeFilter::Unset
        );
        assert_eq!(
            ScopeFilter::<DirectoryId>::parse("parent", Some(&raw)).unwrap(),
            ScopeFilter::Is(id)
        );
    }

    #[test]
    fn test_blank_value_means_no_filter() {
        for raw in ["", "   "] {
            assert_eq!(
                ScopeFilter::<DirectoryId>::parse("parent", Some(raw)).unwrap(),
                ScopeFilter::Any
            );
        }
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = ScopeFilter::<DirectoryId>::parse("parent", Some("NULL")).unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Validation);
    }

    #[test]
    fn test_matches() {
        let id = DirectoryId::new();
        let other = DirectoryId::new();

        assert!(ScopeFilter::Any.matches(Some(&id)));
        assert!(ScopeFilter::<DirectoryId>::Any.matches(None));
        assert!(ScopeFilter::<DirectoryId>::Unset.matches(None));
        assert!(!ScopeFilter::Unset.matches(Some(&id)));
        assert!(ScopeFilter::Is(id).matches(Some(&id)));
        assert!(!ScopeFilter::Is(id).matches(Some(&other)));
        assert!(!ScopeFilter::Is(id).matches(None));
    }
}
