//! Directory listing query.

use std::cmp::Ordering;

use assethub_core::types::filter::ScopeFilter;
use assethub_core::types::id::{DirectoryId, ProjectId};

use super::model::Directory;
use crate::ordering::{ListOrder, SortKey};

/// Columns directories can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectorySort {
    /// Alphabetical by name.
    Name,
    /// By creation time.
    CreatedAt,
}

impl SortKey for DirectorySort {
    fn from_field(field: &str) -> Option<Self> {
        match field {
            "name" => Some(Self::Name),
            "created_at" => Some(Self::CreatedAt),
            _ => None,
        }
    }

    fn column(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::CreatedAt => "created_at",
        }
    }

    fn default_key() -> Self {
        Self::Name
    }
}

/// Scoping parameters for `list_directories`.
#[derive(Debug, Clone)]
pub struct DirectoryQuery {
    /// Project scope. Always required.
    pub project_id: ProjectId,
    /// Parent filter: any depth, top-level only, or direct children of one parent.
    pub parent: ScopeFilter<DirectoryId>,
    /// Case-insensitive substring match on name.
    pub search: Option<String>,
    /// Result ordering.
    pub order: ListOrder<DirectorySort>,
}

impl DirectoryQuery {
    /// All directories of a project, at every depth.
    pub fn in_project(project_id: ProjectId) -> Self {
        Self {
            project_id,
            parent: ScopeFilter::Any,
            search: None,
            order: ListOrder::default(),
        }
    }

    /// Restrict to the given parent filter.
    pub fn with_parent(mut self, parent: ScopeFilter<DirectoryId>) -> Self {
        self.parent = parent;
        self
    }

    /// Restrict to names containing `term`.
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Check whether a directory satisfies every filter of this query.
    pub fn matches(&self, dir: &Directory) -> bool {
        dir.project_id == self.project_id
            && self.parent.matches(dir.parent_id.as_ref())
            && self.search.as_deref().is_none_or(|term| {
                dir.name.to_lowercase().contains(&term.to_lowercase())
            })
    }

    /// Compare two directories under this query's ordering.
    pub fn compare(&self, a: &Directory, b: &Directory) -> Ordering {
        let primary = match self.order.key {
            DirectorySort::Name => a.name.cmp(&b.name),
            DirectorySort::CreatedAt => a.created_at.cmp(&b.created_at),
        };
        self.order
            .directed(primary)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.id.cmp(&b.id))
    }
}
