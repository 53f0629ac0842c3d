//! File listing query.

use std::cmp::Ordering;

use assethub_core::types::filter::ScopeFilter;
use assethub_core::types::id::{DirectoryId, ProjectId};

use super::model::File;
use crate::ordering::{ListOrder, SortKey};

/// Columns files can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSort {
    /// Alphabetical by name.
    Name,
    /// By creation time.
    CreatedAt,
    /// By payload size.
    Size,
}

impl SortKey for FileSort {
    fn from_field(field: &str) -> Option<Self> {
        match field {
            "name" => Some(Self::Name),
            "created_at" => Some(Self::CreatedAt),
            "size" => Some(Self::Size),
            _ => None,
        }
    }

    fn column(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::CreatedAt => "created_at",
            Self::Size => "size_bytes",
        }
    }

    fn default_key() -> Self {
        Self::Name
    }
}

/// Scoping parameters for `list_files`.
#[derive(Debug, Clone)]
pub struct FileQuery {
    /// Project scope. Always required.
    pub project_id: ProjectId,
    /// Directory filter: anywhere, project root only, or one directory.
    pub directory: ScopeFilter<DirectoryId>,
    /// Only the current version of each chain.
    pub latest_only: bool,
    /// Case-insensitive substring match on name.
    pub search: Option<String>,
    /// Result ordering.
    pub order: ListOrder<FileSort>,
}

impl FileQuery {
    /// Latest versions of every file in a project.
    pub fn in_project(project_id: ProjectId) -> Self {
        Self {
            project_id,
            directory: ScopeFilter::Any,
            latest_only: true,
            search: None,
            order: ListOrder::default(),
        }
    }

    /// Restrict to the given directory filter.
    pub fn with_directory(mut self, directory: ScopeFilter<DirectoryId>) -> Self {
        self.directory = directory;
        self
    }

    /// Include or exclude superseded versions.
    pub fn latest_only(mut self, latest_only: bool) -> Self {
        self.latest_only = latest_only;
        self
    }

    /// Restrict to names containing `term`.
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Check whether a file satisfies every filter of this query.
    pub fn matches(&self, file: &File) -> bool {
        file.project_id == self.project_id
            && self.directory.matches(file.directory_id.as_ref())
            && (!self.latest_only || file.is_latest)
            && self.search.as_deref().is_none_or(|term| {
                file.name.to_lowercase().contains(&term.to_lowercase())
            })
    }

    /// Compare two files under this query's ordering.
    pub fn compare(&self, a: &File, b: &File) -> Ordering {
        let primary = match self.order.key {
            FileSort::Name => a.name.cmp(&b.name),
            FileSort::CreatedAt => a.created_at.cmp(&b.created_at),
            FileSort::Size => a.size_bytes.cmp(&b.size_bytes),
        };
        self.order
            .directed(primary)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.id.cmp(&b.id))
    }
}
