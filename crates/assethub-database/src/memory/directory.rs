//! [`DirectoryStore`] for [`MemoryStore`].

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use assethub_core::error::AppError;
use assethub_core::result::AppResult;
use assethub_core::types::id::{DirectoryId, ProjectId};
use assethub_entity::directory::{CreateDirectory, Directory, DirectoryQuery};

use super::{InnerState, MemoryStore};
use crate::store::{DirectoryStore, SubtreeDeletion};

impl InnerState {
    /// Walk parent links from `id` upward. Stops if a link repeats.
    fn ancestry(&self, id: DirectoryId) -> Vec<DirectoryId> {
        let mut path = Vec::new();
        let mut seen = HashSet::new();
        let mut cursor = self.directories.get(&id);
        while let Some(dir) = cursor {
            if !seen.insert(dir.id) {
                break;
            }
            path.push(dir.id);
            cursor = dir.parent_id.and_then(|p| self.directories.get(&p));
        }
        path
    }

    /// `id` plus every directory below it.
    fn subtree(&self, id: DirectoryId) -> HashSet<DirectoryId> {
        let mut members = HashSet::from([id]);
        let mut frontier = vec![id];
        while let Some(current) = frontier.pop() {
            for dir in self.directories.values() {
                if dir.parent_id == Some(current) && members.insert(dir.id) {
                    frontier.push(dir.id);
                }
            }
        }
        members
    }

    fn require_parent_in_project(
        &self,
        parent_id: DirectoryId,
        project_id: ProjectId,
    ) -> AppResult<()> {
        let parent = self
            .directories
            .get(&parent_id)
            .ok_or_else(|| AppError::not_found(format!("Parent directory {parent_id} not found")))?;
        if parent.project_id != project_id {
            return Err(AppError::validation(format!(
                "Parent directory {parent_id} belongs to another project"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl DirectoryStore for MemoryStore {
    async fn find_by_id(&self, id: DirectoryId) -> AppResult<Option<Directory>> {
        let state = self.state.read().await;
        Ok(state.directories.get(&id).cloned())
    }

    async fn list(&self, query: &DirectoryQuery) -> AppResult<Vec<Directory>> {
        let state = self.state.read().await;
        let mut dirs: Vec<Directory> = state
            .directories
            .values()
            .filter(|d| query.matches(d))
            .cloned()
            .collect();
        dirs.sort_by(|a, b| query.compare(a, b));
        Ok(dirs)
    }

    async fn ancestor_ids(&self, id: DirectoryId) -> AppResult<Vec<DirectoryId>> {
        let state = self.state.read().await;
        Ok(state.ancestry(id))
    }

    async fn create(&self, data: &CreateDirectory) -> AppResult<Directory> {
        let mut state = self.state.write().await;

        if let Some(parent_id) = data.parent_id {
            state.require_parent_in_project(parent_id, data.project_id)?;
        }

        let dir = Directory {
            id: DirectoryId::new(),
            name: data.name.clone(),
            project_id: data.project_id,
            parent_id: data.parent_id,
            created_by: data.created_by,
            created_at: Utc::now(),
        };
        state.directories.insert(dir.id, dir.clone());
        Ok(dir)
    }

    async fn reparent(
        &self,
        id: DirectoryId,
        parent_id: Option<DirectoryId>,
    ) -> AppResult<Directory> {
        let mut state = self.state.write().await;

        let project_id = state
            .directories
            .get(&id)
            .map(|d| d.project_id)
            .ok_or_else(|| AppError::not_found(format!("Directory {id} not found")))?;

        if let Some(parent_id) = parent_id {
            state.require_parent_in_project(parent_id, project_id)?;
            if state.ancestry(parent_id).contains(&id) {
                return Err(AppError::validation(
                    "Cannot move a directory into itself or one of its descendants",
                ));
            }
        }

        let dir = state
            .directories
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Directory {id} not found")))?;
        dir.parent_id = parent_id;
        Ok(dir.clone())
    }

    async fn delete_subtree(&self, id: DirectoryId) -> AppResult<SubtreeDeletion> {
        let mut state = self.state.write().await;

        if !state.directories.contains_key(&id) {
            return Err(AppError::not_found(format!("Directory {id} not found")));
        }

        let doomed = state.subtree(id);
        let files_before = state.files.len();
        state
            .files
            .retain(|_, f| f.directory_id.is_none_or(|d| !doomed.contains(&d)));
        state.directories.retain(|dir_id, _| !doomed.contains(dir_id));

        let deletion = SubtreeDeletion {
            directories: doomed.len() as u64,
            files: (files_before - state.files.len()) as u64,
        };
        debug!(directory_id = %id, ?deletion, "Subtree deleted");
        Ok(deletion)
    }
}

#[cfg(test)]
mod tests {
    use assethub_core::error::ErrorKind;
    use assethub_core::types::filter::ScopeFilter;
    use assethub_entity::file::CreateFile;

    use super::*;

    fn new_dir(project_id: ProjectId, parent_id: Option<DirectoryId>, name: &str) -> CreateDirectory {
        CreateDirectory {
            name: name.to_string(),
            project_id,
            parent_id,
            created_by: None,
        }
    }

    #[tokio::test]
    async fn test_list_by_parent() {
        let store = MemoryStore::new();
        let project = ProjectId::new();
        let assets = store.create(&new_dir(project, None, "Assets")).await.unwrap();
        let models = store
            .create(&new_dir(project, Some(assets.id), "Models"))
            .await
            .unwrap();

        let top = store
            .list(&DirectoryQuery::in_project(project).with_parent(ScopeFilter::Unset))
            .await
            .unwrap();
        assert_eq!(top, vec![assets.clone()]);

        let children = store
            .list(&DirectoryQuery::in_project(project).with_parent(ScopeFilter::Is(assets.id)))
            .await
            .unwrap();
        assert_eq!(children, vec![models.clone()]);

        let all = store.list(&DirectoryQuery::in_project(project)).await.unwrap();
        assert_eq!(all, vec![assets, models]);
    }

    #[tokio::test]
    async fn test_create_rejects_foreign_parent() {
        let store = MemoryStore::new();
        let other = store
            .create(&new_dir(ProjectId::new(), None, "Elsewhere"))
            .await
            .unwrap();

        let err = store
            .create(&new_dir(ProjectId::new(), Some(other.id), "Child"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = store
            .create(&new_dir(ProjectId::new(), Some(DirectoryId::new()), "Orphan"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_reparent_rejects_cycles() {
        let store = MemoryStore::new();
        let project = ProjectId::new();
        let a = store.create(&new_dir(project, None, "a")).await.unwrap();
        let b = store.create(&new_dir(project, Some(a.id), "b")).await.unwrap();
        let c = store.create(&new_dir(project, Some(b.id), "c")).await.unwrap();

        let err = store.reparent(a.id, Some(c.id)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        let err = store.reparent(a.id, Some(a.id)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let moved = store.reparent(c.id, None).await.unwrap();
        assert!(moved.is_top_level());
        assert_eq!(store.ancestor_ids(b.id).await.unwrap(), vec![b.id, a.id]);
    }

    #[tokio::test]
    async fn test_delete_subtree_takes_files_along() {
        let store = MemoryStore::new();
        let project = ProjectId::new();
        let assets = store.create(&new_dir(project, None, "Assets")).await.unwrap();
        let models = store
            .create(&new_dir(project, Some(assets.id), "Models"))
            .await
            .unwrap();
        let keep = store.create(&new_dir(project, None, "Keep")).await.unwrap();

        let upload = |directory_id| CreateFile {
            name: "cube.obj".to_string(),
            project_id: project,
            directory_id,
            size_bytes: 3,
            content_ref: "blob://cube".to_string(),
            mime_type: None,
            uploaded_by: None,
        };
        crate::store::FileStore::create_root(&store, &upload(Some(models.id))).await.unwrap();
        crate::store::FileStore::create_root(&store, &upload(Some(keep.id))).await.unwrap();
        crate::store::FileStore::create_root(&store, &upload(None)).await.unwrap();

        let deletion = store.delete_subtree(assets.id).await.unwrap();
        assert_eq!(
            deletion,
            SubtreeDeletion {
                directories: 2,
                files: 1
            }
        );
        assert!(store.find_by_id(models.id).await.unwrap().is_none());
        assert!(store.find_by_id(keep.id).await.unwrap().is_some());

        let err = store.delete_subtree(assets.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
