//! Directory repository implementation.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;

use assethub_core::error::AppError;
use assethub_core::result::AppResult;
use assethub_core::types::filter::ScopeFilter;
use assethub_core::types::id::DirectoryId;
use assethub_entity::directory::{CreateDirectory, Directory, DirectoryQuery};

use super::{contains_pattern, read_error, write_error};
use crate::store::{DirectoryStore, SubtreeDeletion};

/// Upper bound on tree depth walked by recursive queries.
///
/// Keeps a corrupted (cyclic) tree from looping forever.
const MAX_TREE_DEPTH: i32 = 1024;

/// Repository for directory CRUD and tree queries.
#[derive(Debug, Clone)]
pub struct DirectoryRepository {
    pool: PgPool,
}

impl DirectoryRepository {
    /// Create a new directory repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DirectoryStore for DirectoryRepository {
    async fn find_by_id(&self, id: DirectoryId) -> AppResult<Option<Directory>> {
        sqlx::query_as::<_, Directory>("SELECT * FROM directories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(read_error("Failed to find directory"))
    }

    async fn list(&self, query: &DirectoryQuery) -> AppResult<Vec<Directory>> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT * FROM directories WHERE project_id = ");
        qb.push_bind(query.project_id);

        match query.parent {
            ScopeFilter::Any => {}
            ScopeFilter::Unset => {
                qb.push(" AND parent_id IS NULL");
            }
            ScopeFilter::Is(parent_id) => {
                qb.push(" AND parent_id = ");
                qb.push_bind(parent_id);
            }
        }

        if let Some(term) = &query.search {
            qb.push(" AND name ILIKE ");
            qb.push_bind(contains_pattern(term));
        }

        qb.push(" ORDER BY ");
        qb.push(query.order.to_sql());

        qb.build_query_as::<Directory>()
            .fetch_all(&self.pool)
            .await
            .map_err(read_error("Failed to list directories"))
    }

    async fn ancestor_ids(&self, id: DirectoryId) -> AppResult<Vec<DirectoryId>> {
        sqlx::query_scalar::<_, DirectoryId>(
            "WITH RECURSIVE ancestors AS ( \
                SELECT id, parent_id, 0 AS depth FROM directories WHERE id = $1 \
                UNION ALL \
                SELECT d.id, d.parent_id, a.depth + 1 FROM directories d \
                INNER JOIN ancestors a ON d.id = a.parent_id \
                WHERE a.depth < $2 \
             ) SELECT id FROM ancestors ORDER BY depth ASC",
        )
        .bind(id)
        .bind(MAX_TREE_DEPTH)
        .fetch_all(&self.pool)
        .await
        .map_err(read_error("Failed to find ancestors"))
    }

    async fn create(&self, data: &CreateDirectory) -> AppResult<Directory> {
        sqlx::query_as::<_, Directory>(
            "INSERT INTO directories (id, name, project_id, parent_id, created_by) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(DirectoryId::new())
        .bind(&data.name)
        .bind(data.project_id)
        .bind(data.parent_id)
        .bind(data.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(write_error("Failed to create directory"))
    }

    async fn reparent(
        &self,
        id: DirectoryId,
        parent_id: Option<DirectoryId>,
    ) -> AppResult<Directory> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(read_error("Failed to begin transaction"))?;

        let dir = sqlx::query_as::<_, Directory>("SELECT * FROM directories WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(read_error("Failed to lock directory"))?
            .ok_or_else(|| AppError::not_found(format!("Directory {id} not found")))?;

        // Serialize tree moves per project so two moves cannot close a cycle together.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1::text))")
            .bind(dir.project_id)
            .execute(&mut *tx)
            .await
            .map_err(read_error("Failed to lock project tree"))?;

        if let Some(parent_id) = parent_id {
            let ancestry: Vec<DirectoryId> = sqlx::query_scalar(
                "WITH RECURSIVE ancestors AS ( \
                    SELECT id, parent_id, project_id, 0 AS depth FROM directories WHERE id = $1 \
                    UNION ALL \
                    SELECT d.id, d.parent_id, d.project_id, a.depth + 1 FROM directories d \
                    INNER JOIN ancestors a ON d.id = a.parent_id \
                    WHERE a.depth < $3 \
                 ) SELECT id FROM ancestors WHERE project_id = $2 ORDER BY depth ASC",
            )
            .bind(parent_id)
            .bind(dir.project_id)
            .bind(MAX_TREE_DEPTH)
            .fetch_all(&mut *tx)
            .await
            .map_err(read_error("Failed to check ancestry"))?;

            if ancestry.first() != Some(&parent_id) {
                return Err(AppError::validation(format!(
                    "Parent directory {parent_id} does not exist in project {}",
                    dir.project_id
                )));
            }
            if ancestry.contains(&id) {
                return Err(AppError::validation(
                    "Cannot move a directory into itself or one of its descendants",
                ));
            }
        }

        let moved = sqlx::query_as::<_, Directory>(
            "UPDATE directories SET parent_id = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(parent_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(write_error("Failed to move directory"))?;

        tx.commit()
            .await
            .map_err(write_error("Failed to commit directory move"))?;

        Ok(moved)
    }

    async fn delete_subtree(&self, id: DirectoryId) -> AppResult<SubtreeDeletion> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(read_error("Failed to begin transaction"))?;

        let (directories, files): (i64, i64) = sqlx::query_as(
            "WITH RECURSIVE subtree AS ( \
                SELECT id, 0 AS depth FROM directories WHERE id = $1 \
                UNION ALL \
                SELECT d.id, s.depth + 1 FROM directories d \
                INNER JOIN subtree s ON d.parent_id = s.id \
                WHERE s.depth < $2 \
             ) SELECT \
                (SELECT COUNT(*) FROM subtree), \
                (SELECT COUNT(*) FROM files WHERE directory_id IN (SELECT id FROM subtree))",
        )
        .bind(id)
        .bind(MAX_TREE_DEPTH)
        .fetch_one(&mut *tx)
        .await
        .map_err(read_error("Failed to measure subtree"))?;

        // Descendants and their files go through ON DELETE CASCADE in the same statement.
        let result = sqlx::query("DELETE FROM directories WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(write_error("Failed to delete directory"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Directory {id} not found")));
        }

        tx.commit()
            .await
            .map_err(write_error("Failed to commit directory deletion"))?;

        debug!(directory_id = %id, directories, files, "Subtree deleted");

        Ok(SubtreeDeletion {
            directories: directories as u64,
            files: files as u64,
        })
    }
}
