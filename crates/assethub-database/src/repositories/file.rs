//! File version chain repository implementation.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{debug, warn};

use assethub_core::error::AppError;
use assethub_core::result::AppResult;
use assethub_core::types::filter::ScopeFilter;
use assethub_core::types::id::FileId;
use assethub_entity::file::{CreateFile, File, FileQuery, ReviseFile};

use super::{contains_pattern, read_error, write_error};
use crate::store::FileStore;

/// Repository for file records and their version chains.
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileStore for FileRepository {
    async fn find_by_id(&self, id: FileId) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(read_error("Failed to find file"))
    }

    async fn find_successors(&self, id: FileId) -> AppResult<Vec<File>> {
        // Two rows are enough to tell a branch from a healthy link.
        sqlx::query_as::<_, File>(
            "SELECT * FROM files WHERE previous_version_id = $1 ORDER BY created_at ASC LIMIT 2",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(read_error("Failed to find successor versions"))
    }

    async fn list(&self, query: &FileQuery) -> AppResult<Vec<File>> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT * FROM files WHERE project_id = ");
        qb.push_bind(query.project_id);

        match query.directory {
            ScopeFilter::Any => {}
            ScopeFilter::Unset => {
                qb.push(" AND directory_id IS NULL");
            }
            ScopeFilter::Is(directory_id) => {
                qb.push(" AND directory_id = ");
                qb.push_bind(directory_id);
            }
        }

        if query.latest_only {
            qb.push(" AND is_latest");
        }

        if let Some(term) = &query.search {
            qb.push(" AND name ILIKE ");
            qb.push_bind(contains_pattern(term));
        }

        qb.push(" ORDER BY ");
        qb.push(query.order.to_sql());

        qb.build_query_as::<File>()
            .fetch_all(&self.pool)
            .await
            .map_err(read_error("Failed to list files"))
    }

    async fn create_root(&self, data: &CreateFile) -> AppResult<File> {
        let id = FileId::new();
        sqlx::query_as::<_, File>(
            "INSERT INTO files (id, name, project_id, directory_id, size_bytes, content_ref, \
             mime_type, is_latest, previous_version_id, chain_id, version_number, uploaded_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, TRUE, NULL, $1, 1, $8) RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(data.project_id)
        .bind(data.directory_id)
        .bind(data.size_bytes)
        .bind(&data.content_ref)
        .bind(&data.mime_type)
        .bind(data.uploaded_by)
        .fetch_one(&self.pool)
        .await
        .map_err(write_error("Failed to create file"))
    }

    async fn append_revision(&self, data: &ReviseFile) -> AppResult<File> {
        let previous_id = data.previous_version_id;
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(read_error("Failed to begin transaction"))?;

        // Conditional demote. The row lock makes a concurrent reviser of the
        // same predecessor wait, then see `is_latest = FALSE` and match nothing.
        let demoted = sqlx::query_as::<_, File>(
            "UPDATE files SET is_latest = FALSE WHERE id = $1 AND is_latest RETURNING *",
        )
        .bind(previous_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(write_error("Failed to demote previous version"))?;

        let Some(previous) = demoted else {
            let exists: Option<bool> =
                sqlx::query_scalar("SELECT is_latest FROM files WHERE id = $1")
                    .bind(previous_id)
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(read_error("Failed to find previous version"))?;

            return Err(match exists {
                None => AppError::not_found(format!("File {previous_id} not found")),
                Some(_) => {
                    warn!(file_id = %previous_id, "Revision rejected: predecessor is no longer latest");
                    AppError::conflict(format!(
                        "File {previous_id} is no longer the latest version of its chain"
                    ))
                }
            });
        };

        let revision = sqlx::query_as::<_, File>(
            "INSERT INTO files (id, name, project_id, directory_id, size_bytes, content_ref, \
             mime_type, is_latest, previous_version_id, chain_id, version_number, uploaded_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, TRUE, $8, $9, $10, $11) RETURNING *",
        )
        .bind(FileId::new())
        .bind(data.name.as_deref().unwrap_or(&previous.name))
        .bind(previous.project_id)
        .bind(previous.directory_id)
        .bind(data.size_bytes)
        .bind(&data.content_ref)
        .bind(&data.mime_type)
        .bind(previous.id)
        .bind(previous.chain_id)
        .bind(previous.version_number + 1)
        .bind(data.uploaded_by)
        .fetch_one(&mut *tx)
        .await
        .map_err(write_error("Failed to insert revision"))?;

        tx.commit()
            .await
            .map_err(write_error("Failed to commit revision"))?;

        debug!(
            chain_id = %revision.chain_id,
            version = revision.version_number,
            "Chain advanced"
        );

        Ok(revision)
    }

    async fn delete_chain(&self, chain_id: FileId) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM files WHERE chain_id = $1")
            .bind(chain_id)
            .execute(&self.pool)
            .await
            .map_err(write_error("Failed to delete file chain"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("File chain {chain_id} not found")));
        }
        Ok(result.rows_affected())
    }
}
