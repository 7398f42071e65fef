//! File repository implementation.

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

use folio_core::error::{AppError, ErrorKind};
use folio_core::result::AppResult;
use folio_entity::file::{CreateFile, File};

/// Repository for file records.
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: SqlitePool,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// The pool this repository reads from.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Find a file by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    /// Files directly inside a folder, newest first.
    pub async fn find_by_folder(&self, folder_id: i64) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>(
            "SELECT * FROM files WHERE folder_id = ?1 ORDER BY created_at DESC, id DESC",
        )
        .bind(folder_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list files", e))
    }

    /// Files directly inside any of the given folders, newest first.
    pub async fn find_by_folders(&self, folder_ids: &[i64]) -> AppResult<Vec<File>> {
        if folder_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT * FROM files WHERE folder_id IN (");
        let mut separated = query.separated(", ");
        for id in folder_ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(") ORDER BY created_at DESC, id DESC");

        query
            .build_query_as::<File>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list files", e))
    }

    /// Count all files.
    pub async fn count(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM files")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count files", e))?;
        Ok(count as u64)
    }

    /// Insert a new file record.
    pub async fn create(&self, conn: &mut SqliteConnection, data: &CreateFile) -> AppResult<File> {
        sqlx::query_as::<_, File>(
            "INSERT INTO files (name, slug, mime_type, url, path, size, folder_id, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.slug)
        .bind(&data.mime_type)
        .bind(&data.url)
        .bind(&data.path)
        .bind(data.size)
        .bind(data.folder_id)
        .bind(Utc::now())
        .fetch_one(conn)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::validation("The selected folder does not exist")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create file", e),
        })
    }

    /// Delete a file record. Returns whether a row was removed.
    pub async fn delete(&self, conn: &mut SqliteConnection, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM files WHERE id = ?1")
            .bind(id)
            .execute(conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete file", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Move every file stored below `old_prefix` to `new_prefix`.
    ///
    /// The URL keeps whatever precedes the stored path and takes the new path
    /// as its tail.
    pub async fn rebase_paths(
        &self,
        conn: &mut SqliteConnection,
        old_prefix: &str,
        new_prefix: &str,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE files SET \
               url = substr(url, 1, length(url) - length(path)) \
                     || ?2 || substr(path, length(?1) + 1), \
               path = ?2 || substr(path, length(?1) + 1) \
             WHERE substr(path, 1, length(?1) + 1) = ?1 || '/'",
        )
        .bind(old_prefix)
        .bind(new_prefix)
        .execute(conn)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update file paths", e))?;
        Ok(result.rows_affected())
    }
}
