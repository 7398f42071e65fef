//! Folder repository implementation.

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

use folio_core::error::{AppError, ErrorKind};
use folio_core::result::AppResult;
use folio_entity::folder::{CreateFolder, Folder, UpdateFolder};

/// Repository for folder CRUD and hierarchy queries.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    pool: SqlitePool,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// The pool this repository reads from.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Find a folder by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    /// List root folders, newest first, capped at `limit`.
    pub async fn find_roots(&self, limit: u32) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders WHERE parent_id IS NULL \
             ORDER BY created_at DESC, id DESC LIMIT ?1",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list root folders", e))
    }

    /// List direct children of a folder, newest first.
    pub async fn find_children(&self, parent_id: i64) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders WHERE parent_id = ?1 ORDER BY created_at DESC, id DESC",
        )
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list children", e))
    }

    /// List direct children of several folders at once, newest first.
    pub async fn find_children_of(&self, parent_ids: &[i64]) -> AppResult<Vec<Folder>> {
        if parent_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT * FROM folders WHERE parent_id IN (");
        let mut separated = query.separated(", ");
        for id in parent_ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(") ORDER BY created_at DESC, id DESC");

        query
            .build_query_as::<Folder>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list children", e))
    }

    /// Every slug equal to `base` or of the form `base-<suffix>`.
    ///
    /// `exclude_id` leaves one folder out, so a folder being renamed does not
    /// collide with itself.
    pub async fn find_slugs_with_base(
        &self,
        base: &str,
        exclude_id: Option<i64>,
    ) -> AppResult<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            "SELECT slug FROM folders \
             WHERE (slug = ?1 OR substr(slug, 1, length(?1) + 1) = ?1 || '-') \
             AND (?2 IS NULL OR id != ?2)",
        )
        .bind(base)
        .bind(exclude_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to look up slugs", e))
    }

    /// Count all folders.
    pub async fn count(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM folders")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count folders", e))?;
        Ok(count as u64)
    }

    /// Insert a new folder.
    pub async fn create(
        &self,
        conn: &mut SqliteConnection,
        data: &CreateFolder,
    ) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "INSERT INTO folders (name, slug, parent_id, parent_folder, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.slug)
        .bind(data.parent_id)
        .bind(&data.parent_folder)
        .bind(Utc::now())
        .fetch_one(conn)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::validation("The selected parent folder does not exist")
            }
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::conflict(format!("The slug '{}' is already taken", data.slug))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create folder", e),
        })
    }

    /// Change a folder's name, slug and location.
    pub async fn update(
        &self,
        conn: &mut SqliteConnection,
        folder_id: i64,
        data: &UpdateFolder,
    ) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "UPDATE folders SET name = ?2, slug = ?3, parent_id = ?4, parent_folder = ?5 \
             WHERE id = ?1 RETURNING *",
        )
        .bind(folder_id)
        .bind(&data.name)
        .bind(&data.slug)
        .bind(data.parent_id)
        .bind(&data.parent_folder)
        .fetch_optional(conn)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::conflict(format!("The slug '{}' is already taken", data.slug))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to update folder", e),
        })?
        .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))
    }

    /// Rewrite the stored parent path of every folder below `old_path`.
    pub async fn rebase_descendants(
        &self,
        conn: &mut SqliteConnection,
        old_path: &str,
        new_path: &str,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE folders SET parent_folder = ?2 || substr(parent_folder, length(?1) + 1) \
             WHERE parent_folder = ?1 OR substr(parent_folder, 1, length(?1) + 1) = ?1 || '/'",
        )
        .bind(old_path)
        .bind(new_path)
        .execute(conn)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update child paths", e)
        })?;
        Ok(result.rows_affected())
    }

    /// Delete folders by ID (cascades to children and files).
    pub async fn delete_many(&self, conn: &mut SqliteConnection, ids: &[i64]) -> AppResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new("DELETE FROM folders WHERE id IN (");
        let mut separated = query.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        let result = query.build().execute(conn).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to delete folders", e)
        })?;
        Ok(result.rows_affected())
    }
}
