//! Folder CRUD operations kept in lockstep with storage directories.

use std::collections::HashMap;
use std::sync::Arc;

use sqlx::{Sqlite, Transaction};
use tracing::{debug, info, warn};

use folio_core::error::{AppError, ErrorKind};
use folio_core::result::AppResult;
use folio_core::traits::StorageProvider;
use folio_database::connection;
use folio_database::repositories::{FileRepository, FolderRepository};
use folio_entity::folder::{CreateFolder, Folder, UpdateFolder, folder_path, is_same_or_descendant};

use crate::presentation::{FolderResource, ListingItem, Presenter, merge_listing};
use crate::slug::SlugService;

/// Default number of root folders returned by [`FolderService::list`].
pub const DEFAULT_LIST_LIMIT: u32 = 10;
/// Upper bound for the list limit.
pub const MAX_LIST_LIMIT: u32 = 100;
/// Times a write is retried after another request claimed the same slug.
const MAX_SLUG_ATTEMPTS: u32 = 10;

/// Name and location submitted when creating or updating a folder.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct FolderInput {
    /// Folder name.
    pub name: String,
    /// Parent folder ID (None for root-level).
    pub parent_id: Option<i64>,
    /// Path of the parent as known to the caller; checked against the parent.
    pub parent_folder: Option<String>,
}

/// Bulk delete request.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct DeleteFolders {
    /// Directory paths to remove from storage.
    pub folder_names: Vec<String>,
    /// Folder rows to remove.
    pub folder_ids: Vec<i64>,
}

/// Manages folder CRUD operations.
#[derive(Debug, Clone)]
pub struct FolderService {
    /// Folder repository.
    folder_repo: Arc<FolderRepository>,
    /// File repository.
    file_repo: Arc<FileRepository>,
    /// Storage backend holding the directory tree.
    storage: Arc<dyn StorageProvider>,
    /// Slug generation.
    slugs: SlugService,
    /// Response shaping.
    presenter: Arc<Presenter>,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(
        folder_repo: Arc<FolderRepository>,
        file_repo: Arc<FileRepository>,
        storage: Arc<dyn StorageProvider>,
        slugs: SlugService,
        presenter: Arc<Presenter>,
    ) -> Self {
        Self {
            folder_repo,
            file_repo,
            storage,
            slugs,
            presenter,
        }
    }

    /// Lists root folders, newest first, with their direct children and files.
    pub async fn list(&self, limit: Option<u32>) -> AppResult<Vec<FolderResource>> {
        let limit = limit
            .unwrap_or(DEFAULT_LIST_LIMIT)
            .clamp(1, MAX_LIST_LIMIT);

        let roots = self.folder_repo.find_roots(limit).await?;
        let ids: Vec<i64> = roots.iter().map(|f| f.id).collect();

        let mut children: HashMap<i64, Vec<Folder>> = HashMap::new();
        for child in self.folder_repo.find_children_of(&ids).await? {
            if let Some(parent_id) = child.parent_id {
                children.entry(parent_id).or_default().push(child);
            }
        }

        let mut files = HashMap::new();
        for file in self.file_repo.find_by_folders(&ids).await? {
            if let Some(folder_id) = file.folder_id {
                files.entry(folder_id).or_insert_with(Vec::new).push(file);
            }
        }

        Ok(roots
            .iter()
            .map(|root| {
                self.presenter.folder_resource(
                    root,
                    children.get(&root.id).map(Vec::as_slice).unwrap_or_default(),
                    files.get(&root.id).map(Vec::as_slice).unwrap_or_default(),
                )
            })
            .collect())
    }

    /// Gets a folder by ID.
    pub async fn get_folder(&self, folder_id: i64) -> AppResult<Folder> {
        self.folder_repo
            .find_by_id(folder_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))
    }

    /// Creates a folder and its directory.
    pub async fn create(&self, input: FolderInput) -> AppResult<Folder> {
        let name = required_name(&input.name)?;
        let (parent_id, parent_folder) = self
            .resolve_parent(input.parent_id, input.parent_folder.as_deref())
            .await?;

        let mut attempt = 1;
        loop {
            match self.try_create(name, parent_id, parent_folder.clone()).await {
                Err(e) if e.kind == ErrorKind::Conflict && attempt < MAX_SLUG_ATTEMPTS => {
                    debug!(attempt, folder_name = name, error = %e, "Slug taken concurrently, retrying");
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    /// One attempt at inserting the row and creating its directory.
    async fn try_create(
        &self,
        name: &str,
        parent_id: Option<i64>,
        parent_folder: Option<String>,
    ) -> AppResult<Folder> {
        let slug = self.slugs.compute_unique_slug(name, None).await?;
        let path = folder_path(parent_folder.as_deref(), &slug);

        let record = CreateFolder {
            name: name.to_string(),
            slug,
            parent_id,
            parent_folder,
        };

        let mut tx = connection::begin(self.folder_repo.pool()).await?;
        let folder = match self.folder_repo.create(&mut tx, &record).await {
            Ok(folder) => folder,
            Err(e) => return Err(abort(tx, e, "create folder").await),
        };

        if let Err(e) = self.storage.create_dir(&path).await {
            return Err(abort(tx, e, "create folder").await);
        }

        if let Err(e) = connection::commit(tx).await {
            if let Err(cleanup) = self.storage.delete_dir(&path).await {
                warn!(path = %path, error = %cleanup, "Failed to remove directory after commit failure");
            }
            return Err(e);
        }

        info!(folder_id = folder.id, slug = %folder.slug, path = %path, "Folder created");
        Ok(folder)
    }

    /// Lists the direct children and files of a folder, folders first.
    pub async fn show(&self, folder_id: i64) -> AppResult<Vec<ListingItem>> {
        let folder = self.get_folder(folder_id).await?;
        let children = self.folder_repo.find_children(folder.id).await?;
        let files = self.file_repo.find_by_folder(folder.id).await?;

        let mut folder_items = Vec::with_capacity(children.len());
        for child in &children {
            let items = self.storage.all_files(&child.path()).await?.len();
            folder_items.push(self.presenter.folder_item(child, items));
        }
        let file_items = files.iter().map(|f| self.presenter.file_item(f)).collect();

        Ok(merge_listing(folder_items, file_items))
    }

    /// Renames and/or moves a folder together with its directory.
    ///
    /// Descendant folders and files have their stored paths rewritten so they
    /// keep matching the directory tree.
    pub async fn update(&self, folder_id: i64, input: FolderInput) -> AppResult<Folder> {
        let folder = self.get_folder(folder_id).await?;
        let name = required_name(&input.name)?;
        let (parent_id, parent_folder) = self
            .resolve_parent(input.parent_id, input.parent_folder.as_deref())
            .await?;

        let old_path = folder.path();
        if parent_folder
            .as_deref()
            .is_some_and(|target| is_same_or_descendant(target, &old_path))
        {
            return Err(AppError::validation(
                "A folder cannot be moved into itself or one of its descendants",
            ));
        }

        let mut attempt = 1;
        loop {
            match self
                .try_update(&folder, name, parent_id, parent_folder.clone())
                .await
            {
                Err(e) if e.kind == ErrorKind::Conflict && attempt < MAX_SLUG_ATTEMPTS => {
                    debug!(attempt, folder_id, folder_name = name, error = %e, "Slug taken concurrently, retrying");
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    /// One attempt at rewriting the row, its descendants and its directory.
    async fn try_update(
        &self,
        folder: &Folder,
        name: &str,
        parent_id: Option<i64>,
        parent_folder: Option<String>,
    ) -> AppResult<Folder> {
        let old_path = folder.path();
        let slug = self.slugs.compute_unique_slug(name, Some(folder.id)).await?;
        let new_path = folder_path(parent_folder.as_deref(), &slug);
        let moved = old_path != new_path;

        let record = UpdateFolder {
            name: name.to_string(),
            slug,
            parent_id,
            parent_folder,
        };

        let mut tx = connection::begin(self.folder_repo.pool()).await?;
        let updated = match self.folder_repo.update(&mut tx, folder.id, &record).await {
            Ok(updated) => updated,
            Err(e) => return Err(abort(tx, e, "update folder").await),
        };

        if moved {
            if let Err(e) = self.rebase(&mut tx, &old_path, &new_path).await {
                return Err(abort(tx, e, "update folder").await);
            }
            if let Err(e) = self.storage.rename(&old_path, &new_path).await {
                return Err(abort(tx, e, "update folder").await);
            }
        }

        if let Err(e) = connection::commit(tx).await {
            if moved {
                if let Err(undo) = self.storage.rename(&new_path, &old_path).await {
                    warn!(
                        from = %new_path,
                        to = %old_path,
                        error = %undo,
                        "Failed to move directory back after commit failure"
                    );
                }
            }
            return Err(e);
        }

        info!(
            folder_id = updated.id,
            old_path = %old_path,
            new_path = %new_path,
            "Folder updated"
        );
        Ok(updated)
    }

    /// Deletes the named directories and the listed folder rows.
    ///
    /// Child folders and files of deleted rows go with them. Returns the
    /// number of folder rows removed.
    pub async fn delete(&self, request: DeleteFolders) -> AppResult<u64> {
        if request.folder_names.is_empty() {
            return Err(AppError::validation("The folder names field is required."));
        }
        if request.folder_ids.is_empty() {
            return Err(AppError::validation("The folder ids field is required."));
        }
        let names: Vec<&str> = request
            .folder_names
            .iter()
            .map(|n| n.trim().trim_matches('/'))
            .collect();
        if names.iter().any(|n| n.is_empty()) {
            return Err(AppError::validation("Folder names must not be empty"));
        }

        let mut tx = connection::begin(self.folder_repo.pool()).await?;
        for name in &names {
            if let Err(e) = self.storage.delete_dir(name).await {
                return Err(abort(tx, e, "delete folders").await);
            }
        }

        let deleted = match self
            .folder_repo
            .delete_many(&mut tx, &request.folder_ids)
            .await
        {
            Ok(deleted) => deleted,
            Err(e) => return Err(abort(tx, e, "delete folders").await),
        };
        if let Err(e) = connection::commit(tx).await {
            warn!(
                directories = ?names,
                folder_ids = ?request.folder_ids,
                error = %e,
                "Commit failed after directories were removed; rows now point at missing directories"
            );
            return Err(e);
        }

        info!(
            directories = ?names,
            folder_ids = ?request.folder_ids,
            deleted,
            "Folders deleted"
        );
        Ok(deleted)
    }

    /// Resolve the parent reference of a create/update request.
    ///
    /// Returns the parent ID and the parent's resolved path.
    async fn resolve_parent(
        &self,
        parent_id: Option<i64>,
        parent_folder: Option<&str>,
    ) -> AppResult<(Option<i64>, Option<String>)> {
        let parent_folder = parent_folder
            .map(|p| p.trim().trim_matches('/'))
            .filter(|p| !p.is_empty());

        let Some(parent_id) = parent_id else {
            if let Some(ignored) = parent_folder {
                debug!(parent_folder = ignored, "Ignoring parent folder without a parent id");
            }
            return Ok((None, None));
        };

        let parent = self
            .folder_repo
            .find_by_id(parent_id)
            .await?
            .ok_or_else(|| {
                AppError::validation(format!("The selected parent folder {parent_id} does not exist"))
            })?;

        let parent_path = parent.path();
        if let Some(given) = parent_folder.filter(|given| *given != parent_path) {
            return Err(AppError::validation(format!(
                "The parent folder '{given}' does not match the path of folder {parent_id}"
            )));
        }

        Ok((Some(parent_id), Some(parent_path)))
    }

    /// Rewrite stored paths below `old_path` inside the transaction.
    async fn rebase(
        &self,
        tx: &mut Transaction<'static, Sqlite>,
        old_path: &str,
        new_path: &str,
    ) -> AppResult<()> {
        let folders = self
            .folder_repo
            .rebase_descendants(tx, old_path, new_path)
            .await?;
        let files = self.file_repo.rebase_paths(tx, old_path, new_path).await?;
        info!(old_path, new_path, folders, files, "Rebased descendant paths");
        Ok(())
    }
}

fn required_name(name: &str) -> AppResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("The name field is required."));
    }
    Ok(name)
}

/// Roll back `tx` after `err` and hand the error back.
async fn abort(tx: Transaction<'static, Sqlite>, err: AppError, operation: &str) -> AppError {
    warn!(operation, error = %err, "Rolling back");
    if let Err(rollback_err) = connection::rollback(tx).await {
        warn!(operation, error = %rollback_err, "Rollback failed");
    }
    err
}
