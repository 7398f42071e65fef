//! Collision-free slugs for folders.

use std::sync::Arc;

use folio_core::config::SlugConfig;
use folio_core::error::AppError;
use folio_core::result::AppResult;
use folio_database::repositories::FolderRepository;

use super::slugify::{next_available_slug, slugify};

/// Derives folder slugs that do not collide with existing folders.
#[derive(Debug, Clone)]
pub struct SlugService {
    /// Folder repository, used to look up taken slugs.
    folder_repo: Arc<FolderRepository>,
    /// Transliteration locale.
    locale: String,
}

impl SlugService {
    /// Creates a new slug service.
    pub fn new(folder_repo: Arc<FolderRepository>, config: &SlugConfig) -> Self {
        Self {
            folder_repo,
            locale: config.locale.clone(),
        }
    }

    /// Slugify a name with the configured locale.
    pub fn slugify(&self, name: &str) -> String {
        slugify(name, &self.locale)
    }

    /// Compute a slug for `name` that no other folder uses.
    ///
    /// `exclude_id` is the folder being renamed, if any.
    pub async fn compute_unique_slug(
        &self,
        name: &str,
        exclude_id: Option<i64>,
    ) -> AppResult<String> {
        let base = self.slugify(name);
        if base.is_empty() {
            return Err(AppError::validation(format!(
                "The name '{name}' does not contain any characters usable in a slug"
            )));
        }

        let taken = self
            .folder_repo
            .find_slugs_with_base(&base, exclude_id)
            .await?;
        Ok(next_available_slug(&base, &taken))
    }
}
