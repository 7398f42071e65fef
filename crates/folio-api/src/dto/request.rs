//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use folio_service::folder::{DeleteFolders, FolderInput};

/// Query string of `GET /folder`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListFoldersQuery {
    /// Maximum number of root folders to return.
    pub limit: Option<u32>,
}

/// Body of `POST /folder` and `POST /folder/{folder}`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SaveFolderRequest {
    /// Folder name.
    #[validate(
        length(min = 1, max = 255, message = "The name field is required."),
        custom(function = "not_blank")
    )]
    pub name: String,
    /// Parent folder ID.
    pub parent_id: Option<i64>,
    /// Path of the parent folder.
    #[validate(length(max = 1024))]
    pub parent_folder: Option<String>,
}

impl From<SaveFolderRequest> for FolderInput {
    fn from(req: SaveFolderRequest) -> Self {
        Self {
            name: req.name,
            parent_id: req.parent_id,
            parent_folder: req.parent_folder,
        }
    }
}

/// A single value or a list of values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    /// Flatten into a list.
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(value) => vec![value],
            Self::Many(values) => values,
        }
    }

    fn values(&self) -> &[String] {
        match self {
            Self::One(value) => std::slice::from_ref(value),
            Self::Many(values) => values,
        }
    }
}

/// Body of `DELETE /folder`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DeleteFoldersRequest {
    /// Directory path, or list of paths, to remove from storage.
    #[validate(custom(function = "non_empty_names"))]
    pub folder_names: OneOrMany,
    /// Folder rows to remove.
    #[validate(length(min = 1, message = "The folder ids field is required."))]
    pub folder_ids: Vec<i64>,
}

impl From<DeleteFoldersRequest> for DeleteFolders {
    fn from(req: DeleteFoldersRequest) -> Self {
        Self {
            folder_names: req.folder_names.into_vec(),
            folder_ids: req.folder_ids,
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required").with_message("The name field is required.".into()));
    }
    Ok(())
}

fn non_empty_names(names: &OneOrMany) -> Result<(), ValidationError> {
    let values = names.values();
    if values.is_empty() || values.iter().any(|n| n.trim().is_empty()) {
        return Err(ValidationError::new("required")
            .with_message("The folder names field is required.".into()));
    }
    Ok(())
}
