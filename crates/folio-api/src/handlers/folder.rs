//! Folder CRUD handlers.

use axum::Json;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};

use folio_service::presentation::{FolderResource, FolderSummary, ListingItem};

use crate::dto::request::{DeleteFoldersRequest, ListFoldersQuery, SaveFolderRequest};
use crate::dto::response::{DataMessageResponse, DataResponse, DeleteFoldersResponse};
use crate::error::ApiError;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// GET /folder?limit=N
pub async fn list_folders(
    State(state): State<AppState>,
    query: Result<Query<ListFoldersQuery>, QueryRejection>,
) -> Result<Json<DataResponse<Vec<FolderResource>>>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::invalid(e.body_text(), None))?;
    let folders = state.folder_service.list(query.limit).await?;
    Ok(Json(DataResponse::new(folders)))
}

/// POST /folder
pub async fn create_folder(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SaveFolderRequest>,
) -> Result<Json<DataMessageResponse<FolderSummary>>, ApiError> {
    let folder = state
        .folder_service
        .create(req.into())
        .await
        .map_err(|e| state.mutation_error(e))?;

    Ok(Json(DataMessageResponse::new(
        state.presenter.folder_summary(&folder),
        "Folder created successfully.",
    )))
}

/// GET /folder/{folder}
pub async fn show_folder(
    State(state): State<AppState>,
    folder: Result<Path<i64>, PathRejection>,
) -> Result<Json<DataResponse<Vec<ListingItem>>>, ApiError> {
    let folder_id = folder_id(folder)?;
    let listing = state.folder_service.show(folder_id).await?;
    Ok(Json(DataResponse::new(listing)))
}

/// POST /folder/{folder}
pub async fn update_folder(
    State(state): State<AppState>,
    folder: Result<Path<i64>, PathRejection>,
    ValidatedJson(req): ValidatedJson<SaveFolderRequest>,
) -> Result<Json<DataMessageResponse<FolderSummary>>, ApiError> {
    let folder_id = folder_id(folder)?;
    let folder = state
        .folder_service
        .update(folder_id, req.into())
        .await
        .map_err(|e| state.mutation_error(e))?;

    Ok(Json(DataMessageResponse::new(
        state.presenter.folder_summary(&folder),
        "Folder updated successfully.",
    )))
}

/// DELETE /folder
pub async fn delete_folders(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<DeleteFoldersRequest>,
) -> Result<Json<DeleteFoldersResponse>, ApiError> {
    let deleted = state
        .folder_service
        .delete(req.into())
        .await
        .map_err(|e| state.mutation_error(e))?;

    Ok(Json(DeleteFoldersResponse {
        message: "Folder deleted successfully.".to_string(),
        deleted,
    }))
}

/// An unparsable ID cannot name an existing folder.
fn folder_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|_| ApiError::not_found("Folder not found"))
}
