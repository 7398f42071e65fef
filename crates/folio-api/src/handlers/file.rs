//! File upload and delete handlers.

use axum::Json;
use axum::body::Bytes;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::PathRejection;
use axum::extract::{Multipart, Path, State};

use folio_service::file::UploadInput;
use folio_service::presentation::FileResource;

use crate::dto::response::{DataMessageResponse, MessageResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /file (multipart: `file`, optional `folder_id`)
pub async fn upload_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<DataMessageResponse<FileResource>>, ApiError> {
    let mut multipart = multipart.map_err(|e| ApiError::invalid(e.body_text(), None))?;

    let mut folder_id: Option<i64> = None;
    let mut upload: Option<(String, Option<String>, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::invalid(e.body_text(), None))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "folder_id" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::invalid(e.body_text(), None))?;
                let text = text.trim();
                if !text.is_empty() {
                    folder_id = Some(text.parse().map_err(|_| {
                        ApiError::invalid("The folder id must be an integer.", None)
                    })?);
                }
            }
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(String::from);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::invalid(e.body_text(), None))?;
                upload = Some((file_name, content_type, data));
            }
            _ => {}
        }
    }

    let (file_name, content_type, data) =
        upload.ok_or_else(|| ApiError::invalid("The file field is required.", None))?;

    let file = state
        .file_service
        .upload(UploadInput {
            file_name,
            content_type,
            data,
            folder_id,
        })
        .await
        .map_err(|e| state.mutation_error(e))?;

    Ok(Json(DataMessageResponse::new(
        state.presenter.file_resource(&file),
        "File uploaded successfully.",
    )))
}

/// DELETE /file/{file}
pub async fn delete_file(
    State(state): State<AppState>,
    file: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(file_id) = file.map_err(|_| ApiError::not_found("File not found"))?;
    state
        .file_service
        .delete(file_id)
        .await
        .map_err(|e| state.mutation_error(e))?;

    Ok(Json(MessageResponse::new("File deleted successfully.")))
}
