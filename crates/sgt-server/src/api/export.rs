//! CSV export and download handlers.

use std::path::Path;

use axum::{
    extract::{Path as UrlPath, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use sgt_analysis::{write_merged_csv, MergedRow};

use crate::middleware::RequestId;

use super::{map_io_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(in crate::api) struct ExportRequest {
    pub rows: Vec<MergedRow>,
    pub filename: Option<String>,
}

#[derive(Debug, Serialize)]
pub(in crate::api) struct ExportInfo {
    pub path: String,
    pub download_url: String,
}

impl ExportInfo {
    pub(in crate::api) fn from_path(path: &Path) -> Self {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_owned();
        Self {
            path: path.display().to_string(),
            download_url: format!("/api/v1/export/{file_name}"),
        }
    }
}

/// Download names must stay inside the data directory: no separators, no
/// parent references.
fn is_safe_filename(name: &str) -> bool {
    !name.is_empty() && !name.contains('/') && !name.contains('\\') && !name.contains("..")
}

/// POST /api/v1/export — write the supplied merged rows as CSV.
pub(in crate::api) async fn export_csv(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<ExportRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ExportInfo>>), ApiError> {
    let rid = &req_id.0;

    if body.rows.is_empty() {
        return Err(ApiError::new(rid, "validation_error", "no rows to export"));
    }

    if let Some(name) = &body.filename {
        if !is_safe_filename(name) {
            return Err(ApiError::new(
                rid,
                "validation_error",
                "filename must not contain path separators or '..'",
            ));
        }
    }

    let path = write_merged_csv(&body.rows, &state.config.data_dir, body.filename.as_deref())
        .map_err(|e| map_io_error(rid.clone(), &e))?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse {
            data: ExportInfo::from_path(&path),
            meta: ResponseMeta::new(rid.clone()),
        }),
    ))
}

/// GET /api/v1/export/{filename} — stream a previously exported CSV.
pub(in crate::api) async fn download_csv(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    UrlPath(filename): UrlPath<String>,
) -> Result<impl IntoResponse, ApiError> {
    let rid = &req_id.0;

    if !is_safe_filename(&filename) {
        return Err(ApiError::new(
            rid,
            "validation_error",
            "filename must not contain path separators or '..'",
        ));
    }

    let path = state.config.data_dir.join(&filename);
    let contents = tokio::fs::read(&path).await.map_err(|error| {
        if error.kind() == std::io::ErrorKind::NotFound {
            ApiError::new(rid, "not_found", format!("no export named '{filename}'"))
        } else {
            tracing::error!(error = %error, path = %path.display(), "failed to read export");
            ApiError::new(rid, "internal_error", "failed to read export")
        }
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        contents,
    ))
}
