use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    response::Html,
};
use bytes::BytesMut;
use std::time::Instant;
use tracing::{error, info, warn};

use crate::error::{AppError, AppResult};
use crate::models::{IncomingUpload, RESUME_FIELD};
use crate::services::intake;
use crate::state::AppState;
use crate::views::AnalysisView;

pub async fn analyze_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Html<String>> {
    let start = Instant::now();
    let request_id = uuid::Uuid::new_v4().to_string()[..8].to_string();

    info!(request_id = %request_id, "Starting resume analysis request");

    // A body that is not multipart/form-data carries no file at all.
    let mut multipart = multipart.map_err(|rejection| {
        warn!(request_id = %request_id, error = %rejection, "Request is not a multipart upload");
        AppError::NoFile
    })?;

    let upload = match read_resume_field(&mut multipart, state.config.max_upload_bytes()).await {
        Ok(upload) => {
            info!(
                request_id = %request_id,
                file_name = %upload.original_name,
                file_size = upload.size(),
                kind = ?upload.kind,
                "File extracted from multipart form"
            );
            upload
        }
        Err(e) => {
            warn!(request_id = %request_id, error = %e, "Upload rejected");
            return Err(e);
        }
    };

    let report = match state.analyzer.analyze(upload).await {
        Ok(report) => report,
        Err(e) => {
            error!(request_id = %request_id, error = %e, "Resume analysis failed");
            return Err(e);
        }
    };

    info!(
        request_id = %request_id,
        total_time_ms = start.elapsed().as_millis() as u64,
        "Request completed successfully"
    );

    let view = AnalysisView::Feedback {
        original_name: report.original_name,
        feedback: report.feedback,
    };
    Ok(Html(view.render()?))
}

/// Any method other than POST on the analysis endpoint.
pub async fn invalid_method_handler() -> AppError {
    AppError::InvalidMethod
}

/// Pulls the resume field out of the form, checking the name before reading any bytes
/// and the size while streaming.
async fn read_resume_field(multipart: &mut Multipart, max_bytes: usize) -> AppResult<IncomingUpload> {
    let to_app_error = |e: MultipartError| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::FileTooLarge {
                limit_mb: max_bytes / (1024 * 1024),
            }
        } else {
            warn!(error = %e, "Failed to read multipart body");
            AppError::NoFile
        }
    };

    while let Some(mut field) = multipart.next_field().await.map_err(to_app_error)? {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }

        let original_name = field.file_name().unwrap_or("").to_string();
        if original_name.trim().is_empty() {
            return Err(AppError::NoFile);
        }

        let kind = intake::check_extension(&original_name)?;

        let mut content = BytesMut::new();
        while let Some(chunk) = field.chunk().await.map_err(to_app_error)? {
            intake::check_size(content.len() + chunk.len(), max_bytes)?;
            content.extend_from_slice(&chunk);
        }

        if content.is_empty() {
            return Err(AppError::NoFile);
        }

        return Ok(IncomingUpload {
            original_name,
            kind,
            content: content.freeze(),
        });
    }

    Err(AppError::NoFile)
}
