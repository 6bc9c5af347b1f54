use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use uuid::Uuid;

use crate::views::AnalysisView;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid request method. Please upload your resume from the main page.")]
    InvalidMethod,

    #[error("Please upload a valid resume file.")]
    NoFile,

    #[error("Only PDF, DOC, and DOCX files are allowed.")]
    UnsupportedExtension,

    #[error("File is too large. Maximum allowed size is {limit_mb} MB.")]
    FileTooLarge { limit_mb: usize },

    #[error("Failed to save uploaded file.")]
    FileSave { message: String },

    #[error("Legacy .doc format is not supported for text extraction. Please convert the file to DOCX or PDF and upload again.")]
    UnsupportedLegacyFormat,

    #[error("Error while extracting text from the resume: {message}")]
    Extraction { message: String },

    #[error("Could not extract text from your resume. Please check that your file is not scanned as an image and try again.")]
    EmptyExtraction,

    #[error("Error contacting AI API: {message}")]
    Network { message: String },

    #[error("AI error: {message}")]
    RemoteApi { message: String },

    #[error("Unexpected AI response: {raw_prefix}")]
    UnexpectedResponse { raw_prefix: String },

    #[error("Internal server error: {message}")]
    Internal { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidMethod => "INVALID_METHOD",
            AppError::NoFile => "NO_FILE",
            AppError::UnsupportedExtension => "UNSUPPORTED_EXTENSION",
            AppError::FileTooLarge { .. } => "FILE_TOO_LARGE",
            AppError::FileSave { .. } => "FILE_SAVE_ERROR",
            AppError::UnsupportedLegacyFormat => "UNSUPPORTED_LEGACY_FORMAT",
            AppError::Extraction { .. } => "EXTRACTION_ERROR",
            AppError::EmptyExtraction => "EMPTY_EXTRACTION",
            AppError::Network { .. } => "NETWORK_ERROR",
            AppError::RemoteApi { .. } => "REMOTE_API_ERROR",
            AppError::UnexpectedResponse { .. } => "UNEXPECTED_RESPONSE",
            AppError::Internal { .. } => "INTERNAL_ERROR",
            AppError::ConfigError { .. } => "CONFIG_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidMethod => StatusCode::METHOD_NOT_ALLOWED,
            AppError::NoFile => StatusCode::BAD_REQUEST,
            AppError::UnsupportedExtension => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::FileSave { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::UnsupportedLegacyFormat => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::Extraction { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::EmptyExtraction => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Network { .. } => StatusCode::BAD_GATEWAY,
            AppError::RemoteApi { .. } => StatusCode::BAD_GATEWAY,
            AppError::UnexpectedResponse { .. } => StatusCode::BAD_GATEWAY,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ConfigError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.to_string();
        let request_id = Uuid::new_v4().to_string();

        // The save failure keeps its cause out of the page but not out of the log.
        let detail = match &self {
            AppError::FileSave { message } => Some(message.as_str()),
            _ => None,
        };

        tracing::error!(
            error_code = error_code,
            status_code = %status,
            request_id = %request_id,
            error_message = %message,
            detail = ?detail,
            "Resume analysis failed"
        );

        match (AnalysisView::Failure { message }).render() {
            Ok(page) => (status, Html(page)).into_response(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to render error page");
                (status, self.to_string()).into_response()
            }
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<minijinja::Error> for AppError {
    fn from(err: minijinja::Error) -> Self {
        AppError::Internal {
            message: format!("Template error: {}", err),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal {
            message: format!("IO error: {}", err),
        }
    }
}

// Helper methods for creating specific errors
impl AppError {
    pub fn extraction(message: impl Into<String>) -> Self {
        AppError::Extraction {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        AppError::Network {
            message: message.into(),
        }
    }

    pub fn file_save(message: impl Into<String>) -> Self {
        AppError::FileSave {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        AppError::ConfigError {
            message: message.into(),
        }
    }
}
