//! Resume Analyzer Service
//!
//! Accepts a resume upload (PDF or DOCX), extracts its text, asks a Gemini
//! model for a review and renders the feedback as an HTML page.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod views;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use handlers::create_router;
pub use state::AppState;
