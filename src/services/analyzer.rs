use std::path::PathBuf;
use std::time::Instant;

use tracing::{info, info_span, Instrument};

use crate::error::AppResult;
use crate::models::{AnalysisReport, IncomingUpload};
use crate::services::extractor::Extractors;
use crate::services::gemini::GeminiClient;
use crate::services::intake;
use crate::services::prompt::Prompt;

/// Runs one upload through store, extract, prompt and review.
#[derive(Clone)]
pub struct ResumeAnalyzer {
    upload_dir: PathBuf,
    extractors: Extractors,
    ai: GeminiClient,
}

impl ResumeAnalyzer {
    pub fn new(upload_dir: PathBuf, extractors: Extractors, ai: GeminiClient) -> Self {
        Self {
            upload_dir,
            extractors,
            ai,
        }
    }

    pub async fn analyze(&self, upload: IncomingUpload) -> AppResult<AnalysisReport> {
        let span = info_span!("analyze", file_name = %upload.original_name, kind = ?upload.kind);
        self.run(upload).instrument(span).await
    }

    async fn run(&self, upload: IncomingUpload) -> AppResult<AnalysisReport> {
        let start = Instant::now();
        let IncomingUpload {
            original_name,
            kind,
            content,
        } = upload;

        info!(file_size = content.len(), "Analyzing resume");

        let scratch = intake::store(&self.upload_dir, kind, &content)?;
        drop(content);

        // Any early return from here drops `scratch`, which deletes the file.
        let text = self.extractors.extract(kind, scratch.path()).await?;

        let prompt = Prompt::for_resume(&text);
        scratch.discard();

        let feedback = self.ai.review(&prompt).await?;

        info!(
            ai_mode = self.ai.config().mode.label(),
            total_time_ms = start.elapsed().as_millis() as u64,
            "Resume analysis completed"
        );

        Ok(AnalysisReport {
            original_name,
            feedback,
        })
    }
}
