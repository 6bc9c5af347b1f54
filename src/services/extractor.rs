use std::any::Any;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use docx_rs::{read_docx, DocumentChild, Docx, ParagraphChild, RunChild};
use lopdf::Document;
use tracing::{debug, info, warn, Level};

use crate::error::{AppError, AppResult};
use crate::models::DocumentKind;

/// Turns a document on disk into plain text.
///
/// Implementations are blocking and run on tokio's blocking pool.
pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, source: &Path) -> anyhow::Result<String>;
}

pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract_text(&self, source: &Path) -> anyhow::Result<String> {
        // The page count costs a second parse, so it is only read when debug logging is on.
        if tracing::enabled!(Level::DEBUG) {
            match Document::load(source) {
                Ok(doc) => debug!(pages = doc.get_pages().len(), "PDF structure loaded"),
                Err(e) => warn!("PDF structure validation failed: {}, will try text extraction anyway", e),
            }
        }

        let text = pdf_extract::extract_text(source)
            .map_err(|e| anyhow::anyhow!("{}", e))
            .context("PDF text extraction failed")?;

        debug!("PDF text extraction successful, {} characters", text.len());
        Ok(text)
    }
}

pub struct DocxTextExtractor;

impl TextExtractor for DocxTextExtractor {
    fn extract_text(&self, source: &Path) -> anyhow::Result<String> {
        let data = std::fs::read(source)
            .with_context(|| format!("Failed to read {}", source.display()))?;

        let docx = read_docx(&data).map_err(|e| anyhow::anyhow!("Invalid DOCX document: {}", e))?;

        let text = docx_body_text(&docx);
        debug!("DOCX text extraction successful, {} characters", text.len());
        Ok(text)
    }
}

/// Text of every paragraph that holds at least one run, each followed by a newline.
///
/// docx-rs flattens the body into a single ordered list, so walking it in order
/// covers all sections in document order. Tables and run-less paragraphs are skipped.
pub fn docx_body_text(docx: &Docx) -> String {
    let mut text = String::new();

    for child in &docx.document.children {
        let DocumentChild::Paragraph(para) = child else {
            continue;
        };

        let mut has_run = false;
        for pc in &para.children {
            if let ParagraphChild::Run(run) = pc {
                has_run = true;
                for rc in &run.children {
                    if let RunChild::Text(t) = rc {
                        text.push_str(&t.text);
                    }
                }
            }
        }

        if has_run {
            text.push('\n');
        }
    }

    text
}

/// Routes a [`DocumentKind`] to its extractor.
#[derive(Clone)]
pub struct Extractors {
    pdf: Arc<dyn TextExtractor>,
    docx: Arc<dyn TextExtractor>,
}

impl Extractors {
    pub fn new(pdf: Arc<dyn TextExtractor>, docx: Arc<dyn TextExtractor>) -> Self {
        Self { pdf, docx }
    }

    pub async fn extract(&self, kind: DocumentKind, source: &Path) -> AppResult<String> {
        let extractor = match kind {
            DocumentKind::Pdf => Arc::clone(&self.pdf),
            DocumentKind::Docx => Arc::clone(&self.docx),
            DocumentKind::LegacyDoc => return Err(AppError::UnsupportedLegacyFormat),
            DocumentKind::Unsupported => return Err(AppError::UnsupportedExtension),
        };

        let start = Instant::now();
        let path = source.to_path_buf();

        let text = tokio::task::spawn_blocking(move || extractor.extract_text(&path))
            .await
            .map_err(|e| {
                let reason = if e.is_panic() {
                    panic_message(e.into_panic())
                } else {
                    e.to_string()
                };
                AppError::extraction(reason)
            })?
            .map_err(|e| AppError::extraction(format!("{:#}", e)))?;

        if text.trim().is_empty() {
            warn!(kind = ?kind, "No text extracted from document");
            return Err(AppError::EmptyExtraction);
        }

        info!(
            kind = ?kind,
            characters = text.chars().count(),
            extraction_time_ms = start.elapsed().as_millis() as u64,
            "Text extraction completed"
        );

        Ok(text)
    }
}

impl Default for Extractors {
    fn default() -> Self {
        Self::new(Arc::new(PdfTextExtractor), Arc::new(DocxTextExtractor))
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "document parser crashed".to_string()
    }
}
