pub mod analyzer;
pub mod extractor;
pub mod gemini;
pub mod intake;
pub mod prompt;

pub use analyzer::ResumeAnalyzer;
pub use extractor::{DocxTextExtractor, Extractors, PdfTextExtractor, TextExtractor};
pub use gemini::{AiResponse, GeminiClient, DEMO_FEEDBACK};
pub use prompt::Prompt;
