use bytes::Bytes;

/// Multipart field carrying the resume.
pub const RESUME_FIELD: &str = "resumeFile";

/// Document family, decided once from the upload's file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    LegacyDoc,
    Unsupported,
}

impl DocumentKind {
    /// Case-insensitive match on the text after the last dot of the base name.
    pub fn from_file_name(file_name: &str) -> Self {
        let base = file_name
            .rsplit(|c: char| c == '/' || c == '\\')
            .next()
            .unwrap_or(file_name);

        match base.rsplit_once('.') {
            Some((_, ext)) => match ext.to_ascii_lowercase().as_str() {
                "pdf" => DocumentKind::Pdf,
                "docx" => DocumentKind::Docx,
                "doc" => DocumentKind::LegacyDoc,
                _ => DocumentKind::Unsupported,
            },
            None => DocumentKind::Unsupported,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Docx => "docx",
            DocumentKind::LegacyDoc => "doc",
            DocumentKind::Unsupported => "bin",
        }
    }

    pub fn is_accepted(&self) -> bool {
        !matches!(self, DocumentKind::Unsupported)
    }
}

/// A resume read off the wire that passed the name and size checks.
#[derive(Debug, Clone)]
pub struct IncomingUpload {
    pub original_name: String,
    pub kind: DocumentKind,
    pub content: Bytes,
}

impl IncomingUpload {
    pub fn size(&self) -> usize {
        self.content.len()
    }
}
