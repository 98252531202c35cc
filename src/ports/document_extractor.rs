//! Document Extraction Port - pulls plain text out of an uploaded CV.

use async_trait::async_trait;

use super::ServiceError;

/// A file handed over by the candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Original file name, sent along for the service's benefit.
    pub file_name: String,
    /// MIME type, when known.
    pub content_type: Option<String>,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Creates an upload with no declared content type.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes,
        }
    }

    /// Sets the content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Port for extracting text from a CV document.
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    /// Extracts the document's text. The result is used as `cv_text` for the
    /// whole session.
    async fn extract_text(&self, file: UploadedFile) -> Result<String, ServiceError>;
}
