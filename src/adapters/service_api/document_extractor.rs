//! HTTP implementation of the document extraction port.

use async_trait::async_trait;

use super::client::{ServiceApiClient, TextPayload};
use crate::ports::{DocumentExtractor, ServiceError, UploadedFile};

const UPLOAD_CV_PATH: &str = "upload-cv";

/// Extracts CV text via `POST /upload-cv`.
#[derive(Debug, Clone)]
pub struct HttpDocumentExtractor {
    client: ServiceApiClient,
}

impl HttpDocumentExtractor {
    pub fn new(client: ServiceApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DocumentExtractor for HttpDocumentExtractor {
    async fn extract_text(&self, file: UploadedFile) -> Result<String, ServiceError> {
        tracing::debug!(file_name = %file.file_name, size = file.bytes.len(), "uploading CV");

        let payload: TextPayload = self
            .client
            .post_file(
                UPLOAD_CV_PATH,
                &file.file_name,
                file.content_type.as_deref(),
                file.bytes,
            )
            .await?;

        Ok(payload.text)
    }
}
