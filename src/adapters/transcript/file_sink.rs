//! File Transcript Sink - writes the finished transcript to a plain-text file.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::foundation::SessionId;
use crate::ports::{ServiceError, TranscriptSink};

/// Writes transcripts to a fixed path.
///
/// Writes go to `{path}.tmp` first and are renamed into place, so a crash
/// never leaves a half-written transcript behind. Each save replaces the
/// previous file.
#[derive(Debug, Clone)]
pub struct FileTranscriptSink {
    path: PathBuf,
}

impl FileTranscriptSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Destination file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    async fn ensure_parent_dir(&self) -> Result<(), ServiceError> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => {
                fs::create_dir_all(dir).await.map_err(|e| {
                    ServiceError::io(format!(
                        "Failed to create directory {}: {}",
                        dir.display(),
                        e
                    ))
                })
            }
            _ => Ok(()),
        }
    }
}

async fn write_temp(temp_path: &Path, content: &str) -> Result<(), ServiceError> {
    let mut file = fs::File::create(temp_path).await.map_err(|e| {
        ServiceError::io(format!(
            "Failed to create temp file {}: {}",
            temp_path.display(),
            e
        ))
    })?;

    file.write_all(content.as_bytes()).await.map_err(|e| {
        ServiceError::io(format!(
            "Failed to write to temp file {}: {}",
            temp_path.display(),
            e
        ))
    })?;

    file.sync_all().await.map_err(|e| {
        ServiceError::io(format!(
            "Failed to sync temp file {}: {}",
            temp_path.display(),
            e
        ))
    })
}

#[async_trait]
impl TranscriptSink for FileTranscriptSink {
    async fn save(&self, session_id: SessionId, content: &str) -> Result<String, ServiceError> {
        self.ensure_parent_dir().await?;

        let temp_path = self.temp_path();
        let written = match write_temp(&temp_path, content).await {
            Ok(()) => fs::rename(&temp_path, &self.path).await.map_err(|e| {
                ServiceError::io(format!(
                    "Failed to rename {} to {}: {}",
                    temp_path.display(),
                    self.path.display(),
                    e
                ))
            }),
            Err(e) => Err(e),
        };

        if let Err(e) = written {
            if fs::remove_file(&temp_path).await.is_ok() {
                tracing::debug!(path = %temp_path.display(), "Removed partial transcript");
            }
            return Err(e);
        }

        tracing::info!(
            session_id = %session_id,
            path = %self.path.display(),
            bytes = content.len(),
            "Transcript written"
        );

        Ok(self.path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_sink(file_name: &str) -> (FileTranscriptSink, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let sink = FileTranscriptSink::new(temp_dir.path().join(file_name));
        (sink, temp_dir)
    }

    #[tokio::test]
    async fn save_writes_content() {
        let (sink, _temp) = create_sink("interview_transcript.txt");

        let location = sink.save(SessionId::new(), "Question 1: Q\n").await.unwrap();

        assert_eq!(location, sink.path().display().to_string());
        let written = fs::read_to_string(sink.path()).await.unwrap();
        assert_eq!(written, "Question 1: Q\n");
    }

    #[tokio::test]
    async fn save_leaves_no_temp_file() {
        let (sink, _temp) = create_sink("out.txt");

        sink.save(SessionId::new(), "content").await.unwrap();

        assert!(!sink.temp_path().exists());
    }

    #[tokio::test]
    async fn save_overwrites_previous_transcript() {
        let (sink, _temp) = create_sink("out.txt");

        sink.save(SessionId::new(), "first").await.unwrap();
        sink.save(SessionId::new(), "second").await.unwrap();

        let written = fs::read_to_string(sink.path()).await.unwrap();
        assert_eq!(written, "second");
    }

    #[tokio::test]
    async fn save_creates_missing_directories() {
        let (sink, _temp) = create_sink("nested/dir/out.txt");

        sink.save(SessionId::new(), "content").await.unwrap();

        assert!(sink.path().exists());
    }

    #[tokio::test]
    async fn save_reports_io_failure() {
        let temp_dir = TempDir::new().unwrap();
        // A directory in place of the destination makes the rename fail.
        let target = temp_dir.path().join("occupied");
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("child"), "x").unwrap();
        let sink = FileTranscriptSink::new(&target);

        let result = sink.save(SessionId::new(), "content").await;

        assert!(matches!(result, Err(ServiceError::Io(_))));
        assert!(!sink.temp_path().exists());
    }
}
