//! File-based data source.
//!
//! Reads saved SQL detail documents from a directory, one `{sqlId}.json`
//! file per statement. Useful for offline analysis of captured documents.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::{FetchError, SqlDocument, SqlSource};

/// A data source that reads documents from a directory.
#[derive(Debug, Clone)]
pub struct FileSource {
    dir: PathBuf,
    description: String,
}

impl FileSource {
    /// Create a new file source rooted at `dir`.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref().to_path_buf();
        let description = format!("file: {}", dir.display());
        Self { dir, description }
    }

    /// Returns the directory documents are read from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the document for `sql_id`.
    pub fn path_for(&self, sql_id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sql_id))
    }
}

#[async_trait]
impl SqlSource for FileSource {
    async fn fetch(&self, sql_id: &str) -> Result<SqlDocument, FetchError> {
        let path = self.path_for(sql_id);
        debug!(path = %path.display(), "reading sql detail");

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(FetchError::NotFound(sql_id.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        Ok(serde_json::from_str(&content)?)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_json() -> &'static str {
        r#"{
            "fullText": "update emp set sal = sal * 1.1",
            "executionPlans": [
                { "elapsedTime": 100, "cpuTime": 50, "userIoWaitTime": 20 }
            ],
            "topSessions": [],
            "keys": []
        }"#
    }

    #[test]
    fn test_file_source_new() {
        let source = FileSource::new("/tmp/captures");
        assert_eq!(source.dir(), Path::new("/tmp/captures"));
        assert_eq!(source.description(), "file: /tmp/captures");
        assert_eq!(source.path_for("abc"), Path::new("/tmp/captures/abc.json"));
    }

    #[tokio::test]
    async fn test_file_source_reads_document() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("abc.json"), sample_json()).unwrap();

        let source = FileSource::new(dir.path());
        let doc = source.fetch("abc").await.unwrap();
        assert_eq!(doc.execution_plans.len(), 1);
        assert_eq!(doc.execution_plans[0].cpu_time, 50.0);
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let dir = TempDir::new().unwrap();
        let source = FileSource::new(dir.path());
        let err = source.fetch("nope").await.unwrap_err();
        assert!(matches!(err, FetchError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_file_source_invalid_json() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("bad.json"), "not valid json").unwrap();

        let source = FileSource::new(dir.path());
        let err = source.fetch("bad").await.unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
        assert!(err.to_string().contains("Failed to parse"));
    }
}
