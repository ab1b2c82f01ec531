//! Lexicon sources.
//!
//! A source only fetches raw text; parsing and caching live elsewhere, so a
//! source can be swapped without touching the load protocol.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::error::LexiconError;

/// Where raw lexicon text comes from.
#[async_trait]
pub trait LexiconSource: Send + Sync {
    /// Name used in logs and error messages.
    fn name(&self) -> String;

    /// Fetches the complete raw lexicon text.
    async fn fetch(&self) -> Result<String, LexiconError>;
}

/// Reads the lexicon from a local file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Creates a source for the given path. The file is not touched until fetch.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path this source reads.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl LexiconSource for FileSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    /// Invalid UTF-8 is replaced with U+FFFD rather than failing the load;
    /// the affected lines are left to the parser.
    async fn fetch(&self) -> Result<String, LexiconError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| LexiconError::Io {
                path: self.path.clone(),
                message: e.to_string(),
            })?;

        match String::from_utf8(bytes) {
            Ok(text) => Ok(text),
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e.utf8_error(),
                    "lexicon is not valid UTF-8, decoding lossily"
                );
                Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
            }
        }
    }
}

/// Serves lexicon text already held in memory.
///
/// Used for embedded lexicons and for tests.
#[derive(Debug, Clone)]
pub struct StaticSource {
    name: String,
    text: Arc<str>,
}

impl StaticSource {
    /// Creates a source named `name` that always returns `text`.
    pub fn new(name: impl Into<String>, text: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

#[async_trait]
impl LexiconSource for StaticSource {
    fn name(&self) -> String {
        self.name.clone()
    }

    async fn fetch(&self) -> Result<String, LexiconError> {
        Ok(self.text.to_string())
    }
}

/// Fetches the lexicon from an HTTP(S) URL.
#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

#[cfg(feature = "http")]
impl HttpSource {
    /// Creates a source for `url` with a default client.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }

    fn error(&self, e: reqwest::Error) -> LexiconError {
        LexiconError::Http {
            url: self.url.clone(),
            message: e.to_string(),
        }
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl LexiconSource for HttpSource {
    fn name(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<String, LexiconError> {
        self.client
            .get(&self.url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| self.error(e))?
            .text()
            .await
            .map_err(|e| self.error(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn file_source_reads_contents() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "help\t0").unwrap();
        writeln!(file, "danger\t-3").unwrap();

        let source = FileSource::new(file.path());
        let text = source.fetch().await.unwrap();
        assert_eq!(text, "help\t0\ndanger\t-3\n");
    }

    #[tokio::test]
    async fn invalid_utf8_keeps_surrounding_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"danger\t-3\ncaf\xE9\t1.0\nterrible\t-2.5\n").unwrap();

        let text = FileSource::new(file.path()).fetch().await.unwrap();
        assert_eq!(text, "danger\t-3\ncaf\u{FFFD}\t1.0\nterrible\t-2.5\n");

        let (lexicon, report) = crate::lexicon::parse_lexicon(&text);
        assert_eq!(lexicon.get("danger"), Some(-3.0));
        assert_eq!(lexicon.get("terrible"), Some(-2.5));
        assert_eq!(report.skipped, 0);
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");

        let err = FileSource::new(&path).fetch().await.unwrap_err();
        match err {
            LexiconError::Io { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn static_source_returns_text() {
        let source = StaticSource::new("inline", "calm\t1.0");
        assert_eq!(source.name(), "inline");
        assert_eq!(source.fetch().await.unwrap(), "calm\t1.0");
    }
}
