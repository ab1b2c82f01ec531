//! Engine configuration.
//!
//! Loaded from TOML. Every field is optional:
//!
//! ```toml
//! lexicon_path = "datasets/vader_lexicon.txt"
//! load_timeout_ms = 5000
//! match_mode = "exact_token"
//! fold_diacritics = false
//! keywords = ["urgent", "tabang", "tulong"]
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::analyzer::NormalizerConfig;
use crate::engine::UrgencyEngine;
use crate::error::ConfigError;
use crate::lexicon::{FileSource, LexiconCache, LexiconSource};
use crate::scoring::{KeywordSet, MatchMode};

/// Default bound on a single lexicon fetch.
pub const DEFAULT_LOAD_TIMEOUT_MS: u64 = 10_000;

fn default_load_timeout_ms() -> Option<u64> {
    Some(DEFAULT_LOAD_TIMEOUT_MS)
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Local lexicon file. Takes precedence over `lexicon_url`.
    pub lexicon_path: Option<PathBuf>,
    /// Remote lexicon; requires the `http` feature.
    pub lexicon_url: Option<String>,
    /// Fetch timeout in milliseconds. `None` disables the timeout.
    #[serde(default = "default_load_timeout_ms")]
    pub load_timeout_ms: Option<u64>,
    /// Keyword matching strategy.
    pub match_mode: MatchMode,
    /// Fold accented Latin letters before stripping punctuation.
    pub fold_diacritics: bool,
    /// Replaces the default keyword set when present.
    pub keywords: Option<Vec<String>>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lexicon_path: None,
            lexicon_url: None,
            load_timeout_ms: default_load_timeout_ms(),
            match_mode: MatchMode::default(),
            fold_diacritics: false,
            keywords: None,
        }
    }
}

impl EngineConfig {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for invalid TOML or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Parse`] if it is invalid.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Configured fetch timeout.
    pub fn load_timeout(&self) -> Option<Duration> {
        self.load_timeout_ms.map(Duration::from_millis)
    }

    /// Keyword set: the configured list, or the defaults.
    pub fn keyword_set(&self) -> KeywordSet {
        match &self.keywords {
            Some(keywords) => KeywordSet::new(keywords),
            None => KeywordSet::default(),
        }
    }

    /// Builds the configured lexicon source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingLexicon`] if no source is configured and
    /// [`ConfigError::HttpDisabled`] for a URL without the `http` feature.
    pub fn lexicon_source(&self) -> Result<Arc<dyn LexiconSource>, ConfigError> {
        if let Some(path) = &self.lexicon_path {
            return Ok(Arc::new(FileSource::new(path)));
        }
        match &self.lexicon_url {
            Some(url) => http_source(url),
            None => Err(ConfigError::MissingLexicon),
        }
    }

    /// Builds a lexicon cache from this configuration.
    ///
    /// # Errors
    ///
    /// Same as [`lexicon_source`](Self::lexicon_source).
    pub fn build_cache(&self) -> Result<LexiconCache, ConfigError> {
        let cache = LexiconCache::new(self.lexicon_source()?);
        Ok(match self.load_timeout() {
            Some(timeout) => cache.with_timeout(timeout),
            None => cache,
        })
    }

    /// Builds a ready-to-use engine. The lexicon is loaded on first use.
    ///
    /// # Errors
    ///
    /// Same as [`lexicon_source`](Self::lexicon_source).
    pub fn build_engine(&self) -> Result<UrgencyEngine, ConfigError> {
        Ok(UrgencyEngine::new(Arc::new(self.build_cache()?))
            .with_keywords(self.keyword_set())
            .with_match_mode(self.match_mode)
            .with_normalizer(NormalizerConfig {
                fold_diacritics: self.fold_diacritics,
            }))
    }
}

#[cfg(feature = "http")]
fn http_source(url: &str) -> Result<Arc<dyn LexiconSource>, ConfigError> {
    Ok(Arc::new(crate::lexicon::HttpSource::new(url)))
}

#[cfg(not(feature = "http"))]
fn http_source(url: &str) -> Result<Arc<dyn LexiconSource>, ConfigError> {
    Err(ConfigError::HttpDisabled(url.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn empty_config_uses_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.load_timeout(), Some(Duration::from_secs(10)));
        assert_eq!(config.keyword_set(), KeywordSet::default());
    }

    #[test]
    fn full_config_parses() {
        let config = EngineConfig::from_toml_str(
            r#"
            lexicon_path = "data/vader.txt"
            load_timeout_ms = 250
            match_mode = "exact_token"
            fold_diacritics = true
            keywords = ["Fire", "sunog"]
            "#,
        )
        .unwrap();

        assert_eq!(config.lexicon_path, Some(PathBuf::from("data/vader.txt")));
        assert_eq!(config.load_timeout(), Some(Duration::from_millis(250)));
        assert_eq!(config.match_mode, MatchMode::ExactToken);
        assert!(config.fold_diacritics);
        assert_eq!(config.keyword_set().iter().collect::<Vec<_>>(), vec!["fire", "sunog"]);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = EngineConfig::from_toml_str("lexicon = \"x\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_source_is_an_error() {
        let err = EngineConfig::default().build_engine().unwrap_err();
        assert!(matches!(err, ConfigError::MissingLexicon));
    }

    #[cfg(not(feature = "http"))]
    #[test]
    fn url_without_http_feature_is_an_error() {
        let config = EngineConfig {
            lexicon_url: Some("https://example.invalid/vader.txt".to_string()),
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.lexicon_source(),
            Err(ConfigError::HttpDisabled(_))
        ));
    }

    #[test]
    fn from_file_reads_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "match_mode = \"substring\"").unwrap();
        writeln!(file, "lexicon_path = \"lexicon.txt\"").unwrap();

        let config = EngineConfig::from_file(file.path()).unwrap();
        assert_eq!(config.match_mode, MatchMode::Substring);
        assert!(config.build_engine().is_ok());
    }

    #[tokio::test]
    async fn built_engine_reads_configured_file() {
        let mut lexicon = tempfile::NamedTempFile::new().unwrap();
        writeln!(lexicon, "terrible\t-2.5").unwrap();

        let config = EngineConfig {
            lexicon_path: Some(lexicon.path().to_path_buf()),
            ..EngineConfig::default()
        };
        let engine = config.build_engine().unwrap();
        let result = engine.analyze(Some("Terrible food")).await.unwrap().unwrap();
        assert_eq!(result.urgency, urgency_types::Urgency::High);
    }
}
