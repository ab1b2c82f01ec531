//! Error types for lexicon loading, analysis, and configuration.
//!
//! Invalid input is not represented here: it is a "not applicable" signal
//! ([`urgency_types::InvalidInput`]) that the engine turns into an absent
//! result. Everything in this module is a real failure the caller must
//! decide how to degrade.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Failure to obtain a usable lexicon.
///
/// `Clone` so that one shared load can hand the same error to every caller
/// that was waiting on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexiconError {
    /// Reading the lexicon file failed.
    #[error("failed to read lexicon {}: {message}", path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error message.
        message: String,
    },

    /// Fetching the lexicon over HTTP failed.
    #[error("failed to fetch lexicon from {url}: {message}")]
    Http {
        /// Resource location.
        url: String,
        /// Transport or status error message.
        message: String,
    },

    /// The fetch did not complete within the configured timeout.
    #[error("lexicon load timed out after {after:?}")]
    Timeout {
        /// Timeout that elapsed.
        after: Duration,
    },

    /// The load task stopped before producing a result (panic or runtime
    /// shutdown).
    #[error("lexicon load from {source_name} was interrupted")]
    Interrupted {
        /// Human-readable name of the lexicon source.
        source_name: String,
    },

    /// The resource parsed into zero usable entries.
    #[error("lexicon {source_name} contains no valid entries")]
    Empty {
        /// Human-readable name of the lexicon source.
        source_name: String,
    },
}

/// Failure of an analysis call.
///
/// Distinct from an `Ok(None)` result, which means "not urgent" or
/// "input not applicable".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyzeError {
    /// The lexicon could not be loaded; no classification was attempted.
    #[error("lexicon unavailable: {0}")]
    LexiconUnavailable(#[from] LexiconError),
}

/// Failure to load or apply engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`EngineConfig`](crate::config::EngineConfig).
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Neither a lexicon path nor a lexicon URL was configured.
    #[error("no lexicon source configured (set lexicon_path or lexicon_url)")]
    MissingLexicon,

    /// A lexicon URL was configured but HTTP support is not compiled in.
    #[error("lexicon_url {0} requires the `http` feature")]
    HttpDisabled(String),
}
