//! Lexicon-driven urgency classification for complaint narratives.
//!
//! The engine decides whether a free-text complaint needs immediate human
//! attention by fusing two signals computed over the same token list:
//!
//! - a summed sentiment score from a tab-separated word lexicon
//! - the presence of urgency keywords in English, Cebuano, or Tagalog
//!
//! ```no_run
//! use std::sync::Arc;
//! use urgency_core::{FileSource, LexiconCache, UrgencyEngine};
//!
//! # async fn run() -> Result<(), urgency_core::AnalyzeError> {
//! let cache = LexiconCache::new(Arc::new(FileSource::new("vader_lexicon.txt")));
//! let engine = UrgencyEngine::new(Arc::new(cache));
//!
//! if let Some(result) = engine.analyze(Some("please help now")).await? {
//!     println!("{} ({})", result.urgency, result.score);
//! }
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod config;
pub mod engine;
pub mod error;
pub mod lexicon;
pub mod scoring;
pub mod triage;

pub use config::EngineConfig;
pub use engine::{EngineMetrics, UrgencyEngine};
pub use error::{AnalyzeError, ConfigError, LexiconError};
pub use lexicon::{FileSource, Lexicon, LexiconCache, LexiconSource, StaticSource};
pub use scoring::{KeywordSet, MatchMode};
pub use triage::{ComplaintRecord, UrgentComplaint, UrgentQueue};
pub use urgency_types::{AnalysisResult, InvalidInput, Sentiment, SentimentScore, Urgency, ValidText};
