//! Urgent complaint queue.
//!
//! Turns a batch of complaint records into the list shown by the urgent
//! queue widget: open complaints only, `High` or `Critical` only, with
//! `Critical` first.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, info};
use urgency_types::{AnalysisResult, Urgency};

use crate::engine::UrgencyEngine;
use crate::error::AnalyzeError;

/// Maximum snippet length, in characters.
pub const SNIPPET_CHARS: usize = 120;

/// Statuses that take a complaint out of the queue.
const CLOSED_STATUSES: [&str; 2] = ["resolved", "closed"];

/// Accepts strings, numbers, and booleans as text; `null` as absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(_) => None,
    })
}

/// One complaint as supplied by the complaint store.
///
/// Field names follow the store's camelCase documents.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComplaintRecord {
    /// Store identifier.
    #[serde(deserialize_with = "lenient_text")]
    pub id: Option<String>,
    /// Workflow status, e.g. "pending" or "resolved".
    #[serde(deserialize_with = "lenient_text")]
    pub status: Option<String>,
    /// Complaint category.
    #[serde(deserialize_with = "lenient_text")]
    pub category: Option<String>,
    /// Submission timestamp as stored.
    #[serde(deserialize_with = "lenient_text")]
    pub submission_date: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub concern_description: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub incident_description: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub facility_description: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub concern_feedback: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub other_description: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub additional_context: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub additional_notes: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub impact_experience: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub facility_safety: Option<String>,
}

impl ComplaintRecord {
    /// Returns `true` for resolved or closed complaints.
    pub fn is_closed(&self) -> bool {
        self.status
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .is_some_and(|s| CLOSED_STATUSES.contains(&s.as_str()))
    }

    /// The narrative to analyze: the first non-empty description field.
    ///
    /// Fields are consulted in a fixed priority order. Returns `None` when
    /// every field is absent or blank.
    pub fn narrative(&self) -> Option<&str> {
        [
            &self.concern_description,
            &self.incident_description,
            &self.facility_description,
            &self.concern_feedback,
            &self.other_description,
            &self.additional_context,
            &self.additional_notes,
            &self.impact_experience,
            &self.facility_safety,
        ]
        .into_iter()
        .filter_map(Option::as_deref)
        .find(|text| !text.is_empty())
        .filter(|text| !text.trim().is_empty())
    }
}

/// A complaint that made it into the urgent queue.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrgentComplaint {
    /// Store identifier.
    pub id: Option<String>,
    /// First [`SNIPPET_CHARS`] characters of the narrative.
    pub snippet: String,
    /// Complaint category.
    pub category: Option<String>,
    /// Submission timestamp as stored.
    pub submission_date: Option<String>,
    /// Urgency tier.
    pub priority: Urgency,
    /// Full analysis of the narrative.
    pub analysis: AnalysisResult,
}

/// Tier tallies for a queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QueueCounts {
    /// Number of `Critical` complaints.
    pub critical: usize,
    /// Number of `High` complaints.
    pub high: usize,
}

/// Urgent complaints ordered `Critical` first, then `High`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct UrgentQueue {
    items: Vec<UrgentComplaint>,
}

impl UrgentQueue {
    /// Analyzes `records` in order and builds the queue.
    ///
    /// Closed complaints and complaints without narrative text are skipped.
    /// Ordering within a tier follows input order.
    ///
    /// # Errors
    ///
    /// Stops at the first [`AnalyzeError`]; a partial queue would hide
    /// urgent complaints.
    pub async fn build<I>(engine: &UrgencyEngine, records: I) -> Result<Self, AnalyzeError>
    where
        I: IntoIterator<Item = ComplaintRecord>,
    {
        let mut items = Vec::new();
        let mut skipped = 0usize;

        for record in records {
            if record.is_closed() {
                skipped += 1;
                continue;
            }
            let Some(text) = record.narrative() else {
                skipped += 1;
                continue;
            };

            let Some(analysis) = engine.analyze(Some(text)).await? else {
                continue;
            };

            debug!(id = ?record.id, urgency = %analysis.urgency, "complaint queued");
            items.push(UrgentComplaint {
                snippet: text.chars().take(SNIPPET_CHARS).collect(),
                priority: analysis.urgency,
                analysis,
                id: record.id,
                category: record.category,
                submission_date: record.submission_date,
            });
        }

        // Stable: equal tiers keep input order.
        items.sort_by_key(|item| item.priority.rank());

        let queue = Self { items };
        info!(%queue, skipped, "urgent queue built");
        Ok(queue)
    }

    /// Queued complaints in display order.
    pub fn items(&self) -> &[UrgentComplaint] {
        &self.items
    }

    /// Iterates over queued complaints in display order.
    pub fn iter(&self) -> impl Iterator<Item = &UrgentComplaint> + '_ {
        self.items.iter()
    }

    /// Number of queued complaints.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing is urgent.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Tallies the queue by tier.
    pub fn counts(&self) -> QueueCounts {
        self.items
            .iter()
            .fold(QueueCounts::default(), |mut counts, item| {
                match item.priority {
                    Urgency::Critical => counts.critical += 1,
                    Urgency::High => counts.high += 1,
                }
                counts
            })
    }

    /// Consumes the queue, returning its items.
    pub fn into_items(self) -> Vec<UrgentComplaint> {
        self.items
    }
}

impl fmt::Display for UrgentQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts = self.counts();
        write!(
            f,
            "{} urgent ({} critical, {} high)",
            self.len(),
            counts.critical,
            counts.high
        )
    }
}
