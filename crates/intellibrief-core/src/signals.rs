//! Normalized records produced by the signal collectors.
//!
//! Every struct here serializes with camelCase keys because the records are
//! embedded verbatim in persisted briefs and returned to API callers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// News
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub url: String,
    /// Provider-formatted publication timestamp, kept as the source sent it.
    pub published_at: String,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_favicon: Option<String>,
}

// ---------------------------------------------------------------------------
// Jobs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSignal {
    pub title: String,
    pub company: String,
    pub location: String,
    pub posted_date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
}

/// Hiring department a posting is bucketed into for trend reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    Engineering,
    #[serde(rename = "Data/AI")]
    DataAi,
    Product,
    Sales,
    Marketing,
    Design,
    DevOps,
    Other,
}

/// Title keywords checked in order; the first matching row wins.
const DEPARTMENT_RULES: &[(&[&str], Department)] = &[
    (&["engineer", "developer", "architect"], Department::Engineering),
    (&["data", "ai", "ml"], Department::DataAi),
    (&["product", "pm"], Department::Product),
    (&["sales", "account"], Department::Sales),
    (&["marketing", "growth"], Department::Marketing),
    (&["design", "ux", "ui"], Department::Design),
    (&["devops", "sre", "infrastructure"], Department::DevOps),
];

impl Department {
    pub const ALL: [Department; 8] = [
        Department::Engineering,
        Department::DataAi,
        Department::Product,
        Department::Sales,
        Department::Marketing,
        Department::Design,
        Department::DevOps,
        Department::Other,
    ];

    #[must_use]
    pub fn from_title(title: &str) -> Self {
        let title = title.to_lowercase();
        DEPARTMENT_RULES
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| title.contains(k)))
            .map_or(Department::Other, |(_, dept)| *dept)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Department::Engineering => "Engineering",
            Department::DataAi => "Data/AI",
            Department::Product => "Product",
            Department::Sales => "Sales",
            Department::Marketing => "Marketing",
            Department::Design => "Design",
            Department::DevOps => "DevOps",
            Department::Other => "Other",
        }
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl JobSignal {
    /// Department derived from the posting title. Not persisted.
    #[must_use]
    pub fn department(&self) -> Department {
        Department::from_title(&self.title)
    }

    /// City portion of the location (text before the first comma).
    #[must_use]
    pub fn city(&self) -> &str {
        self.location
            .split(',')
            .next()
            .unwrap_or_default()
            .trim()
    }
}

/// Open roles per department, largest first. Empty departments are omitted
/// and ties keep [`Department::ALL`] order.
#[must_use]
pub fn department_breakdown(jobs: &[JobSignal]) -> Vec<(Department, usize)> {
    let mut counts: Vec<(Department, usize)> = Department::ALL
        .iter()
        .map(|dept| (*dept, jobs.iter().filter(|j| j.department() == *dept).count()))
        .filter(|(_, n)| *n > 0)
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

// ---------------------------------------------------------------------------
// Tech stack
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    /// Tier for a keyword seen in `count` job postings.
    ///
    /// Returns `None` for zero occurrences.
    #[must_use]
    pub fn from_count(count: usize) -> Option<Self> {
        match count {
            0 => None,
            1 => Some(Confidence::Low),
            2 => Some(Confidence::Medium),
            _ => Some(Confidence::High),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TechCategory {
    Frontend,
    Backend,
    Language,
    Cloud,
    DevOps,
    Database,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechStackItem {
    pub name: String,
    pub confidence: Confidence,
    pub source: String,
    pub category: TechCategory,
    pub first_detected: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Stock
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Market snapshot for a publicly traded company.
///
/// `StockData::default()` is the "no public stock data" value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_change: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub price_history: Vec<PricePoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
}

impl StockData {
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.ticker.is_some()
    }

    /// True when the signed change string reports a gain.
    #[must_use]
    pub fn is_up(&self) -> bool {
        self.price_change.as_deref().is_some_and(|c| c.contains('+'))
    }
}

// ---------------------------------------------------------------------------
// Tone
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Polarity implied by a single emotion label.
    #[must_use]
    pub fn from_emotion(emotion: &str) -> Self {
        match emotion {
            "joy" | "trust" => Sentiment::Positive,
            "fear" | "sadness" | "anger" | "disgust" => Sentiment::Negative,
            _ => Sentiment::Neutral,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }

    /// Capitalized label, e.g. `Positive`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionScore {
    pub name: String,
    pub score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToneInsights {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    #[serde(default)]
    pub emotions: Vec<EmotionScore>,
}

impl ToneInsights {
    /// Sentiment, or neutral when the analysis produced none.
    #[must_use]
    pub fn sentiment_or_neutral(&self) -> Sentiment {
        self.sentiment.unwrap_or(Sentiment::Neutral)
    }
}

// ---------------------------------------------------------------------------
// Aggregate
// ---------------------------------------------------------------------------

/// What kind of evidence a key signal represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    Funding,
    Launch,
    Partnership,
    AiFocus,
    AggressiveHiring,
    SelectiveExpansion,
    EngineeringScaling,
    GtmExpansion,
    MarketMomentum,
    ModernTechStack,
}

impl SignalKind {
    /// Headcount growth: aggressive hiring or engineering scale-up.
    #[must_use]
    pub fn is_scaling(self) -> bool {
        matches!(self, SignalKind::AggressiveHiring | SignalKind::EngineeringScaling)
    }

    /// Any hiring-driven expansion, including go-to-market hiring.
    #[must_use]
    pub fn is_expansion(self) -> bool {
        matches!(
            self,
            SignalKind::AggressiveHiring | SignalKind::SelectiveExpansion | SignalKind::GtmExpansion
        )
    }

    #[must_use]
    pub fn is_capital(self) -> bool {
        matches!(self, SignalKind::Funding | SignalKind::Partnership)
    }
}

/// One human-readable signal together with its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySignal {
    pub kind: SignalKind,
    pub text: String,
}

impl KeySignal {
    #[must_use]
    pub fn new(kind: SignalKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

impl std::fmt::Display for KeySignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Which categories were produced by the simulator rather than a live API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationFlags {
    pub news: bool,
    pub jobs: bool,
    pub stock: bool,
    pub tone: bool,
}

/// Everything gathered about one target company in a single pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalBundle {
    pub news: Vec<NewsItem>,
    pub jobs: Vec<JobSignal>,
    pub tech_stack: Vec<TechStackItem>,
    pub stock: StockData,
    pub tone: ToneInsights,
    /// Up to four key signals, highest priority first.
    pub key_signals: Vec<KeySignal>,
    pub simulated: SimulationFlags,
}

/// The seller's own company, used to personalize the narrative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCompany {
    pub name: String,
    #[serde(default)]
    pub industry: String,
    pub product: String,
    pub value_proposition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default)]
    pub goals: String,
}

#[cfg(test)]
#[path = "signals_test.rs"]
mod tests;
