use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::signals::{JobSignal, NewsItem, SimulationFlags, StockData, TechStackItem, ToneInsights};

/// Opaque caller identity supplied by the upstream identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Returns `None` for blank input so an empty header never scopes a query.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The five generated narrative fields of a brief.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeFields {
    pub summary: String,
    pub pitch_angle: String,
    pub subject_line: String,
    pub what_not_to_pitch: String,
    pub signal_tag: String,
}

/// Partial replacement of narrative fields; `None` leaves a field as stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NarrativeUpdate {
    pub summary: Option<String>,
    pub pitch_angle: Option<String>,
    pub subject_line: Option<String>,
    pub what_not_to_pitch: Option<String>,
    pub signal_tag: Option<String>,
}

impl NarrativeUpdate {
    pub fn apply_to(self, fields: &mut NarrativeFields) {
        if let Some(v) = self.summary {
            fields.summary = v;
        }
        if let Some(v) = self.pitch_angle {
            fields.pitch_angle = v;
        }
        if let Some(v) = self.subject_line {
            fields.subject_line = v;
        }
        if let Some(v) = self.what_not_to_pitch {
            fields.what_not_to_pitch = v;
        }
        if let Some(v) = self.signal_tag {
            fields.signal_tag = v;
        }
    }
}

/// Counts and availability of each intelligence category behind a brief.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntelligenceSources {
    pub news: usize,
    pub jobs: usize,
    pub technologies: usize,
    pub stock_data: bool,
    pub tone_analysis: bool,
    pub simulated: SimulationFlags,
}

/// Brief content before the store assigns identity and timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBrief {
    pub company_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub user_intent: String,
    #[serde(flatten)]
    pub narrative: NarrativeFields,
    pub news: Vec<NewsItem>,
    pub job_signals: Vec<JobSignal>,
    /// Technology names only; full detections live in `tech_stack_data`.
    pub tech_stack: Vec<String>,
    pub tech_stack_data: Vec<TechStackItem>,
    pub stock_data: StockData,
    pub tone_insights: ToneInsights,
    pub intelligence_sources: IntelligenceSources,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_logo: Option<String>,
    pub hiring_trends: String,
    pub news_trends: String,
}

/// A persisted strategic brief.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brief {
    pub id: Uuid,
    pub user_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub content: NewBrief,
}

impl Brief {
    /// True when `owner` may see this brief. `None` means unscoped access.
    #[must_use]
    pub fn visible_to(&self, owner: Option<&UserId>) -> bool {
        match owner {
            None => true,
            Some(owner) => self.user_id.as_ref() == Some(owner),
        }
    }
}
