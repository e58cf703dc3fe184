//! Twinword emotion-analysis collector.

use std::collections::HashMap;

use intellibrief_core::{EmotionScore, NewsItem, Sentiment, ToneInsights};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use rand::Rng;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::SignalError;
use crate::simulation::mock_tone;
use crate::source::{build_client, endpoint, normalise_base_url, Collected, DataSource};

const DEFAULT_BASE_URL: &str = "https://twinword-emotion-analysis-v1.p.rapidapi.com/";
const RAPIDAPI_HOST: &str = "twinword-emotion-analysis-v1.p.rapidapi.com";
const MAX_EMOTIONS: usize = 6;
const HEADLINES_ANALYZED: usize = 3;

#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    emotions_detected: Option<Vec<String>>,
    #[serde(default)]
    emotion_scores: HashMap<String, f64>,
    mood: Option<String>,
    sentiment: Option<String>,
}

/// Labels outside positive, negative and neutral read as absent.
fn known_sentiment(label: &str) -> Option<Sentiment> {
    match label.trim().to_ascii_lowercase().as_str() {
        "positive" => Some(Sentiment::Positive),
        "negative" => Some(Sentiment::Negative),
        "neutral" => Some(Sentiment::Neutral),
        _ => None,
    }
}

impl AnalyzeResponse {
    fn into_insights(self) -> Result<ToneInsights, SignalError> {
        let detected = self
            .emotions_detected
            .ok_or(SignalError::EmptyResponse("tone"))?;

        let mut emotions: Vec<EmotionScore> = self
            .emotion_scores
            .into_iter()
            .map(|(name, score)| EmotionScore { name, score })
            .collect();
        emotions.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.name.cmp(&b.name)));
        emotions.truncate(MAX_EMOTIONS);

        let emotion = detected
            .into_iter()
            .next()
            .or_else(|| emotions.first().map(|e| e.name.clone()));
        let confidence = emotion
            .as_deref()
            .and_then(|name| emotions.iter().find(|e| e.name == name))
            .map(|e| e.score);
        let derived = emotion.as_deref().map(Sentiment::from_emotion);
        let sentiment = self.sentiment.as_deref().and_then(known_sentiment).or(derived);
        let mood = self
            .mood
            .or_else(|| derived.map(|s| s.as_str().to_string()));

        Ok(ToneInsights {
            emotion,
            confidence,
            mood,
            sentiment,
            emotions,
        })
    }
}

/// Text submitted for analysis: the intent followed by the first three headlines.
#[must_use]
pub fn analysis_text(user_intent: &str, news: &[NewsItem]) -> String {
    std::iter::once(user_intent)
        .chain(news.iter().take(HEADLINES_ANALYZED).map(|n| n.title.as_str()))
        .collect::<Vec<_>>()
        .join(" ")
}

pub struct ToneCollector {
    client: Client,
    source: DataSource,
    base_url: Url,
}

impl ToneCollector {
    /// # Errors
    ///
    /// Returns [`SignalError::Http`] if the HTTP client cannot be built.
    pub fn new(source: DataSource, user_agent: &str) -> Result<Self, SignalError> {
        Self::with_base_url(source, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a collector against a custom base URL (for wiremock tests).
    ///
    /// # Errors
    ///
    /// Returns [`SignalError::InvalidBaseUrl`] when `base_url` does not parse.
    pub fn with_base_url(
        source: DataSource,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, SignalError> {
        Ok(Self {
            client: build_client(user_agent)?,
            source,
            base_url: normalise_base_url(base_url)?,
        })
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        self.source.is_live()
    }

    /// Emotion analysis of the intent plus recent headlines, or a random
    /// fallback distribution.
    pub async fn collect<R: Rng + Send>(
        &self,
        company: &str,
        user_intent: &str,
        news: &[NewsItem],
        rng: &mut R,
    ) -> Collected<ToneInsights> {
        let DataSource::Live { api_key } = &self.source else {
            tracing::info!(company, source = "tone", "no API key configured, using simulated tone");
            return Collected::simulated(mock_tone(rng));
        };

        let text = analysis_text(user_intent, news);
        match self.fetch(api_key, &text).await {
            Ok(tone) => {
                tracing::debug!(company, source = "tone", emotion = ?tone.emotion, "analyzed tone");
                Collected::live(tone)
            }
            Err(e) => {
                tracing::warn!(
                    company,
                    source = "tone",
                    error = %e,
                    "tone analysis failed, using simulated tone"
                );
                Collected::simulated(mock_tone(rng))
            }
        }
    }

    async fn fetch(&self, api_key: &str, text: &str) -> Result<ToneInsights, SignalError> {
        let url = endpoint(&self.base_url, "analyze/")?;
        let form = format!("text={}", utf8_percent_encode(text, NON_ALPHANUMERIC));

        let body: serde_json::Value = self
            .client
            .post(url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .header("X-RapidAPI-Key", api_key)
            .header("X-RapidAPI-Host", RAPIDAPI_HOST)
            .body(form)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let response: AnalyzeResponse =
            serde_json::from_value(body).map_err(|e| SignalError::Deserialize {
                context: "emotion analysis".to_string(),
                source: e,
            })?;

        response.into_insights()
    }
}
