//! JSearch (RapidAPI) job-postings collector.

use chrono::{DateTime, Utc};
use intellibrief_core::JobSignal;
use rand::Rng;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::SignalError;
use crate::simulation::mock_jobs;
use crate::source::{build_client, endpoint, normalise_base_url, Collected, DataSource};

const DEFAULT_BASE_URL: &str = "https://jsearch.p.rapidapi.com/";
const RAPIDAPI_HOST: &str = "jsearch.p.rapidapi.com";
const MAX_POSTINGS: usize = 10;
const DESCRIPTION_CHARS: usize = 200;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    data: Option<Vec<Posting>>,
}

#[derive(Debug, Deserialize)]
struct Posting {
    job_title: Option<String>,
    employer_name: Option<String>,
    job_city: Option<String>,
    job_state: Option<String>,
    job_posted_at_datetime_utc: Option<String>,
    job_description: Option<String>,
    job_min_salary: Option<f64>,
    job_max_salary: Option<f64>,
}

/// Formats a whole-dollar amount with comma thousands separators.
#[allow(clippy::cast_possible_truncation)]
fn format_thousands(amount: f64) -> String {
    let whole = amount.round() as i64;
    let digits = whole.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if whole < 0 {
        out.insert(0, '-');
    }
    out
}

fn salary_range(min: Option<f64>, max: Option<f64>) -> Option<String> {
    match (min, max) {
        (Some(min), Some(max)) if min > 0.0 && max > 0.0 => Some(format!(
            "${} - ${}",
            format_thousands(min),
            format_thousands(max)
        )),
        _ => None,
    }
}

fn location(city: Option<String>, state: Option<String>) -> String {
    let parts: Vec<String> = [city, state]
        .into_iter()
        .flatten()
        .filter(|p| !p.trim().is_empty())
        .collect();
    if parts.is_empty() {
        "Remote".to_string()
    } else {
        parts.join(", ")
    }
}

fn truncate_description(text: Option<String>) -> String {
    match text {
        Some(text) if !text.is_empty() => {
            let head: String = text.chars().take(DESCRIPTION_CHARS).collect();
            format!("{head}...")
        }
        _ => String::new(),
    }
}

impl Posting {
    fn into_signal(self, company: &str) -> Option<JobSignal> {
        let title = self.job_title.filter(|t| !t.trim().is_empty())?;
        Some(JobSignal {
            title,
            company: self.employer_name.unwrap_or_else(|| company.to_string()),
            location: location(self.job_city, self.job_state),
            posted_date: self.job_posted_at_datetime_utc.unwrap_or_default(),
            description: truncate_description(self.job_description),
            salary: salary_range(self.job_min_salary, self.job_max_salary),
        })
    }
}

pub struct JobsCollector {
    client: Client,
    source: DataSource,
    base_url: Url,
}

impl JobsCollector {
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

    /// Open postings at `company`, or the five-role mock list.
    pub async fn collect<R: Rng + Send>(
        &self,
        company: &str,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Collected<Vec<JobSignal>> {
        let DataSource::Live { api_key } = &self.source else {
            tracing::info!(company, source = "jobs", "no API key configured, using simulated jobs");
            return Collected::simulated(mock_jobs(company, rng, now));
        };

        match self.fetch(api_key, company).await {
            Ok(jobs) => {
                tracing::debug!(company, source = "jobs", count = jobs.len(), "collected jobs");
                Collected::live(jobs)
            }
            Err(e) => {
                tracing::warn!(
                    company,
                    source = "jobs",
                    error = %e,
                    "job search failed, using simulated jobs"
                );
                Collected::simulated(mock_jobs(company, rng, now))
            }
        }
    }

    async fn fetch(&self, api_key: &str, company: &str) -> Result<Vec<JobSignal>, SignalError> {
        let mut url = endpoint(&self.base_url, "search")?;
        url.query_pairs_mut()
            .append_pair("query", company)
            .append_pair("page", "1")
            .append_pair("num_pages", "1");

        let body: serde_json::Value = self
            .client
            .get(url)
            .header("X-RapidAPI-Key", api_key)
            .header("X-RapidAPI-Host", RAPIDAPI_HOST)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let response: SearchResponse =
            serde_json::from_value(body).map_err(|e| SignalError::Deserialize {
                context: format!("job search for '{company}'"),
                source: e,
            })?;

        let postings = response.data.ok_or(SignalError::EmptyResponse("jobs"))?;

        Ok(postings
            .into_iter()
            .take(MAX_POSTINGS)
            .filter_map(|p| p.into_signal(company))
            .collect())
    }
}
