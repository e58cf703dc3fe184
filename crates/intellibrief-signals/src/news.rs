//! newsdata.io news-search collector.

use chrono::{DateTime, Utc};
use intellibrief_core::NewsItem;
use rand::Rng;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::SignalError;
use crate::simulation::mock_news;
use crate::source::{build_client, endpoint, normalise_base_url, Collected, DataSource};

const DEFAULT_BASE_URL: &str = "https://newsdata.io/";
const MAX_ARTICLES: usize = 10;

#[derive(Debug, Deserialize)]
struct NewsResponse {
    results: Option<Vec<NewsArticle>>,
}

#[derive(Debug, Deserialize)]
struct NewsArticle {
    title: Option<String>,
    description: Option<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    source_id: Option<String>,
}

fn favicon_for(source: &str) -> String {
    format!("https://www.google.com/s2/favicons?domain={source}")
}

pub struct NewsCollector {
    client: Client,
    source: DataSource,
    base_url: Url,
}

impl NewsCollector {
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

    /// Recent articles about `company`, or the two mock articles.
    pub async fn collect<R: Rng + Send>(
        &self,
        company: &str,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Collected<Vec<NewsItem>> {
        let DataSource::Live { api_key } = &self.source else {
            tracing::info!(company, source = "news", "no API key configured, using simulated news");
            return Collected::simulated(mock_news(company, rng, now));
        };

        match self.fetch(api_key, company).await {
            Ok(items) => {
                tracing::debug!(company, source = "news", count = items.len(), "collected news");
                Collected::live(items)
            }
            Err(e) => {
                tracing::warn!(
                    company,
                    source = "news",
                    error = %e,
                    "news fetch failed, using simulated news"
                );
                Collected::simulated(mock_news(company, rng, now))
            }
        }
    }

    async fn fetch(&self, api_key: &str, company: &str) -> Result<Vec<NewsItem>, SignalError> {
        let mut url = endpoint(&self.base_url, "api/1/news")?;
        url.query_pairs_mut()
            .append_pair("apikey", api_key)
            .append_pair("q", company)
            .append_pair("language", "en")
            .append_pair("size", &MAX_ARTICLES.to_string());

        let body: serde_json::Value = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let response: NewsResponse =
            serde_json::from_value(body).map_err(|e| SignalError::Deserialize {
                context: format!("news search for '{company}'"),
                source: e,
            })?;

        let articles = response.results.ok_or(SignalError::EmptyResponse("news"))?;

        Ok(articles
            .into_iter()
            .filter_map(|article| {
                let title = article.title.filter(|t| !t.trim().is_empty())?;
                let url = article.link?;
                let source = article.source_id.unwrap_or_default();
                let source_favicon = (!source.is_empty()).then(|| favicon_for(&source));
                Some(NewsItem {
                    title,
                    description: article.description.unwrap_or_default(),
                    url,
                    published_at: article.pub_date.unwrap_or_default(),
                    source,
                    source_favicon,
                })
            })
            .take(MAX_ARTICLES)
            .collect())
    }
}
