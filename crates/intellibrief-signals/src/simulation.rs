//! Placeholder data used when a provider is unconfigured or unavailable.
//!
//! All randomness comes from the caller's RNG so a seeded RNG reproduces the
//! same output.

use chrono::{DateTime, Duration, Utc};
use intellibrief_core::{
    EmotionScore, JobSignal, NewsItem, PricePoint, Sentiment, StockData, ToneInsights,
};
use rand::Rng;

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

const MOCK_ROLES: &[&str] = &[
    "Senior Software Engineer",
    "VP of Engineering",
    "Product Manager",
    "DevOps Engineer",
    "Sales Director",
];

const MOCK_LOCATIONS: &[&str] = &[
    "San Francisco, CA",
    "New York, NY",
    "Remote",
    "Seattle, WA",
    "Austin, TX",
];

/// Fallback emotion labels, in the order they are reported.
pub const FALLBACK_EMOTIONS: &[&str] = &[
    "joy",
    "trust",
    "anticipation",
    "surprise",
    "fear",
    "sadness",
];

fn slug(company: &str) -> String {
    company
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

fn days_ago<R: Rng>(rng: &mut R, now: DateTime<Utc>, max_days: i64) -> DateTime<Utc> {
    now - Duration::milliseconds(rng.random_range(0..max_days * MS_PER_DAY))
}

/// Two fixed articles: an AI initiative announcement and a funding round.
pub fn mock_news<R: Rng>(company: &str, rng: &mut R, now: DateTime<Utc>) -> Vec<NewsItem> {
    let slug = slug(company);
    vec![
        NewsItem {
            title: format!("{company} announces strategic AI integration initiative"),
            description: format!(
                "{company} has unveiled comprehensive AI transformation plans focusing on \
                 workflow automation and customer experience enhancement."
            ),
            url: format!("https://example.com/news/{slug}"),
            published_at: days_ago(rng, now, 7).to_rfc3339(),
            source: "TechCrunch".to_string(),
            source_favicon: Some("https://techcrunch.com/favicon.ico".to_string()),
        },
        NewsItem {
            title: format!("{company} secures Series B funding for global expansion"),
            description: "The company raised $50M to accelerate product development and \
                          international market penetration."
                .to_string(),
            url: format!("https://example.com/funding/{slug}"),
            published_at: days_ago(rng, now, 14).to_rfc3339(),
            source: "VentureBeat".to_string(),
            source_favicon: Some("https://venturebeat.com/favicon.ico".to_string()),
        },
    ]
}

/// One posting per mock role at a random location.
pub fn mock_jobs<R: Rng>(company: &str, rng: &mut R, now: DateTime<Utc>) -> Vec<JobSignal> {
    MOCK_ROLES
        .iter()
        .map(|role| {
            let location = MOCK_LOCATIONS[rng.random_range(0..MOCK_LOCATIONS.len())];
            let low = rng.random_range(100..200);
            let high = rng.random_range(150..250);
            JobSignal {
                title: (*role).to_string(),
                company: company.to_string(),
                location: location.to_string(),
                posted_date: days_ago(rng, now, 30).to_rfc3339(),
                description: format!(
                    "Join our growing team as a {role}. We're looking for talented individuals \
                     to help build scalable solutions and drive innovation."
                ),
                salary: Some(format!("${low}k - ${high}k")),
            }
        })
        .collect()
}

/// Price, signed change, 30 daily closes, market cap and volume for `ticker`.
pub fn simulate_stock<R: Rng>(ticker: &str, rng: &mut R, now: DateTime<Utc>) -> StockData {
    let base_price: f64 = rng.random_range(50.0..250.0);
    let change: f64 = rng.random_range(-5.0..5.0);
    let change_percent = change / base_price * 100.0;

    let today = now.date_naive();
    let price_history = (0..30)
        .map(|i| PricePoint {
            date: today - Duration::days(29 - i),
            value: base_price + rng.random_range(-10.0..10.0),
        })
        .collect();

    let sign = if change >= 0.0 { "+" } else { "" };
    let market_cap: f64 = rng.random_range(100.0..600.0);
    let volume: f64 = rng.random_range(10.0..60.0);

    StockData {
        ticker: Some(ticker.to_string()),
        current_price: Some(format!("${base_price:.2}")),
        price_change: Some(format!("{sign}{change:.2} ({change_percent:.2}%)")),
        price_history,
        market_cap: Some(format!("${market_cap:.1}B")),
        volume: Some(format!("{volume:.1}M")),
    }
}

/// Random emotion distribution whose dominant emotion always scores highest.
///
/// The dominant emotion scores in `[0.7, 1.0)`, every other in `[0, 0.4)`.
pub fn mock_tone<R: Rng>(rng: &mut R) -> ToneInsights {
    let primary = FALLBACK_EMOTIONS[rng.random_range(0..FALLBACK_EMOTIONS.len())];
    let sentiment = Sentiment::from_emotion(primary);

    let emotions = FALLBACK_EMOTIONS
        .iter()
        .map(|name| EmotionScore {
            name: (*name).to_string(),
            score: if *name == primary {
                rng.random_range(0.7..1.0)
            } else {
                rng.random_range(0.0..0.4)
            },
        })
        .collect();

    ToneInsights {
        emotion: Some(primary.to_string()),
        confidence: Some(rng.random_range(0.6..1.0)),
        mood: Some(sentiment.as_str().to_string()),
        sentiment: Some(sentiment),
        emotions,
    }
}
