//! Rule table that turns raw collections into short key-signal strings.
//!
//! Rules run in priority order and the output is truncated to
//! [`MAX_KEY_SIGNALS`], so earlier rules crowd out later ones.

use intellibrief_core::{JobSignal, KeySignal, NewsItem, SignalKind, StockData, TechStackItem};

pub const MAX_KEY_SIGNALS: usize = 4;

const LAUNCH_TITLE_WORDS: usize = 6;
const MODERN_TECH: &[&str] = &["React", "Node.js", "Python", "Kubernetes", "AWS", "TypeScript"];

/// A news rule fires when the lowercased title contains any keyword.
struct NewsRule {
    keywords: &'static [&'static str],
    kind: SignalKind,
    render: fn(&NewsItem) -> String,
}

fn funding(item: &NewsItem) -> String {
    format!("Secured funding round ({})", item.source)
}

fn launch(item: &NewsItem) -> String {
    let head: Vec<&str> = item.title.split_whitespace().take(LAUNCH_TITLE_WORDS).collect();
    format!("Launched new initiative: {}", head.join(" "))
}

fn partnership(_: &NewsItem) -> String {
    "Strategic partnership/acquisition activity".to_string()
}

fn ai_focus(_: &NewsItem) -> String {
    "AI product development focus".to_string()
}

/// Per-article rules, applied in this order to each article.
const NEWS_RULES: &[NewsRule] = &[
    NewsRule {
        keywords: &["funding", "raised", "series"],
        kind: SignalKind::Funding,
        render: funding,
    },
    NewsRule {
        keywords: &["launch", "announces"],
        kind: SignalKind::Launch,
        render: launch,
    },
    NewsRule {
        keywords: &["partnership", "acquisition"],
        kind: SignalKind::Partnership,
        render: partnership,
    },
    NewsRule {
        // Plain substring: "retail" or "chain" also count.
        keywords: &["ai", "artificial intelligence"],
        kind: SignalKind::AiFocus,
        render: ai_focus,
    },
];

const ENGINEERING_TITLES: &[&str] = &["engineer", "developer"];
const SALES_TITLES: &[&str] = &["sales", "account", "business development"];

fn count_titles(jobs: &[JobSignal], keywords: &[&str]) -> usize {
    jobs.iter()
        .filter(|job| {
            let title = job.title.to_lowercase();
            keywords.iter().any(|k| title.contains(k))
        })
        .count()
}

fn news_signals(news: &[NewsItem]) -> impl Iterator<Item = KeySignal> + '_ {
    news.iter().flat_map(|item| {
        let title = item.title.to_lowercase();
        NEWS_RULES
            .iter()
            .filter(move |rule| rule.keywords.iter().any(|k| title.contains(k)))
            .map(move |rule| KeySignal::new(rule.kind, (rule.render)(item)))
    })
}

fn hiring_signals(jobs: &[JobSignal]) -> Vec<KeySignal> {
    let mut out = Vec::new();
    let total = jobs.len();
    if total > 10 {
        out.push(KeySignal::new(
            SignalKind::AggressiveHiring,
            format!("Aggressive hiring: {total}+ open positions"),
        ));
    } else if total > 5 {
        out.push(KeySignal::new(
            SignalKind::SelectiveExpansion,
            format!("Selective expansion: {total} strategic hires"),
        ));
    }

    let engineering = count_titles(jobs, ENGINEERING_TITLES);
    if engineering > 5 {
        out.push(KeySignal::new(
            SignalKind::EngineeringScaling,
            format!("Engineering team scaling: {engineering} technical roles"),
        ));
    }

    let sales = count_titles(jobs, SALES_TITLES);
    if sales > 3 {
        out.push(KeySignal::new(
            SignalKind::GtmExpansion,
            format!("GTM expansion: {sales} sales positions"),
        ));
    }
    out
}

fn market_signal(stock: &StockData) -> Option<KeySignal> {
    stock
        .price_change
        .as_deref()
        .filter(|_| stock.is_up())
        .map(|change| {
            KeySignal::new(
                SignalKind::MarketMomentum,
                format!("Positive market performance: {change}"),
            )
        })
}

fn tech_signal(tech: &[TechStackItem]) -> Option<KeySignal> {
    let modern = tech
        .iter()
        .filter(|t| MODERN_TECH.contains(&t.name.as_str()))
        .count();
    (modern > 5).then(|| {
        KeySignal::new(
            SignalKind::ModernTechStack,
            format!("Modern tech stack: {modern} cutting-edge technologies"),
        )
    })
}

/// The first four key signals, highest priority first.
///
/// Repeated signals are kept, so two partnership headlines take two slots.
#[must_use]
pub fn extract_key_signals(
    news: &[NewsItem],
    jobs: &[JobSignal],
    stock: &StockData,
    tech: &[TechStackItem],
) -> Vec<KeySignal> {
    news_signals(news)
        .chain(hiring_signals(jobs))
        .chain(market_signal(stock))
        .chain(tech_signal(tech))
        .take(MAX_KEY_SIGNALS)
        .collect()
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
