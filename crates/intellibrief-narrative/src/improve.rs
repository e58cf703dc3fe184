//! Re-derives the narrative of a stored brief from its embedded collections.
//!
//! Nothing is re-collected. The summary, pitch angle and warnings are
//! rewritten around three coarse readings of the stored data: market
//! context, hiring context and emotional context.

use intellibrief_core::{Brief, NarrativeUpdate, NewsItem};

pub const IMPROVED_MESSAGE: &str = "Brief improved with deeper insights and sharper positioning.";

const ACTIVE_HIRING_THRESHOLD: usize = 5;
const POSITIVE_NEWS: &[&str] = &["growth", "funding", "expansion", "partnership"];
const NEGATIVE_NEWS: &[&str] = &["layoffs", "decline", "loss"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketContext {
    PositiveMomentum,
    Challenging,
    Stable,
}

impl MarketContext {
    #[must_use]
    pub fn text(self) -> &'static str {
        match self {
            MarketContext::PositiveMomentum => "positive momentum",
            MarketContext::Challenging => "challenging market conditions",
            MarketContext::Stable => "stable market position",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HiringContext {
    Aggressive,
    Selective,
    Maintaining,
}

impl HiringContext {
    #[must_use]
    pub fn text(self) -> &'static str {
        match self {
            HiringContext::Aggressive => "aggressive expansion phase",
            HiringContext::Selective => "selective growth mode",
            HiringContext::Maintaining => "maintaining current team size",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmotionalContext {
    Optimistic,
    Cautious,
    Balanced,
}

impl EmotionalContext {
    #[must_use]
    pub fn from_emotion(emotion: &str) -> Self {
        match emotion {
            "joy" | "trust" => EmotionalContext::Optimistic,
            "fear" | "sadness" => EmotionalContext::Cautious,
            _ => EmotionalContext::Balanced,
        }
    }

    #[must_use]
    pub fn text(self) -> &'static str {
        match self {
            EmotionalContext::Optimistic => "optimistic outlook",
            EmotionalContext::Cautious => "cautious approach",
            EmotionalContext::Balanced => "balanced perspective",
        }
    }
}

fn headlines_mention(news: &[NewsItem], words: &[&str]) -> bool {
    news.iter().any(|item| {
        let title = item.title.to_lowercase();
        words.iter().any(|w| title.contains(w))
    })
}

/// The readings `improve` derives from a stored brief.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Readings {
    pub market: MarketContext,
    pub hiring: HiringContext,
    pub emotional: EmotionalContext,
    pub positive_news: bool,
    pub negative_news: bool,
    pub actively_hiring: bool,
}

impl Readings {
    #[must_use]
    pub fn from_brief(brief: &Brief) -> Self {
        let content = &brief.content;
        let positive_news = headlines_mention(&content.news, POSITIVE_NEWS);
        let negative_news = headlines_mention(&content.news, NEGATIVE_NEWS);
        let job_count = content.job_signals.len();
        let actively_hiring = job_count > ACTIVE_HIRING_THRESHOLD;

        let market = if positive_news {
            MarketContext::PositiveMomentum
        } else if negative_news {
            MarketContext::Challenging
        } else {
            MarketContext::Stable
        };
        let hiring = if actively_hiring {
            HiringContext::Aggressive
        } else if job_count > 0 {
            HiringContext::Selective
        } else {
            HiringContext::Maintaining
        };
        let emotional = content
            .tone_insights
            .emotion
            .as_deref()
            .map_or(EmotionalContext::Balanced, EmotionalContext::from_emotion);

        Self {
            market,
            hiring,
            emotional,
            positive_news,
            negative_news,
            actively_hiring,
        }
    }
}

fn sentences(parts: &[Option<String>]) -> String {
    parts
        .iter()
        .flatten()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Rewritten summary, pitch angle and warnings for `brief`.
///
/// Subject line and signal tag are left untouched.
#[must_use]
pub fn improve(brief: &Brief) -> NarrativeUpdate {
    let content = &brief.content;
    let r = Readings::from_brief(brief);
    let company = content.company_name.as_str();
    let sentiment = content.tone_insights.sentiment_or_neutral();
    let emotion = content.tone_insights.emotion.as_deref().unwrap_or("neutral");

    let stock_line = content.stock_data.is_public().then(|| {
        let trend = if content.stock_data.is_up() {
            "positive"
        } else {
            "mixed"
        };
        format!("Financial indicators show {trend} performance trends.")
    });
    let pace = if r.actively_hiring {
        "rapid scaling"
    } else {
        "steady operations"
    };

    let summary = sentences(&[
        Some(format!(
            "{company} demonstrates {sentiment} market sentiment with {} based on recent \
             intelligence.",
            r.emotional.text()
        )),
        Some(format!(
            "Current {} combined with {} suggests strategic opportunities for partnership.",
            r.market.text(),
            r.hiring.text()
        )),
        stock_line,
        Some(format!(
            "The company's {} recent news mentions and {} active positions indicate {pace}, \
             creating optimal timing for strategic engagement.",
            content.news.len(),
            content.job_signals.len()
        )),
    ]);

    let pitch_angle = sentences(&[
        Some(format!(
            "Strategic timing analysis reveals {company} is in a {} with {}, making this an \
             ideal moment for {}.",
            r.hiring.text(),
            r.emotional.text(),
            content.user_intent
        )),
        r.positive_news
            .then(|| "Recent positive developments create momentum for new partnerships.".to_string()),
        Some(
            if r.actively_hiring {
                "Their active hiring across multiple departments signals readiness for solutions \
                 that support scaling operations."
            } else {
                "Their selective approach to growth indicates focus on high-impact partnerships."
            }
            .to_string(),
        ),
        Some(format!(
            "The {sentiment} sentiment and {emotion} emotional tone suggest receptiveness to \
             strategic initiatives that align with their current trajectory."
        )),
    ]);

    let what_not_to_pitch = sentences(&[
        Some(format!(
            "Avoid approaches that contradict {company}'s current {} and {}.",
            r.emotional.text(),
            r.hiring.text()
        )),
        Some(
            if r.actively_hiring {
                "Don't pitch cost-cutting or downsizing solutions during their expansion phase."
            } else {
                "Avoid aggressive scaling solutions if they're in maintenance mode."
            }
            .to_string(),
        ),
        r.negative_news.then(|| {
            "Be sensitive to recent challenges and avoid highlighting competitive threats."
                .to_string()
        }),
        Some(format!(
            "Don't ignore their {sentiment} market sentiment or {emotion} emotional state. Avoid \
             generic pitches that don't acknowledge their specific {} and strategic position in \
             the current market environment.",
            r.market.text()
        )),
    ]);

    NarrativeUpdate {
        summary: Some(summary),
        pitch_angle: Some(pitch_angle),
        what_not_to_pitch: Some(what_not_to_pitch),
        ..NarrativeUpdate::default()
    }
}

#[cfg(test)]
#[path = "improve_test.rs"]
mod tests;
