//! Named inference rules that map key signals to sales talking points.
//!
//! Each rule is a pure function over the collected signals. Every list rule
//! has a deterministic default so rendered sections are never empty.

use intellibrief_core::{JobSignal, KeySignal, Sentiment, SignalKind, TechStackItem, ToneInsights, UserCompany};

const MAX_PRIORITIES: usize = 3;
const MAX_PAIN_POINTS: usize = 3;
const MAX_PERSONAS: usize = 2;
const MAX_TAGLINE_THEMES: usize = 3;

pub const DEFAULT_PRIORITIES: &str = "Operational efficiency and sustainable growth";
pub const DEFAULT_TAGLINE: &str = "Strategic Growth | Operational Excellence | Market Leadership";
pub const DEFAULT_THEMES: &[&str] = &[
    "Operational efficiency",
    "Strategic alignment",
    "Growth enablement",
];
pub const DEFAULT_PAIN_POINT: &str = "Balancing growth investments against operational efficiency";
pub const DEFAULT_PERSONA: &str = "VP of Operations";
pub const GENERIC_WARNING: &str = "Refrain from generic productivity claims — they demand \
                                   outcome-based, strategic messaging";

fn any(signals: &[KeySignal], pred: impl Fn(SignalKind) -> bool) -> bool {
    signals.iter().any(|s| pred(s.kind))
}

fn has(signals: &[KeySignal], kind: SignalKind) -> bool {
    any(signals, |k| k == kind)
}

fn is_technology(kind: SignalKind) -> bool {
    matches!(kind, SignalKind::AiFocus | SignalKind::ModernTechStack)
}

/// Lowercased alphanumeric words of a job title.
fn title_words(title: &str) -> Vec<String> {
    title
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

fn any_title(jobs: &[JobSignal], pred: impl Fn(&str, &[String]) -> bool) -> bool {
    jobs.iter().any(|job| {
        let lowered = job.title.to_lowercase();
        pred(&lowered, &title_words(&job.title))
    })
}

// ---------------------------------------------------------------------------
// Priorities
// ---------------------------------------------------------------------------

/// Up to three inferred company priorities.
#[must_use]
pub fn priorities(signals: &[KeySignal], tone: &ToneInsights) -> Vec<&'static str> {
    let rules: [(bool, &'static str); 5] = [
        (
            any(signals, SignalKind::is_expansion),
            "Scaling operations and team growth",
        ),
        (
            any(signals, is_technology),
            "Technology modernization and AI integration",
        ),
        (
            has(signals, SignalKind::GtmExpansion),
            "Go-to-market acceleration and revenue growth",
        ),
        (
            any(signals, SignalKind::is_capital),
            "Strategic partnerships and market expansion",
        ),
        (
            tone.sentiment == Some(Sentiment::Positive),
            "Capitalizing on positive momentum",
        ),
    ];

    rules
        .into_iter()
        .filter_map(|(hit, text)| hit.then_some(text))
        .take(MAX_PRIORITIES)
        .collect()
}

// ---------------------------------------------------------------------------
// Strategic angle
// ---------------------------------------------------------------------------

/// One or two sentences positioning the seller against the target's phase.
#[must_use]
pub fn strategic_angle(
    company: &str,
    user_intent: &str,
    user_company: Option<&UserCompany>,
    signals: &[KeySignal],
) -> String {
    let Some(seller) = user_company else {
        return format!(
            "Strategic timing optimal for {user_intent} based on current expansion signals and \
             market positioning."
        );
    };

    let phase = if has(signals, SignalKind::EngineeringScaling) {
        "scaling phase"
    } else if has(signals, SignalKind::AiFocus) {
        "AI transformation"
    } else {
        "growth trajectory"
    };

    // Engineering headcount growth sets the phase but not the need.
    let need = if has(signals, SignalKind::GtmExpansion) {
        "go-to-market acceleration needs"
    } else {
        "operational efficiency requirements"
    };

    format!(
        "{}'s {} aligns perfectly with {company}'s current {phase}. {} directly addresses their {need}.",
        seller.name, seller.product, seller.value_proposition
    )
}

// ---------------------------------------------------------------------------
// Pain points
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PainPoint {
    ScalingBottlenecks,
    QualityDuringExpansion,
    StackComplexity,
    InfrastructureScaling,
    AiIntegrationGaps,
}

impl PainPoint {
    #[must_use]
    pub fn text(self) -> &'static str {
        match self {
            PainPoint::ScalingBottlenecks => "Scaling bottlenecks as team grows rapidly",
            PainPoint::QualityDuringExpansion => {
                "Maintaining quality and consistency during expansion"
            }
            PainPoint::StackComplexity => "Technology stack complexity and integration challenges",
            PainPoint::InfrastructureScaling => "Infrastructure scaling and deployment efficiency",
            PainPoint::AiIntegrationGaps => "AI implementation and workflow integration gaps",
        }
    }
}

/// Up to three pain points the target is likely feeling.
#[must_use]
pub fn pain_points(
    signals: &[KeySignal],
    tech: &[TechStackItem],
    jobs: &[JobSignal],
) -> Vec<PainPoint> {
    let mut points = Vec::new();

    if any(signals, SignalKind::is_scaling) {
        points.push(PainPoint::ScalingBottlenecks);
        points.push(PainPoint::QualityDuringExpansion);
    }
    if tech.len() > 8 {
        points.push(PainPoint::StackComplexity);
    }
    if any_title(jobs, |lowered, _| {
        lowered.contains("devops") || lowered.contains("infrastructure")
    }) {
        points.push(PainPoint::InfrastructureScaling);
    }
    if has(signals, SignalKind::AiFocus) {
        points.push(PainPoint::AiIntegrationGaps);
    }

    points.truncate(MAX_PAIN_POINTS);
    points
}

// ---------------------------------------------------------------------------
// Buyer personas
// ---------------------------------------------------------------------------

/// Up to two buyer personas suggested by the open roles.
#[must_use]
pub fn buyer_personas(jobs: &[JobSignal]) -> Vec<&'static str> {
    let mut personas = Vec::new();

    let senior_engineering = any_title(jobs, |lowered, words| {
        words.iter().any(|w| w == "cto")
            || lowered.contains("vp engineering")
            || lowered.contains("vp of engineering")
    });
    if senior_engineering {
        personas.push("CTO/VP of Engineering");
    } else if any_title(jobs, |lowered, _| lowered.contains("engineer")) {
        personas.push("VP of Engineering");
    }

    if any_title(jobs, |lowered, _| lowered.contains("product")) {
        personas.push("VP of Product");
    }
    if any_title(jobs, |lowered, _| {
        lowered.contains("sales") || lowered.contains("revenue")
    }) {
        personas.push("Chief Revenue Officer");
    }
    if any_title(jobs, |lowered, _| lowered.contains("operations")) {
        personas.push("VP of Operations");
    }

    personas.truncate(MAX_PERSONAS);
    personas
}

// ---------------------------------------------------------------------------
// Messaging themes and tagline
// ---------------------------------------------------------------------------

/// Messaging themes, or the default trio when nothing specific applies.
#[must_use]
pub fn messaging_themes(signals: &[KeySignal], pains: &[PainPoint]) -> Vec<&'static str> {
    let mut themes = Vec::new();

    // Team-growth bottlenecks do not count as a scaling theme.
    if pains.contains(&PainPoint::InfrastructureScaling) {
        themes.push("Scaling without breaking");
    }
    if pains.contains(&PainPoint::StackComplexity) {
        themes.push("Simplifying technical complexity");
    }
    if pains.contains(&PainPoint::AiIntegrationGaps) {
        themes.push("AI workflow integration");
    }
    if has(signals, SignalKind::GtmExpansion) {
        themes.push("Revenue acceleration");
    }

    if themes.is_empty() {
        DEFAULT_THEMES.to_vec()
    } else {
        themes
    }
}

/// Pipe-separated positioning tagline.
#[must_use]
pub fn tagline(signals: &[KeySignal]) -> String {
    let rules: [(bool, &str); 4] = [
        (any(signals, SignalKind::is_scaling), "Scaling Operations"),
        (
            any(signals, is_technology) || has(signals, SignalKind::EngineeringScaling),
            "AI Integration",
        ),
        (has(signals, SignalKind::GtmExpansion), "Revenue Growth"),
        (any(signals, SignalKind::is_capital), "Market Expansion"),
    ];

    let themes: Vec<&str> = rules
        .into_iter()
        .filter_map(|(hit, text)| hit.then_some(text))
        .take(MAX_TAGLINE_THEMES)
        .collect();

    if themes.is_empty() {
        DEFAULT_TAGLINE.to_string()
    } else {
        themes.join(" | ")
    }
}

// ---------------------------------------------------------------------------
// Warnings and tag
// ---------------------------------------------------------------------------

/// Approaches to avoid. Always ends with the generic-claims warning.
#[must_use]
pub fn warnings(
    signals: &[KeySignal],
    tone: &ToneInsights,
    tech: &[TechStackItem],
) -> Vec<&'static str> {
    let mut out = Vec::new();

    if has(signals, SignalKind::AiFocus) {
        out.push(
            "Don't lead with basic automation — they're already investing in AI capabilities",
        );
    }
    if any(signals, SignalKind::is_scaling) {
        out.push("Avoid cost-cutting messaging — they're in growth mode, not optimization phase");
    }
    if tone.sentiment == Some(Sentiment::Positive) {
        out.push("Don't emphasize problems — they're experiencing positive momentum");
    }
    if tech.len() > 5 {
        out.push(
            "Skip generic \"modernization\" pitches — they already have sophisticated tech stack",
        );
    }
    out.push(GENERIC_WARNING);
    out
}

/// Short classification of the opportunity, e.g. `Rapid Scaling - Positive Momentum`.
#[must_use]
pub fn signal_tag(signals: &[KeySignal], tone: &ToneInsights) -> String {
    if any(signals, SignalKind::is_scaling) {
        format!("Rapid Scaling - {} Momentum", tone.sentiment_or_neutral().label())
    } else if has(signals, SignalKind::AiFocus) {
        "AI Transformation - Technology Focus".to_string()
    } else if has(signals, SignalKind::Funding) {
        "Growth Capital - Expansion Phase".to_string()
    } else {
        "Strategic Growth - Market Positioning".to_string()
    }
}

#[cfg(test)]
#[path = "rules_test.rs"]
mod tests;
