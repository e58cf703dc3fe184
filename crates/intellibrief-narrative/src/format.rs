//! Emoji-headed section templates for the rendered narrative fields.

use intellibrief_core::{KeySignal, Sentiment, UserCompany};

use crate::rules::{PainPoint, DEFAULT_PAIN_POINT, DEFAULT_PERSONA, DEFAULT_PRIORITIES};

const NO_SIGNALS: &str = "No major public signals detected yet";

fn bullets<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|item| format!("• {}", item.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn bullets_or<I, S>(items: I, fallback: &str) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let rendered = bullets(items);
    if rendered.is_empty() {
        bullets([fallback])
    } else {
        rendered
    }
}

pub struct SummaryParts<'a> {
    pub company: &'a str,
    pub signals: &'a [KeySignal],
    pub priorities: &'a [&'a str],
    pub strategic_angle: &'a str,
    pub tagline: &'a str,
}

#[must_use]
pub fn summary(parts: &SummaryParts<'_>) -> String {
    let company = parts.company;
    let count = parts.signals.len();
    let priorities = if parts.priorities.is_empty() {
        DEFAULT_PRIORITIES.to_string()
    } else {
        parts.priorities.join(", ")
    };

    format!(
        "🚀 Strategic Opportunity: {company}\n\
         {company} demonstrates strong momentum with {count} key market signals indicating \
         strategic expansion and technology advancement. Current positioning suggests active \
         growth phase with focus on operational scaling.\n\
         \n\
         🔍 Key Signals:\n\
         {signals}\n\
         \n\
         🧠 Inferred Priorities:\n\
         {priorities}\n\
         \n\
         🎯 Strategic Angle:\n\
         {angle}\n\
         \n\
         📌 Tagline:\n\
         {tagline}",
        signals = bullets_or(parts.signals.iter().map(|s| s.text.as_str()), NO_SIGNALS),
        angle = parts.strategic_angle,
        tagline = parts.tagline,
    )
}

pub struct PitchParts<'a> {
    pub company: &'a str,
    pub user_intent: &'a str,
    pub user_company: Option<&'a UserCompany>,
    pub pain_points: &'a [PainPoint],
    pub personas: &'a [&'a str],
    pub themes: &'a [&'a str],
}

#[must_use]
pub fn pitch_strategy(parts: &PitchParts<'_>) -> String {
    let company = parts.company;
    let intent = parts.user_intent.to_lowercase();

    let (positioning, hook, objection, cta) = match parts.user_company {
        Some(seller) => (
            format!(
                "{} enables {company} to {intent} while maintaining operational excellence \
                 during their current growth phase.",
                seller.name
            ),
            format!(
                "{} specifically designed for companies like {company} experiencing rapid \
                 scaling challenges.",
                seller.value_proposition
            ),
            format!(
                "\"Already using X\" → Response: \"{} integrates with existing tools to provide \
                 unified visibility and control.\"",
                seller.name
            ),
            format!(
                "\"Would it be valuable to see how {} helped similar companies during their \
                 scaling phase?\"",
                seller.name
            ),
        ),
        None => (
            format!(
                "Strategic partnership opportunity to support {company}'s expansion through \
                 {intent}."
            ),
            format!(
                "Targeted solution addressing {company}'s current operational and strategic \
                 priorities."
            ),
            "\"Already have solutions\" → Response: \"We complement existing infrastructure to \
             eliminate blind spots.\""
                .to_string(),
            "\"Would it be helpful to share a brief analysis of optimization opportunities \
             specific to your current growth stage?\""
                .to_string(),
        ),
    };

    format!(
        "🎯 Pitch Strategy\n\
         \n\
         📌 Positioning Angle:\n\
         {positioning}\n\
         \n\
         🧠 Primary Hook:\n\
         {hook}\n\
         \n\
         ❗ Pain Points to Target:\n\
         {pains}\n\
         \n\
         👤 Ideal Buyer Personas:\n\
         {personas}\n\
         \n\
         📣 Messaging Themes:\n\
         {themes}\n\
         \n\
         🚧 Objections to Expect:\n\
         {objection}\n\
         \n\
         📥 Suggested CTA:\n\
         {cta}",
        pains = bullets_or(parts.pain_points.iter().map(|p| p.text()), DEFAULT_PAIN_POINT),
        personas = bullets_or(parts.personas, DEFAULT_PERSONA),
        themes = bullets(parts.themes),
    )
}

#[must_use]
pub fn subject_line(company: &str, user_company: Option<&UserCompany>) -> String {
    match user_company {
        Some(seller) => format!("{} x {company} Strategic Partnership", seller.name),
        None => format!("Strategic Growth Insights for {company}"),
    }
}

#[must_use]
pub fn what_not_to_pitch(company: &str, warnings: &[&str], sentiment: Sentiment) -> String {
    format!(
        "❌ What Not to Pitch\n\
         \n\
         {warnings}\n\
         \n\
         Strategic reasoning: Based on current market sentiment ({sentiment}), hiring focus, \
         and technology sophistication, {company} requires consultative, outcome-focused \
         engagement rather than transactional product pitches.",
        warnings = bullets(warnings),
    )
}

/// Prefixes the classification with the company it describes.
#[must_use]
pub fn signal_tag(company: &str, tag: &str) -> String {
    format!("{company}: {tag}")
}
