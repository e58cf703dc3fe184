use intellibrief_core::{NarrativeFields, SignalBundle, UserCompany};

use crate::format::{self, PitchParts, SummaryParts};
use crate::rules;

/// Who the brief is about and what the seller wants from them.
#[derive(Debug, Clone, Copy)]
pub struct NarrativeContext<'a> {
    pub company: &'a str,
    pub user_intent: &'a str,
    pub user_company: Option<&'a UserCompany>,
}

/// Renders the five narrative fields from a collected signal bundle.
///
/// Pure and deterministic: the same context and bundle always produce the
/// same text.
#[must_use]
pub fn synthesize(ctx: &NarrativeContext<'_>, bundle: &SignalBundle) -> NarrativeFields {
    let signals = &bundle.key_signals;

    let priorities = rules::priorities(signals, &bundle.tone);
    let angle = rules::strategic_angle(ctx.company, ctx.user_intent, ctx.user_company, signals);
    let tagline = rules::tagline(signals);
    let pains = rules::pain_points(signals, &bundle.tech_stack, &bundle.jobs);
    let personas = rules::buyer_personas(&bundle.jobs);
    let themes = rules::messaging_themes(signals, &pains);
    let warnings = rules::warnings(signals, &bundle.tone, &bundle.tech_stack);

    NarrativeFields {
        summary: format::summary(&SummaryParts {
            company: ctx.company,
            signals,
            priorities: &priorities,
            strategic_angle: &angle,
            tagline: &tagline,
        }),
        pitch_angle: format::pitch_strategy(&PitchParts {
            company: ctx.company,
            user_intent: ctx.user_intent,
            user_company: ctx.user_company,
            pain_points: &pains,
            personas: &personas,
            themes: &themes,
        }),
        subject_line: format::subject_line(ctx.company, ctx.user_company),
        what_not_to_pitch: format::what_not_to_pitch(
            ctx.company,
            &warnings,
            bundle.tone.sentiment_or_neutral(),
        ),
        signal_tag: format::signal_tag(ctx.company, &rules::signal_tag(signals, &bundle.tone)),
    }
}
