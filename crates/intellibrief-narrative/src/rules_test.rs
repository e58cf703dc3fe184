use chrono::Utc;
use intellibrief_core::{Confidence, TechCategory};

use super::*;

fn sig(kind: SignalKind) -> KeySignal {
    KeySignal::new(kind, format!("{kind:?}"))
}

fn job(title: &str) -> JobSignal {
    JobSignal {
        title: title.to_string(),
        company: "Acme".to_string(),
        location: "Remote".to_string(),
        posted_date: String::new(),
        description: String::new(),
        salary: None,
    }
}

fn stack(n: usize) -> Vec<TechStackItem> {
    (0..n)
        .map(|i| TechStackItem {
            name: format!("tech-{i}"),
            confidence: Confidence::Low,
            source: "Job Analysis".to_string(),
            category: TechCategory::Other,
            first_detected: Utc::now(),
        })
        .collect()
}

fn tone(sentiment: Option<Sentiment>) -> ToneInsights {
    ToneInsights {
        sentiment,
        ..ToneInsights::default()
    }
}

fn seller() -> UserCompany {
    UserCompany {
        name: "Beacon".to_string(),
        industry: "SaaS".to_string(),
        product: "observability suite".to_string(),
        value_proposition: "Unified telemetry".to_string(),
        website: None,
        goals: String::new(),
    }
}

#[test]
fn priorities_are_capped_at_three() {
    let signals = vec![
        sig(SignalKind::AggressiveHiring),
        sig(SignalKind::AiFocus),
        sig(SignalKind::GtmExpansion),
        sig(SignalKind::Funding),
    ];
    let got = priorities(&signals, &tone(Some(Sentiment::Positive)));
    assert_eq!(
        got,
        vec![
            "Scaling operations and team growth",
            "Technology modernization and AI integration",
            "Go-to-market acceleration and revenue growth",
        ]
    );
}

#[test]
fn positive_tone_adds_momentum_priority() {
    let got = priorities(&[], &tone(Some(Sentiment::Positive)));
    assert_eq!(got, vec!["Capitalizing on positive momentum"]);
    assert!(priorities(&[], &tone(None)).is_empty());
}

#[test]
fn angle_without_seller_mentions_intent() {
    let angle = strategic_angle("Acme", "consolidate vendors", None, &[]);
    assert!(angle.starts_with("Strategic timing optimal for consolidate vendors"));
}

#[test]
fn angle_with_seller_reflects_phase_and_need() {
    let company = seller();
    let scaling = strategic_angle(
        "Acme",
        "sell",
        Some(&company),
        &[sig(SignalKind::EngineeringScaling)],
    );
    assert_eq!(
        scaling,
        "Beacon's observability suite aligns perfectly with Acme's current scaling phase. \
         Unified telemetry directly addresses their operational efficiency requirements."
    );

    let ai = strategic_angle(
        "Acme",
        "sell",
        Some(&company),
        &[sig(SignalKind::AiFocus), sig(SignalKind::GtmExpansion)],
    );
    assert!(ai.contains("current AI transformation"));
    assert!(ai.contains("go-to-market acceleration needs"));

    let plain = strategic_angle("Acme", "sell", Some(&company), &[]);
    assert!(plain.contains("growth trajectory"));
    assert!(plain.contains("operational efficiency requirements"));
}

#[test]
fn pain_points_from_scaling_and_infrastructure() {
    let points = pain_points(
        &[sig(SignalKind::AggressiveHiring), sig(SignalKind::AiFocus)],
        &stack(9),
        &[job("DevOps Engineer")],
    );
    assert_eq!(
        points,
        vec![
            PainPoint::ScalingBottlenecks,
            PainPoint::QualityDuringExpansion,
            PainPoint::StackComplexity,
        ]
    );
}

#[test]
fn pain_points_small_stack_no_complexity() {
    let points = pain_points(&[sig(SignalKind::AiFocus)], &stack(8), &[]);
    assert_eq!(points, vec![PainPoint::AiIntegrationGaps]);
}

#[test]
fn personas_from_titles() {
    let jobs = vec![job("VP of Engineering"), job("Product Manager"), job("Sales Director")];
    assert_eq!(
        buyer_personas(&jobs),
        vec!["CTO/VP of Engineering", "VP of Product"]
    );
}

#[test]
fn director_is_not_a_cto() {
    let jobs = vec![job("Sales Director"), job("Backend Engineer")];
    assert_eq!(
        buyer_personas(&jobs),
        vec!["VP of Engineering", "Chief Revenue Officer"]
    );
    assert_eq!(buyer_personas(&[job("CTO")]), vec!["CTO/VP of Engineering"]);
}

#[test]
fn personas_empty_without_matching_roles() {
    assert!(buyer_personas(&[job("Office Coordinator")]).is_empty());
}

#[test]
fn themes_fall_back_to_defaults() {
    assert_eq!(messaging_themes(&[], &[]), DEFAULT_THEMES.to_vec());
}

#[test]
fn team_growth_pains_keep_default_themes() {
    let signals = [sig(SignalKind::AggressiveHiring)];
    let pains = pain_points(&signals, &stack(2), &[]);
    assert_eq!(
        pains,
        vec![PainPoint::ScalingBottlenecks, PainPoint::QualityDuringExpansion]
    );
    assert_eq!(messaging_themes(&signals, &pains), DEFAULT_THEMES.to_vec());
}

#[test]
fn engineering_scaling_with_gtm_names_gtm_need() {
    let company = seller();
    let angle = strategic_angle(
        "Acme",
        "sell",
        Some(&company),
        &[sig(SignalKind::EngineeringScaling), sig(SignalKind::GtmExpansion)],
    );
    assert!(angle.contains("current scaling phase"));
    assert!(angle.ends_with("go-to-market acceleration needs."));
}

#[test]
fn themes_follow_pain_points_and_gtm() {
    let themes = messaging_themes(
        &[sig(SignalKind::GtmExpansion)],
        &[
            PainPoint::ScalingBottlenecks,
            PainPoint::InfrastructureScaling,
            PainPoint::AiIntegrationGaps,
        ],
    );
    assert_eq!(
        themes,
        vec![
            "Scaling without breaking",
            "AI workflow integration",
            "Revenue acceleration",
        ]
    );
}

#[test]
fn tagline_default_and_joined() {
    assert_eq!(tagline(&[]), DEFAULT_TAGLINE);
    assert_eq!(
        tagline(&[sig(SignalKind::AiFocus), sig(SignalKind::Funding)]),
        "AI Integration | Market Expansion"
    );
}

#[test]
fn warnings_always_end_with_generic_claim() {
    let only = warnings(&[], &tone(None), &[]);
    assert_eq!(only, vec![GENERIC_WARNING]);

    let all = warnings(
        &[sig(SignalKind::AiFocus), sig(SignalKind::EngineeringScaling)],
        &tone(Some(Sentiment::Positive)),
        &stack(6),
    );
    assert_eq!(all.len(), 5);
    assert_eq!(all.last(), Some(&GENERIC_WARNING));
}

#[test]
fn signal_tag_priority() {
    assert_eq!(
        signal_tag(&[sig(SignalKind::AggressiveHiring)], &tone(Some(Sentiment::Positive))),
        "Rapid Scaling - Positive Momentum"
    );
    assert_eq!(
        signal_tag(&[sig(SignalKind::EngineeringScaling)], &tone(None)),
        "Rapid Scaling - Neutral Momentum"
    );
    assert_eq!(
        signal_tag(&[sig(SignalKind::AiFocus), sig(SignalKind::Funding)], &tone(None)),
        "AI Transformation - Technology Focus"
    );
    assert_eq!(
        signal_tag(&[sig(SignalKind::Funding)], &tone(None)),
        "Growth Capital - Expansion Phase"
    );
    assert_eq!(
        signal_tag(&[], &tone(None)),
        "Strategic Growth - Market Positioning"
    );
}
