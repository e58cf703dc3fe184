//! Assembles a persistable brief from a request and its signal bundle.

use std::collections::HashSet;

use intellibrief_core::{IntelligenceSources, JobSignal, NewBrief, SignalBundle, UserCompany};
use url::Url;

use crate::synthesize::{synthesize, NarrativeContext};

const LOGO_BASE: &str = "https://logo.clearbit.com/";

/// Validated input for a new brief.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BriefRequest {
    pub company_name: String,
    pub website: Option<String>,
    pub user_intent: String,
    pub user_company: Option<UserCompany>,
}

impl BriefRequest {
    /// Trims the inputs. Returns `None` when company or intent is blank.
    #[must_use]
    pub fn new(
        company_name: &str,
        user_intent: &str,
        website: Option<&str>,
        user_company: Option<UserCompany>,
    ) -> Option<Self> {
        let company_name = company_name.trim();
        let user_intent = user_intent.trim();
        if company_name.is_empty() || user_intent.is_empty() {
            return None;
        }
        Some(Self {
            company_name: company_name.to_string(),
            website: website
                .map(str::trim)
                .filter(|w| !w.is_empty())
                .map(str::to_string),
            user_intent: user_intent.to_string(),
            user_company,
        })
    }

    #[must_use]
    pub fn narrative_context(&self) -> NarrativeContext<'_> {
        NarrativeContext {
            company: &self.company_name,
            user_intent: &self.user_intent,
            user_company: self.user_company.as_ref(),
        }
    }
}

/// Logo URL for a company website, or `None` when it has no usable host.
///
/// Scheme-less input such as `shopify.com` is read as `https://`.
#[must_use]
pub fn company_logo(website: &str) -> Option<String> {
    let parsed = Url::parse(website)
        .ok()
        .filter(|u| u.host_str().is_some())
        .or_else(|| Url::parse(&format!("https://{website}")).ok())?;
    let host = parsed.host_str()?;
    let host = host.strip_prefix("www.").unwrap_or(host);
    Some(format!("{LOGO_BASE}{host}"))
}

#[must_use]
pub fn hiring_trends(jobs: &[JobSignal]) -> String {
    let cities: HashSet<&str> = jobs.iter().map(JobSignal::city).collect();
    format!(
        "Active hiring: {} roles across {} locations",
        jobs.len(),
        cities.len()
    )
}

#[must_use]
pub fn news_trends(bundle: &SignalBundle) -> String {
    format!(
        "{} recent articles - {} sentiment",
        bundle.news.len(),
        bundle.tone.sentiment_or_neutral()
    )
}

#[must_use]
pub fn intelligence_sources(bundle: &SignalBundle) -> IntelligenceSources {
    IntelligenceSources {
        news: bundle.news.len(),
        jobs: bundle.jobs.len(),
        technologies: bundle.tech_stack.len(),
        stock_data: bundle.stock.is_public(),
        tone_analysis: bundle.tone.emotion.is_some(),
        simulated: bundle.simulated,
    }
}

/// Synthesizes the narrative and folds the raw collections into a `NewBrief`.
#[must_use]
pub fn compose(request: &BriefRequest, bundle: SignalBundle) -> NewBrief {
    let narrative = synthesize(&request.narrative_context(), &bundle);
    let hiring_trends = hiring_trends(&bundle.jobs);
    let news_trends = news_trends(&bundle);
    let intelligence_sources = intelligence_sources(&bundle);
    let company_logo = request.website.as_deref().and_then(company_logo);

    let SignalBundle {
        news,
        jobs,
        tech_stack,
        stock,
        tone,
        ..
    } = bundle;

    NewBrief {
        company_name: request.company_name.clone(),
        website: request.website.clone(),
        user_intent: request.user_intent.clone(),
        narrative,
        news,
        job_signals: jobs,
        tech_stack: tech_stack.iter().map(|t| t.name.clone()).collect(),
        tech_stack_data: tech_stack,
        stock_data: stock,
        tone_insights: tone,
        intelligence_sources,
        company_logo,
        hiring_trends,
        news_trends,
    }
}
