//! Tech-stack inference from job postings.

use chrono::{DateTime, Utc};
use intellibrief_core::{Confidence, JobSignal, TechCategory, TechStackItem};

pub const DETECTION_SOURCE: &str = "Job Analysis";
const MAX_TECHNOLOGIES: usize = 10;

/// Detectable technologies in reporting order, with their category.
pub(crate) const TECH_VOCABULARY: &[(&str, TechCategory)] = &[
    ("React", TechCategory::Frontend),
    ("Node.js", TechCategory::Backend),
    ("Python", TechCategory::Backend),
    ("JavaScript", TechCategory::Language),
    ("TypeScript", TechCategory::Language),
    ("AWS", TechCategory::Cloud),
    ("Docker", TechCategory::DevOps),
    ("Kubernetes", TechCategory::DevOps),
    ("PostgreSQL", TechCategory::Database),
    ("MongoDB", TechCategory::Database),
    ("Redis", TechCategory::Database),
    ("GraphQL", TechCategory::Other),
    ("REST API", TechCategory::Other),
    ("Microservices", TechCategory::Other),
    ("CI/CD", TechCategory::Other),
    ("Git", TechCategory::Other),
    ("Jenkins", TechCategory::Other),
    ("Terraform", TechCategory::Other),
    ("Vue.js", TechCategory::Frontend),
    ("Angular", TechCategory::Frontend),
];

/// Counts postings mentioning each vocabulary keyword and returns the top ten.
///
/// A posting counts once per keyword no matter how often it repeats it. Ties
/// keep vocabulary order.
#[must_use]
pub fn infer_tech_stack(jobs: &[JobSignal], detected_at: DateTime<Utc>) -> Vec<TechStackItem> {
    let texts: Vec<String> = jobs
        .iter()
        .map(|job| format!("{} {}", job.title, job.description).to_lowercase())
        .collect();

    let mut counts: Vec<(&str, TechCategory, usize)> = TECH_VOCABULARY
        .iter()
        .map(|(tech, category)| {
            let needle = tech.to_lowercase();
            let count = texts.iter().filter(|text| text.contains(&needle)).count();
            (*tech, *category, count)
        })
        .filter(|(_, _, count)| *count > 0)
        .collect();

    // Stable sort preserves vocabulary order among equal counts.
    counts.sort_by(|a, b| b.2.cmp(&a.2));

    counts
        .into_iter()
        .take(MAX_TECHNOLOGIES)
        .filter_map(|(name, category, count)| {
            Some(TechStackItem {
                name: name.to_string(),
                confidence: Confidence::from_count(count)?,
                source: DETECTION_SOURCE.to_string(),
                category,
                first_detected: detected_at,
            })
        })
        .collect()
}
