//! Brief command handlers for the CLI.
//!
//! Called from `main` once config is loaded and a store is available. Every
//! handler writes human-readable output to stdout; logs go to stderr.

use std::fmt::Write as _;
use std::path::Path;

use chrono::Utc;
use intellibrief_core::{department_breakdown, Brief, NewBrief, UserId};
use intellibrief_db::{BriefStore, DbError};
use intellibrief_narrative::{compose, improve, BriefRequest, ExportFormat};
use intellibrief_signals::SignalCollector;
use rand::Rng;
use uuid::Uuid;

pub(crate) struct CreateInput<'a> {
    pub company: &'a str,
    pub intent: &'a str,
    pub website: Option<&'a str>,
    pub owner: Option<UserId>,
}

fn not_found(id: Uuid) -> anyhow::Error {
    anyhow::anyhow!("brief {id} not found or not owned by this user")
}

fn map_not_found(id: Uuid) -> impl FnOnce(DbError) -> anyhow::Error {
    move |e| match e {
        DbError::NotFound => not_found(id),
        other => other.into(),
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Full narrative of a brief, one section per field.
pub(crate) fn render_new_brief(brief: &NewBrief) -> String {
    let n = &brief.narrative;
    let mut out = String::new();
    let _ = writeln!(out, "{}  [{}]", brief.company_name, n.signal_tag);
    let _ = writeln!(out, "Subject: {}", n.subject_line);
    let _ = writeln!(out, "{} | {}", brief.hiring_trends, brief.news_trends);
    let departments = department_breakdown(&brief.job_signals);
    if !departments.is_empty() {
        let roles: Vec<String> = departments
            .iter()
            .map(|(dept, n)| format!("{dept} {n}"))
            .collect();
        let _ = writeln!(out, "Roles: {}", roles.join(", "));
    }
    if !brief.tech_stack.is_empty() {
        let _ = writeln!(out, "Tech: {}", brief.tech_stack.join(", "));
    }
    let _ = write!(
        out,
        "\n{}\n\n{}\n\n{}",
        n.summary, n.pitch_angle, n.what_not_to_pitch
    );
    out
}

pub(crate) fn render_brief(brief: &Brief) -> String {
    format!(
        "id: {}\ncreated: {}\n{}",
        brief.id,
        brief.created_at.format("%Y-%m-%d %H:%M UTC"),
        render_new_brief(&brief.content)
    )
}

pub(crate) fn render_list(briefs: &[Brief]) -> String {
    let mut out = format!("{:<38}{:<18}{:<24}TAG\n", "ID", "CREATED", "COMPANY");
    for brief in briefs {
        let company: String = brief.content.company_name.chars().take(22).collect();
        let _ = writeln!(
            out,
            "{:<38}{:<18}{:<24}{}",
            brief.id,
            brief.created_at.format("%Y-%m-%d %H:%M"),
            company,
            brief.content.narrative.signal_tag
        );
    }
    out
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Collect signals for a company and build the brief without persisting it.
///
/// # Errors
///
/// Returns an error if company or intent is blank.
pub(crate) async fn build_brief<R: Rng + Send>(
    collector: &SignalCollector,
    input: &CreateInput<'_>,
    rng: &mut R,
) -> anyhow::Result<NewBrief> {
    let request = BriefRequest::new(input.company, input.intent, input.website, None)
        .ok_or_else(|| anyhow::anyhow!("company name and user intent are required"))?;
    let bundle = collector
        .collect(&request.company_name, &request.user_intent, rng, Utc::now())
        .await;
    Ok(compose(&request, bundle))
}

/// Create a brief in `store` and print the stored record.
///
/// `dry_run` only labels the output; the caller passes an in-memory store.
///
/// # Errors
///
/// Returns an error if the input is invalid or the store write fails.
pub(crate) async fn run_create<R: Rng + Send>(
    store: &dyn BriefStore,
    collector: &SignalCollector,
    input: &CreateInput<'_>,
    rng: &mut R,
    dry_run: bool,
) -> anyhow::Result<()> {
    let new_brief = build_brief(collector, input, rng).await?;
    let brief = store.create(new_brief, input.owner.as_ref()).await?;
    tracing::info!(
        brief_id = %brief.id,
        company = %brief.content.company_name,
        dry_run,
        "brief created"
    );
    if dry_run {
        println!("[dry-run] brief kept in memory only\n");
    }
    println!("{}", render_brief(&brief));
    Ok(())
}

/// # Errors
///
/// Returns an error if the store query fails.
pub(crate) async fn run_list(store: &dyn BriefStore, owner: Option<&UserId>) -> anyhow::Result<()> {
    let briefs = store.list(owner).await?;
    if briefs.is_empty() {
        println!("no briefs found; run `create` first");
        return Ok(());
    }
    print!("{}", render_list(&briefs));
    Ok(())
}

/// # Errors
///
/// Returns an error if the brief is not visible or the store query fails.
pub(crate) async fn run_show(
    store: &dyn BriefStore,
    id: Uuid,
    owner: Option<&UserId>,
    json: bool,
) -> anyhow::Result<()> {
    let brief = store.get(id, owner).await?.ok_or_else(|| not_found(id))?;
    if json {
        println!("{}", serde_json::to_string_pretty(&brief)?);
    } else {
        println!("{}", render_brief(&brief));
    }
    Ok(())
}

/// Rewrite the narrative of a stored brief and print the result.
///
/// # Errors
///
/// Returns an error if the brief is not visible or the store update fails.
pub(crate) async fn improve_stored(
    store: &dyn BriefStore,
    id: Uuid,
    owner: Option<&UserId>,
) -> anyhow::Result<Brief> {
    let existing = store.get(id, owner).await?.ok_or_else(|| not_found(id))?;
    let brief = store
        .update(id, improve(&existing), owner)
        .await
        .map_err(map_not_found(id))?;
    tracing::info!(brief_id = %id, "brief improved");
    Ok(brief)
}

/// # Errors
///
/// See [`improve_stored`].
pub(crate) async fn run_improve(
    store: &dyn BriefStore,
    id: Uuid,
    owner: Option<&UserId>,
) -> anyhow::Result<()> {
    let brief = improve_stored(store, id, owner).await?;
    println!("{}", render_brief(&brief));
    Ok(())
}

/// # Errors
///
/// Returns an error if nothing matching was deleted or the store fails.
pub(crate) async fn run_delete(
    store: &dyn BriefStore,
    id: Uuid,
    owner: Option<&UserId>,
) -> anyhow::Result<()> {
    store.delete(id, owner).await.map_err(map_not_found(id))?;
    println!("deleted brief {id}");
    Ok(())
}

/// Render visible briefs in `format` to `out`, or stdout when `None`.
///
/// # Errors
///
/// Returns an error if the store query or the file write fails.
pub(crate) async fn run_export(
    store: &dyn BriefStore,
    format: ExportFormat,
    owner: Option<&UserId>,
    out: Option<&Path>,
) -> anyhow::Result<()> {
    let briefs = store.list(owner).await?;
    let rendered = format.render(&briefs, Utc::now().date_naive());
    match out {
        Some(path) => {
            tokio::fs::write(path, rendered).await?;
            println!("exported {} briefs to {}", briefs.len(), path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}
