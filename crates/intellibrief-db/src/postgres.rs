//! Postgres-backed brief store on the `briefs` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use intellibrief_core::{
    Brief, IntelligenceSources, JobSignal, NarrativeFields, NarrativeUpdate, NewBrief, NewsItem,
    StockData, TechStackItem, ToneInsights, UserId,
};
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::{store::BriefStore, DbError};

macro_rules! brief_columns {
    () => {
        "id, user_id, company_name, website, user_intent, summary, pitch_angle, subject_line, \
         what_not_to_pitch, signal_tag, news, job_signals, tech_stack, tech_stack_data, \
         stock_data, tone_insights, intelligence_sources, company_logo, hiring_trends, \
         news_trends, created_at"
    };
}

// `$n::text IS NULL` lets an absent owner match every row.
macro_rules! owner_filter {
    ($n:literal) => {
        concat!("($", $n, "::text IS NULL OR user_id = $", $n, ")")
    };
}

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A row from the `briefs` table.
#[derive(Debug, sqlx::FromRow)]
struct BriefRow {
    id: Uuid,
    user_id: Option<String>,
    company_name: String,
    website: Option<String>,
    user_intent: String,
    summary: String,
    pitch_angle: String,
    subject_line: String,
    what_not_to_pitch: String,
    signal_tag: String,
    news: Json<Vec<NewsItem>>,
    job_signals: Json<Vec<JobSignal>>,
    tech_stack: Vec<String>,
    tech_stack_data: Json<Vec<TechStackItem>>,
    stock_data: Json<StockData>,
    tone_insights: Json<ToneInsights>,
    intelligence_sources: Json<IntelligenceSources>,
    company_logo: Option<String>,
    hiring_trends: String,
    news_trends: String,
    created_at: DateTime<Utc>,
}

impl From<BriefRow> for Brief {
    fn from(row: BriefRow) -> Self {
        Brief {
            id: row.id,
            user_id: row.user_id.as_deref().and_then(UserId::parse),
            created_at: row.created_at,
            content: NewBrief {
                company_name: row.company_name,
                website: row.website,
                user_intent: row.user_intent,
                narrative: NarrativeFields {
                    summary: row.summary,
                    pitch_angle: row.pitch_angle,
                    subject_line: row.subject_line,
                    what_not_to_pitch: row.what_not_to_pitch,
                    signal_tag: row.signal_tag,
                },
                news: row.news.0,
                job_signals: row.job_signals.0,
                tech_stack: row.tech_stack,
                tech_stack_data: row.tech_stack_data.0,
                stock_data: row.stock_data.0,
                tone_insights: row.tone_insights.0,
                intelligence_sources: row.intelligence_sources.0,
                company_logo: row.company_logo,
                hiring_trends: row.hiring_trends,
                news_trends: row.news_trends,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct PgBriefStore {
    pool: PgPool,
}

impl PgBriefStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl BriefStore for PgBriefStore {
    async fn create(&self, brief: NewBrief, owner: Option<&UserId>) -> Result<Brief, DbError> {
        let n = &brief.narrative;
        let row = sqlx::query_as::<_, BriefRow>(concat!(
            "INSERT INTO briefs \
                 (id, user_id, company_name, website, user_intent, summary, pitch_angle, \
                  subject_line, what_not_to_pitch, signal_tag, news, job_signals, tech_stack, \
                  tech_stack_data, stock_data, tone_insights, intelligence_sources, \
                  company_logo, hiring_trends, news_trends) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, \
                     $17, $18, $19, $20) \
             RETURNING ",
            brief_columns!()
        ))
        .bind(Uuid::new_v4())
        .bind(owner.map(UserId::as_str))
        .bind(&brief.company_name)
        .bind(brief.website.as_deref())
        .bind(&brief.user_intent)
        .bind(&n.summary)
        .bind(&n.pitch_angle)
        .bind(&n.subject_line)
        .bind(&n.what_not_to_pitch)
        .bind(&n.signal_tag)
        .bind(Json(&brief.news))
        .bind(Json(&brief.job_signals))
        .bind(&brief.tech_stack)
        .bind(Json(&brief.tech_stack_data))
        .bind(Json(&brief.stock_data))
        .bind(Json(&brief.tone_insights))
        .bind(Json(&brief.intelligence_sources))
        .bind(brief.company_logo.as_deref())
        .bind(&brief.hiring_trends)
        .bind(&brief.news_trends)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn list(&self, owner: Option<&UserId>) -> Result<Vec<Brief>, DbError> {
        let rows = sqlx::query_as::<_, BriefRow>(concat!(
            "SELECT ",
            brief_columns!(),
            " FROM briefs WHERE ",
            owner_filter!(1),
            " ORDER BY created_at DESC, id"
        ))
        .bind(owner.map(UserId::as_str))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Brief::from).collect())
    }

    async fn get(&self, id: Uuid, owner: Option<&UserId>) -> Result<Option<Brief>, DbError> {
        let row = sqlx::query_as::<_, BriefRow>(concat!(
            "SELECT ",
            brief_columns!(),
            " FROM briefs WHERE id = $1 AND ",
            owner_filter!(2)
        ))
        .bind(id)
        .bind(owner.map(UserId::as_str))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Brief::from))
    }

    async fn update(
        &self,
        id: Uuid,
        update: NarrativeUpdate,
        owner: Option<&UserId>,
    ) -> Result<Brief, DbError> {
        let row = sqlx::query_as::<_, BriefRow>(concat!(
            "UPDATE briefs SET \
                 summary = COALESCE($3, summary), \
                 pitch_angle = COALESCE($4, pitch_angle), \
                 subject_line = COALESCE($5, subject_line), \
                 what_not_to_pitch = COALESCE($6, what_not_to_pitch), \
                 signal_tag = COALESCE($7, signal_tag) \
             WHERE id = $1 AND ",
            owner_filter!(2),
            " RETURNING ",
            brief_columns!()
        ))
        .bind(id)
        .bind(owner.map(UserId::as_str))
        .bind(update.summary)
        .bind(update.pitch_angle)
        .bind(update.subject_line)
        .bind(update.what_not_to_pitch)
        .bind(update.signal_tag)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Brief::from).ok_or(DbError::NotFound)
    }

    async fn delete(&self, id: Uuid, owner: Option<&UserId>) -> Result<(), DbError> {
        let result = sqlx::query(concat!(
            "DELETE FROM briefs WHERE id = $1 AND ",
            owner_filter!(2)
        ))
        .bind(id)
        .bind(owner.map(UserId::as_str))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), DbError> {
        crate::ping(&self.pool).await?;
        Ok(())
    }
}
