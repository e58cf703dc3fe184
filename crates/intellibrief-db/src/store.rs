//! The persistence seam for briefs.

use async_trait::async_trait;
use intellibrief_core::{Brief, NarrativeUpdate, NewBrief, UserId};
use uuid::Uuid;

use crate::DbError;

/// Owner-scoped brief storage.
///
/// Every operation takes the caller's `owner`. With `Some(owner)` reads and
/// writes only ever touch briefs owned by that user, and a brief owned by
/// someone else is reported exactly like an unknown id. `None` means an
/// unscoped caller (CLI, internal jobs).
#[async_trait]
pub trait BriefStore: Send + Sync {
    /// Persists `brief` with a fresh id and creation timestamp.
    async fn create(&self, brief: NewBrief, owner: Option<&UserId>) -> Result<Brief, DbError>;

    /// Visible briefs, newest first.
    async fn list(&self, owner: Option<&UserId>) -> Result<Vec<Brief>, DbError>;

    async fn get(&self, id: Uuid, owner: Option<&UserId>) -> Result<Option<Brief>, DbError>;

    /// Replaces the given narrative fields and returns the updated brief.
    ///
    /// # Errors
    ///
    /// [`DbError::NotFound`] when the brief is unknown or not visible.
    async fn update(
        &self,
        id: Uuid,
        update: NarrativeUpdate,
        owner: Option<&UserId>,
    ) -> Result<Brief, DbError>;

    /// Hard-deletes a brief.
    ///
    /// # Errors
    ///
    /// [`DbError::NotFound`] when nothing matching was deleted.
    async fn delete(&self, id: Uuid, owner: Option<&UserId>) -> Result<(), DbError>;

    /// Cheap liveness check.
    async fn ping(&self) -> Result<(), DbError>;
}
