//! In-process brief store for tests and database-less runs.

use async_trait::async_trait;
use chrono::Utc;
use intellibrief_core::{Brief, NarrativeUpdate, NewBrief, UserId};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{store::BriefStore, DbError};

#[derive(Debug, Default)]
pub struct MemoryBriefStore {
    briefs: RwLock<Vec<Brief>>,
}

impl MemoryBriefStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BriefStore for MemoryBriefStore {
    async fn create(&self, brief: NewBrief, owner: Option<&UserId>) -> Result<Brief, DbError> {
        let created = Brief {
            id: Uuid::new_v4(),
            user_id: owner.cloned(),
            created_at: Utc::now(),
            content: brief,
        };
        self.briefs.write().await.push(created.clone());
        Ok(created)
    }

    async fn list(&self, owner: Option<&UserId>) -> Result<Vec<Brief>, DbError> {
        let briefs = self.briefs.read().await;
        // Insertion order is creation order; reverse for newest first.
        Ok(briefs
            .iter()
            .rev()
            .filter(|b| b.visible_to(owner))
            .cloned()
            .collect())
    }

    async fn get(&self, id: Uuid, owner: Option<&UserId>) -> Result<Option<Brief>, DbError> {
        let briefs = self.briefs.read().await;
        Ok(briefs
            .iter()
            .find(|b| b.id == id && b.visible_to(owner))
            .cloned())
    }

    async fn update(
        &self,
        id: Uuid,
        update: NarrativeUpdate,
        owner: Option<&UserId>,
    ) -> Result<Brief, DbError> {
        let mut briefs = self.briefs.write().await;
        let brief = briefs
            .iter_mut()
            .find(|b| b.id == id && b.visible_to(owner))
            .ok_or(DbError::NotFound)?;
        update.apply_to(&mut brief.content.narrative);
        Ok(brief.clone())
    }

    async fn delete(&self, id: Uuid, owner: Option<&UserId>) -> Result<(), DbError> {
        let mut briefs = self.briefs.write().await;
        let before = briefs.len();
        briefs.retain(|b| !(b.id == id && b.visible_to(owner)));
        if briefs.len() == before {
            return Err(DbError::NotFound);
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), DbError> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;
