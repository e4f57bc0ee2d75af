//! Generation history: the in-memory list mirrored to the history slot.

pub mod grouping;
pub mod handlers;
pub mod store;

use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::history::grouping::{group_by_keyword, KeywordGroup};
use crate::history::store::{SlotStore, StoreError};
use crate::models::content::GeneratedContent;

/// Newest-first artifact list. Every mutation rewrites the slot while the
/// write lock is held, so memory and storage never diverge.
#[derive(Clone)]
pub struct History {
    entries: Arc<RwLock<Vec<GeneratedContent>>>,
    store: SlotStore,
    limit: Option<usize>,
}

impl History {
    /// Loads the persisted slot once.
    pub fn load(store: SlotStore, limit: Option<usize>) -> Result<Self, StoreError> {
        let mut entries = store.load_history()?;
        if let Some(limit) = limit {
            entries.truncate(limit);
        }
        Ok(Self {
            entries: Arc::new(RwLock::new(entries)),
            store,
            limit,
        })
    }

    /// Puts `batch` (in generation order) in front of the existing history and
    /// persists the result. The last generated item ends up first, so a cap
    /// smaller than the batch keeps the newest artifacts.
    pub async fn prepend(&self, batch: Vec<GeneratedContent>) -> Result<usize, StoreError> {
        let mut entries = self.entries.write().await;
        let mut updated = batch;
        updated.reverse();
        updated.extend(entries.iter().cloned());
        if let Some(limit) = self.limit {
            updated.truncate(limit);
        }
        self.store.save_history(&updated).await?;
        *entries = updated;
        Ok(entries.len())
    }

    pub async fn all(&self) -> Vec<GeneratedContent> {
        self.entries.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn find(&self, id: Uuid) -> Option<GeneratedContent> {
        self.entries.read().await.iter().find(|c| c.id == id).cloned()
    }

    pub async fn grouped(&self) -> Vec<KeywordGroup> {
        group_by_keyword(&self.entries.read().await)
    }

    /// Empties memory and removes the slot.
    pub async fn clear(&self) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        self.store.clear_history().await?;
        entries.clear();
        Ok(())
    }
}
