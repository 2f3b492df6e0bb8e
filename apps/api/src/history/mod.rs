//! Analysis history behind an explicit repository interface.
//!
//! The service ships an in-process repository for local runs; deployments
//! that need durability provide their own `HistoryRepository`.

pub mod handlers;

use std::collections::VecDeque;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::history::{HistoryRecord, NewHistoryRecord};

#[async_trait]
pub trait HistoryRepository: Send + Sync {
    async fn create(&self, record: NewHistoryRecord) -> Result<HistoryRecord, AppError>;

    /// All records, newest first.
    async fn list(&self) -> Result<Vec<HistoryRecord>, AppError>;
}

/// Records kept by `InMemoryHistoryRepository::default()`.
pub const DEFAULT_HISTORY_CAPACITY: usize = 500;

/// Process-local history. Lost on restart. Holds at most `capacity` records;
/// the oldest are dropped first.
pub struct InMemoryHistoryRepository {
    records: RwLock<VecDeque<HistoryRecord>>,
    capacity: usize,
}

impl InMemoryHistoryRepository {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: RwLock::new(VecDeque::with_capacity(capacity.min(1024))),
            capacity: capacity.max(1),
        }
    }
}

impl Default for InMemoryHistoryRepository {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

#[async_trait]
impl HistoryRepository for InMemoryHistoryRepository {
    async fn create(&self, record: NewHistoryRecord) -> Result<HistoryRecord, AppError> {
        if record.score.is_some_and(|s| s > 100) {
            return Err(AppError::Validation("score must be between 0 and 100".to_string()));
        }

        let saved = HistoryRecord {
            id: Uuid::new_v4(),
            score: record.score,
            skills: record.skills,
            created_at: Utc::now(),
        };
        let mut records = self.records.write().await;
        records.push_front(saved.clone());
        records.truncate(self.capacity);
        Ok(saved)
    }

    async fn list(&self) -> Result<Vec<HistoryRecord>, AppError> {
        Ok(self.records.read().await.iter().cloned().collect())
    }
}
