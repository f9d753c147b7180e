use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::block::{total_duration, BlockKind, BlockShape, TimeBlock};
use super::category::Category;

/// A block definition detached from any concrete schedule.
///
/// Templates follow the same duration and category rules as scheduled
/// blocks. Instantiating one yields an unminted [`TimeBlock`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeBlockTemplate {
    pub id: Uuid,
    pub kind: BlockKind,
    pub duration: Duration,
    pub categories: Vec<Category>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TimeBlockTemplate {
    pub fn new(kind: BlockKind, duration: Duration, categories: Vec<Category>) -> Self {
        let epoch = DateTime::<Utc>::default();
        let categories = if kind.is_work() { categories } else { Vec::new() };
        Self {
            id: Uuid::nil(),
            kind,
            duration,
            categories,
            created_at: epoch,
            updated_at: epoch,
        }
    }

    pub fn minted(&self, id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id,
            created_at: now,
            updated_at: now,
            ..self.clone()
        }
    }

    /// The scheduled block this template describes, not yet minted.
    pub fn to_block(&self) -> TimeBlock {
        TimeBlock::new(self.kind, self.duration, self.categories.clone())
    }
}

impl From<&TimeBlock> for TimeBlockTemplate {
    fn from(block: &TimeBlock) -> Self {
        TimeBlockTemplate::new(block.kind(), block.duration(), block.categories().to_vec())
    }
}

impl BlockShape for TimeBlockTemplate {
    fn kind(&self) -> BlockKind {
        self.kind
    }

    fn duration(&self) -> Duration {
        self.duration
    }

    fn categories(&self) -> &[Category] {
        &self.categories
    }
}

/// A reusable session shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionTemplate {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub time_blocks: Vec<TimeBlockTemplate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SessionTemplate {
    pub fn new(name: impl Into<String>, time_blocks: Vec<TimeBlockTemplate>) -> Self {
        let epoch = DateTime::<Utc>::default();
        Self {
            id: Uuid::nil(),
            name: name.into(),
            description: None,
            is_public: false,
            time_blocks,
            created_at: epoch,
            updated_at: epoch,
        }
    }

    pub fn total_duration(&self) -> Duration {
        total_duration(&self.time_blocks)
    }
}
