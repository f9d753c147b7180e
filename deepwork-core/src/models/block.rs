use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::Category;
use crate::policy::DurationPolicy;

/// The kind of a time block.
///
/// - `DeepWork`: Focused, uninterrupted work (25 to 120 minutes)
/// - `ShallowWork`: Lighter work such as email or reviews (10 to 60 minutes)
/// - `Break`: Rest between work blocks (5 to 60 minutes)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    DeepWork,
    ShallowWork,
    Break,
}

impl BlockKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DeepWork => "deep_work",
            Self::ShallowWork => "shallow_work",
            Self::Break => "break",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "deep_work" => Some(Self::DeepWork),
            "shallow_work" => Some(Self::ShallowWork),
            "break" => Some(Self::Break),
            _ => None,
        }
    }

    pub fn is_work(&self) -> bool {
        match self {
            Self::DeepWork | Self::ShallowWork => true,
            Self::Break => false,
        }
    }

    pub fn is_break(&self) -> bool {
        !self.is_work()
    }

    pub fn policy(&self) -> DurationPolicy {
        DurationPolicy::for_kind(*self)
    }

    pub fn requires_categories(&self) -> bool {
        self.policy().requires_categories
    }
}

/// Execution status of a scheduled block.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BlockStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
    Skipped,
}

impl BlockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Skipped => "skipped",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "not_started" => Some(Self::NotStarted),
            "in_progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            "skipped" => Some(Self::Skipped),
            _ => None,
        }
    }
}

/// Payload of a deep or shallow work block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkBlock {
    pub id: Uuid,
    pub duration: Duration,
    /// One to three distinct categories once validated.
    pub categories: Vec<Category>,
    pub status: BlockStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload of a break block. Breaks are never categorized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BreakBlock {
    pub id: Uuid,
    pub duration: Duration,
    pub status: BlockStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One interval of a session's schedule.
///
/// Blocks are values: every edit produces a new instance. A block built with
/// [`TimeBlock::new`] has a nil id until it is minted by the time block
/// creation use case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimeBlock {
    DeepWork(WorkBlock),
    ShallowWork(WorkBlock),
    Break(BreakBlock),
}

impl TimeBlock {
    /// Builds an unminted block of `kind`. Categories are dropped for breaks.
    pub fn new(kind: BlockKind, duration: Duration, categories: Vec<Category>) -> Self {
        let epoch = DateTime::<Utc>::default();
        match kind {
            BlockKind::DeepWork => Self::DeepWork(WorkBlock {
                id: Uuid::nil(),
                duration,
                categories,
                status: BlockStatus::NotStarted,
                created_at: epoch,
                updated_at: epoch,
            }),
            BlockKind::ShallowWork => Self::ShallowWork(WorkBlock {
                id: Uuid::nil(),
                duration,
                categories,
                status: BlockStatus::NotStarted,
                created_at: epoch,
                updated_at: epoch,
            }),
            BlockKind::Break => Self::Break(BreakBlock {
                id: Uuid::nil(),
                duration,
                status: BlockStatus::NotStarted,
                created_at: epoch,
                updated_at: epoch,
            }),
        }
    }

    pub fn deep_work(duration: Duration, categories: Vec<Category>) -> Self {
        Self::new(BlockKind::DeepWork, duration, categories)
    }

    pub fn shallow_work(duration: Duration, categories: Vec<Category>) -> Self {
        Self::new(BlockKind::ShallowWork, duration, categories)
    }

    pub fn rest(duration: Duration) -> Self {
        Self::new(BlockKind::Break, duration, Vec::new())
    }

    /// Returns a copy stamped with `id` and `now` as creation and update time.
    pub fn minted(&self, id: Uuid, now: DateTime<Utc>) -> Self {
        let mut block = self.clone();
        match &mut block {
            Self::DeepWork(w) | Self::ShallowWork(w) => {
                w.id = id;
                w.created_at = now;
                w.updated_at = now;
            }
            Self::Break(b) => {
                b.id = id;
                b.created_at = now;
                b.updated_at = now;
            }
        }
        block
    }

    /// Returns a copy with a new execution status.
    pub fn with_status(&self, status: BlockStatus, now: DateTime<Utc>) -> Self {
        let mut block = self.clone();
        match &mut block {
            Self::DeepWork(w) | Self::ShallowWork(w) => {
                w.status = status;
                w.updated_at = now;
            }
            Self::Break(b) => {
                b.status = status;
                b.updated_at = now;
            }
        }
        block
    }

    pub fn id(&self) -> Uuid {
        match self {
            Self::DeepWork(w) | Self::ShallowWork(w) => w.id,
            Self::Break(b) => b.id,
        }
    }

    pub fn kind(&self) -> BlockKind {
        match self {
            Self::DeepWork(_) => BlockKind::DeepWork,
            Self::ShallowWork(_) => BlockKind::ShallowWork,
            Self::Break(_) => BlockKind::Break,
        }
    }

    pub fn duration(&self) -> Duration {
        match self {
            Self::DeepWork(w) | Self::ShallowWork(w) => w.duration,
            Self::Break(b) => b.duration,
        }
    }

    pub fn categories(&self) -> &[Category] {
        match self {
            Self::DeepWork(w) | Self::ShallowWork(w) => &w.categories,
            Self::Break(_) => &[],
        }
    }

    pub fn status(&self) -> BlockStatus {
        match self {
            Self::DeepWork(w) | Self::ShallowWork(w) => w.status,
            Self::Break(b) => b.status,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            Self::DeepWork(w) | Self::ShallowWork(w) => w.created_at,
            Self::Break(b) => b.created_at,
        }
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        match self {
            Self::DeepWork(w) | Self::ShallowWork(w) => w.updated_at,
            Self::Break(b) => b.updated_at,
        }
    }

    pub fn is_work(&self) -> bool {
        self.kind().is_work()
    }

    pub fn is_break(&self) -> bool {
        self.kind().is_break()
    }
}

/// The parts of a block that duration and category rules look at.
///
/// Implemented by both scheduled blocks and templates so one validator
/// serves both.
pub trait BlockShape {
    fn kind(&self) -> BlockKind;
    fn duration(&self) -> Duration;
    fn categories(&self) -> &[Category];
}

impl BlockShape for TimeBlock {
    fn kind(&self) -> BlockKind {
        TimeBlock::kind(self)
    }

    fn duration(&self) -> Duration {
        TimeBlock::duration(self)
    }

    fn categories(&self) -> &[Category] {
        TimeBlock::categories(self)
    }
}

/// Summed duration of a schedule. Saturates at [`Duration::MAX`] so an
/// oversized block trips the duration limits instead of overflowing.
pub fn total_duration<B: BlockShape>(blocks: &[B]) -> Duration {
    blocks
        .iter()
        .fold(Duration::ZERO, |total, b| total.saturating_add(b.duration()))
}
