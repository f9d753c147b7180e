use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::block::{total_duration, TimeBlock};
use crate::error::SessionError;
use crate::policy::minutes;

/// Upper bound on the number of blocks in one session.
pub const MAX_TIME_BLOCKS: usize = 12;

/// Upper bound on the summed duration of a session.
pub const MAX_SESSION_DURATION: Duration = minutes(12 * 60);

/// Upper bound on the summed duration of a run of work blocks with no break.
pub const MAX_CONSECUTIVE_WORK_DURATION: Duration = minutes(150);

/// A user-named schedule of time blocks.
///
/// Sessions are snapshots. Sequencing use cases borrow one and return a new
/// value; a holder replaces its copy wholesale on success and keeps it on
/// failure.
///
/// # Lifecycle
/// `NotStarted` → `InProgress` → `Completed`, with `Cancelled` reachable from
/// either of the first two.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduledSession {
    pub id: Uuid,
    /// Template this session was stamped from, if any.
    pub template_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    /// The schedule. Order is significant.
    pub time_blocks: Vec<TimeBlock>,
    pub status: SessionStatus,
    pub scheduled_start: DateTime<Utc>,
    pub actual_start: Option<DateTime<Utc>>,
    pub actual_end: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The lifecycle status of a session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    NotStarted,
    InProgress,
    Completed,
    Cancelled,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "not_started" => Some(Self::NotStarted),
            "in_progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn can_transition_to(&self, next: SessionStatus) -> bool {
        matches!(
            (self, next),
            (Self::NotStarted, Self::InProgress)
                | (Self::InProgress, Self::Completed)
                | (Self::NotStarted, Self::Cancelled)
                | (Self::InProgress, Self::Cancelled)
        )
    }
}

impl ScheduledSession {
    /// An empty, not yet created session. The id stays nil until the create
    /// use case assigns one.
    pub fn draft(name: impl Into<String>, scheduled_start: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::nil(),
            template_id: None,
            name: name.into(),
            description: None,
            time_blocks: Vec::new(),
            status: SessionStatus::NotStarted,
            scheduled_start,
            actual_start: None,
            actual_end: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn total_duration(&self) -> Duration {
        total_duration(&self.time_blocks)
    }

    pub fn work_block_count(&self) -> usize {
        self.time_blocks.iter().filter(|b| b.is_work()).count()
    }

    pub fn position_of(&self, block_id: Uuid) -> Option<usize> {
        self.time_blocks.iter().position(|b| b.id() == block_id)
    }

    /// A copy of this session with its schedule replaced.
    pub fn with_time_blocks(&self, time_blocks: Vec<TimeBlock>) -> Self {
        Self {
            time_blocks,
            ..self.clone()
        }
    }

    pub fn start(&self, now: DateTime<Utc>) -> Result<Self, SessionError> {
        let mut next = self.transition(SessionStatus::InProgress, now)?;
        next.actual_start = Some(now);
        Ok(next)
    }

    pub fn complete(&self, now: DateTime<Utc>) -> Result<Self, SessionError> {
        let mut next = self.transition(SessionStatus::Completed, now)?;
        next.actual_end = Some(now);
        Ok(next)
    }

    pub fn cancel(&self, now: DateTime<Utc>) -> Result<Self, SessionError> {
        let mut next = self.transition(SessionStatus::Cancelled, now)?;
        next.actual_end = Some(now);
        Ok(next)
    }

    fn transition(&self, to: SessionStatus, now: DateTime<Utc>) -> Result<Self, SessionError> {
        if !self.status.can_transition_to(to) {
            return Err(SessionError::InvalidStatusTransition {
                from: self.status,
                to,
            });
        }
        Ok(Self {
            status: to,
            updated_at: now,
            ..self.clone()
        })
    }
}
