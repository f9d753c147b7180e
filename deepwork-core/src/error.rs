//! Error taxonomy for the composition engine.
//!
//! Each validator owns a small error enum. [`Error`] unions them with the
//! opaque storage failures forwarded from repository collaborators, so a use
//! case can return one type while callers still match on the specific kind.

use std::time::Duration;

use thiserror::Error;
use uuid::Uuid;

use crate::models::SessionStatus;

/// Shorthand used across the engine.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Fallback display key for errors a caller does not recognize.
pub const GENERIC_MESSAGE_KEY: &str = "error.generic";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CategoryError {
    #[error("Invalid category name: {0}")]
    InvalidName(String),

    #[error("Invalid category color {0:#010x}: must be an opaque ARGB value")]
    InvalidColor(u32),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeBlockError {
    #[error("Invalid duration: must be at least {} minutes", .0.as_secs() / 60)]
    DurationTooShort(Duration),

    #[error("Invalid duration: must be at most {} minutes", .0.as_secs() / 60)]
    DurationTooLong(Duration),

    #[error("Invalid number of categories")]
    InvalidCategoryCount,

    #[error("Cannot have duplicate categories")]
    DuplicateCategories,

    #[error("Category not found: {0}")]
    UnknownCategory(Uuid),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Invalid session name: {0}")]
    InvalidName(String),

    #[error("Max time blocks reached")]
    MaxTimeBlocksReached,

    #[error("A session needs at least one work block")]
    MinTimeBlocksReached,

    #[error("Cannot have consecutive break blocks")]
    ConsecutiveBlockTypes,

    #[error("Invalid break position")]
    InvalidBreakPosition,

    #[error("Max session duration reached")]
    MaxSessionDurationReached,

    #[error("Cannot schedule more than 2.5 hours of consecutive work")]
    MaxConsecutiveDeepWorkDurationReached,

    #[error("Invalid time block position")]
    InvalidTimeBlockPosition,

    #[error("Cannot move session from {from:?} to {to:?}")]
    InvalidStatusTransition {
        from: SessionStatus,
        to: SessionStatus,
    },
}

/// Any failure a use case can report.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Category(#[from] CategoryError),

    #[error(transparent)]
    TimeBlock(#[from] TimeBlockError),

    #[error(transparent)]
    Session(#[from] SessionError),

    /// Failure raised by a repository, forwarded unchanged.
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl CategoryError {
    pub fn message_key(&self) -> &'static str {
        match self {
            Self::InvalidName(_) => "category.invalid_name",
            Self::InvalidColor(_) => "category.invalid_color",
        }
    }
}

impl TimeBlockError {
    pub fn message_key(&self) -> &'static str {
        match self {
            Self::DurationTooShort(_) => "time_block.duration_too_short",
            Self::DurationTooLong(_) => "time_block.duration_too_long",
            Self::InvalidCategoryCount => "time_block.invalid_category_count",
            Self::DuplicateCategories => "time_block.duplicate_categories",
            Self::UnknownCategory(_) => "time_block.unknown_category",
        }
    }
}

impl SessionError {
    pub fn message_key(&self) -> &'static str {
        match self {
            Self::InvalidName(_) => "session.invalid_name",
            Self::MaxTimeBlocksReached => "session.max_time_blocks",
            Self::MinTimeBlocksReached => "session.min_time_blocks",
            Self::ConsecutiveBlockTypes => "session.consecutive_breaks",
            Self::InvalidBreakPosition => "session.invalid_break_position",
            Self::MaxSessionDurationReached => "session.max_duration",
            Self::MaxConsecutiveDeepWorkDurationReached => "session.max_consecutive_work",
            Self::InvalidTimeBlockPosition => "session.invalid_position",
            Self::InvalidStatusTransition { .. } => "session.invalid_status_transition",
        }
    }
}

impl Error {
    /// Display-message key for the failure, if it is one the engine knows.
    ///
    /// Storage failures are opaque and carry no key; callers show
    /// [`GENERIC_MESSAGE_KEY`] for those.
    pub fn message_key(&self) -> Option<&'static str> {
        match self {
            Self::Category(e) => Some(e.message_key()),
            Self::TimeBlock(e) => Some(e.message_key()),
            Self::Session(e) => Some(e.message_key()),
            Self::Storage(_) => None,
        }
    }

    pub fn as_session(&self) -> Option<&SessionError> {
        match self {
            Self::Session(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}
