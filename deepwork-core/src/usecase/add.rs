use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::models::{
    ScheduledSession, TimeBlock, MAX_CONSECUTIVE_WORK_DURATION, MAX_SESSION_DURATION,
    MAX_TIME_BLOCKS,
};
use crate::validation::sequence::longest_work_run;

/// Where a new block goes.
///
/// `Before(i)` inserts ahead of the block currently at `i`, so only existing
/// indices are valid. Appending is always spelled `Append`; an explicit
/// index equal to the length is rejected.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum InsertPosition {
    #[default]
    Append,
    Before(usize),
}

impl InsertPosition {
    /// Raw value front ends use for "append".
    pub const APPEND_SENTINEL: i64 = -1;

    /// Decodes a raw position where `-1` means append.
    pub fn from_raw(raw: i64) -> Result<Self, SessionError> {
        match raw {
            Self::APPEND_SENTINEL => Ok(Self::Append),
            i if i >= 0 => usize::try_from(i)
                .map(Self::Before)
                .map_err(|_| SessionError::InvalidTimeBlockPosition),
            _ => Err(SessionError::InvalidTimeBlockPosition),
        }
    }
}

/// Inserts `block` into the session's schedule.
///
/// Checks run in a fixed order and the first failure wins: position (an id
/// already in the schedule counts as a bad position), capacity, break
/// placement, break adjacency, total duration, and finally the longest run
/// of work blocks. `block` must already be minted.
pub fn add_time_block(
    session: &ScheduledSession,
    block: TimeBlock,
    position: InsertPosition,
) -> Result<ScheduledSession, SessionError> {
    let blocks = &session.time_blocks;

    let index = match position {
        InsertPosition::Append => blocks.len(),
        InsertPosition::Before(i) if i < blocks.len() => i,
        InsertPosition::Before(_) => return reject(session, SessionError::InvalidTimeBlockPosition),
    };
    if session.position_of(block.id()).is_some() {
        return reject(session, SessionError::InvalidTimeBlockPosition);
    }

    if blocks.len() >= MAX_TIME_BLOCKS {
        return reject(session, SessionError::MaxTimeBlocksReached);
    }

    if block.is_break() {
        // A break can never open the schedule.
        if index == 0 {
            return reject(session, SessionError::InvalidBreakPosition);
        }
        let previous = blocks.get(index - 1);
        let next = blocks.get(index);
        if previous.is_some_and(TimeBlock::is_break) || next.is_some_and(TimeBlock::is_break) {
            return reject(session, SessionError::ConsecutiveBlockTypes);
        }
    }

    let within_limit = session
        .total_duration()
        .checked_add(block.duration())
        .is_some_and(|total| total <= MAX_SESSION_DURATION);
    if !within_limit {
        return reject(session, SessionError::MaxSessionDurationReached);
    }

    let is_work = block.is_work();
    let mut updated = blocks.clone();
    updated.insert(index, block);

    if is_work && longest_work_run(&updated) > MAX_CONSECUTIVE_WORK_DURATION {
        return reject(session, SessionError::MaxConsecutiveDeepWorkDurationReached);
    }

    tracing::debug!(
        session_id = %session.id,
        index,
        blocks = updated.len(),
        "Added time block"
    );
    Ok(session.with_time_blocks(updated))
}

fn reject<T>(session: &ScheduledSession, err: SessionError) -> Result<T, SessionError> {
    tracing::warn!(session_id = %session.id, error = %err, "Rejected time block insert");
    Err(err)
}
