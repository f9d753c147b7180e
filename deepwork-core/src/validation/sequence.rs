//! Whole-schedule checks shared by the sequencing use cases.

use std::time::Duration;

use crate::error::SessionError;
use crate::models::{
    total_duration, TimeBlock, MAX_CONSECUTIVE_WORK_DURATION, MAX_SESSION_DURATION,
    MAX_TIME_BLOCKS,
};

/// Longest summed duration of a run of work blocks. Breaks reset the run.
pub fn longest_work_run(blocks: &[TimeBlock]) -> Duration {
    let mut longest = Duration::ZERO;
    let mut current = Duration::ZERO;
    for block in blocks {
        if block.is_work() {
            current = current.saturating_add(block.duration());
            longest = longest.max(current);
        } else {
            current = Duration::ZERO;
        }
    }
    longest
}

pub fn has_adjacent_breaks(blocks: &[TimeBlock]) -> bool {
    blocks.windows(2).any(|w| w[0].is_break() && w[1].is_break())
}

pub fn starts_with_break(blocks: &[TimeBlock]) -> bool {
    blocks.first().is_some_and(TimeBlock::is_break)
}

pub fn ends_with_break(blocks: &[TimeBlock]) -> bool {
    blocks.last().is_some_and(TimeBlock::is_break)
}

/// Checks every schedule rule at once.
///
/// Used where a schedule arrives from outside the sequencing use cases
/// (saving, template instantiation) rather than being built edit by edit.
pub fn validate_sequence(blocks: &[TimeBlock]) -> Result<(), SessionError> {
    if blocks.len() > MAX_TIME_BLOCKS {
        return Err(SessionError::MaxTimeBlocksReached);
    }
    if starts_with_break(blocks) || ends_with_break(blocks) {
        return Err(SessionError::InvalidBreakPosition);
    }
    if has_adjacent_breaks(blocks) {
        return Err(SessionError::ConsecutiveBlockTypes);
    }
    if total_duration(blocks) > MAX_SESSION_DURATION {
        return Err(SessionError::MaxSessionDurationReached);
    }
    if longest_work_run(blocks) > MAX_CONSECUTIVE_WORK_DURATION {
        return Err(SessionError::MaxConsecutiveDeepWorkDurationReached);
    }
    Ok(())
}
