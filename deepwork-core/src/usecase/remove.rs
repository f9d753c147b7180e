use uuid::Uuid;

use crate::error::SessionError;
use crate::models::{ScheduledSession, MAX_CONSECUTIVE_WORK_DURATION};
use crate::validation::sequence::{
    ends_with_break, has_adjacent_breaks, longest_work_run, starts_with_break,
};

/// Removes the block with `block_id` from the schedule.
///
/// The last work block can't be removed. The result must not start or end
/// with a break, must not leave two breaks touching, and must not merge two
/// work runs into one longer than the consecutive-work limit. A break left
/// alone between two work blocks is kept as is.
pub fn remove_time_block(
    session: &ScheduledSession,
    block_id: Uuid,
) -> Result<ScheduledSession, SessionError> {
    let Some(index) = session.position_of(block_id) else {
        return reject(session, SessionError::InvalidTimeBlockPosition);
    };

    let target = &session.time_blocks[index];
    if target.is_work() && session.work_block_count() <= 1 {
        return reject(session, SessionError::MinTimeBlocksReached);
    }

    let mut remaining = session.time_blocks.clone();
    remaining.remove(index);

    if starts_with_break(&remaining) || ends_with_break(&remaining) {
        return reject(session, SessionError::InvalidBreakPosition);
    }
    if has_adjacent_breaks(&remaining) {
        return reject(session, SessionError::ConsecutiveBlockTypes);
    }
    if longest_work_run(&remaining) > MAX_CONSECUTIVE_WORK_DURATION {
        return reject(session, SessionError::MaxConsecutiveDeepWorkDurationReached);
    }

    tracing::debug!(
        session_id = %session.id,
        %block_id,
        blocks = remaining.len(),
        "Removed time block"
    );
    Ok(session.with_time_blocks(remaining))
}

fn reject<T>(session: &ScheduledSession, err: SessionError) -> Result<T, SessionError> {
    tracing::warn!(session_id = %session.id, error = %err, "Rejected time block removal");
    Err(err)
}
