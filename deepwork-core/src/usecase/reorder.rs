use uuid::Uuid;

use crate::error::SessionError;
use crate::models::{ScheduledSession, TimeBlock, MAX_CONSECUTIVE_WORK_DURATION};
use crate::validation::sequence::{has_adjacent_breaks, longest_work_run};

/// Moves the block with `block_id` so it lands in the slot `target_position`
/// names in the schedule as it was before the move.
///
/// A break may never be moved to either edge, and the move must not leave
/// two breaks touching. Moving a work block off an edge must not expose a
/// break there either, and the move must not build a work run longer than
/// the consecutive-work limit.
pub fn reorder_time_block(
    session: &ScheduledSession,
    block_id: Uuid,
    target_position: usize,
) -> Result<ScheduledSession, SessionError> {
    let blocks = &session.time_blocks;
    if target_position >= blocks.len() {
        return reject(session, SessionError::InvalidTimeBlockPosition);
    }
    let Some(current) = session.position_of(block_id) else {
        return reject(session, SessionError::InvalidTimeBlockPosition);
    };

    let last = blocks.len() - 1;
    if blocks[current].is_break() && (target_position == 0 || target_position == last) {
        return reject(session, SessionError::InvalidBreakPosition);
    }

    // Removing the block shifts everything after it left by one.
    let insert_at = if current < target_position {
        target_position - 1
    } else {
        target_position
    };

    let mut reordered = blocks.clone();
    let block = reordered.remove(current);
    reordered.insert(insert_at, block);

    if has_adjacent_breaks(&reordered) {
        return reject(session, SessionError::ConsecutiveBlockTypes);
    }
    if exposes_edge_break(blocks, &reordered) {
        return reject(session, SessionError::InvalidBreakPosition);
    }
    if longest_work_run(&reordered) > MAX_CONSECUTIVE_WORK_DURATION {
        return reject(session, SessionError::MaxConsecutiveDeepWorkDurationReached);
    }

    tracing::debug!(
        session_id = %session.id,
        %block_id,
        from = current,
        to = insert_at,
        "Reordered time block"
    );
    Ok(session.with_time_blocks(reordered))
}

/// True when an edge of `after` holds a break that was not already there.
///
/// Edges that held a break before the move are left to the save check.
fn exposes_edge_break(before: &[TimeBlock], after: &[TimeBlock]) -> bool {
    let newly_break = |old: Option<&TimeBlock>, new: Option<&TimeBlock>| match (old, new) {
        (Some(old), Some(new)) => new.is_break() && old.id() != new.id(),
        _ => false,
    };
    newly_break(before.first(), after.first()) || newly_break(before.last(), after.last())
}

fn reject<T>(session: &ScheduledSession, err: SessionError) -> Result<T, SessionError> {
    tracing::warn!(session_id = %session.id, error = %err, "Rejected time block reorder");
    Err(err)
}
