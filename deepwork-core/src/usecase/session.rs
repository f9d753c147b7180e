use std::sync::Arc;

use crate::clock::{Clock, IdGenerator};
use crate::error::{Result, SessionError};
use crate::models::ScheduledSession;
use crate::repository::SessionRepository;
use crate::validation::validate_sequence;

pub use crate::validation::validate_session_name;

/// Validates a draft session's name and gives it an identity.
///
/// Sessions that already carry an id keep it, so creating twice is a no-op.
pub struct CreateSession {
    ids: Arc<dyn IdGenerator>,
}

impl CreateSession {
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self { ids }
    }

    pub fn execute(&self, session: &ScheduledSession) -> Result<ScheduledSession, SessionError> {
        validate_session_name(&session.name)?;
        let id = if session.id.is_nil() {
            self.ids.new_id()
        } else {
            session.id
        };
        tracing::debug!(session_id = %id, name = %session.name, "Created session");
        Ok(ScheduledSession {
            id,
            ..session.clone()
        })
    }
}

/// Validates a session and hands it to the session repository.
///
/// The repository is called at most once, and only after every check
/// passed. Its failures come back as [`crate::Error::Storage`] unchanged.
pub struct SaveSession {
    repository: Arc<dyn SessionRepository>,
    clock: Arc<dyn Clock>,
}

impl SaveSession {
    pub fn new(repository: Arc<dyn SessionRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub async fn execute(&self, session: &ScheduledSession) -> Result<ScheduledSession> {
        validate_session_name(&session.name)?;
        if session.time_blocks.is_empty() || session.work_block_count() == 0 {
            return Err(SessionError::MinTimeBlocksReached.into());
        }
        validate_sequence(&session.time_blocks)?;

        let stamped = ScheduledSession {
            updated_at: self.clock.now(),
            ..session.clone()
        };
        let saved = self.repository.save(&stamped).await.map_err(|e| {
            tracing::error!(session_id = %session.id, error = %e, "Failed to save session");
            e
        })?;

        tracing::info!(
            session_id = %saved.id,
            blocks = saved.time_blocks.len(),
            total_minutes = saved.total_duration().as_secs() / 60,
            "Saved session"
        );
        Ok(saved)
    }
}
