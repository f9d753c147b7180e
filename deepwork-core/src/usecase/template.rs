use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::add::{add_time_block, InsertPosition};
use super::session::CreateSession;
use super::time_block::CreateTimeBlock;
use crate::clock::{Clock, IdGenerator};
use crate::error::{Result, SessionError};
use crate::models::{ScheduledSession, SessionTemplate, TimeBlock};
use crate::validation::{validate_sequence, validate_session_name};

/// Validates a session template and mints it and its blocks.
///
/// Templates obey the same rules as a saved session: a valid name, at least
/// one work block, every block within its policy, and a legal ordering.
pub struct CreateSessionTemplate {
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl CreateSessionTemplate {
    pub fn new(ids: Arc<dyn IdGenerator>, clock: Arc<dyn Clock>) -> Self {
        Self { ids, clock }
    }

    pub fn execute(&self, template: &SessionTemplate) -> Result<SessionTemplate> {
        validate_session_name(&template.name)?;

        let blocks = CreateTimeBlock::new(self.ids.clone(), self.clock.clone());
        let minted = template
            .time_blocks
            .iter()
            .map(|b| blocks.execute_template(b))
            .collect::<Result<Vec<_>, _>>()?;

        let shape: Vec<TimeBlock> = minted.iter().map(|b| b.to_block()).collect();
        if !shape.iter().any(TimeBlock::is_work) {
            return Err(SessionError::MinTimeBlocksReached.into());
        }
        validate_sequence(&shape)?;

        let now = self.clock.now();
        let id = if template.id.is_nil() {
            self.ids.new_id()
        } else {
            template.id
        };
        Ok(SessionTemplate {
            id,
            time_blocks: minted,
            created_at: if template.id.is_nil() { now } else { template.created_at },
            updated_at: now,
            ..template.clone()
        })
    }
}

/// Stamps a new scheduled session out of a template.
///
/// Every template block is minted and pushed through the add use case in
/// order, so the result satisfies the same rules as a hand-built session.
pub struct InstantiateTemplate {
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl InstantiateTemplate {
    pub fn new(ids: Arc<dyn IdGenerator>, clock: Arc<dyn Clock>) -> Self {
        Self { ids, clock }
    }

    pub fn execute(
        &self,
        template: &SessionTemplate,
        scheduled_start: DateTime<Utc>,
    ) -> Result<ScheduledSession> {
        let now = self.clock.now();
        let mut draft = ScheduledSession::draft(template.name.clone(), scheduled_start, now);
        draft.description = template.description.clone();
        draft.template_id = (!template.id.is_nil()).then_some(template.id);

        let mut session = CreateSession::new(self.ids.clone()).execute(&draft)?;
        let blocks = CreateTimeBlock::new(self.ids.clone(), self.clock.clone());
        for block_template in &template.time_blocks {
            let block = blocks.execute(&block_template.to_block())?;
            session = add_time_block(&session, block, InsertPosition::Append)?;
        }

        if session.work_block_count() == 0 {
            return Err(SessionError::MinTimeBlocksReached.into());
        }
        validate_sequence(&session.time_blocks)?;

        tracing::info!(
            session_id = %session.id,
            template_id = %template.id,
            blocks = session.time_blocks.len(),
            "Instantiated session from template"
        );
        Ok(session)
    }
}
