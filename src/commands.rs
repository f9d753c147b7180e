//! What the `dw` subcommands do, minus argument parsing and printing.

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use deepwork_core::models::*;
use deepwork_core::policy::minutes;
use deepwork_core::usecase::{
    add_time_block, resolve_categories, CreateCategory, CreateSession, CreateSessionTemplate,
    CreateTimeBlock, GetCategories, InsertPosition, InstantiateTemplate, SaveSession,
};
use deepwork_core::{Clock, IdGenerator, RandomIds, SystemClock};
use uuid::Uuid;

use crate::block_spec::BlockSpec;
use crate::db::Database;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Start,
    Complete,
    Cancel,
}

/// Wires the engine's use cases to the SQLite store.
pub struct Planner {
    db: Database,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl Planner {
    pub fn new(db: Database) -> Self {
        Self::with_sources(db, Arc::new(RandomIds), Arc::new(SystemClock))
    }

    pub fn with_sources(db: Database, ids: Arc<dyn IdGenerator>, clock: Arc<dyn Clock>) -> Self {
        Self { db, ids, clock }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    fn save_session_use_case(&self) -> SaveSession {
        SaveSession::new(Arc::new(self.db.clone()), self.clock.clone())
    }

    // ============================================================
    // Categories
    // ============================================================

    pub async fn categories(&self) -> Result<Vec<Category>> {
        let categories = GetCategories::new(Arc::new(self.db.clone())).execute().await?;
        Ok(categories)
    }

    pub async fn add_category(&self, name: &str, color: u32) -> Result<Category> {
        let create = CreateCategory::new(
            Arc::new(self.db.clone()),
            self.ids.clone(),
            self.clock.clone(),
        );
        let category = create.execute(Category::new(name, color)).await?;
        tracing::info!(category_id = %category.id, name = %category.name, "Added category");
        Ok(category)
    }

    /// Turns the category names typed for one work block into categories.
    ///
    /// Names match case-insensitively. No names means the default category.
    async fn resolve_names(&self, names: &[String]) -> Result<Vec<Category>> {
        let ids = if names.is_empty() {
            vec![Uuid::nil()]
        } else {
            let known = self.db.get_all_categories()?;
            names
                .iter()
                .map(|name| {
                    known
                        .iter()
                        .find(|c| c.name.eq_ignore_ascii_case(name))
                        .map(|c| c.id)
                        .ok_or_else(|| {
                            anyhow!("Unknown category '{name}'. Add it with `dw categories add`")
                        })
                })
                .collect::<Result<Vec<_>>>()?
        };
        Ok(resolve_categories(&self.db, &ids).await?)
    }

    async fn build_block(&self, spec: &BlockSpec) -> Result<TimeBlock> {
        let categories = if spec.kind.is_work() {
            self.resolve_names(&spec.categories).await?
        } else {
            Vec::new()
        };
        let block = TimeBlock::new(spec.kind, minutes(spec.minutes), categories);
        let block = CreateTimeBlock::new(self.ids.clone(), self.clock.clone()).execute(&block)?;
        Ok(block)
    }

    // ============================================================
    // Sessions
    // ============================================================

    /// Composes a session block by block and saves it.
    pub async fn plan(
        &self,
        name: &str,
        description: Option<String>,
        start: DateTime<Utc>,
        blocks: &[BlockSpec],
    ) -> Result<ScheduledSession> {
        let mut draft = ScheduledSession::draft(name, start, self.clock.now());
        draft.description = description;
        let mut session = CreateSession::new(self.ids.clone()).execute(&draft)?;

        for (i, spec) in blocks.iter().enumerate() {
            let block = self
                .build_block(spec)
                .await
                .with_context(|| format!("Block {} is invalid", i + 1))?;
            session = add_time_block(&session, block, InsertPosition::Append)
                .with_context(|| format!("Block {} doesn't fit the session", i + 1))?;
        }

        let saved = self.save_session_use_case().execute(&session).await?;
        tracing::info!(session_id = %saved.id, "Planned session");
        Ok(saved)
    }

    pub fn sessions(&self) -> Result<Vec<ScheduledSession>> {
        self.db.get_all_sessions()
    }

    pub fn session(&self, id: Uuid) -> Result<ScheduledSession> {
        self.db
            .get_session(id)?
            .ok_or_else(|| anyhow!("Session {id} not found"))
    }

    pub async fn transition(&self, id: Uuid, transition: Transition) -> Result<ScheduledSession> {
        let session = self.session(id)?;
        let now = self.clock.now();
        let next = match transition {
            Transition::Start => session.start(now),
            Transition::Complete => session.complete(now),
            Transition::Cancel => session.cancel(now),
        }?;
        let saved = self.save_session_use_case().execute(&next).await?;
        Ok(saved)
    }

    pub fn delete_session(&self, id: Uuid) -> Result<()> {
        if !self.db.delete_session(id)? {
            anyhow::bail!("Session {id} not found");
        }
        Ok(())
    }

    // ============================================================
    // Templates
    // ============================================================

    pub async fn save_template(
        &self,
        name: &str,
        description: Option<String>,
        blocks: &[BlockSpec],
    ) -> Result<SessionTemplate> {
        let mut time_blocks = Vec::with_capacity(blocks.len());
        for spec in blocks {
            let categories = if spec.kind.is_work() {
                self.resolve_names(&spec.categories).await?
            } else {
                Vec::new()
            };
            time_blocks.push(TimeBlockTemplate::new(
                spec.kind,
                minutes(spec.minutes),
                categories,
            ));
        }

        let mut template = SessionTemplate::new(name, time_blocks);
        template.description = description;
        let template =
            CreateSessionTemplate::new(self.ids.clone(), self.clock.clone()).execute(&template)?;

        let stored = self.db.save_template(&template)?;
        tracing::info!(template_id = %stored.id, name = %stored.name, "Saved template");
        Ok(stored)
    }

    pub fn templates(&self) -> Result<Vec<SessionTemplate>> {
        self.db.get_all_templates()
    }

    /// Schedules a new session from a stored template and saves it.
    pub async fn use_template(&self, id: Uuid, start: DateTime<Utc>) -> Result<ScheduledSession> {
        let template = self
            .db
            .get_template(id)?
            .ok_or_else(|| anyhow!("Template {id} not found"))?;
        let session =
            InstantiateTemplate::new(self.ids.clone(), self.clock.clone()).execute(&template, start)?;
        let saved = self.save_session_use_case().execute(&session).await?;
        Ok(saved)
    }
}

/// `<prefix> YYYY-MM-DD`, a name the session name rules accept.
pub fn default_session_name(prefix: &str, start: DateTime<Utc>) -> String {
    format!("{} {}", prefix.trim(), start.format("%Y-%m-%d"))
}

/// Accepts `0xAARRGGBB` or `#RRGGBB` (made opaque).
pub fn parse_color(s: &str) -> Result<u32, String> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() != 6 {
            return Err(format!("expected #RRGGBB, got '{s}'"));
        }
        return u32::from_str_radix(hex, 16)
            .map(|rgb| 0xFF00_0000 | rgb)
            .map_err(|_| format!("invalid hex color '{s}'"));
    }
    let hex = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .ok_or_else(|| format!("expected 0xAARRGGBB or #RRGGBB, got '{s}'"))?;
    u32::from_str_radix(hex, 16).map_err(|_| format!("invalid hex color '{s}'"))
}
