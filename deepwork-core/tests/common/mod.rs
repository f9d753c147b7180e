#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use deepwork_core::models::*;
use deepwork_core::policy::minutes;
use deepwork_core::repository::{CategoryRepository, SessionRepository};
use deepwork_core::{Clock, IdGenerator};
use uuid::Uuid;

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap()
}

pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Hands out `00000000-0000-0000-0000-000000000001`, `...02`, and so on.
#[derive(Default)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl IdGenerator for SequentialIds {
    fn new_id(&self) -> Uuid {
        let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        Uuid::from_u128(n as u128)
    }
}

pub fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock(fixed_now()))
}

pub fn ids() -> Arc<SequentialIds> {
    Arc::new(SequentialIds::default())
}

pub fn writing() -> Category {
    Category {
        id: Uuid::from_u128(0xC1),
        name: "Writing".to_string(),
        color: 0xFF33_6699,
        created_at: fixed_now(),
        updated_at: fixed_now(),
    }
}

pub fn email() -> Category {
    Category {
        id: Uuid::from_u128(0xC2),
        name: "Email".to_string(),
        color: 0xFFAA_3300,
        created_at: fixed_now(),
        updated_at: fixed_now(),
    }
}

pub fn deep(mins: u64) -> TimeBlock {
    TimeBlock::deep_work(minutes(mins), vec![writing()]).minted(Uuid::new_v4(), fixed_now())
}

pub fn shallow(mins: u64) -> TimeBlock {
    TimeBlock::shallow_work(minutes(mins), vec![email()]).minted(Uuid::new_v4(), fixed_now())
}

pub fn rest(mins: u64) -> TimeBlock {
    TimeBlock::rest(minutes(mins)).minted(Uuid::new_v4(), fixed_now())
}

pub fn empty_session() -> ScheduledSession {
    let mut session = ScheduledSession::draft("Morning Session", fixed_now(), fixed_now());
    session.id = Uuid::new_v4();
    session
}

pub fn session_with(blocks: Vec<TimeBlock>) -> ScheduledSession {
    empty_session().with_time_blocks(blocks)
}

pub fn kinds(session: &ScheduledSession) -> Vec<BlockKind> {
    session.time_blocks.iter().map(|b| b.kind()).collect()
}

pub fn block_ids(session: &ScheduledSession) -> Vec<Uuid> {
    session.time_blocks.iter().map(|b| b.id()).collect()
}

/// Session repository that records what it was asked to save.
#[derive(Default)]
pub struct MemorySessionRepository {
    pub saved: Mutex<Vec<ScheduledSession>>,
    pub fail_with: Option<String>,
}

impl MemorySessionRepository {
    pub fn failing(message: &str) -> Self {
        Self {
            saved: Mutex::new(Vec::new()),
            fail_with: Some(message.to_string()),
        }
    }

    pub fn save_count(&self) -> usize {
        self.saved.lock().unwrap().len()
    }
}

#[async_trait]
impl SessionRepository for MemorySessionRepository {
    async fn save(&self, session: &ScheduledSession) -> Result<ScheduledSession> {
        if let Some(message) = &self.fail_with {
            anyhow::bail!("{}", message);
        }
        self.saved.lock().unwrap().push(session.clone());
        Ok(session.clone())
    }
}

#[derive(Default)]
pub struct MemoryCategoryRepository {
    pub categories: Mutex<Vec<Category>>,
    pub fail_with: Option<String>,
}

impl MemoryCategoryRepository {
    pub fn with(categories: Vec<Category>) -> Self {
        Self {
            categories: Mutex::new(categories),
            fail_with: None,
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            categories: Mutex::new(Vec::new()),
            fail_with: Some(message.to_string()),
        }
    }
}

#[async_trait]
impl CategoryRepository for MemoryCategoryRepository {
    async fn get_all(&self) -> Result<Vec<Category>> {
        if let Some(message) = &self.fail_with {
            anyhow::bail!("{}", message);
        }
        let mut all = self.categories.lock().unwrap().clone();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Category>> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn upsert(&self, category: Category) -> Result<Category> {
        if let Some(message) = &self.fail_with {
            anyhow::bail!("{}", message);
        }
        let mut categories = self.categories.lock().unwrap();
        categories.retain(|c| c.id != category.id);
        categories.push(category.clone());
        Ok(category)
    }

    async fn delete(&self, category: &Category) -> Result<()> {
        self.categories.lock().unwrap().retain(|c| c.id != category.id);
        Ok(())
    }
}
