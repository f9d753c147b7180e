//! Storage collaborators the use cases call out to.
//!
//! The engine never opens storage on its own. Front ends construct an
//! implementation (SQLite in the `deepwork` crate, in-memory fakes in tests)
//! and hand it to the use cases that need it.

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Category, ScheduledSession};

/// Persistence for user-defined categories.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All stored categories, ordered by name.
    async fn get_all(&self) -> Result<Vec<Category>>;

    /// - `Ok(Some(Category))`: Category found
    /// - `Ok(None)`: Category not found
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Category>>;

    /// Inserts or replaces a category and returns the stored value.
    async fn upsert(&self, category: Category) -> Result<Category>;

    /// Deletes a category. Deleting a missing category is not an error.
    async fn delete(&self, category: &Category) -> Result<()>;
}

/// Persistence for scheduled sessions.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Stores the session with its full schedule and returns the stored value.
    async fn save(&self, session: &ScheduledSession) -> Result<ScheduledSession>;
}
