use std::sync::Arc;

use crate::clock::{Clock, IdGenerator};
use crate::error::Result;
use crate::models::Category;
use crate::repository::CategoryRepository;
use crate::validation::category::validate;

/// Validates a category and upserts it.
///
/// New categories (nil id) get a fresh id and creation time; existing ones
/// keep both and only move `updated_at`.
pub struct CreateCategory {
    repository: Arc<dyn CategoryRepository>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl CreateCategory {
    pub fn new(
        repository: Arc<dyn CategoryRepository>,
        ids: Arc<dyn IdGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            ids,
            clock,
        }
    }

    pub async fn execute(&self, category: Category) -> Result<Category> {
        validate(&category)?;

        let now = self.clock.now();
        let prepared = if category.is_default() {
            Category {
                id: self.ids.new_id(),
                created_at: now,
                updated_at: now,
                ..category
            }
        } else {
            Category {
                updated_at: now,
                ..category
            }
        };

        let stored = self.repository.upsert(prepared).await?;
        tracing::debug!(category_id = %stored.id, name = %stored.name, "Stored category");
        Ok(stored)
    }
}

/// Lists every stored category.
pub struct GetCategories {
    repository: Arc<dyn CategoryRepository>,
}

impl GetCategories {
    pub fn new(repository: Arc<dyn CategoryRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> Result<Vec<Category>> {
        Ok(self.repository.get_all().await?)
    }
}
