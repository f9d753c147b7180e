use std::sync::Arc;

use uuid::Uuid;

use crate::clock::{Clock, IdGenerator};
use crate::error::{Result, TimeBlockError};
use crate::models::{Category, TimeBlock, TimeBlockTemplate};
use crate::repository::CategoryRepository;
use crate::validation::time_block;

/// Validates a block and mints it with a fresh id and timestamps.
///
/// This is the only place new block identities come from; the sequencing
/// use cases expect blocks that already passed through here.
pub struct CreateTimeBlock {
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl CreateTimeBlock {
    pub fn new(ids: Arc<dyn IdGenerator>, clock: Arc<dyn Clock>) -> Self {
        Self { ids, clock }
    }

    pub fn execute(&self, block: &TimeBlock) -> Result<TimeBlock, TimeBlockError> {
        time_block::validate(block)?;
        Ok(block.minted(self.ids.new_id(), self.clock.now()))
    }

    pub fn execute_template(
        &self,
        template: &TimeBlockTemplate,
    ) -> Result<TimeBlockTemplate, TimeBlockError> {
        time_block::validate(template)?;
        Ok(template.minted(self.ids.new_id(), self.clock.now()))
    }
}

/// Looks up the categories a new work block references.
///
/// The nil id resolves to the built-in uncategorized category without a
/// repository round trip. Order follows `ids`.
pub async fn resolve_categories(
    repository: &dyn CategoryRepository,
    ids: &[Uuid],
) -> Result<Vec<Category>> {
    let mut categories = Vec::with_capacity(ids.len());
    for &id in ids {
        if id.is_nil() {
            categories.push(Category::uncategorized());
            continue;
        }
        let category = repository
            .get_by_id(id)
            .await?
            .ok_or(TimeBlockError::UnknownCategory(id))?;
        categories.push(category);
    }
    Ok(categories)
}
