use std::collections::HashSet;
use std::time::Duration;

use crate::error::TimeBlockError;
use crate::models::{BlockKind, BlockShape, Category};
use crate::policy::MAX_CATEGORIES;

/// Validates a scheduled block or a template against its kind's policy.
///
/// Duration is checked first; categories only for work kinds.
pub fn validate<B: BlockShape + ?Sized>(block: &B) -> Result<(), TimeBlockError> {
    validate_duration(block.kind(), block.duration())?;
    if block.kind().requires_categories() {
        validate_categories(block.kind(), block.categories())?;
    }
    Ok(())
}

pub fn validate_duration(kind: BlockKind, duration: Duration) -> Result<(), TimeBlockError> {
    let policy = kind.policy();
    if duration < policy.min {
        return Err(TimeBlockError::DurationTooShort(policy.min));
    }
    if duration > policy.max {
        return Err(TimeBlockError::DurationTooLong(policy.max));
    }
    Ok(())
}

pub fn validate_categories(kind: BlockKind, categories: &[Category]) -> Result<(), TimeBlockError> {
    if !kind.requires_categories() {
        return Ok(());
    }
    if categories.is_empty() || categories.len() > MAX_CATEGORIES {
        return Err(TimeBlockError::InvalidCategoryCount);
    }
    let mut seen = HashSet::with_capacity(categories.len());
    if !categories.iter().all(|c| seen.insert(c.id)) {
        return Err(TimeBlockError::DuplicateCategories);
    }
    Ok(())
}
