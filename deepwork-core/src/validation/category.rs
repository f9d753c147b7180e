use crate::error::CategoryError;
use crate::models::Category;

pub const NAME_MAX_LENGTH: usize = 30;

const OPAQUE_ALPHA: u32 = 0xFF00_0000;

pub fn validate(category: &Category) -> Result<(), CategoryError> {
    validate_name(&category.name)?;
    validate_color(category.color)
}

pub fn validate_name(name: &str) -> Result<(), CategoryError> {
    if name.trim().is_empty() {
        return Err(CategoryError::InvalidName("Name cannot be empty".to_string()));
    }
    if name.chars().count() > NAME_MAX_LENGTH {
        return Err(CategoryError::InvalidName(format!(
            "Name can't be longer than {} characters",
            NAME_MAX_LENGTH
        )));
    }
    Ok(())
}

/// Colors are packed ARGB and must be fully opaque.
pub fn validate_color(color: u32) -> Result<(), CategoryError> {
    if color & OPAQUE_ALPHA != OPAQUE_ALPHA {
        return Err(CategoryError::InvalidColor(color));
    }
    Ok(())
}
