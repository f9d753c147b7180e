use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user-defined label attached to work blocks.
///
/// The color is a packed ARGB value (`0xAARRGGBB`). The well-known
/// "Uncategorized" category has the nil id and is never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub color: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub const UNCATEGORIZED_NAME: &'static str = "Uncategorized";
    pub const UNCATEGORIZED_COLOR: u32 = 0xFF9E_9E9E;

    /// Builds a category that has not been stored yet (nil id).
    pub fn new(name: impl Into<String>, color: u32) -> Self {
        let epoch = DateTime::<Utc>::default();
        Self {
            id: Uuid::nil(),
            name: name.into(),
            color,
            created_at: epoch,
            updated_at: epoch,
        }
    }

    /// The default category for work blocks the user has not labelled.
    pub fn uncategorized() -> Self {
        Self::new(Self::UNCATEGORIZED_NAME, Self::UNCATEGORIZED_COLOR)
    }

    pub fn is_default(&self) -> bool {
        self.id.is_nil()
    }
}
