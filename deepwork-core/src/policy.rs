//! Per-kind duration and category requirements.

use std::time::Duration;

use crate::models::BlockKind;

/// Builds a [`Duration`] from whole minutes.
pub const fn minutes(m: u64) -> Duration {
    Duration::from_secs(m * 60)
}

/// Maximum number of categories a work block may reference.
pub const MAX_CATEGORIES: usize = 3;

/// Duration bounds and category requirement for one block kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationPolicy {
    pub min: Duration,
    pub max: Duration,
    pub requires_categories: bool,
}

const DEEP_WORK: DurationPolicy = DurationPolicy {
    min: minutes(25),
    max: minutes(120),
    requires_categories: true,
};

const SHALLOW_WORK: DurationPolicy = DurationPolicy {
    min: minutes(10),
    max: minutes(60),
    requires_categories: true,
};

const BREAK: DurationPolicy = DurationPolicy {
    min: minutes(5),
    max: minutes(60),
    requires_categories: false,
};

impl DurationPolicy {
    /// Looks up the policy for `kind`.
    pub const fn for_kind(kind: BlockKind) -> Self {
        match kind {
            BlockKind::DeepWork => DEEP_WORK,
            BlockKind::ShallowWork => SHALLOW_WORK,
            BlockKind::Break => BREAK,
        }
    }

    pub fn contains(&self, duration: Duration) -> bool {
        duration >= self.min && duration <= self.max
    }
}
