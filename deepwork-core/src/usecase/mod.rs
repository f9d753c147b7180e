//! Use cases: one operation each, taking a snapshot plus an intent and
//! returning a new snapshot or a typed error.
//!
//! The sequencing operations ([`add_time_block`], [`remove_time_block`],
//! [`reorder_time_block`]) are pure functions. Operations that mint ids,
//! read the clock, or reach storage are structs holding those collaborators.

mod add;
mod category;
mod remove;
mod reorder;
mod session;
mod template;
mod time_block;

pub use add::{add_time_block, InsertPosition};
pub use category::{CreateCategory, GetCategories};
pub use remove::remove_time_block;
pub use reorder::reorder_time_block;
pub use session::{validate_session_name, CreateSession, SaveSession};
pub use template::{CreateSessionTemplate, InstantiateTemplate};
pub use time_block::{resolve_categories, CreateTimeBlock};
