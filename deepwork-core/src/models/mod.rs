//! Domain models for deep work sessions.
//!
//! # Core Concepts
//!
//! - [`TimeBlock`]: One typed interval of a schedule. Deep and shallow work
//!   blocks carry one to three [`Category`] references; breaks carry none.
//! - [`ScheduledSession`]: The aggregate. An ordered list of blocks plus
//!   name, lifecycle status, and timestamps. Order is the schedule.
//! - [`Category`]: A user-defined label for work blocks.
//! - [`SessionTemplate`] / [`TimeBlockTemplate`]: Reusable schedule shapes
//!   detached from concrete start times, used to stamp out new sessions.

mod block;
mod category;
mod session;
mod template;

pub use block::*;
pub use category::*;
pub use session::*;
pub use template::*;
