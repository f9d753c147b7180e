//! Validators for categories, single blocks, session names, and whole
//! schedules. All of them are pure and return typed errors.

pub mod category;
pub mod sequence;
pub mod session_name;
pub mod time_block;

pub use sequence::validate_sequence;
pub use session_name::validate_session_name;
