//! Session composition engine for deep work planning.
//!
//! A session is an ordered schedule of typed time blocks. This crate owns the
//! rules for which schedules are legal and the operations that edit them.
//! Every operation takes a snapshot and returns a new one (or a typed error);
//! nothing here mutates the caller's value or talks to storage directly.

pub mod clock;
pub mod error;
pub mod models;
pub mod outcome;
pub mod policy;
pub mod repository;
pub mod usecase;
pub mod validation;

pub use clock::{Clock, IdGenerator, RandomIds, SystemClock};
pub use error::{CategoryError, Error, Result, SessionError, TimeBlockError};
pub use outcome::OutcomeExt;
