//! Callback-style combinators over use-case results.
//!
//! `map`, `ok()` and `?` already cover most of what callers need; these
//! helpers add the chaining hooks a view layer uses to react to an outcome
//! without unpacking it.

use crate::error::{Error, Result};

pub trait OutcomeExt<T> {
    /// Runs `action` on the success value and hands the result back.
    fn on_success(self, action: impl FnOnce(&T)) -> Self;

    /// Runs `action` on the failure and its display key, if any.
    fn on_error(self, action: impl FnOnce(&Error, Option<&'static str>)) -> Self;

    /// The success value, dropping any failure.
    fn get_or_none(self) -> Option<T>;
}

impl<T> OutcomeExt<T> for Result<T> {
    fn on_success(self, action: impl FnOnce(&T)) -> Self {
        if let Ok(value) = &self {
            action(value);
        }
        self
    }

    fn on_error(self, action: impl FnOnce(&Error, Option<&'static str>)) -> Self {
        if let Err(err) = &self {
            action(err, err.message_key());
        }
        self
    }

    fn get_or_none(self) -> Option<T> {
        self.ok()
    }
}
