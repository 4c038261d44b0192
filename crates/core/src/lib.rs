//! Store-independent domain logic for the ambassador voting service.
//!
//! Holds the error taxonomy, localized-text resolution, locale handling,
//! the fixed-window rate limiter, and validation helpers shared by the
//! database and HTTP crates.

pub mod error;
pub mod locale;
pub mod localized;
pub mod rate_limit;
pub mod types;
pub mod validation;
