//! # gbot-handlers
//!
//! Concrete handlers consumed through the [`gbot_core::Handler`] contract:
//! a joke fetcher, a random-ban handler and the static superuser list. Each
//! handler contains its own failures; an HTTP or decode error is logged and
//! turned into an abstention, never surfaced to the aggregator.

pub mod anecdote;
pub mod super_user;
pub mod wtf;

pub use anecdote::Anecdote;
pub use super_user::StaticSuperUsers;
pub use wtf::{humanize_duration, Wtf};
