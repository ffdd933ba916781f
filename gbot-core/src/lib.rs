//! # gbot-core
//!
//! Core types and contracts for the message router: the [`Handler`] trait,
//! [`Message`] data model, sanitized [`Response`], configuration and tracing
//! initialization. Transport-agnostic; used by multibot and gbot-handlers.

pub mod config;
pub mod error;
pub mod handler;
pub mod logger;
pub mod response;
pub mod types;

pub use config::BotConfig;
pub use error::{BotError, Result};
pub use handler::{help_entry, trigger_match, Handler, SuperUser};
pub use logger::init_tracing;
pub use response::Response;
pub use types::{Entity, Image, Message, User};
