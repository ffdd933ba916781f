//! Handler contract and the small helpers shared by concrete handlers and
//! the aggregator.

use async_trait::async_trait;

use crate::response::Response;
use crate::types::Message;

/// A reactive unit: inspects a message and either answers or abstains.
///
/// Handlers decide internally whether a message concerns them; the
/// aggregator always invokes every handler and only looks at the verdict.
/// Internal failures never cross this boundary: a handler downgrades them to
/// [`Response::void`] after logging.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Processes one message. Abstain with [`Response::void`].
    async fn on_message(&self, message: &Message) -> Response;

    /// Keys the handler reacts to. Used for help listing and documentation
    /// only, never for routing.
    fn react_on(&self) -> Vec<String>;

    /// One help line, or an empty string for no help entry.
    fn help(&self) -> String {
        String::new()
    }

    /// Name used in logs. Defaults to the implementing type's name, which
    /// stays meaningful behind `dyn Handler`.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Checks whether a username belongs to the superuser list.
pub trait SuperUser: Send + Sync {
    fn is_super(&self, username: &str) -> bool;
}

/// Formats one help line from a handler's keys and a description.
pub fn help_entry(commands: &[String], description: &str) -> String {
    format!("{} _– {}_\n", commands.join(", "), description)
}

/// Case-insensitive, whitespace-trimmed equality against a trigger list.
pub fn trigger_match<S: AsRef<str>>(triggers: &[S], text: &str) -> bool {
    let text = text.trim().to_lowercase();
    triggers.iter().any(|t| t.as_ref().to_lowercase() == text)
}
