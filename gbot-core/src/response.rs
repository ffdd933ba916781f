//! Handler verdict type and the outgoing-text sanitizer.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

/// An escaped emphasis span bounded by whitespace or string edges: escaped
/// delimiter, non-space content of at least three characters, escaped
/// delimiter again.
static EMPHASIS_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(^|\s)(\\_)(\S.+?\S)(\\_)(\s|$)").expect("emphasis span pattern is valid")
});

/// Escapes every emphasis delimiter, then un-escapes the delimiters of spans
/// that look like intentional emphasis. Telegram-style markdown renderers
/// reject a lone `_`, so all delimiters get escaped first; the second pass
/// restores spans bounded by whitespace whose content starts and ends with a
/// non-space character.
///
/// Two matching quirks are deliberate and pinned by tests: when two matching
/// spans are separated by a single whitespace character only the first is
/// restored, and spans with fewer than three enclosed characters are never
/// restored.
fn sanitize(text: &str) -> String {
    let escaped = text.replace('_', r"\_");
    EMPHASIS_SPAN
        .replace_all(&escaped, "${1}_${3}_${5}")
        .into_owned()
}

/// A handler's verdict on a message.
///
/// An abstaining response ([`Response::void`]) carries no meaningful text or
/// flags; callers must check [`send`](Response::send) before acting on any
/// other field. Text always passes through the sanitizer on construction;
/// there is no way to build a response around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    text: String,
    send: bool,
    pin: bool,
    unpin: bool,
    preview: bool,
    ban_interval: Duration,
}

impl Response {
    /// Creates a sendable response with sanitized text.
    pub fn reply(text: impl Into<String>) -> Self {
        Self {
            text: sanitize(&text.into()),
            send: true,
            pin: false,
            unpin: false,
            preview: false,
            ban_interval: Duration::ZERO,
        }
    }

    /// Creates an abstaining response. Handlers return this both when they
    /// have nothing to say and when an internal failure was swallowed.
    pub fn void() -> Self {
        Self {
            text: String::new(),
            send: false,
            pin: false,
            unpin: false,
            preview: false,
            ban_interval: Duration::ZERO,
        }
    }

    /// Requests pinning the triggering message.
    pub fn with_pin(mut self) -> Self {
        self.pin = true;
        self
    }

    /// Requests unpinning in the chat.
    pub fn with_unpin(mut self) -> Self {
        self.unpin = true;
        self
    }

    /// Enables link preview rendering.
    pub fn with_preview(mut self) -> Self {
        self.preview = true;
        self
    }

    /// Requests banning the sender for `interval`. Zero means no ban.
    pub fn with_ban(mut self, interval: Duration) -> Self {
        self.ban_interval = interval;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether this response should be delivered at all; `false` means the
    /// handler abstained.
    pub fn send(&self) -> bool {
        self.send
    }

    pub fn pin(&self) -> bool {
        self.pin
    }

    pub fn unpin(&self) -> bool {
        self.unpin
    }

    pub fn preview(&self) -> bool {
        self.preview
    }

    pub fn ban_interval(&self) -> Duration {
        self.ban_interval
    }
}
