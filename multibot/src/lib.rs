//! # multibot
//!
//! Aggregation engine: fans one incoming message out to every registered
//! handler concurrently, collects the verdicts and merges them into a single
//! response. Pin/unpin requests are OR-ed, ban intervals maximized, texts
//! sorted lexicographically and joined with a newline, so the output never
//! depends on completion order.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use gbot_core::{trigger_match, Handler, Message, Response};
use tokio::sync::{mpsc, Semaphore};
use tracing::{debug, info, warn};

/// Message texts that short-circuit dispatch into help composition.
const HELP_TRIGGERS: &[&str] = &["help", "/help", "help!"];

const DEFAULT_CONCURRENCY: usize = 4;
const DEFAULT_HANDLER_TIMEOUT: Duration = Duration::from_secs(30);

/// Combines many handlers into one virtual handler.
///
/// The handler collection is fixed at construction; nothing is registered or
/// removed at runtime. `MultiBot` keeps no state between messages.
pub struct MultiBot {
    handlers: Vec<Arc<dyn Handler>>,
    concurrency: usize,
    handler_timeout: Duration,
}

impl MultiBot {
    /// Creates an empty aggregator; populate it with [`add_handler`]
    /// before first use.
    ///
    /// [`add_handler`]: MultiBot::add_handler
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            concurrency: DEFAULT_CONCURRENCY,
            handler_timeout: DEFAULT_HANDLER_TIMEOUT,
        }
    }

    /// Appends a handler. Registration order is kept for help composition.
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Caps how many handlers run at once during one dispatch; the rest
    /// queue for a free slot. Default 4.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Deadline for a single handler invocation, default 30s. A handler that
    /// misses it is logged and treated as abstaining, so one hung handler
    /// cannot stall the whole dispatch.
    pub fn with_handler_timeout(mut self, timeout: Duration) -> Self {
        self.handler_timeout = timeout;
        self
    }

    /// Runs every handler concurrently and merges the answers.
    ///
    /// Each spawned task first takes a semaphore permit, runs its handler
    /// under the deadline, and sends the full response over the channel only
    /// when the handler actually answered. The single collecting loop below
    /// then folds the merge sequentially, so no merge state is shared
    /// between tasks.
    async fn dispatch(&self, message: &Message) -> Response {
        if trigger_match(HELP_TRIGGERS, &message.text) {
            return Response::reply(self.help());
        }

        info!(
            message_id = message.id,
            chat_id = message.chat_id,
            handlers = self.handlers.len(),
            "dispatch started"
        );

        let (tx, mut rx) = mpsc::unbounded_channel();
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let message = Arc::new(message.clone());

        for handler in &self.handlers {
            let handler_name = handler.name();
            let handler = Arc::clone(handler);
            let semaphore = Arc::clone(&semaphore);
            let message = Arc::clone(&message);
            let tx = tx.clone();
            let timeout = self.handler_timeout;

            tokio::spawn(async move {
                // The semaphore is never closed, so acquire only fails if
                // the whole pool is torn down; abstain in that case.
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return;
                };
                let response =
                    match tokio::time::timeout(timeout, handler.on_message(&message)).await {
                        Ok(response) => response,
                        Err(_) => {
                            warn!(
                                handler = %handler_name,
                                timeout_secs = timeout.as_secs(),
                                "handler deadline expired, treated as abstained"
                            );
                            Response::void()
                        }
                    };
                if response.send() {
                    // The receiver outlives every sender within dispatch.
                    let _ = tx.send(response);
                }
            });
        }
        drop(tx);

        let mut texts = Vec::new();
        let mut pin = false;
        let mut unpin = false;
        let mut ban_interval = Duration::ZERO;
        while let Some(response) = rx.recv().await {
            debug!(text = %response.text(), "collect");
            pin |= response.pin();
            unpin |= response.unpin();
            ban_interval = ban_interval.max(response.ban_interval());
            texts.push(response.text().to_string());
        }

        debug!(answers = texts.len(), send = !texts.is_empty(), "dispatch merged");

        if texts.is_empty() {
            return Response::void();
        }

        // Completion order is nondeterministic; the sort alone decides the
        // output ordering.
        texts.sort();

        let mut merged = Response::reply(texts.join("\n"));
        if pin {
            merged = merged.with_pin();
        }
        if unpin {
            merged = merged.with_unpin();
        }
        if ban_interval > Duration::ZERO {
            merged = merged.with_ban(ban_interval);
        }
        merged
    }
}

impl Default for MultiBot {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Handler for MultiBot {
    async fn on_message(&self, message: &Message) -> Response {
        self.dispatch(message).await
    }

    /// Combined key list of all handlers, registration order.
    fn react_on(&self) -> Vec<String> {
        self.handlers
            .iter()
            .flat_map(|handler| handler.react_on())
            .collect()
    }

    /// Concatenates every handler's non-empty help entry in registration
    /// order, each terminated by exactly one newline.
    fn help(&self) -> String {
        let mut out = String::new();
        for handler in &self.handlers {
            let help = handler.help();
            if help.is_empty() {
                continue;
            }
            out.push_str(&help);
            if !help.ends_with('\n') {
                out.push('\n');
            }
        }
        out
    }
}
