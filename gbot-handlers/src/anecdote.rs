//! Joke handler: one-liners and category jokes from a jokesrv-style API,
//! plus Chuck Norris facts.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use gbot_core::{help_entry, trigger_match, BotError, Handler, Message, Response, Result};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{info, warn};

const CATEGORY_TTL: Duration = Duration::from_secs(3600);

/// Fetches jokes over HTTP. Reacts on its static keys plus the category
/// commands advertised by the joke API (cached for an hour).
pub struct Anecdote {
    client: reqwest::Client,
    jokes_api_url: String,
    chuck_api_url: String,
    categories: Mutex<Option<(Instant, Vec<String>)>>,
}

#[derive(Deserialize)]
struct Joke {
    content: String,
}

#[derive(Deserialize)]
struct ChuckJoke {
    value: ChuckValue,
}

#[derive(Deserialize)]
struct ChuckValue {
    joke: String,
}

impl Anecdote {
    /// Creates the handler. Base URLs have no trailing slash; tests point
    /// them at a local mock server.
    pub fn new(
        client: reqwest::Client,
        jokes_api_url: impl Into<String>,
        chuck_api_url: impl Into<String>,
    ) -> Self {
        let jokes_api_url = jokes_api_url.into();
        let chuck_api_url = chuck_api_url.into();
        info!(jokes = %jokes_api_url, chuck = %chuck_api_url, "anecdote handler");
        Self {
            client,
            jokes_api_url,
            chuck_api_url,
            categories: Mutex::new(None),
        }
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| BotError::Http(e.to_string()))?;
        if !response.status().is_success() {
            return Err(BotError::BadStatus(response.status().as_u16()));
        }
        Ok(response)
    }

    /// Category commands from `{base}/categories`, each suffixed with `!` to
    /// look like the other keys. Cached; a stale cache is refetched, a
    /// failed refetch surfaces as an error and the caller degrades to the
    /// static keys.
    async fn categories(&self) -> Result<Vec<String>> {
        let mut cached = self.categories.lock().await;
        if let Some((fetched_at, categories)) = cached.as_ref() {
            if fetched_at.elapsed() < CATEGORY_TTL {
                return Ok(categories.clone());
            }
        }

        let url = format!("{}/categories", self.jokes_api_url);
        let raw: Vec<String> = self
            .get(&url)
            .await?
            .json()
            .await
            .map_err(|e| BotError::Decode(e.to_string()))?;
        let categories: Vec<String> = raw.into_iter().map(|c| format!("{c}!")).collect();
        *cached = Some((Instant::now(), categories.clone()));
        Ok(categories)
    }

    async fn joke(&self, category: &str) -> Result<Response> {
        let url = format!("{}/{}", self.jokes_api_url, category);
        let joke: Joke = self
            .get(&url)
            .await?
            .json()
            .await
            .map_err(|e| BotError::Decode(e.to_string()))?;
        let content = joke.content.strip_suffix('.').unwrap_or(&joke.content);
        Ok(Response::reply(content))
    }

    async fn chuck(&self) -> Result<Response> {
        let url = format!("{}/jokes/random", self.chuck_api_url);
        let joke: ChuckJoke = self
            .get(&url)
            .await?
            .json()
            .await
            .map_err(|e| BotError::Decode(e.to_string()))?;
        Ok(Response::reply(format!(
            "- {}",
            joke.value.joke.replace("&quot;", "\"")
        )))
    }
}

#[async_trait]
impl Handler for Anecdote {
    async fn on_message(&self, message: &Message) -> Response {
        let categories = match self.categories().await {
            Ok(categories) => categories,
            Err(e) => {
                warn!("category retrieval failed: {e}");
                Vec::new()
            }
        };

        let mut keys = self.react_on();
        // The slash form triggers too, but stays out of the help listing.
        keys.push("/chuck".to_string());
        keys.extend(categories.iter().cloned());
        if !trigger_match(&keys, &message.text) {
            return Response::void();
        }

        let result = if trigger_match(&["chuck!", "/chuck"], &message.text) {
            self.chuck().await
        } else if trigger_match(&categories, &message.text) {
            let text = message.text.trim();
            let category = text.strip_prefix('/').unwrap_or(text);
            let category = category.strip_suffix('!').unwrap_or(category);
            self.joke(category).await
        } else {
            self.joke("oneliner").await
        };

        match result {
            Ok(response) => response,
            Err(e) => {
                warn!("joke request failed: {e}");
                Response::void()
            }
        }
    }

    fn react_on(&self) -> Vec<String> {
        ["анекдот!", "анкедот!", "joke!", "chuck!"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn help(&self) -> String {
        help_entry(&self.react_on(), "расскажет анекдот или шутку")
    }
}
