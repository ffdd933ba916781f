//! Random-ban handler: answers `wtf!` by banning the sender for a random
//! interval, unless the sender is a superuser.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use gbot_core::{help_entry, trigger_match, Handler, Message, Response, SuperUser};
use rand::Rng;
use tracing::info;

type RandFn = Box<dyn Fn(u64) -> u64 + Send + Sync>;

/// Bans the sender for `min + rand(max - min)` seconds, with two rare fixed
/// intervals thrown in for flavor.
pub struct Wtf {
    super_user: Arc<dyn SuperUser>,
    min_duration: Duration,
    max_duration: Duration,
    rand: RandFn,
}

impl Wtf {
    pub fn new(
        min_duration: Duration,
        max_duration: Duration,
        super_user: Arc<dyn SuperUser>,
    ) -> Self {
        info!(
            min_secs = min_duration.as_secs(),
            max_secs = max_duration.as_secs(),
            "wtf handler"
        );
        Self {
            super_user,
            min_duration,
            max_duration,
            rand: Box::new(|n| rand::rng().random_range(0..n)),
        }
    }

    /// Replaces the randomness source; tests use this for determinism.
    pub fn with_rand(mut self, rand: impl Fn(u64) -> u64 + Send + Sync + 'static) -> Self {
        self.rand = Box::new(rand);
        self
    }
}

#[async_trait]
impl Handler for Wtf {
    async fn on_message(&self, message: &Message) -> Response {
        if !trigger_match(&self.react_on(), &message.text) {
            return Response::void();
        }
        if self.super_user.is_super(&message.from.username) {
            return Response::void();
        }

        let mention = if message.from.username.is_empty() {
            message.from.display_name.clone()
        } else {
            format!("@{}", message.from.username)
        };

        let spread = self
            .max_duration
            .as_secs()
            .saturating_sub(self.min_duration.as_secs())
            .max(1);
        let mut ban = self.min_duration + Duration::from_secs((self.rand)(spread));
        match (self.rand)(10) {
            1 => ban = Duration::from_secs(666 * 3600),
            2 => ban = Duration::from_secs(77 * 60 + 7),
            _ => {}
        }

        Response::reply(format!(
            "[{mention}](tg://user?id={}) получает бан на {}",
            message.from.id,
            humanize_duration(ban),
        ))
        .with_ban(ban)
    }

    fn react_on(&self) -> Vec<String> {
        vec!["wtf!".to_string(), "wtf?".to_string()]
    }

    fn help(&self) -> String {
        help_entry(
            &self.react_on(),
            "если не повезет, блокирует пользователя на какое-то время",
        )
    }
}

/// Renders a duration as `2h30m0s` / `5m7s` / `42s`, dropping zero leading
/// components.
pub fn humanize_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let (hours, minutes, seconds) = (secs / 3600, secs % 3600 / 60, secs % 60);
    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}s")
    } else {
        format!("{seconds}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use gbot_core::User;

    struct NoSupers;

    impl SuperUser for NoSupers {
        fn is_super(&self, _username: &str) -> bool {
            false
        }
    }

    struct AllSupers;

    impl SuperUser for AllSupers {
        fn is_super(&self, _username: &str) -> bool {
            true
        }
    }

    fn wtf_message(text: &str, username: &str) -> Message {
        Message {
            id: 1,
            from: User {
                id: 777,
                username: username.to_string(),
                display_name: "Some User".to_string(),
            },
            chat_id: 2,
            sent: Utc::now(),
            text: text.to_string(),
            html: None,
            entities: None,
            image: None,
        }
    }

    #[tokio::test]
    async fn bans_for_min_plus_rand() {
        let wtf = Wtf::new(
            Duration::from_secs(60),
            Duration::from_secs(600),
            Arc::new(NoSupers),
        )
        // First call picks the offset inside the interval, second the
        // easter-egg roll.
        .with_rand(|n| if n == 10 { 0 } else { 127 });

        let response = wtf.on_message(&wtf_message("wtf!", "bob")).await;

        assert!(response.send());
        assert_eq!(response.ban_interval(), Duration::from_secs(187));
        assert_eq!(
            response.text(),
            "[@bob](tg://user?id=777) получает бан на 3m7s"
        );
    }

    #[tokio::test]
    async fn easter_egg_rolls_override_interval() {
        let wtf = Wtf::new(
            Duration::from_secs(60),
            Duration::from_secs(600),
            Arc::new(NoSupers),
        )
        .with_rand(|n| if n == 10 { 1 } else { 0 });

        let response = wtf.on_message(&wtf_message("wtf?", "bob")).await;

        assert_eq!(response.ban_interval(), Duration::from_secs(666 * 3600));
        assert!(response.text().ends_with("получает бан на 666h0m0s"));
    }

    #[tokio::test]
    async fn super_user_is_exempt() {
        let wtf = Wtf::new(
            Duration::from_secs(60),
            Duration::from_secs(600),
            Arc::new(AllSupers),
        );

        let response = wtf.on_message(&wtf_message("wtf!", "admin")).await;

        assert!(!response.send());
    }

    #[tokio::test]
    async fn unrelated_text_abstains() {
        let wtf = Wtf::new(
            Duration::from_secs(60),
            Duration::from_secs(600),
            Arc::new(NoSupers),
        );

        let response = wtf.on_message(&wtf_message("hello", "bob")).await;

        assert!(!response.send());
    }

    #[tokio::test]
    async fn empty_username_falls_back_to_display_name() {
        let wtf = Wtf::new(
            Duration::from_secs(60),
            Duration::from_secs(600),
            Arc::new(NoSupers),
        )
        .with_rand(|_| 0);

        let response = wtf.on_message(&wtf_message("wtf!", "")).await;

        assert!(response.text().starts_with("[Some User](tg://user?id=777)"));
    }

    #[test]
    fn humanize_duration_drops_leading_zeros() {
        assert_eq!(humanize_duration(Duration::from_secs(42)), "42s");
        assert_eq!(humanize_duration(Duration::from_secs(5 * 60 + 7)), "5m7s");
        assert_eq!(
            humanize_duration(Duration::from_secs(2 * 3600 + 30 * 60)),
            "2h30m0s"
        );
        assert_eq!(humanize_duration(Duration::ZERO), "0s");
    }
}
