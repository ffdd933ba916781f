//! Static superuser list.

use gbot_core::SuperUser;

/// Superuser predicate over a fixed username list, typically taken from
/// [`BotConfig::super_users`](gbot_core::BotConfig).
pub struct StaticSuperUsers {
    users: Vec<String>,
}

impl StaticSuperUsers {
    pub fn new(users: Vec<String>) -> Self {
        Self { users }
    }
}

impl SuperUser for StaticSuperUsers {
    fn is_super(&self, username: &str) -> bool {
        self.users.iter().any(|u| u == username)
    }
}
