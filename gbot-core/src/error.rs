use thiserror::Error;

/// Failures internal to handlers and setup code.
///
/// These never reach the aggregator: a handler logs the error and returns an
/// abstaining response instead.
#[derive(Error, Debug)]
pub enum BotError {
    #[error("http error: {0}")]
    Http(String),

    #[error("bad response code {0}")]
    BadStatus(u16),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BotError>;
