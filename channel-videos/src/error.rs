use thiserror::Error;

/// Errors produced while resolving a channel or listing its videos.
#[derive(Error, Debug)]
pub enum Error {
    #[error("no channel found for username {username:?}; make sure the channel name is correct")]
    ChannelNotFound { username: String },

    #[error(
        "{matches} channels match username {username:?}; pass the channel id with --channel-id instead"
    )]
    AmbiguousChannel { username: String, matches: u32 },

    #[error("the date to start from ({start}) cannot be before the date to go back to ({end})")]
    InvalidDateRange { start: String, end: String },

    #[error("either a channel username or a channel id is required")]
    MissingChannel,

    #[error("an interval of {days} day(s) is not usable; it must be at least one day")]
    InvalidInterval { days: u32 },

    #[error("date out of range: {0}")]
    InvalidDate(#[from] jiff::Error),

    #[error("send request to YouTube API: {endpoint}")]
    TransportFailure {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("YouTube API request to {endpoint} failed with status {status}: {body}")]
    UnexpectedStatus {
        endpoint: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("parse YouTube API response from {endpoint}")]
    MalformedResponse {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("window {window} needs more than {limit} pages of results")]
    PageLimitExceeded { limit: u32, window: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
