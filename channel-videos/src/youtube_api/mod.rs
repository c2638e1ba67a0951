//! YouTube Data API v3 client library.
//!
//! This module covers the two read-only endpoints needed to enumerate a channel's uploads with
//! nothing more than an API key:
//!
//! - `channels.list`, to turn a channel's legacy username into its ID
//!   ([`YouTubeClient::resolve_channel_id`]);
//! - `search.list`, to list the videos a channel published within a time window
//!   ([`YouTubeClient::list_channel_videos`]).
//!
//! # Why windows?
//!
//! `search.list` will not page past roughly 500 results for a single query, however many
//! matches it reports. A busy channel's full history therefore cannot be listed with one query.
//! Bounding every query by `publishedBefore`/`publishedAfter` keeps each one under the cap, and
//! walking the windows from newest to oldest reassembles the full list in date order.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use channel_videos::window::Interval;
//! use channel_videos::youtube_api::{ReqwestTransport, YouTubeClient};
//!
//! # async fn example() -> channel_videos::Result<()> {
//! let transport = ReqwestTransport::new(std::time::Duration::from_secs(30))?;
//! let client = YouTubeClient::new("my-api-key", transport);
//!
//! let channel_id = client.resolve_channel_id("somebody").await?;
//! let start = jiff::Zoned::now();
//! let end = start.checked_sub(jiff::Span::new().weeks(4)).expect("in range");
//! let videos = client
//!     .list_channel_videos(&channel_id, &start, &end, Interval::default())
//!     .await?;
//! println!("{} videos", videos.len());
//! # Ok(())
//! # }
//! ```

pub mod channels;
pub mod client;
pub mod search;
pub mod transport;
pub mod types;

#[cfg(test)]
pub(crate) mod fake;

// Re-export main types for convenience
pub use client::{YOUTUBE_API_BASE, YouTubeClient};
pub use transport::{ReqwestTransport, Transport};
pub use types::{PageInfo, PagedStream};

pub use channels::{Channel, ChannelListResponse};
pub use search::{ResourceId, SearchListResponse, SearchResult};
