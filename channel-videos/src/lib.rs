//! List every video a YouTube channel published within a date range.
//!
//! The YouTube search API only pages through a few hundred results per query, so the range is
//! split into bounded windows (see [`window`]) that are searched one after another with
//! [`youtube_api::YouTubeClient`].

use crate::config::ChannelSelector;
use crate::window::{DateRange, Interval};
use crate::youtube_api::{SearchResult, Transport, YouTubeClient};
use jiff::Zoned;

pub mod config;
pub mod error;
pub mod output;
pub mod window;
pub mod youtube_api;

pub use error::{Error, Result};

/// Lists the videos `channel` published between `end` and `start`, newest window first.
///
/// The date range is checked before anything is sent: an inverted range fails with
/// [`Error::InvalidDateRange`] without even resolving the channel.
#[tracing::instrument(skip(client, start, end))]
pub async fn fetch_channel_videos<T: Transport>(
    client: &YouTubeClient<T>,
    channel: &ChannelSelector,
    start: &Zoned,
    end: &Zoned,
    interval: Interval,
) -> Result<Vec<SearchResult>> {
    let range = DateRange::new(start.clone(), end.clone())?;

    let channel_id = match channel {
        ChannelSelector::Id(id) => id.clone(),
        ChannelSelector::Username(username) => client.resolve_channel_id(username).await?,
    };

    client
        .list_channel_videos(&channel_id, range.start(), range.end(), interval)
        .await
}
