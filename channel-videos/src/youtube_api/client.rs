//! Core YouTube API client: channel lookup and windowed, paginated video search.

use crate::error::{Error, Result};
use crate::window::{DateRange, Interval, Window, rfc3339};
use crate::youtube_api::{
    channels::ChannelListResponse,
    search::{SearchListResponse, SearchResult},
    transport::{ReqwestTransport, Transport},
    types::PagedStream,
};
use jiff::Zoned;
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use tokio_stream::StreamExt;
use tracing::instrument;

/// Where the YouTube Data API v3 lives.
pub const YOUTUBE_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// The most results `search.list` returns per page.
const MAX_RESULTS_PER_PAGE: &str = "50";

/// Client for the public, API-key authenticated parts of the YouTube Data API v3.
///
/// Requests are issued one at a time: each page depends on the continuation token of the page
/// before it, and each window on the bounds of the window before it.
#[derive(Clone)]
pub struct YouTubeClient<T = ReqwestTransport> {
    transport: T,
    api_key: String,
    base_url: String,
    /// Request `id,snippet` rather than just `id` from `search.list`.
    include_snippets: bool,
    /// Fail a window that needs more than this many pages.
    max_pages_per_window: Option<u32>,
}

impl<T> fmt::Debug for YouTubeClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YouTubeClient")
            .field("base_url", &self.base_url)
            .field("include_snippets", &self.include_snippets)
            .field("max_pages_per_window", &self.max_pages_per_window)
            .finish_non_exhaustive()
    }
}

impl<T: Transport> YouTubeClient<T> {
    /// Creates a client that authenticates every request with `api_key`.
    pub fn new(api_key: impl Into<String>, transport: T) -> Self {
        Self {
            transport,
            api_key: api_key.into(),
            base_url: YOUTUBE_API_BASE.to_string(),
            include_snippets: false,
            max_pages_per_window: None,
        }
    }

    /// Points the client at a different API root (no trailing slash).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Whether search results should include the `snippet` part (title, description, ...).
    pub fn with_snippets(mut self, include_snippets: bool) -> Self {
        self.include_snippets = include_snippets;
        self
    }

    /// Caps the number of pages fetched for a single window.
    ///
    /// A window that would need more pages fails with [`Error::PageLimitExceeded`] rather than
    /// being silently truncated. `None` (the default) follows continuation tokens until the API
    /// stops handing them out.
    pub fn with_max_pages_per_window(mut self, max_pages: Option<u32>) -> Self {
        self.max_pages_per_window = max_pages;
        self
    }

    /// Issues a `GET` to `endpoint` (relative to the base URL) and decodes the JSON response.
    ///
    /// The API key is appended to `query_params`.
    #[instrument(skip(self, query_params), level = tracing::Level::TRACE)]
    async fn request<R: DeserializeOwned>(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
    ) -> Result<R> {
        let url = format!("{}/{}", self.base_url, endpoint);

        tracing::debug!(url, ?query_params, "sending request");
        let mut params = query_params.to_vec();
        params.push(("key", self.api_key.as_str()));

        let json = self.transport.get(&url, &params).await?;
        serde_json::from_value(json).map_err(|source| Error::MalformedResponse {
            endpoint: url,
            source,
        })
    }

    /// Looks up the ID of the channel owned by the (legacy) YouTube `username`.
    ///
    /// Uses `channels.list` with `forUsername`.
    ///
    /// # Errors
    ///
    /// * [`Error::ChannelNotFound`] if no channel matches
    /// * [`Error::AmbiguousChannel`] if more than one does, in which case the caller should
    ///   supply the channel ID directly
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/channels/list>
    #[instrument(skip(self))]
    pub async fn resolve_channel_id(&self, username: &str) -> Result<String> {
        let response: ChannelListResponse = self
            .request("channels", &[("part", "id"), ("forUsername", username)])
            .await?;

        let matches = response
            .page_info
            .total_results
            .max(u32::try_from(response.items.len()).unwrap_or(u32::MAX));

        tracing::debug!(
            total_results = response.page_info.total_results,
            returned_items = response.items.len(),
            "fetched channels"
        );

        if matches > 1 {
            return Err(Error::AmbiguousChannel {
                username: username.to_string(),
                matches,
            });
        }

        let channel = response
            .items
            .into_iter()
            .next()
            .ok_or_else(|| Error::ChannelNotFound {
                username: username.to_string(),
            })?;

        tracing::info!(channel_id = channel.id, "channel id found");
        Ok(channel.id)
    }

    /// Lists every video `channel_id` published between `end` and `start` (`start` being the
    /// more recent of the two).
    ///
    /// The range is walked backward from `start` in windows of at most `interval`, see
    /// [`DateRange::windows`], and each window is fetched with
    /// [`Self::list_channel_videos_in_window`]. Results are returned newest window first, in the
    /// order the API returned them within each window.
    ///
    /// Fails with [`Error::InvalidDateRange`] before making any request if `start` is before
    /// `end`.
    #[instrument(skip(self, start, end), fields(start = %rfc3339(start), end = %rfc3339(end)))]
    pub async fn list_channel_videos(
        &self,
        channel_id: &str,
        start: &Zoned,
        end: &Zoned,
        interval: Interval,
    ) -> Result<Vec<SearchResult>> {
        let range = DateRange::new(start.clone(), end.clone())?;
        tracing::info!(%interval, "searching for videos published by channel");

        let mut videos = Vec::new();
        for window in range.windows(interval) {
            let found = self
                .list_channel_videos_in_window(channel_id, &window)
                .await?;
            videos.extend(found);
            tracing::debug!(total = videos.len(), "video(s) found so far");
        }

        tracing::info!(total = videos.len(), "found all videos in date range");
        Ok(videos)
    }

    /// Lists every video `channel_id` published within `window`, following continuation
    /// tokens until the API stops returning one.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/search/list>
    #[instrument(skip(self, window), fields(window = %window))]
    pub async fn list_channel_videos_in_window(
        &self,
        channel_id: &str,
        window: &Window,
    ) -> Result<Vec<SearchResult>> {
        let before = rfc3339(&window.before);
        let after = rfc3339(&window.after);
        let (before, after) = (before.as_str(), after.as_str());

        let pages_fetched = AtomicU32::new(0);
        let pages_fetched = &pages_fetched;
        let max_pages = self.max_pages_per_window;

        let stream = PagedStream::new(move |page_token: Option<String>| async move {
            let fetched = pages_fetched.fetch_add(1, Ordering::Relaxed);
            if let Some(limit) = max_pages {
                if fetched >= limit {
                    return Err(Error::PageLimitExceeded {
                        limit,
                        window: window.to_string(),
                    });
                }
            }
            if page_token.is_some() {
                tracing::debug!("more videos to load, continuing");
            }

            let response = self
                .search_channel_videos_internal(channel_id, before, after, page_token)
                .await?;
            Ok::<_, Error>((response.items, response.next_page_token))
        });

        let videos: Vec<SearchResult> = stream.collect::<Result<_>>().await?;

        tracing::info!(
            found = videos.len(),
            pages = pages_fetched.load(Ordering::Relaxed),
            "found video(s) in this time interval"
        );
        Ok(videos)
    }

    /// Internal method to fetch one page of `search.list` for a channel and time window.
    ///
    /// # Arguments
    ///
    /// * `published_before` / `published_after` - RFC 3339 bounds of the window
    /// * `page_token` - Token for retrieving a specific page of results; `None` for the first
    async fn search_channel_videos_internal(
        &self,
        channel_id: &str,
        published_before: &str,
        published_after: &str,
        page_token: Option<String>,
    ) -> Result<SearchListResponse> {
        let part = if self.include_snippets {
            "id,snippet"
        } else {
            "id"
        };

        let mut query_params = vec![
            ("part", part),
            ("channelId", channel_id),
            ("order", "date"),
            ("type", "video"),
            ("publishedBefore", published_before),
            ("publishedAfter", published_after),
            ("maxResults", MAX_RESULTS_PER_PAGE),
        ];

        if let Some(ref token) = page_token {
            query_params.push(("pageToken", token.as_str()));
        }

        let page: SearchListResponse = self.request("search", &query_params).await?;

        tracing::debug!(
            total_results = page.page_info.total_results,
            returned_items = page.items.len(),
            has_next_page = page.next_page_token.is_some(),
            "fetched search page"
        );

        Ok(page)
    }
}
