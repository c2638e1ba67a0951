//! YouTube Search API types.
//!
//! Search results are handed to the caller untouched: only the `id` resource is typed, and every
//! other field the API sends back is carried along as raw JSON so that it survives serialization.

use crate::youtube_api::types::PageInfo;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::VecDeque;

/// Response structure for the `search.list` API call.
///
/// See: <https://developers.google.com/youtube/v3/docs/search/list>
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchListResponse {
    /// Identifies the API resource's type.
    ///
    /// The value will be `youtube#searchListResponse`.
    pub kind: String,
    #[serde(default)]
    pub items: VecDeque<SearchResult>,
    #[serde(rename = "pageInfo", default)]
    pub page_info: PageInfo,
    /// Token that can be used as the value of the pageToken parameter to retrieve the next page in the result set.
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

/// A search result, typically a video when searching with `type=video`.
///
/// See: <https://developers.google.com/youtube/v3/docs/search#resource>
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Identifies the resource that matched the search request.
    pub id: ResourceId,
    /// Everything else the API returned (`kind`, `etag`, `snippet`, ...).
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl SearchResult {
    /// The video ID, if this result is a video.
    pub fn video_id(&self) -> Option<&str> {
        self.id.video_id.as_deref()
    }
}

/// The `id` object of a search result.
///
/// Exactly one of the `*_id` fields is set, depending on `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    /// The type of the resource, e.g. `youtube#video`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist_id: Option<String>,
    /// Any other field of the `id` object.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn unknown_fields_survive_a_round_trip() {
        let raw = serde_json::json!({
            "kind": "youtube#searchResult",
            "etag": "abc",
            "id": { "kind": "youtube#video", "videoId": "dQw4w9WgXcQ" },
            "snippet": { "title": "Never Gonna Give You Up", "publishedAt": "2009-10-25T06:57:33Z" }
        });

        let result: SearchResult = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(result.video_id(), Some("dQw4w9WgXcQ"));
        assert_eq!(serde_json::to_value(&result).unwrap(), raw);
    }

    #[test]
    fn id_passes_through_unchanged() {
        let raw = serde_json::json!({
            "kind": "youtube#searchResult",
            "id": { "videoId": "abc123", "futureField": [1, 2] }
        });

        let result: SearchResult = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(result.video_id(), Some("abc123"));
        assert_eq!(result.id.kind, "");
        assert_eq!(result.id.other["futureField"], serde_json::json!([1, 2]));
        assert_eq!(serde_json::to_value(&result).unwrap(), raw);
    }

    #[test]
    fn missing_items_and_token_mean_an_empty_last_page() {
        let page: SearchListResponse = serde_json::from_value(serde_json::json!({
            "kind": "youtube#searchListResponse",
            "pageInfo": { "totalResults": 0, "resultsPerPage": 50 }
        }))
        .unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.next_page_token, None);
    }
}
