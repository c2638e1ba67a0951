//! A [`Transport`] that replays canned responses and remembers what it was asked for.

use crate::error::{Error, Result};
use crate::youtube_api::transport::Transport;
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub(crate) url: String,
    pub(crate) params: Vec<(String, String)>,
}

impl RecordedRequest {
    pub(crate) fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug)]
pub(crate) struct FakeTransport {
    responses: Mutex<VecDeque<Result<Value>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl FakeTransport {
    /// Each request pops the next response; running out is a test bug and panics.
    pub(crate) fn new(responses: impl IntoIterator<Item = Result<Value>>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            requests: Mutex::default(),
        }
    }

    pub(crate) fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for FakeTransport {
    async fn get(&self, url: &str, query_params: &[(&str, &str)]) -> Result<Value> {
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.to_string(),
            params: query_params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("no response queued for request to {url}"))
    }
}

/// A `search#searchResult` for a video.
pub(crate) fn video(id: &str) -> Value {
    json!({
        "kind": "youtube#searchResult",
        "etag": format!("etag-{id}"),
        "id": { "kind": "youtube#video", "videoId": id },
    })
}

/// One page of `search.list` output.
pub(crate) fn search_page(video_ids: &[&str], next_page_token: Option<&str>) -> Value {
    let mut page = json!({
        "kind": "youtube#searchListResponse",
        "etag": "page-etag",
        "regionCode": "NO",
        "pageInfo": { "totalResults": video_ids.len(), "resultsPerPage": 50 },
        "items": video_ids.iter().map(|id| video(id)).collect::<Vec<_>>(),
    });
    if let Some(token) = next_page_token {
        page["nextPageToken"] = Value::String(token.to_string());
    }
    page
}

/// A failure as the real transport would report a rejected request.
pub(crate) fn forbidden(url: &str, body: &str) -> Error {
    Error::UnexpectedStatus {
        endpoint: url.to_string(),
        status: reqwest::StatusCode::FORBIDDEN,
        body: body.to_string(),
    }
}
