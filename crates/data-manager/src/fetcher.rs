//! API client for the telemetry data service
//!
//! The HTTP layer is a trait so the browser (`fetch`), native (`reqwest`) and
//! test transports all feed the same status and body checks.

use crate::sample_parser::json_kind;
use async_trait::async_trait;
use serde_json::Value;
use shared_types::{Tag, ViewerError, ViewerResult};
use std::rc::Rc;

/// Raw response as seen by the transport
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            status_text: "OK".to_string(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A GET-only HTTP transport.
///
/// Futures are not required to be `Send`: the browser transport holds JS
/// values across awaits and everything runs on one thread anyway.
#[async_trait(?Send)]
pub trait HttpTransport {
    /// Issue `GET url` with `Accept: application/json`. Non-2xx statuses are
    /// returned, not turned into errors; only transport failures are `Err`.
    async fn get(&self, url: &str) -> ViewerResult<HttpResponse>;
}

#[async_trait(?Send)]
impl<T: HttpTransport + ?Sized> HttpTransport for Rc<T> {
    async fn get(&self, url: &str) -> ViewerResult<HttpResponse> {
        (**self).get(url).await
    }
}

#[async_trait(?Send)]
impl<T: HttpTransport + ?Sized> HttpTransport for Box<T> {
    async fn get(&self, url: &str) -> ViewerResult<HttpResponse> {
        (**self).get(url).await
    }
}

/// URL of the tag listing endpoint
pub fn tags_url(base: &str) -> String {
    format!("{base}/tags")
}

/// URL of the read endpoint for one tag
pub fn read_url(base: &str, tag: &Tag) -> String {
    format!("{base}/read?tag={}", urlencoding::encode(tag.as_str()))
}

/// Typed access to `/tags` and `/read`
pub struct ApiClient<T> {
    transport: T,
}

impl<T: HttpTransport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn get_json(&self, url: &str) -> ViewerResult<Value> {
        let response = self.transport.get(url).await?;
        if !response.is_success() {
            return Err(ViewerError::Http {
                status: response.status,
                status_text: response.status_text,
            });
        }

        serde_json::from_str(&response.body).map_err(|e| {
            let preview: String = response.body.chars().take(500).collect();
            log::error!("JSON parse error for {url}: {e}");
            log::error!("Response text: {preview}");
            ViewerError::from(e)
        })
    }

    /// `GET {base}/tags`, expecting an array of tag names
    pub async fn fetch_tags(&self, base: &str) -> ViewerResult<Vec<Tag>> {
        let url = tags_url(base);
        let body = self.get_json(&url).await?;
        let Value::Array(items) = body else {
            return Err(ViewerError::InvalidFormat {
                expected: "an array of tag names".to_string(),
                actual: json_kind(&body).to_string(),
            });
        };

        items
            .into_iter()
            .map(|item| match item {
                Value::String(name) => Ok(Tag::from(name)),
                other => Err(ViewerError::InvalidFormat {
                    expected: "a tag name string".to_string(),
                    actual: json_kind(&other).to_string(),
                }),
            })
            .collect()
    }

    /// `GET {base}/read?tag=..`, expecting an array of sample objects.
    ///
    /// Entries are returned raw; per-sample validation happens in the
    /// series store so one bad entry only drops itself.
    pub async fn fetch_samples(&self, base: &str, tag: &Tag) -> ViewerResult<Vec<Value>> {
        let url = read_url(base, tag);
        let body = self.get_json(&url).await?;
        let Value::Array(items) = body else {
            log::error!("Invalid data format for {tag}: {}", json_kind(&body));
            return Err(ViewerError::InvalidFormat {
                expected: "an array of samples".to_string(),
                actual: json_kind(&body).to_string(),
            });
        };

        if let Some(first) = items.first() {
            log::debug!("Sample data for {tag}: {first}");
        }
        Ok(items)
    }
}
