use crate::fetcher::{HttpResponse, HttpTransport};
use async_trait::async_trait;
use shared_types::{ViewerError, ViewerResult};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

/// WASM-compatible HTTP client using browser's fetch API.
///
/// No timeout of its own: requests live as long as the browser's network
/// stack lets them.
#[derive(Debug, Default, Clone, Copy)]
pub struct FetchClient;

impl FetchClient {
    pub fn new() -> Self {
        Self
    }

    /// Fetch a JSON endpoint and return the status and body text
    pub async fn fetch_text(&self, url: &str) -> Result<HttpResponse, JsValue> {
        let opts = RequestInit::new();
        opts.set_method("GET");
        opts.set_mode(RequestMode::Cors);

        // Set headers for JSON
        let headers = Headers::new()?;
        headers.set("Accept", "application/json")?;
        opts.set_headers(&headers);

        let request = Request::new_with_str_and_init(url, &opts)?;

        let window =
            web_sys::window().ok_or_else(|| JsValue::from_str("No window object available"))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
        let resp: Response = resp_value.dyn_into()?;

        let text = JsFuture::from(resp.text()?).await?;
        let body = text.as_string().unwrap_or_default();

        Ok(HttpResponse {
            status: resp.status(),
            status_text: resp.status_text(),
            body,
        })
    }
}

#[async_trait(?Send)]
impl HttpTransport for FetchClient {
    async fn get(&self, url: &str) -> ViewerResult<HttpResponse> {
        self.fetch_text(url).await.map_err(|err| ViewerError::Network {
            message: err
                .as_string()
                .or_else(|| {
                    err.dyn_ref::<js_sys::Error>()
                        .map(|e| String::from(e.message()))
                })
                .unwrap_or_else(|| "Fetch failed".to_string()),
        })
    }
}
