//! Integration tests for the data manager

use async_trait::async_trait;
use data_manager::{ApiClient, HttpResponse, HttpTransport, SeriesStore, TagRegistry};
use shared_types::{Tag, ViewerError, ViewerResult, PALETTE};
use std::cell::RefCell;
use std::collections::HashMap;

/// Serves canned bodies and counts requests per URL
#[derive(Default)]
struct MockApi {
    bodies: RefCell<HashMap<String, String>>,
    hits: RefCell<HashMap<String, usize>>,
}

impl MockApi {
    fn serve(&self, url: &str, body: &str) {
        self.bodies
            .borrow_mut()
            .insert(url.to_string(), body.to_string());
    }

    fn hits(&self, url: &str) -> usize {
        self.hits.borrow().get(url).copied().unwrap_or(0)
    }
}

#[async_trait(?Send)]
impl HttpTransport for MockApi {
    async fn get(&self, url: &str) -> ViewerResult<HttpResponse> {
        *self.hits.borrow_mut().entry(url.to_string()).or_default() += 1;
        match self.bodies.borrow().get(url) {
            Some(body) => Ok(HttpResponse::ok(body.clone())),
            None => Err(ViewerError::Network {
                message: format!("no route for {url}"),
            }),
        }
    }
}

#[tokio::test]
async fn test_tags_then_reads_fill_the_store() {
    let api = MockApi::default();
    api.serve("http://api/tags", r#"["temp1","pressure"]"#);
    api.serve(
        "http://api/read?tag=temp1",
        r#"[{"ts":2000,"val":21.5},{"ts":1000,"val":20.0}]"#,
    );
    api.serve("http://api/read?tag=pressure", r#"[{"ts":1500,"val":"101.3"}]"#);
    let client = ApiClient::new(api);

    let mut registry = TagRegistry::new();
    registry.replace(client.fetch_tags("http://api").await.unwrap());
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.color_of(&Tag::from("pressure")), Some(PALETTE[1]));

    let mut store = SeriesStore::new(100);
    for tag in registry.tags() {
        store.create(tag);
        let raw = client.fetch_samples("http://api", tag).await.unwrap();
        assert!(store.merge(tag, &raw) > 0);
    }

    let temp = store.get(&Tag::from("temp1")).unwrap();
    assert_eq!(temp.labels(), vec!["1000", "2000"]);
    assert_eq!(temp.latest().unwrap().value, 21.5);
    assert_eq!(store.get(&Tag::from("pressure")).unwrap().values(), vec![101.3]);
}

#[tokio::test]
async fn test_repeated_polls_stay_bounded() {
    let api = MockApi::default();
    let client = ApiClient::new(api);
    let tag = Tag::from("temp1");
    let mut store = SeriesStore::new(5);
    store.create(&tag);

    // Each poll re-delivers the previous sample plus a new one
    for round in 1..=10i64 {
        let body = format!(
            r#"[{{"ts":{},"val":1}},{{"ts":{},"val":2}}]"#,
            round * 1000 - 1000 + 1,
            round * 1000 + 1
        );
        client.transport().serve("http://api/read?tag=temp1", &body);
        let raw = client.fetch_samples("http://api", &tag).await.unwrap();
        store.merge(&tag, &raw);
    }

    let series = store.get(&tag).unwrap();
    assert_eq!(series.len(), 5);
    assert_eq!(series.latest().unwrap().timestamp, 10_001);
    assert_eq!(client.transport().hits("http://api/read?tag=temp1"), 10);
}

#[tokio::test]
async fn test_failed_read_leaves_store_untouched() {
    let client = ApiClient::new(MockApi::default());
    let tag = Tag::from("temp1");
    let mut store = SeriesStore::default();
    store.create(&tag);

    let result = client.fetch_samples("http://api", &tag).await;
    assert!(matches!(result, Err(ViewerError::Network { .. })));
    assert!(store.get(&tag).unwrap().is_empty());
}
