//! End-to-end scenarios through Format -> Lookup -> Diff -> Persist, wired
//! by hand over the same bounded channels `Pipeline::run` uses, against a
//! `DocStore` backed by a `wiremock` server. Exercises spec scenarios 1-3
//! (first sighting, no-op, removal).

use std::collections::HashMap;
use std::io::Read;
use std::sync::Arc;
use std::time::Duration;

use flate2::read::GzDecoder;
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use stashriver::config::Config;
use stashriver::currency::CurrencyTracker;
use stashriver::model::{Page, RawItem, RawStash};
use stashriver::normalizer::{self, NormalizeContext};
use stashriver::pipeline::{diff, format, lookup, persist};
use stashriver::store::DocStore;

const LEAGUE: &str = "Harbinger";

fn raw_item(id: &str) -> RawItem {
    serde_json::from_value(json!({
        "id": id,
        "name": "",
        "typeLine": "Scroll of Wisdom",
        "baseType": "Scroll of Wisdom",
        "ilvl": 1,
        "frameType": 0,
        "identified": true,
    }))
    .unwrap()
}

fn raw_stash(stash_id: &str, item_ids: &[&str]) -> RawStash {
    RawStash {
        account_name: "some_account".to_string(),
        last_character_name: String::new(),
        id: stash_id.to_string(),
        stash: String::new(),
        stash_type: String::new(),
        league: LEAGUE.to_string(),
        public: true,
        items: item_ids.iter().map(|id| raw_item(id)).collect(),
    }
}

/// Answers an `_mget` request with whichever of `docs` were asked for,
/// marking the rest `found: false` — mirrors a real multi-get response shape.
struct MgetResponder {
    docs: HashMap<String, Value>,
}

impl Respond for MgetResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap();
        let ids: Vec<String> = serde_json::from_value(body["ids"].clone()).unwrap();
        let out: Vec<Value> = ids
            .into_iter()
            .map(|id| match self.docs.get(&id) {
                Some(source) => json!({"_id": id, "found": true, "_source": source}),
                None => json!({"_id": id, "found": false}),
            })
            .collect();
        ResponseTemplate::new(200).set_body_json(json!({ "docs": out }))
    }
}

/// Captures every bulk request's decompressed ND-JSON body for inspection.
#[derive(Clone, Default)]
struct BulkRecorder {
    bodies: Arc<std::sync::Mutex<Vec<String>>>,
}

impl Respond for BulkRecorder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let mut decoder = GzDecoder::new(&request.body[..]);
        let mut plain = String::new();
        decoder.read_to_string(&mut plain).unwrap();
        self.bodies.lock().unwrap().push(plain);
        ResponseTemplate::new(200)
    }
}

async fn mock_store(
    server: &MockServer,
    stored_items: HashMap<String, Value>,
    stored_mappings: HashMap<String, Value>,
) -> BulkRecorder {
    Mock::given(wiremock::matchers::method("GET"))
        .and(wiremock::matchers::path(format!(
            "/items-{}/_mget",
            LEAGUE.to_lowercase()
        )))
        .respond_with(MgetResponder { docs: stored_items })
        .mount(server)
        .await;

    Mock::given(wiremock::matchers::method("GET"))
        .and(wiremock::matchers::path("/stash-mappings/_mget"))
        .respond_with(MgetResponder {
            docs: stored_mappings,
        })
        .mount(server)
        .await;

    let recorder = BulkRecorder::default();
    Mock::given(wiremock::matchers::method("POST"))
        .and(wiremock::matchers::path("/_bulk"))
        .respond_with(recorder.clone())
        .mount(server)
        .await;

    recorder
}

fn doc_store(server: &MockServer) -> DocStore {
    let config = Config {
        es_url: server.uri(),
        es_username: None,
        es_password: None,
        discord_hook: None,
        discord_token: None,
        rate_limit: Duration::from_millis(1),
    };
    DocStore::new(&config, reqwest::Client::new())
}

/// Runs one page through Format -> Lookup -> Diff -> Persist, blocking until
/// a persisted `Update` (or channel closure) comes out the far end.
async fn run_page(store: DocStore, page: Page) {
    let cx = CancellationToken::new();
    let currency = Arc::new(CurrencyTracker::new(reqwest::Client::new()));

    let (page_tx, page_rx) = async_channel::bounded(1);
    let (formatted_tx, formatted_rx) = async_channel::bounded(1);
    let (looked_up_tx, looked_up_rx) = async_channel::bounded(1);
    let (diffed_tx, diffed_rx) = async_channel::bounded(1);
    let (persisted_tx, persisted_rx) = async_channel::bounded(1);

    let format_handle = tokio::spawn(format::run(format::Args {
        cx: cx.clone(),
        rx: page_rx,
        tx: formatted_tx,
        currency,
    }));
    let lookup_handle = tokio::spawn(lookup::run(lookup::Args {
        cx: cx.clone(),
        rx: formatted_rx,
        tx: looked_up_tx,
        store: store.clone(),
    }));
    let diff_handle = tokio::spawn(diff::run(diff::Args {
        cx: cx.clone(),
        rx: looked_up_rx,
        tx: diffed_tx,
        store: store.clone(),
    }));
    let persist_handle = tokio::spawn(persist::run(persist::Args {
        cx: cx.clone(),
        rx: diffed_rx,
        tx: persisted_tx,
        store,
    }));

    page_tx.send(page).await.unwrap();
    let _ = persisted_rx.recv().await;

    cx.cancel();
    let _ = tokio::join!(format_handle, lookup_handle, diff_handle, persist_handle);
}

#[tokio::test]
async fn first_sighting_indexes_every_item_and_writes_a_mapping() {
    let server = MockServer::start().await;
    let recorder = mock_store(&server, HashMap::new(), HashMap::new()).await;
    let store = doc_store(&server);

    let page = Page {
        next_id: "cursor-1".to_string(),
        stashes: vec![raw_stash("stash-1", &["item-a", "item-b"])],
    };

    run_page(store, page).await;

    let bodies = recorder.bodies.lock().unwrap();
    assert_eq!(bodies.len(), 1);
    let body = &bodies[0];
    assert!(body.contains("\"_id\":\"item-a\""));
    assert!(body.contains("\"_id\":\"item-b\""));
    assert!(body.contains("stash-mappings"));
    assert!(!body.contains("\"update\""));
}

#[tokio::test]
async fn a_resighting_with_unchanged_content_only_writes_the_mapping() {
    let server = MockServer::start().await;

    let currency = CurrencyTracker::new(reqwest::Client::new());
    let ctx = NormalizeContext {
        account: "some_account".to_string(),
        stash_id: "stash-1".to_string(),
        currency: &currency,
        created_at: None,
    };
    let stored_a = normalizer::normalize(&raw_item("item-a"), &ctx);
    let stored_doc = serde_json::to_value(&stored_a).unwrap();

    let mut stored_items = HashMap::new();
    stored_items.insert("item-a".to_string(), stored_doc);

    let recorder = mock_store(&server, stored_items, HashMap::new()).await;
    let store = doc_store(&server);

    let page = Page {
        next_id: "cursor-2".to_string(),
        stashes: vec![raw_stash("stash-1", &["item-a"])],
    };

    run_page(store, page).await;

    let bodies = recorder.bodies.lock().unwrap();
    assert_eq!(bodies.len(), 1);
    let body = &bodies[0];
    assert!(!body.contains("\"_id\":\"item-a\""));
    assert!(body.contains("stash-mappings"));
}

#[tokio::test]
async fn a_dropped_item_produces_a_removal_update() {
    let server = MockServer::start().await;

    let mut stored_mappings = HashMap::new();
    stored_mappings.insert(
        "stash-1".to_string(),
        json!({
            "stash_id": "stash-1",
            "last_updated": "2026-07-30T00:00:00+0000",
            "item_ids": ["item-a", "item-b"],
        }),
    );

    let recorder = mock_store(&server, HashMap::new(), stored_mappings).await;
    let store = doc_store(&server);

    // item-b is no longer present in the stash.
    let page = Page {
        next_id: "cursor-3".to_string(),
        stashes: vec![raw_stash("stash-1", &["item-a"])],
    };

    run_page(store, page).await;

    let bodies = recorder.bodies.lock().unwrap();
    assert_eq!(bodies.len(), 1);
    let body = &bodies[0];
    assert!(body.contains("\"update\""));
    assert!(body.contains("\"_id\":\"item-b\""));
    assert!(body.contains("\"_id\":\"item-a\""));
}
