#![allow(dead_code)]

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use axum::{
    Json,
    Router,
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    routing::post,
};
use indexcheck::protocol::{
    IndexRequest,
    Paging,
    ResultId,
    SearchRequest,
    SearchResponse,
};

/// Scripted behaviour of the fake index/search service.
#[derive(Debug, Default)]
pub struct Script {
    /// Result counts returned by successive searches. Once exhausted the
    /// service reports one result per indexed document.
    pub search_counts: VecDeque<usize>,
    pub index_status: Option<StatusCode>,
    pub search_status: Option<StatusCode>,
    /// Raw body returned by every search instead of a real response.
    pub search_body: Option<String>,
}

#[derive(Debug, Default)]
pub struct Recorded {
    pub index_requests: Vec<IndexRequest>,
    pub search_requests: Vec<SearchRequest>,
}

#[derive(Default)]
struct Inner {
    script: Script,
    recorded: Recorded,
}

#[derive(Clone)]
pub struct MockService {
    inner: Arc<Mutex<Inner>>,
    pub base_url: String,
}

impl MockService {
    /// Start the service on an ephemeral loopback port.
    pub async fn start(script: Script) -> Self {
        let inner = Arc::new(Mutex::new(Inner {
            script,
            recorded: Recorded::default(),
        }));
        let app = Router::new()
            .route("/index", post(index))
            .route("/search", post(search))
            .layer(DefaultBodyLimit::disable())
            .with_state(inner.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock service");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve mock service");
        });

        Self {
            inner,
            base_url: format!("http://{addr}"),
        }
    }

    /// Document ids submitted so far, in order.
    pub fn indexed_ids(&self) -> Vec<String> {
        let inner = self.inner.lock().unwrap();
        inner
            .recorded
            .index_requests
            .iter()
            .flat_map(|req| req.docs.iter().map(|doc| doc.id.clone()))
            .collect()
    }

    pub fn index_requests(&self) -> Vec<IndexRequest> {
        self.inner.lock().unwrap().recorded.index_requests.clone()
    }

    pub fn search_requests(&self) -> Vec<SearchRequest> {
        self.inner.lock().unwrap().recorded.search_requests.clone()
    }
}

type Shared = Arc<Mutex<Inner>>;

async fn index(
    State(inner): State<Shared>,
    Json(req): Json<IndexRequest>,
) -> StatusCode {
    let mut inner = inner.lock().unwrap();
    inner.recorded.index_requests.push(req);
    inner.script.index_status.unwrap_or(StatusCode::OK)
}

async fn search(
    State(inner): State<Shared>,
    Json(req): Json<SearchRequest>,
) -> (StatusCode, String) {
    let mut inner = inner.lock().unwrap();
    inner.recorded.search_requests.push(req);

    if let Some(status) = inner.script.search_status {
        return (status, "server error".to_string());
    }
    if let Some(ref body) = inner.script.search_body {
        return (StatusCode::OK, body.clone());
    }

    let indexed = inner.recorded.index_requests.len();
    let count = inner.script.search_counts.pop_front().unwrap_or(indexed);
    let response = SearchResponse {
        completed: true,
        paging: Paging {
            num: count as i64,
            start: String::new(),
        },
        ids: (0..count)
            .map(|i| ResultId {
                id: format!("doc-{i}"),
                bucket: "unused".to_string(),
                key: "unused".to_string(),
                relevance: 1.0,
                ..ResultId::default()
            })
            .collect(),
    };
    (
        StatusCode::OK,
        serde_json::to_string(&response).expect("encode response"),
    )
}

/// Write `files` (name, content) under a fresh temp dir.
pub fn fixture(files: &[(&str, &[u8])]) -> tempfile::TempDir {
    let tmp = tempfile::tempdir().expect("tempdir");
    for (name, content) in files {
        let path = tmp.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(path, content).expect("write fixture");
    }
    tmp
}
