//! JSON shapes exchanged with the index/search service.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp {
    pub tsec: i64,
    pub tnsec: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexPayload {
    pub text: String,
}

/// A single indexable document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub bucket: String,
    pub key: String,
    pub timestamp: Timestamp,
    pub index: IndexPayload,
}

/// Body of `POST /index`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRequest {
    pub mailbox: String,
    pub docs: Vec<Document>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextQuery {
    pub text: String,
}

/// Query payload of a search request.
///
/// Variants serialize as their bare inner object, so `Text` goes over
/// the wire as `{"text": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Query {
    Text(TextQuery),
}

impl Query {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(TextQuery { text: text.into() })
    }
}

/// Body of `POST /search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub mailbox: String,
    pub query: Query,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Paging {
    pub num: i64,
    pub start: String,
}

/// One hit in a search response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultId {
    pub id: String,
    pub bucket: String,
    pub key: String,
    pub timestamp: Timestamp,
    pub relevance: f64,
}

/// Body returned by `POST /search`.
///
/// Missing fields fall back to their defaults; only malformed JSON is
/// rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    pub completed: bool,
    pub paging: Paging,
    pub ids: Vec<ResultId>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn search_request_wire_shape() {
        let req = SearchRequest {
            mailbox: "testtest".to_string(),
            query: Query::text("dnet_usage main"),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            json!({"mailbox": "testtest", "query": {"text": "dnet_usage main"}})
        );
    }

    #[test]
    fn index_request_wire_shape() {
        let req = IndexRequest {
            mailbox: "testtest".to_string(),
            docs: vec![Document {
                id: "a.txt".to_string(),
                bucket: "unused".to_string(),
                key: "unused".to_string(),
                timestamp: Timestamp { tsec: 10, tnsec: 1234 },
                index: IndexPayload {
                    text: "hello".to_string(),
                },
            }],
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            json!({
                "mailbox": "testtest",
                "docs": [{
                    "id": "a.txt",
                    "bucket": "unused",
                    "key": "unused",
                    "timestamp": {"tsec": 10, "tnsec": 1234},
                    "index": {"text": "hello"}
                }]
            })
        );
    }

    #[test]
    fn decodes_full_search_response() {
        let body = r#"{
            "completed": true,
            "paging": {"num": 2, "start": "abc"},
            "ids": [
                {"id": "a", "bucket": "b", "key": "k",
                 "timestamp": {"tsec": 1, "tnsec": 2}, "relevance": 0.5},
                {"id": "c", "bucket": "b", "key": "k",
                 "timestamp": {"tsec": 3, "tnsec": 4}, "relevance": 1.0}
            ]
        }"#;
        let resp: SearchResponse = serde_json::from_str(body).unwrap();
        assert!(resp.completed);
        assert_eq!(resp.paging.start, "abc");
        assert_eq!(resp.ids.len(), 2);
        assert_eq!(resp.ids[1].timestamp.tnsec, 4);
    }

    #[test]
    fn missing_fields_default() {
        let resp: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(!resp.completed);
        assert!(resp.ids.is_empty());

        let resp: SearchResponse =
            serde_json::from_str(r#"{"ids": [{"id": "x"}]}"#).unwrap();
        assert_eq!(resp.ids.len(), 1);
        assert_eq!(resp.ids[0].relevance, 0.0);
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(serde_json::from_str::<SearchResponse>("{\"ids\": [").is_err());
        assert!(
            serde_json::from_str::<SearchResponse>(r#"{"ids": 7}"#).is_err()
        );
    }
}
