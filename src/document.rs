use std::{
    path::Path,
    time::{SystemTime, UNIX_EPOCH},
};

use crate::protocol::{Document, IndexPayload, IndexRequest, Timestamp};

/// Files larger than this are skipped, never truncated.
pub const MAX_DOCUMENT_SIZE: usize = 2 * 1024 * 1024;

/// Fixed sub-second component of every document timestamp.
pub const TIMESTAMP_NSEC: i64 = 1234;

/// Placeholder written into the `bucket` and `key` fields.
const UNUSED_PLACEMENT: &str = "unused";

/// Result of turning a file into an index request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    Request(IndexRequest),
    /// Content exceeded [`MAX_DOCUMENT_SIZE`]; carries the size in bytes.
    TooLarge(usize),
}

/// Flatten file content into a single line of text.
///
/// Invalid UTF-8 is replaced, every `\r` is dropped and every `\n`
/// becomes a single space.
///
/// # Examples
///
/// ```
/// use indexcheck::document::normalize_text;
///
/// assert_eq!(normalize_text(b"line1\r\nline2\n"), "line1 line2 ");
/// ```
pub fn normalize_text(content: &[u8]) -> String {
    String::from_utf8_lossy(content)
        .chars()
        .filter(|&c| c != '\r')
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect()
}

/// Current wall-clock time as a document timestamp.
pub fn now() -> Timestamp {
    let tsec = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    Timestamp {
        tsec: i64::try_from(tsec).unwrap_or(i64::MAX),
        tnsec: TIMESTAMP_NSEC,
    }
}

/// Build the single-document index request for `path`.
///
/// The size ceiling is checked against the raw content before any
/// normalization happens.
pub fn build_request(
    path: &Path,
    content: &[u8],
    mailbox: &str,
    timestamp: Timestamp,
) -> BuildOutcome {
    if content.len() > MAX_DOCUMENT_SIZE {
        return BuildOutcome::TooLarge(content.len());
    }

    let doc = Document {
        id: path.to_string_lossy().into_owned(),
        bucket: UNUSED_PLACEMENT.to_string(),
        key: UNUSED_PLACEMENT.to_string(),
        timestamp,
        index: IndexPayload {
            text: normalize_text(content),
        },
    };

    BuildOutcome::Request(IndexRequest {
        mailbox: mailbox.to_string(),
        docs: vec![doc],
    })
}
