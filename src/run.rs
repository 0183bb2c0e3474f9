use std::{
    fmt,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use reqwest::StatusCode;

use crate::{
    client::IndexClient,
    consistency::ConsistencyChecker,
    document::{self, BuildOutcome},
    error::Result,
    walker,
};

pub const DEFAULT_MAILBOX: &str = "testtest";
pub const DEFAULT_QUERY: &str = "dnet_usage main";

/// Counters that live for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunState {
    /// Documents successfully submitted so far.
    pub indexed: usize,
    /// Result count of the most recent search.
    pub last_count: usize,
}

/// Why a candidate file was not submitted.
#[derive(Debug)]
pub enum SkipReason {
    Unreadable(std::io::Error),
    TooLarge(usize),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreadable(err) => write!(f, "could not open file: {err}"),
            Self::TooLarge(size) => write!(f, "file is too large: size: {size}"),
        }
    }
}

/// Summary of one index-then-search cycle.
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub path: PathBuf,
    /// Length of the normalized text that was sent.
    pub text_len: usize,
    pub indexed: usize,
    pub search_count: usize,
    pub status: StatusCode,
    pub elapsed: Duration,
}

impl fmt::Display for CycleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: filesize: {} ... count: {}, search responses: {}, status: {} {:?}",
            self.path.display(),
            self.text_len,
            self.indexed,
            self.search_count,
            self.status,
            self.elapsed
        )
    }
}

#[derive(Debug)]
pub enum CycleOutcome {
    /// Suffix did not match; nothing was read.
    Ineligible,
    Skipped(SkipReason),
    Indexed(CycleReport),
}

/// Drives files through build, index and verify, one at a time.
pub struct Runner {
    client: IndexClient,
    checker: ConsistencyChecker,
    state: RunState,
    mailbox: String,
    query: String,
}

impl Runner {
    pub fn new(client: IndexClient, mailbox: &str, query: &str) -> Self {
        Self {
            client,
            checker: ConsistencyChecker::new(),
            state: RunState::default(),
            mailbox: mailbox.to_string(),
            query: query.to_string(),
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Process one path.
    ///
    /// Read failures and oversized files are reported as
    /// [`CycleOutcome::Skipped`]; any network, status, decode or
    /// consistency failure is returned as an error and must end the run.
    pub async fn process(&mut self, path: &Path) -> Result<CycleOutcome> {
        if !walker::is_candidate(path) {
            return Ok(CycleOutcome::Ineligible);
        }

        let content = match std::fs::read(path) {
            Ok(content) => content,
            Err(err) => {
                return Ok(CycleOutcome::Skipped(SkipReason::Unreadable(err)));
            }
        };

        let request = match document::build_request(
            path,
            &content,
            &self.mailbox,
            document::now(),
        ) {
            BuildOutcome::Request(request) => request,
            BuildOutcome::TooLarge(size) => {
                return Ok(CycleOutcome::Skipped(SkipReason::TooLarge(size)));
            }
        };
        let text_len: usize =
            request.docs.iter().map(|doc| doc.index.text.len()).sum();

        let start = Instant::now();
        let status = self.client.index(&request).await?;
        self.state.indexed += 1;

        let search_count = self
            .checker
            .check(&self.client, &self.mailbox, &self.query)
            .await?;
        self.state.last_count = search_count;

        Ok(CycleOutcome::Indexed(CycleReport {
            path: path.to_path_buf(),
            text_len,
            indexed: self.state.indexed,
            search_count,
            status,
            elapsed: start.elapsed(),
        }))
    }

    /// Process every path in order, stopping at the first fatal error.
    pub async fn run<I>(&mut self, paths: I) -> Result<RunState>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        for path in paths {
            match self.process(&path).await? {
                CycleOutcome::Ineligible => {
                    tracing::trace!(path = %path.display(), "not a candidate");
                }
                CycleOutcome::Skipped(reason) => {
                    tracing::warn!(path = %path.display(), "{reason}");
                }
                CycleOutcome::Indexed(report) => println!("{report}"),
            }
        }
        Ok(self.state)
    }
}
