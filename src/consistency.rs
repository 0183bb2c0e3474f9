use crate::{
    client::IndexClient,
    error::{Error, Result},
    protocol::{Query, SearchRequest},
};

/// Where the checker is in its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckerState {
    /// No search has been observed yet.
    Initial,
    /// At least one search succeeded; `previous` is its result count.
    Steady { previous: usize },
}

/// Enforces that search result counts never shrink over a run.
#[derive(Debug, Clone)]
pub struct ConsistencyChecker {
    state: CheckerState,
}

impl Default for ConsistencyChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsistencyChecker {
    pub fn new() -> Self {
        Self {
            state: CheckerState::Initial,
        }
    }

    pub fn state(&self) -> CheckerState {
        self.state
    }

    /// Last accepted result count, zero before the first observation.
    pub fn previous(&self) -> usize {
        match self.state {
            CheckerState::Initial => 0,
            CheckerState::Steady { previous } => previous,
        }
    }

    /// Record a result count.
    ///
    /// Equal counts are accepted. A count lower than the previous one is
    /// a [`Error::ConsistencyViolation`] carrying `body`, and leaves the
    /// state untouched.
    pub fn observe(&mut self, observed: usize, body: &str) -> Result<usize> {
        let previous = self.previous();
        if observed < previous {
            return Err(Error::ConsistencyViolation {
                observed,
                previous,
                body: body.to_string(),
            });
        }
        self.state = CheckerState::Steady { previous: observed };
        Ok(observed)
    }

    /// Search `mailbox` for `query` and check the result count.
    pub async fn check(
        &mut self,
        client: &IndexClient,
        mailbox: &str,
        query: &str,
    ) -> Result<usize> {
        let request = SearchRequest {
            mailbox: mailbox.to_string(),
            query: Query::text(query),
        };
        let reply = client.search(&request).await?;
        tracing::debug!(
            completed = reply.response.completed,
            results = reply.response.ids.len(),
            "search response"
        );
        self.observe(reply.response.ids.len(), &reply.body)
    }
}
