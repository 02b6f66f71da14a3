//! The single result slot behind one interactive session.
//!
//! Every analysis is issued a [`Ticket`]. Only the outcome carrying the
//! most recently issued ticket is applied, so a slow earlier request can
//! never overwrite the result of a later one.

use crate::client::AnalysisClient;
use crate::error::Error;
use crate::models::{AnalysisRequest, AnalysisResult};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    #[default]
    Idle,
    Loading,
    Ready(AnalysisResult),
    Failed(String),
}

#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
    latest: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.state {
            SessionState::Ready(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            SessionState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SessionState::Loading)
    }

    /// Starts a new analysis; any previous result or error is cleared.
    pub fn begin(&mut self) -> Ticket {
        self.latest += 1;
        self.state = SessionState::Loading;
        debug!("analysis #{} started", self.latest);
        Ticket(self.latest)
    }

    /// Applies an outcome. Returns `false` when `ticket` has been
    /// superseded and the outcome was dropped.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        outcome: Result<AnalysisResult, Error>,
    ) -> bool {
        if ticket.0 != self.latest {
            warn!(
                "dropping stale response for analysis #{} (latest is #{})",
                ticket.0, self.latest
            );
            return false;
        }
        self.state = match outcome {
            Ok(result) => SessionState::Ready(result),
            Err(err) => SessionState::Failed(err.user_message()),
        };
        true
    }

    pub async fn run(&mut self, client: &AnalysisClient, request: &AnalysisRequest) -> &SessionState {
        let ticket = self.begin();
        let outcome = client.analyze(request).await;
        self.complete(ticket, outcome);
        &self.state
    }
}
