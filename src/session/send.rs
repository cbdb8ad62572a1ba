//! Token-tagged sends.

use crate::executor::{ReplayEngine, RequestError};
use crate::formatter::ResponseView;
use crate::models::{ParsedRequest, ReplayResponse, Scheme};

/// A decoded request waiting to be executed.
///
/// The token identifies the send that produced it; only the most recently
/// issued token is accepted back by the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSend {
    pub token: u64,
    pub request: ParsedRequest,
    pub scheme: Scheme,
}

impl PendingSend {
    /// Replays the request.
    pub async fn execute(&self, engine: &ReplayEngine) -> SendOutcome {
        let result = engine.send(&self.request, self.scheme).await;
        SendOutcome {
            token: self.token,
            result,
        }
    }
}

/// The result of an executed [`PendingSend`].
#[derive(Debug)]
pub struct SendOutcome {
    pub token: u64,
    pub result: Result<ReplayResponse, RequestError>,
}

impl SendOutcome {
    /// Renders the outcome for the response area.
    pub fn view(&self) -> ResponseView {
        match &self.result {
            Ok(response) => ResponseView::from_response(response),
            Err(err) => ResponseView::from_error(err),
        }
    }
}
