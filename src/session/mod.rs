//! The request panel as an explicit state machine.
//!
//! A [`PanelSession`] owns the capture list, the filter settings and the
//! per-selection edit and navigation history. The presentation layer feeds it
//! [`Intent`]s and renders the [`Effect`]s it returns. Network I/O happens
//! outside the session: a send yields an [`Effect::IssueRequest`] whose
//! outcome is handed back through [`PanelSession::complete_send`].
//!
//! # Example
//!
//! ```no_run
//! use http_replay::executor::ReplayEngine;
//! use http_replay::models::CapturedEntry;
//! use http_replay::session::{Effect, Intent, PanelSession};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = ReplayEngine::new()?;
//! let mut session = PanelSession::new();
//! session.ingest(CapturedEntry::new("GET", "https://httpbin.org/get"));
//! session.dispatch(Intent::Select(0));
//!
//! for effect in session.dispatch(Intent::SendRequest) {
//!     if let Effect::IssueRequest(send) = effect {
//!         let outcome = send.execute(&engine).await;
//!         if let Some(Effect::ShowResponse(view)) = session.complete_send(outcome) {
//!             println!("{}", view.raw_text);
//!         }
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod capture;
pub mod intent;
pub mod send;

pub use capture::{should_capture, STATIC_EXTENSIONS};
pub use intent::{Effect, Intent, Selection, TransformTarget};
pub use send::{PendingSend, SendOutcome};

use crate::codec;
use crate::config::{get_config, ReplayConfig};
use crate::filter::{self, FilterOutcome, FilterState};
use crate::formatter::ResponseView;
use crate::history::{EditHistory, NavEntry, NavigationHistory};
use crate::models::{CapturedEntry, Scheme};
use crate::transform::{self, TransformError, TransformOp};
use log::{debug, info, warn};
use std::time::Instant;

/// State of one request panel.
#[derive(Debug)]
pub struct PanelSession {
    config: ReplayConfig,
    entries: Vec<CapturedEntry>,
    filter: FilterState,
    selected: Option<usize>,
    request_text: String,
    use_https: bool,
    edits: EditHistory,
    nav: NavigationHistory,
    response: Option<ResponseView>,
    last_token: u64,
    active_token: Option<u64>,
}

impl Default for PanelSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelSession {
    /// Creates a session using the global configuration.
    pub fn new() -> Self {
        Self::with_config(get_config())
    }

    pub fn with_config(config: ReplayConfig) -> Self {
        let edits = EditHistory::with_settings("", config.undo_limit, config.edit_debounce());
        Self {
            config,
            entries: Vec::new(),
            filter: FilterState::default(),
            selected: None,
            request_text: String::new(),
            use_https: true,
            edits,
            nav: NavigationHistory::default(),
            response: None,
            last_token: 0,
            active_token: None,
        }
    }

    /// Adds a captured request to the list.
    ///
    /// Returns the new entry's index, or `None` if it was filtered out as
    /// non-HTTP traffic or a static asset.
    pub fn ingest(&mut self, entry: CapturedEntry) -> Option<usize> {
        if !should_capture(&entry.url) {
            debug!("Ignoring capture {}", entry.url);
            return None;
        }
        self.entries.push(entry);
        Some(self.entries.len() - 1)
    }

    /// Handles an intent using the current time for debouncing.
    pub fn dispatch(&mut self, intent: Intent) -> Vec<Effect> {
        self.dispatch_at(intent, Instant::now())
    }

    /// Handles an intent observed at `now`.
    pub fn dispatch_at(&mut self, intent: Intent, now: Instant) -> Vec<Effect> {
        match intent {
            Intent::Select(index) => self.select(index),
            Intent::ToggleStar(index) => self.toggle_star(index),
            Intent::Edit(text) => {
                self.edits.edit_at(text.clone(), now);
                self.request_text = text;
                Vec::new()
            }
            Intent::Undo => match self.edits.undo() {
                Some(text) => {
                    self.request_text = text.to_string();
                    vec![self.show_request()]
                }
                None => Vec::new(),
            },
            Intent::Redo => match self.edits.redo() {
                Some(text) => {
                    self.request_text = text.to_string();
                    vec![self.show_request()]
                }
                None => Vec::new(),
            },
            Intent::SetUseHttps(use_https) => {
                self.use_https = use_https;
                Vec::new()
            }
            Intent::NavigateBack => {
                let entry = self.nav.back().cloned();
                self.load_nav_entry(entry)
            }
            Intent::NavigateForward => {
                let entry = self.nav.forward().cloned();
                self.load_nav_entry(entry)
            }
            Intent::SetSearch(term) => {
                self.filter.search_term = term;
                vec![Effect::UpdateVisibility(self.visibility())]
            }
            Intent::SetUseRegex(use_regex) => {
                self.filter.use_regex = use_regex;
                vec![Effect::UpdateVisibility(self.visibility())]
            }
            Intent::SetCategory(category) => {
                self.filter.category = category;
                vec![Effect::UpdateVisibility(self.visibility())]
            }
            Intent::ApplyTransform {
                target,
                op,
                selection,
            } => self.apply_transform(target, op, selection),
            Intent::SendRequest => self.send(),
        }
    }

    /// Commits a debounced edit whose idle window has elapsed.
    pub fn poll(&mut self, now: Instant) -> bool {
        self.edits.poll(now)
    }

    /// Accepts the outcome of an issued send.
    ///
    /// Returns `None` if a newer send was issued, or the selection changed,
    /// after this one.
    pub fn complete_send(&mut self, outcome: SendOutcome) -> Option<Effect> {
        if self.active_token != Some(outcome.token) {
            debug!("Discarding stale response for send #{}", outcome.token);
            return None;
        }
        self.active_token = None;

        let view = outcome.view();
        self.response = Some(view.clone());
        Some(Effect::ShowResponse(view))
    }

    /// Runs a filter pass with the current settings.
    pub fn visibility(&self) -> FilterOutcome {
        filter::apply(&self.entries, &self.filter)
    }

    pub fn entries(&self) -> &[CapturedEntry] {
        &self.entries
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn request_text(&self) -> &str {
        &self.request_text
    }

    pub fn use_https(&self) -> bool {
        self.use_https
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    pub fn response(&self) -> Option<&ResponseView> {
        self.response.as_ref()
    }

    pub fn edit_history(&self) -> &EditHistory {
        &self.edits
    }

    pub fn navigation(&self) -> &NavigationHistory {
        &self.nav
    }

    pub fn config(&self) -> &ReplayConfig {
        &self.config
    }

    /// Whether a send is outstanding.
    pub fn is_sending(&self) -> bool {
        self.active_token.is_some()
    }

    fn select(&mut self, index: usize) -> Vec<Effect> {
        let Some(entry) = self.entries.get(index) else {
            warn!("Select out of range: {} of {}", index, self.entries.len());
            return Vec::new();
        };

        let text = codec::encode(entry);
        let use_https = entry.is_https();

        self.selected = Some(index);
        self.request_text = text.clone();
        self.use_https = use_https;
        self.edits = EditHistory::with_settings(
            text.clone(),
            self.config.undo_limit,
            self.config.edit_debounce(),
        );
        self.nav = NavigationHistory::new(NavEntry::new(text, use_https));
        self.response = None;
        if let Some(token) = self.active_token.take() {
            debug!("Selection changed; send #{} is now stale", token);
        }

        vec![
            self.show_request(),
            Effect::ClearResponse,
            self.nav_buttons(),
        ]
    }

    fn toggle_star(&mut self, index: usize) -> Vec<Effect> {
        let Some(entry) = self.entries.get_mut(index) else {
            warn!("Star toggle out of range: {}", index);
            return Vec::new();
        };
        let starred = entry.toggle_star();
        vec![
            Effect::UpdateStar { index, starred },
            Effect::UpdateVisibility(self.visibility()),
        ]
    }

    fn load_nav_entry(&mut self, entry: Option<NavEntry>) -> Vec<Effect> {
        let Some(entry) = entry else {
            return Vec::new();
        };
        self.edits.flush();
        self.edits.commit(entry.raw_text.clone());
        self.request_text = entry.raw_text;
        self.use_https = entry.use_https;
        vec![self.show_request(), self.nav_buttons()]
    }

    fn apply_transform(
        &mut self,
        target: TransformTarget,
        op: TransformOp,
        selection: Selection,
    ) -> Vec<Effect> {
        let source = match target {
            TransformTarget::Request => self.request_text.as_str(),
            TransformTarget::Response => match &self.response {
                Some(view) => view.raw_text.as_str(),
                None => return Vec::new(),
            },
        };

        let outcome = match transform::apply(source, selection.start, selection.end, op) {
            Ok(outcome) => outcome,
            Err(TransformError::EmptySelection) => {
                debug!("Ignoring {} on empty selection", op);
                return Vec::new();
            }
            Err(e) => {
                warn!("{} failed: {}", op, e);
                return vec![Effect::ShowTransformError(e.to_string())];
            }
        };

        match target {
            TransformTarget::Request => {
                self.edits
                    .begin_programmatic_change(self.request_text.clone());
                self.request_text = outcome.text;
                self.edits
                    .end_programmatic_change(self.request_text.clone());
                vec![self.show_request(), Effect::MoveCursor(outcome.cursor)]
            }
            TransformTarget::Response => {
                let Some(view) = self.response.as_mut() else {
                    return Vec::new();
                };
                view.raw_text = outcome.text;
                vec![
                    Effect::ShowResponse(view.clone()),
                    Effect::MoveCursor(outcome.cursor),
                ]
            }
        }
    }

    fn send(&mut self) -> Vec<Effect> {
        let raw = self.request_text.trim().to_string();
        self.nav.push(NavEntry::new(raw.clone(), self.use_https));
        let mut effects = vec![self.nav_buttons()];

        match codec::decode_with(&raw, self.config.duplicate_header_policy) {
            Ok(request) => {
                self.last_token += 1;
                let token = self.last_token;
                if let Some(previous) = self.active_token.replace(token) {
                    debug!("Send #{} supersedes #{}", token, previous);
                }
                info!("Issuing send #{}: {} {}", token, request.method, request.path);
                effects.push(Effect::ShowSending);
                effects.push(Effect::IssueRequest(PendingSend {
                    token,
                    request,
                    scheme: Scheme::from_use_https(self.use_https),
                }));
            }
            Err(e) => {
                warn!("Not sending: {}", e);
                self.active_token = None;
                let view = ResponseView::from_error(&e);
                self.response = Some(view.clone());
                effects.push(Effect::ShowResponse(view));
            }
        }

        effects
    }

    fn show_request(&self) -> Effect {
        Effect::ShowRequest {
            text: self.request_text.clone(),
            use_https: self.use_https,
        }
    }

    fn nav_buttons(&self) -> Effect {
        Effect::UpdateNavButtons {
            back: self.nav.can_go_back(),
            forward: self.nav.can_go_forward(),
        }
    }
}
