//! Commands sent to a [`PanelSession`](super::PanelSession) and the render
//! effects it returns.

use super::send::PendingSend;
use crate::filter::{Category, FilterOutcome};
use crate::formatter::ResponseView;
use crate::transform::TransformOp;

/// Which buffer a transform applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformTarget {
    /// The editable request text. Transforms here are undoable.
    Request,
    /// The response text. Not tracked by undo.
    Response,
}

/// A byte range inside a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// A user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Select(usize),
    ToggleStar(usize),
    /// The request editor now holds this text.
    Edit(String),
    Undo,
    Redo,
    SetUseHttps(bool),
    NavigateBack,
    NavigateForward,
    SetSearch(String),
    SetUseRegex(bool),
    SetCategory(Category),
    ApplyTransform {
        target: TransformTarget,
        op: TransformOp,
        selection: Selection,
    },
    SendRequest,
}

/// Something the presentation layer should render or perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Replace the request editor contents and the scheme toggle.
    ShowRequest { text: String, use_https: bool },
    ClearResponse,
    /// A send was issued; show a placeholder until it completes.
    ShowSending,
    UpdateVisibility(FilterOutcome),
    UpdateStar { index: usize, starred: bool },
    UpdateNavButtons { back: bool, forward: bool },
    /// Place the caret in the transformed buffer.
    MoveCursor(usize),
    ShowTransformError(String),
    ShowResponse(ResponseView),
    /// Execute this send and hand the outcome back to the session.
    IssueRequest(PendingSend),
}
