use std::path::PathBuf;

use crate::state::{AppState, Form};
use crate::views::html::render_page;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChange {
    DatasetReplaced,
    LoadFailed,
    SelectionChanged,
    StatusChanged(Form)
}

/// Receives every state change after it has been applied.
pub trait Subscriber: Send {
    fn notify(&mut self, change: &StateChange, state: &AppState);
}

/// Re-renders the whole page to a file on every change.
pub struct PageWriter {
    path: PathBuf
}

impl PageWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        PageWriter { path: path.into() }
    }
}

impl Subscriber for PageWriter {
    fn notify(&mut self, change: &StateChange, state: &AppState) {
        if let Err(err) = std::fs::write(&self.path, render_page(state)) {
            tracing::error!(?change, "Failed to write page to {}: {}", self.path.display(), err);
        }
    }
}
