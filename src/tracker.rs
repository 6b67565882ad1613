//! Document tracker boundary
//!
//! The tracking subsystem records original document snapshots, recently
//! touched buffers, edit-diff history, and user actions. This crate only
//! consumes it; the trait here is that entire surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recently touched file as the tracker holds it. The tracker owns
/// relevance ordering and content truncation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedFile {
    pub filepath: String,
    pub content: String,
    pub mtime: DateTime<Utc>,
}

/// One recorded edit as a unified diff against the original snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffRecord {
    pub filepath: String,
    pub diff: String,
}

/// An opaque user-action record (save, undo, selection change, ...).
/// Passed through to the completion request unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAction {
    pub action: String,
    pub timestamp: DateTime<Utc>,
}

/// Read access to tracked edit history.
pub trait DocumentTracker: Send + Sync {
    /// Content of the document when tracking began, if this URI is tracked.
    fn get_original_content(&self, uri: &str) -> Option<String>;

    /// Up to `limit` recently touched files, most relevant first.
    fn get_recent_context_files(&self, uri: &str, limit: usize) -> Vec<TrackedFile>;

    /// Diff history across all tracked files. The tracker owns any size
    /// limiting here.
    fn get_edit_diff_history(&self) -> Vec<DiffRecord>;

    /// Recorded actions for a single file.
    fn get_user_actions(&self, file_name: &str) -> Vec<UserAction>;
}
