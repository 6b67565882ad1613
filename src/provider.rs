//! Inline-edit completion provider
//!
//! The entry point the editor host calls on every completion trigger. Each
//! invocation runs the same straight-line pipeline: settings gate, API-key
//! check, change detection, context assembly, one cancellable network call,
//! and translation of the response into a replace-range edit.
//!
//! Invocations are independent and may overlap during rapid typing; the
//! host's cancellation token is how a stale invocation learns to stand
//! down. The token is polled before dispatch and again after the response
//! arrives, and an invocation never produces an edit once cancelled. No
//! error escapes `provide`: a failed completion is just no completion.

use crate::api::{ApiClient, AutocompleteRequest, RecentBuffer, RecentChange};
use crate::document::{Document, InlineEdit, Position, Range};
use crate::host::{Host, SET_API_KEY_COMMAND};
use crate::settings::{self, Settings};
use crate::throttle::ApiKeyPromptThrottle;
use crate::tracker::DocumentTracker;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub struct InlineEditProvider {
    tracker: Arc<dyn DocumentTracker>,
    api: Arc<dyn ApiClient>,
    host: Arc<dyn Host>,
    settings: Arc<dyn Settings>,
    throttle: ApiKeyPromptThrottle,
}

impl InlineEditProvider {
    pub fn new(
        tracker: Arc<dyn DocumentTracker>,
        api: Arc<dyn ApiClient>,
        host: Arc<dyn Host>,
        settings: Arc<dyn Settings>,
    ) -> Self {
        Self::with_throttle(tracker, api, host, settings, ApiKeyPromptThrottle::new())
    }

    /// Provider with an injected prompt throttle, for tests.
    pub fn with_throttle(
        tracker: Arc<dyn DocumentTracker>,
        api: Arc<dyn ApiClient>,
        host: Arc<dyn Host>,
        settings: Arc<dyn Settings>,
        throttle: ApiKeyPromptThrottle,
    ) -> Self {
        Self {
            tracker,
            api,
            host,
            settings,
            throttle,
        }
    }

    /// Produce zero or one edit suggestion for the document at `position`.
    ///
    /// `document` must be the host's freshest snapshot at call time; the
    /// response offsets are anchored against it. Returns `None` on every
    /// gate, short-circuit, cancellation, and failure path.
    pub async fn provide(
        &self,
        document: &Document,
        position: Position,
        token: &CancellationToken,
    ) -> Option<InlineEdit> {
        if !settings::is_enabled(&*self.settings) {
            return None;
        }

        // Credential check before any context work; the feature can't
        // function without a key, so don't touch the tracker.
        if self.api.api_key().is_none() {
            self.prompt_for_api_key();
            return None;
        }

        let current_content = document.text();
        // An untracked document is its own baseline: no recorded history
        // means no diff to complete against yet.
        let original_content = self
            .tracker
            .get_original_content(document.uri())
            .unwrap_or_else(|| current_content.to_string());

        if current_content == original_content {
            return None;
        }

        if token.is_cancelled() {
            return None;
        }

        let request = self.build_request(document, position, original_content);
        let result = match self.api.get_autocomplete(&request).await {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!(uri = %document.uri(), error = %err, "autocomplete failed");
                return None;
            }
        };

        // The user may have kept typing during the round trip. A cancelled
        // invocation must never surface an edit.
        if token.is_cancelled() {
            return None;
        }

        let result = result?;
        if result.completion.is_empty() {
            return None;
        }

        let start = document.position_at(result.start_index);
        let end = document.position_at(result.end_index);

        Some(InlineEdit {
            range: Range::new(start, end),
            text: result.completion,
            is_full_edit: true,
        })
    }

    fn prompt_for_api_key(&self) {
        if self.throttle.should_prompt() {
            self.host.execute_command(SET_API_KEY_COMMAND);
        }
    }

    /// Assemble the context payload for one request.
    ///
    /// The buffer list is clamped to `sweep.maxContextFiles` even if the
    /// tracker over-returns; diff history passes through unbounded (the
    /// tracker owns that budget); user actions are scoped to the current
    /// file; diagnostics are queried fresh from the host.
    fn build_request(
        &self,
        document: &Document,
        position: Position,
        original_content: String,
    ) -> AutocompleteRequest {
        let max_context_files = settings::max_context_files(&*self.settings);

        let mut files = self
            .tracker
            .get_recent_context_files(document.uri(), max_context_files);
        files.truncate(max_context_files);
        let recent_buffers = files
            .into_iter()
            .map(|file| RecentBuffer {
                path: file.filepath,
                content: file.content,
                mtime: file.mtime,
            })
            .collect();

        let recent_changes = self
            .tracker
            .get_edit_diff_history()
            .into_iter()
            .map(|record| RecentChange {
                path: record.filepath,
                diff: record.diff,
            })
            .collect();

        let user_actions = self.tracker.get_user_actions(document.file_name());
        let diagnostics = self.host.diagnostics(document.uri());

        AutocompleteRequest {
            uri: document.uri().to_string(),
            position,
            original_content,
            recent_buffers,
            recent_changes,
            diagnostics,
            user_actions,
        }
    }
}
