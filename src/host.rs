//! Host editor services
//!
//! The two host facilities the pipeline needs beyond the document snapshot
//! itself: a fresh diagnostics query and one-way command invocation.

use crate::document::Diagnostic;

/// Command that opens the host's API-key entry flow.
pub const SET_API_KEY_COMMAND: &str = "sweep.setApiKey";

pub trait Host: Send + Sync {
    /// Current diagnostics for a document. Queried fresh at assembly time
    /// so the request reflects the latest analysis pass.
    fn diagnostics(&self, uri: &str) -> Vec<Diagnostic>;

    /// Fire-and-forget command invocation. The caller never waits for or
    /// observes the outcome.
    fn execute_command(&self, command: &str);
}
