//! sweep-inline library crate
//!
//! The completion pipeline behind Sweep's inline edits: decide whether a
//! request should go out, assemble a bounded context payload from recent
//! edit history, make one cancellable call to the completion service, and
//! turn the response into a document-anchored replace-range edit.
//!
//! The editor host owns the document model, the change tracker, and the
//! trigger cadence; it hands each invocation a document snapshot, a cursor
//! position, and a cancellation token, and gets back zero or one
//! [`document::InlineEdit`].

pub mod api;
pub mod document;
pub mod host;
pub mod provider;
pub mod settings;
pub mod throttle;
pub mod tracker;

pub use api::{ApiClient, AutocompleteRequest, AutocompleteResult, HttpApiClient};
pub use document::{Diagnostic, Document, InlineEdit, Position, Range};
pub use host::Host;
pub use provider::InlineEditProvider;
pub use settings::{FileSettings, Settings, DEFAULT_MAX_CONTEXT_FILES};
pub use throttle::ApiKeyPromptThrottle;
pub use tracker::DocumentTracker;
