//! Autocomplete API client
//!
//! BYOK: the user supplies a Sweep API key, read from the `SWEEP_API_KEY`
//! environment variable or the system keychain. The HTTP client posts the
//! assembled request as JSON with bearer auth and maps the response back
//! into character-offset form.

use crate::document::{Diagnostic, Position};
use crate::tracker::UserAction;
use anyhow::{bail, Context};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};

const AUTOCOMPLETE_URL: &str = "https://api.sweep.dev/v1/autocomplete";

const KEYRING_SERVICE: &str = "sweep";
const KEYRING_USERNAME: &str = "api_key";

static KEYRING_ERROR_WARNED: AtomicBool = AtomicBool::new(false);

/// A recently touched buffer as sent on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentBuffer {
    pub path: String,
    pub content: String,
    pub mtime: DateTime<Utc>,
}

/// One recorded edit diff as sent on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentChange {
    pub path: String,
    pub diff: String,
}

/// The bounded context payload for one completion call.
///
/// Built per invocation from the document snapshot and tracker state,
/// consumed by dispatch, then discarded.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutocompleteRequest {
    pub uri: String,
    pub position: Position,
    pub original_content: String,
    pub recent_buffers: Vec<RecentBuffer>,
    pub recent_changes: Vec<RecentChange>,
    pub diagnostics: Vec<Diagnostic>,
    pub user_actions: Vec<UserAction>,
}

/// A completion returned by the service.
///
/// `start_index` and `end_index` are character offsets into the current
/// document text, `0 <= start <= end <= len`. They are meaningful only
/// until translated into positions, which happens exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutocompleteResult {
    pub completion: String,
    pub start_index: usize,
    pub end_index: usize,
}

/// The completion service as the provider sees it.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// The configured API key, if any. Checked before any context work.
    fn api_key(&self) -> Option<String>;

    /// Request a completion. `Ok(None)` means the service had nothing to
    /// offer; `Err` is a transport or protocol failure.
    async fn get_autocomplete(
        &self,
        request: &AutocompleteRequest,
    ) -> anyhow::Result<Option<AutocompleteResult>>;
}

/// HTTP implementation against the Sweep autocomplete endpoint.
pub struct HttpApiClient {
    client: reqwest::Client,
    url: String,
}

impl HttpApiClient {
    pub fn new() -> Self {
        Self::with_url(AUTOCOMPLETE_URL)
    }

    /// Client against an explicit endpoint, for tests and self-hosting.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

impl Default for HttpApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    fn api_key(&self) -> Option<String> {
        configured_api_key()
    }

    async fn get_autocomplete(
        &self,
        request: &AutocompleteRequest,
    ) -> anyhow::Result<Option<AutocompleteResult>> {
        let api_key = self
            .api_key()
            .context("SWEEP_API_KEY not set and no key in keychain")?;

        let response = self
            .client
            .post(&self.url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .context("autocomplete request failed")?;

        if response.status() == reqwest::StatusCode::NO_CONTENT {
            return Ok(None);
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            bail!("autocomplete API error {}: {}", status, text);
        }

        let result: AutocompleteResult = response
            .json()
            .await
            .context("failed to parse autocomplete response")?;
        Ok(Some(result))
    }
}

/// Resolve the API key: environment variable first, then system keychain.
///
/// Keychain failures other than "no entry" degrade to `None` with a single
/// warning per process, the same way a locked keychain shouldn't produce a
/// warning per keystroke.
pub fn configured_api_key() -> Option<String> {
    if let Ok(key) = std::env::var("SWEEP_API_KEY") {
        if !key.is_empty() {
            return Some(key);
        }
    }
    match read_keyring_key() {
        Ok(key) => key,
        Err(err) => {
            warn_keychain_error_once(&err);
            None
        }
    }
}

fn read_keyring_key() -> Result<Option<String>, keyring::Error> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, KEYRING_USERNAME)?;
    match entry.get_password() {
        Ok(key) => Ok(Some(key)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(err) => Err(err),
    }
}

/// Store the API key in the system keychain.
pub fn store_api_key(key: &str) -> anyhow::Result<()> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, KEYRING_USERNAME)
        .context("failed to open keychain entry")?;
    entry
        .set_password(key)
        .context("failed to store API key in system keychain")?;
    Ok(())
}

fn warn_keychain_error_once(err: &keyring::Error) {
    if KEYRING_ERROR_WARNED.swap(true, Ordering::Relaxed) {
        return;
    }
    tracing::warn!(
        error = %err,
        "couldn't read API key from system keychain; set SWEEP_API_KEY as a workaround"
    );
}
