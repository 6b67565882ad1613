//! Document snapshot model
//!
//! A `Document` is an immutable snapshot of an open editor buffer: its URI
//! and full text at the moment the host invoked us. Completion responses
//! speak in character offsets; the host applies edits in line/character
//! positions, so translation lives here.

use serde::{Deserialize, Serialize};

/// A zero-based line/character position in a document.
///
/// `character` counts Unicode scalar values from the start of the line,
/// matching the character offsets used on the autocomplete wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub character: usize,
}

impl Position {
    pub fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }
}

/// A half-open span between two positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
    Information,
    Hint,
}

/// A diagnostic reported by the host's analysis pass for a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub range: Range,
    pub severity: DiagnosticSeverity,
    pub message: String,
}

/// An edit suggestion produced by the completion pipeline.
///
/// `is_full_edit` tells the host to apply this as a replace-range operation
/// over `range` rather than a plain insertion at the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineEdit {
    pub range: Range,
    pub text: String,
    pub is_full_edit: bool,
}

/// Immutable snapshot of an open document.
#[derive(Debug, Clone)]
pub struct Document {
    uri: String,
    text: String,
}

impl Document {
    pub fn new(uri: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            text: text.into(),
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the document in characters (Unicode scalar values).
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Filesystem-style name for this document: the URI with any scheme
    /// prefix stripped. Used to scope user-action lookups to one file.
    pub fn file_name(&self) -> &str {
        match self.uri.split_once("://") {
            Some((_, path)) => path,
            None => &self.uri,
        }
    }

    /// Translate a character offset into a line/character position.
    ///
    /// Offsets past the end of the text clamp to the final position, the
    /// same behavior editors expose for `positionAt`.
    pub fn position_at(&self, offset: usize) -> Position {
        let mut line = 0;
        let mut character = 0;
        for (i, ch) in self.text.chars().enumerate() {
            if i == offset {
                break;
            }
            if ch == '\n' {
                line += 1;
                character = 0;
            } else {
                character += 1;
            }
        }
        Position { line, character }
    }
}
