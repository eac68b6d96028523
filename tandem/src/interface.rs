//! Tandem viewer boundary types
//!
//! This file defines the public interface consumed by the presentation
//! layer. It acts as the source of truth for shared types.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::DocumentPair;

// ═══════════════════════════════════════════════════════════════════════════════
// ENUMS
// ═══════════════════════════════════════════════════════════════════════════════

/// Which side(s) of a document pair a search operates over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchScope {
    Both,
    OriginalOnly,
    TranslatedOnly,
}

impl SearchScope {
    /// Whether the original-language side is scanned under this scope
    pub fn includes_original(self) -> bool {
        matches!(self, SearchScope::Both | SearchScope::OriginalOnly)
    }

    /// Whether the translated side is scanned under this scope
    pub fn includes_translated(self) -> bool {
        matches!(self, SearchScope::Both | SearchScope::TranslatedOnly)
    }
}

/// One side of the split-pane viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pane {
    Original,
    Translated,
}

impl Pane {
    /// The opposite pane
    pub fn other(self) -> Pane {
        match self {
            Pane::Original => Pane::Translated,
            Pane::Translated => Pane::Original,
        }
    }
}

/// The source that produced a highlight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HighlightKind {
    /// An occurrence of the query string currently in the search box
    Live,
    /// A match window carried into the viewer from an executed search
    Pinned,
}

// ═══════════════════════════════════════════════════════════════════════════════
// RECORDS (Structs)
// ═══════════════════════════════════════════════════════════════════════════════

/// A highlight range `[start, end)` in char offsets for search matches.
///
/// Spans from different sources may overlap; both are kept and both are
/// rendered (nested marks). Offsets are char offsets into the rendered text,
/// never bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightSpan {
    pub start: u64,
    pub end: u64,
    pub kind: HighlightKind,
}

/// One piece of a text sliced by its highlight spans.
///
/// Concatenating the `text` of every segment reconstructs the input exactly;
/// regions not covered by any span come out as segments with no highlight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSegment {
    pub text: String,
    pub highlight: Option<HighlightKind>,
}

/// One located occurrence of a query substring with its context window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCandidate {
    /// Context window: the hit line plus up to one line before and after,
    /// clipped at document edges, joined with newlines
    pub text: String,
    /// Occurrences of the query in the hit line divided by the hit line's
    /// char length; context lines never contribute
    pub score: f64,
    /// 1-indexed hit line; for a deduplicated window, the first hit's line
    pub line_number: u64,
}

/// Search result for one document against one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub document_id: String,
    pub filename: String,
    pub original_language: String,
    /// Candidates from the original text, descending by score
    pub original_matches: Vec<MatchCandidate>,
    /// Candidates from the translated text, descending by score
    pub translated_matches: Vec<MatchCandidate>,
}

impl SearchResult {
    /// Total candidate count across both sides; the corpus-level sort key
    pub fn total_matches(&self) -> usize {
        self.original_matches.len() + self.translated_matches.len()
    }
}

/// Lightweight document metadata for list display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub id: String,
    pub filename: String,
    /// Language code as reported by the detection service
    pub original_language: String,
    /// Human-readable name for `original_language`
    pub language_display_name: String,
    pub ingested_at_unix: i64,
}

/// Error type for Tandem core operations
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("Document not found: {0}")]
    DocumentNotFound(String),
    #[error("Operation cancelled")]
    Cancelled,
}

// ═══════════════════════════════════════════════════════════════════════════════
// SERVICE INTERFACE
// ═══════════════════════════════════════════════════════════════════════════════

/// The primary interface for accessing the session corpus.
/// This matches the functionality exposed by the `DocumentStore` object.
#[async_trait::async_trait]
pub trait DocumentStoreApi: Send + Sync {
    // ─────────────────────────────────────────────────────────────────────────────
    // Read Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Search the corpus. An empty query returns no results.
    async fn search(
        &self,
        query: String,
        scope: SearchScope,
    ) -> Result<Vec<SearchResult>, ViewerError>;

    /// Fetch a full document pair for the split-pane viewer
    fn document(&self, id: &str) -> Option<Arc<DocumentPair>>;

    /// List metadata for every document, in corpus order
    fn list_documents(&self) -> Vec<DocumentMetadata>;

    // ─────────────────────────────────────────────────────────────────────────────
    // Write Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Add a processed document. A document with the same id is replaced
    /// wholesale (a re-translation), keeping its corpus position.
    fn add_document(&self, document: DocumentPair);

    /// Remove a document by id
    fn remove_document(&self, id: &str) -> Result<(), ViewerError>;

    /// Drop every document in the session
    fn clear(&self);
}
