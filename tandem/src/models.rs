//! Core data models for Tandem
//!
//! A `DocumentPair` is created once the upstream pipeline (upload, OCR,
//! language detection, translation) has produced both text sides. It is never
//! mutated afterwards; a new translation replaces the whole record in the
//! store. Module isolation keeps the text sides private: no code outside this
//! module can touch them after construction, so the per-side folded-line
//! caches can never go stale.

use std::sync::OnceLock;

use crate::interface::{DocumentMetadata, Pane};
use crate::language;
use crate::search::{fold_lines, FoldedLine};

/// One processed document: original-language text plus its English
/// translation, immutable once both pipeline results are in.
///
/// The folded-line representation each side needs for scanning is computed
/// on first search and cached, so repeated queries over an unchanged corpus
/// skip the per-char case folding.
#[derive(Debug, Clone)]
pub struct DocumentPair {
    /// Opaque stable identifier, unique within a session
    pub id: String,
    /// Display name, not interpreted
    pub filename: String,
    /// Detected source-language code; display only, never affects matching
    pub original_language: String,
    pub ingested_at_unix: i64,
    original_text: String,
    translated_text: String,
    original_folded: OnceLock<Vec<FoldedLine>>,
    translated_folded: OnceLock<Vec<FoldedLine>>,
}

impl DocumentPair {
    pub fn new(
        id: String,
        filename: String,
        original_text: String,
        translated_text: String,
        original_language: String,
    ) -> Self {
        Self {
            id,
            filename,
            original_language,
            ingested_at_unix: chrono::Utc::now().timestamp(),
            original_text,
            translated_text,
            original_folded: OnceLock::new(),
            translated_folded: OnceLock::new(),
        }
    }

    /// Full original-language text, newline-delimited lines
    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    /// Full English text, same structure
    pub fn translated_text(&self) -> &str {
        &self.translated_text
    }

    /// The text rendered in the given viewer pane
    pub fn text_for(&self, pane: Pane) -> &str {
        match pane {
            Pane::Original => &self.original_text,
            Pane::Translated => &self.translated_text,
        }
    }

    /// Folded lines for one side, computed on first access and cached
    pub(crate) fn folded_lines(&self, pane: Pane) -> &[FoldedLine] {
        let (cache, text) = match pane {
            Pane::Original => (&self.original_folded, &self.original_text),
            Pane::Translated => (&self.translated_folded, &self.translated_text),
        };
        cache.get_or_init(|| fold_lines(text))
    }

    /// Convert to DocumentMetadata for list display
    pub fn to_metadata(&self) -> DocumentMetadata {
        DocumentMetadata {
            id: self.id.clone(),
            filename: self.filename.clone(),
            original_language: self.original_language.clone(),
            language_display_name: language::display_name(&self.original_language).to_string(),
            ingested_at_unix: self.ingested_at_unix,
        }
    }
}
