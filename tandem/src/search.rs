//! Lexical match engine (per-line substring scan with density ranking)
//!
//! Retrieval is a plain case-insensitive substring scan over the lines of one
//! document side; no regex is ever built from user input. Each hit line
//! becomes a context window (the line plus up to one neighbor on each side,
//! clipped at document edges); windows are deduplicated by their exact text
//! and ranked by occurrence density within the hit line. Context lines never
//! contribute to the score. Corpus aggregation keeps a document when either
//! scanned side has a hit and orders documents by total candidate count.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use tokio_util::sync::CancellationToken;

use crate::interface::{MatchCandidate, Pane, SearchResult, SearchScope, ViewerError};
use crate::models::DocumentPair;

/// Lines of context included before and after a hit line.
const CONTEXT_LINES: usize = 1;

/// One document line paired with its case-folded chars. Computed once per
/// record (see `DocumentPair::folded_lines`) and reused across searches.
#[derive(Debug, Clone)]
pub(crate) struct FoldedLine {
    pub(crate) raw: String,
    pub(crate) folded: Vec<char>,
}

/// Case-fold a string into a char vector for offset-stable comparison.
/// Per-char folding keeps a 1:1 mapping to the input chars, so positions
/// computed on the folded text index the original directly.
pub(crate) fn fold_chars(text: &str) -> Vec<char> {
    text.chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .collect()
}

/// Split a text into lines (empty lines preserved as entries) and fold each.
pub(crate) fn fold_lines(text: &str) -> Vec<FoldedLine> {
    text.split('\n')
        .map(|line| FoldedLine {
            raw: line.to_string(),
            folded: fold_chars(line),
        })
        .collect()
}

/// Non-overlapping occurrence positions of `needle` in `haystack`.
/// The scan resumes after each hit, so "aa" occurs twice in "aaaa".
pub(crate) fn find_occurrences(haystack: &[char], needle: &[char]) -> Vec<usize> {
    let mut positions = Vec::new();
    if needle.is_empty() || haystack.len() < needle.len() {
        return positions;
    }
    let mut i = 0;
    while i + needle.len() <= haystack.len() {
        if haystack[i..i + needle.len()] == *needle {
            positions.push(i);
            i += needle.len();
        } else {
            i += 1;
        }
    }
    positions
}

/// Scan one document side for `query`, producing ranked context windows.
///
/// Empty `text` or empty `query` yields no candidates; there is no
/// universal-match behavior. Identical windows (adjacent hits on a short
/// document) collapse to the first hit. The sort is stable, so equal scores
/// keep line order.
pub fn find_matches(text: &str, query: &str) -> Vec<MatchCandidate> {
    if text.is_empty() || query.is_empty() {
        return Vec::new();
    }
    find_matches_in_lines(&fold_lines(text), query)
}

/// The scan itself, over a pre-folded line list (cached per document side).
pub(crate) fn find_matches_in_lines(lines: &[FoldedLine], query: &str) -> Vec<MatchCandidate> {
    if query.is_empty() {
        return Vec::new();
    }

    let query_folded = fold_chars(query);

    let mut candidates: Vec<MatchCandidate> = Vec::new();
    let mut seen_windows: HashSet<String> = HashSet::new();

    for (i, line) in lines.iter().enumerate() {
        let occurrences = find_occurrences(&line.folded, &query_folded);
        if occurrences.is_empty() {
            continue;
        }

        let window_start = i.saturating_sub(CONTEXT_LINES);
        let window_end = (i + CONTEXT_LINES + 1).min(lines.len());
        let window = lines[window_start..window_end]
            .iter()
            .map(|l| l.raw.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        if !seen_windows.insert(window.clone()) {
            continue;
        }

        // A hit implies a non-empty line, so the denominator is never zero.
        let score = occurrences.len() as f64 / line.folded.len() as f64;
        candidates.push(MatchCandidate {
            text: window,
            score,
            line_number: (i + 1) as u64,
        });
    }

    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
    candidates
}

/// Scan one document under the given scope; None when neither side hits.
fn scan_document(document: &DocumentPair, query: &str, scope: SearchScope) -> Option<SearchResult> {
    let original_matches = if scope.includes_original() {
        find_matches_in_lines(document.folded_lines(Pane::Original), query)
    } else {
        Vec::new()
    };
    let translated_matches = if scope.includes_translated() {
        find_matches_in_lines(document.folded_lines(Pane::Translated), query)
    } else {
        Vec::new()
    };

    if original_matches.is_empty() && translated_matches.is_empty() {
        return None;
    }

    Some(SearchResult {
        document_id: document.id.clone(),
        filename: document.filename.clone(),
        original_language: document.original_language.clone(),
        original_matches,
        translated_matches,
    })
}

/// Order results by total candidate count, descending. The sort is stable,
/// so ties keep corpus input order.
fn sort_results(results: &mut [SearchResult]) {
    results.sort_by(|a, b| b.total_matches().cmp(&a.total_matches()));
}

/// Run the match engine over a corpus snapshot, one result per document
/// with at least one hit on a scanned side.
pub fn search_corpus(
    documents: &[Arc<DocumentPair>],
    query: &str,
    scope: SearchScope,
) -> Vec<SearchResult> {
    if query.is_empty() {
        return Vec::new();
    }
    let mut results: Vec<SearchResult> = documents
        .iter()
        .filter_map(|doc| scan_document(doc, query, scope))
        .collect();
    sort_results(&mut results);
    results
}

/// Corpus scan with per-document cancellation checks, fanned out across the
/// rayon pool. `par_iter` on a slice is indexed, so collecting preserves
/// corpus order before the final count sort.
pub(crate) fn search_corpus_interruptible(
    documents: &[Arc<DocumentPair>],
    query: &str,
    scope: SearchScope,
    token: &CancellationToken,
) -> Result<Vec<SearchResult>, ViewerError> {
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let started = Instant::now();

    use rayon::prelude::*;
    let scanned: Vec<Option<SearchResult>> = documents
        .par_iter()
        .map(|doc| {
            if token.is_cancelled() {
                return Err(ViewerError::Cancelled);
            }
            Ok(scan_document(doc, query, scope))
        })
        .collect::<Result<Vec<_>, ViewerError>>()?;

    let mut results: Vec<SearchResult> = scanned.into_iter().flatten().collect();
    sort_results(&mut results);

    tracing::debug!(
        scanned = documents.len(),
        results = results.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "corpus search finished"
    );

    Ok(results)
}
