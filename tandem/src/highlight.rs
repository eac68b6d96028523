//! Highlight span computation for the split-pane viewer
//!
//! Two sources feed the marks drawn over a pane: live occurrences of the
//! query currently in the search box, and pinned match windows carried over
//! from an executed search. Both are emitted as spans in char offsets;
//! overlapping spans are kept (nested marks), never merged. `segment_text`
//! performs the slicing step for renderers that want a flat list of
//! alternating plain/highlighted pieces.

use crate::interface::{HighlightKind, HighlightSpan, TextSegment};
use crate::search::{find_occurrences, fold_chars};

/// Compute the highlight spans for one pane's rendered text.
///
/// Live spans cover every non-overlapping case-insensitive occurrence of
/// `live_query` (none when the query is empty). Each pinned chunk contributes
/// at most one span at its first exact occurrence; chunks no longer present
/// verbatim (the text changed since the search ran) are silently skipped.
/// The result is sorted by start offset; the sort is stable, so at equal
/// start a live span precedes a pinned one.
pub fn compute_spans(
    text: &str,
    live_query: &str,
    pinned_chunks: &[String],
) -> Vec<HighlightSpan> {
    let mut spans: Vec<HighlightSpan> = Vec::new();

    if !live_query.is_empty() {
        let text_folded = fold_chars(text);
        let query_folded = fold_chars(live_query);
        for start in find_occurrences(&text_folded, &query_folded) {
            spans.push(HighlightSpan {
                start: start as u64,
                end: (start + query_folded.len()) as u64,
                kind: HighlightKind::Live,
            });
        }
    }

    for chunk in pinned_chunks {
        if chunk.is_empty() {
            continue;
        }
        if let Some(byte_pos) = text.find(chunk.as_str()) {
            let start = text[..byte_pos].chars().count();
            spans.push(HighlightSpan {
                start: start as u64,
                end: (start + chunk.chars().count()) as u64,
                kind: HighlightKind::Pinned,
            });
        }
    }

    spans.sort_by_key(|s| s.start);
    spans
}

/// Slice `text` by its spans into alternating plain and highlighted
/// segments covering the whole text without gaps.
///
/// Expects spans sorted by start offset (the `compute_spans` output order).
/// Every char is emitted exactly once: where spans overlap, the overlapped
/// region stays with the earlier span and the later span contributes only
/// the part reaching past it. Out-of-range offsets are clipped.
pub fn segment_text(text: &str, spans: &[HighlightSpan]) -> Vec<TextSegment> {
    let chars: Vec<char> = text.chars().collect();
    let mut segments: Vec<TextSegment> = Vec::new();
    let mut cursor = 0usize;

    for span in spans {
        let start = (span.start as usize).min(chars.len());
        let end = (span.end as usize).min(chars.len());
        if start > cursor {
            segments.push(TextSegment {
                text: chars[cursor..start].iter().collect(),
                highlight: None,
            });
            cursor = start;
        }
        if end > cursor {
            segments.push(TextSegment {
                text: chars[cursor..end].iter().collect(),
                highlight: Some(span.kind),
            });
            cursor = end;
        }
    }

    if cursor < chars.len() {
        segments.push(TextSegment {
            text: chars[cursor..].iter().collect(),
            highlight: None,
        });
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reconstruct(segments: &[TextSegment]) -> String {
        segments.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_live_span_per_occurrence() {
        let spans = compute_spans("cat and CAT and cat", "cat", &[]);
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].start, 0);
        assert_eq!(spans[1].start, 8);
        assert_eq!(spans[2].start, 16);
        assert!(spans.iter().all(|s| s.kind == HighlightKind::Live));
    }

    #[test]
    fn test_empty_live_query_emits_no_live_spans() {
        let spans = compute_spans("any text at all", "", &[]);
        assert!(spans.is_empty());
    }

    #[test]
    fn test_pinned_chunk_first_occurrence_only() {
        let spans = compute_spans("word here, word there", "", &["word".to_string()]);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].start, 0);
        assert_eq!(spans[0].end, 4);
        assert_eq!(spans[0].kind, HighlightKind::Pinned);
    }

    #[test]
    fn test_pinned_chunk_is_exact_match() {
        // Pinned lookup is exact, unlike the case-insensitive live query.
        let spans = compute_spans("Word here", "", &["word".to_string()]);
        assert!(spans.is_empty());
    }

    #[test]
    fn test_stale_pinned_chunk_skipped() {
        let spans = compute_spans(
            "current text",
            "text",
            &["window from an older revision".to_string()],
        );
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].kind, HighlightKind::Live);
    }

    #[test]
    fn test_overlapping_spans_both_retained() {
        // Live "quick brown" and pinned "brown fox" overlap on "brown".
        let spans = compute_spans(
            "the quick brown fox",
            "quick brown",
            &["brown fox".to_string()],
        );
        assert_eq!(spans.len(), 2);
        assert_eq!((spans[0].start, spans[0].end), (4, 15));
        assert_eq!(spans[0].kind, HighlightKind::Live);
        assert_eq!((spans[1].start, spans[1].end), (10, 19));
        assert_eq!(spans[1].kind, HighlightKind::Pinned);
    }

    #[test]
    fn test_equal_start_keeps_live_before_pinned() {
        let spans = compute_spans("shared prefix", "shared", &["shared prefix".to_string()]);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].kind, HighlightKind::Live);
        assert_eq!(spans[1].kind, HighlightKind::Pinned);
    }

    #[test]
    fn test_offsets_are_char_offsets() {
        let spans = compute_spans("žába skáče, žába", "žába", &[]);
        assert_eq!(spans.len(), 2);
        assert_eq!((spans[0].start, spans[0].end), (0, 4));
        assert_eq!((spans[1].start, spans[1].end), (12, 16));
    }

    #[test]
    fn test_segments_reconstruct_text() {
        let text = "the quick brown fox jumps";
        let spans = compute_spans(text, "quick brown", &["brown fox".to_string()]);
        let segments = segment_text(text, &spans);
        assert_eq!(reconstruct(&segments), text);
    }

    #[test]
    fn test_segments_without_spans_are_one_plain_piece() {
        let segments = segment_text("plain text", &[]);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].highlight, None);
        assert_eq!(segments[0].text, "plain text");
    }

    #[test]
    fn test_segments_for_empty_text() {
        assert!(segment_text("", &[]).is_empty());
    }

    #[test]
    fn test_overlap_region_stays_with_earlier_span() {
        let text = "abcdefgh";
        let spans = vec![
            HighlightSpan { start: 0, end: 5, kind: HighlightKind::Live },
            HighlightSpan { start: 3, end: 8, kind: HighlightKind::Pinned },
        ];
        let segments = segment_text(text, &spans);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, "abcde");
        assert_eq!(segments[0].highlight, Some(HighlightKind::Live));
        assert_eq!(segments[1].text, "fgh");
        assert_eq!(segments[1].highlight, Some(HighlightKind::Pinned));
        assert_eq!(reconstruct(&segments), text);
    }

    #[test]
    fn test_span_contained_in_earlier_span_adds_nothing() {
        let text = "abcdefgh";
        let spans = vec![
            HighlightSpan { start: 0, end: 8, kind: HighlightKind::Pinned },
            HighlightSpan { start: 2, end: 4, kind: HighlightKind::Live },
        ];
        let segments = segment_text(text, &spans);
        assert_eq!(segments.len(), 1);
        assert_eq!(reconstruct(&segments), text);
    }

    #[test]
    fn test_out_of_range_span_clipped() {
        let text = "short";
        let spans = vec![HighlightSpan { start: 2, end: 99, kind: HighlightKind::Live }];
        let segments = segment_text(text, &spans);
        assert_eq!(reconstruct(&segments), text);
        assert_eq!(segments[1].text, "ort");
    }
}
