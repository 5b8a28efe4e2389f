//! Display formatting helpers for feed rendering.
//!
//! Pure functions: excerpt derivation and search-term highlighting.
//! Date display formatting lives in [`crate::datetime`].

use serde::Serialize;

/// Default maximum excerpt length in characters.
pub const EXCERPT_MAX: usize = 160;

/// Ellipsis character appended to truncated excerpts.
pub const ELLIPSIS: char = '…';

/// Derive an excerpt from `text`, truncated to at most `max` characters.
///
/// The input is trimmed first. If it is longer than `max` characters, it is
/// cut at the `max`-th character (never inside a code point), trailing
/// whitespace is removed, and a single ellipsis is appended.
pub fn excerpt(text: &str, max: usize) -> String {
    let t = text.trim();
    if t.chars().count() <= max {
        return t.to_string();
    }

    let cut: String = t.chars().take(max).collect();
    let mut out = cut.trim_end().to_string();
    out.push(ELLIPSIS);
    out
}

/// A run of text, flagged when it matched the search term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    /// The text of this run.
    pub text: String,
    /// Whether this run matched the search term.
    pub highlighted: bool,
}

impl Segment {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            highlighted: false,
        }
    }

    fn matched(text: &str) -> Self {
        Self {
            text: text.to_string(),
            highlighted: true,
        }
    }
}

/// Split `text` into segments, flagging case-insensitive occurrences of
/// `query` as a literal substring.
///
/// Metacharacters in `query` have no special meaning. An empty or
/// whitespace-only query returns the whole text as a single plain segment.
/// Matches are non-overlapping, scanned left to right.
pub fn highlight(text: &str, query: &str) -> Vec<Segment> {
    let query = query.trim();
    if query.is_empty() {
        return vec![Segment::plain(text)];
    }

    let ranges = find_matches(text, query);
    if ranges.is_empty() {
        return vec![Segment::plain(text)];
    }

    let mut segments = Vec::with_capacity(ranges.len() * 2 + 1);
    let mut cursor = 0;
    for (start, end) in ranges {
        if start > cursor {
            segments.push(Segment::plain(&text[cursor..start]));
        }
        segments.push(Segment::matched(&text[start..end]));
        cursor = end;
    }
    if cursor < text.len() {
        segments.push(Segment::plain(&text[cursor..]));
    }

    segments
}

/// Byte ranges of non-overlapping case-insensitive matches of `query` in `text`.
fn find_matches(text: &str, query: &str) -> Vec<(usize, usize)> {
    let q_chars: Vec<char> = query.chars().collect();
    let mut matches = Vec::new();

    let mut i = 0;
    while i < text.len() {
        match match_at(text, i, &q_chars) {
            Some(len) => {
                matches.push((i, i + len));
                i += len;
            }
            None => {
                // advance one char
                i += text[i..]
                    .chars()
                    .next()
                    .map(char::len_utf8)
                    .unwrap_or(text.len() - i);
            }
        }
    }

    matches
}

/// Byte length of a match of `query` starting at byte `start`, if any.
fn match_at(text: &str, start: usize, query: &[char]) -> Option<usize> {
    let mut chars = text[start..].char_indices();
    let mut end = 0;
    for &qc in query {
        let (off, c) = chars.next()?;
        if !chars_eq_ci(c, qc) {
            return None;
        }
        end = off + c.len_utf8();
    }
    Some(end)
}

fn chars_eq_ci(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined(segments: &[Segment]) -> String {
        segments.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_excerpt_short_text_unchanged() {
        assert_eq!(excerpt("Hello World", 160), "Hello World");
    }

    #[test]
    fn test_excerpt_trims_input() {
        assert_eq!(excerpt("  Hello  ", 160), "Hello");
    }

    #[test]
    fn test_excerpt_truncates_with_ellipsis() {
        let text = "a".repeat(200);
        let result = excerpt(&text, 160);
        assert_eq!(result.chars().count(), 161);
        assert!(result.ends_with(ELLIPSIS));
    }

    #[test]
    fn test_excerpt_is_prefix_up_to_truncation() {
        let text = "The quick brown fox jumps over the lazy dog";
        let result = excerpt(text, 10);
        let body = result.trim_end_matches(ELLIPSIS);
        assert!(text.starts_with(body));
    }

    #[test]
    fn test_excerpt_length_bound() {
        for len in [0, 1, 159, 160, 161, 500] {
            let text = "x".repeat(len);
            let result = excerpt(&text, 160);
            assert!(result.chars().count() <= 161, "len {len} broke the bound");
        }
    }

    #[test]
    fn test_excerpt_trims_trailing_whitespace_before_ellipsis() {
        let text = format!("{} {}", "a".repeat(159), "b".repeat(50));
        let result = excerpt(&text, 160);
        // cut lands just after the space; the space must not precede the ellipsis
        assert!(!result.contains(" …"));
        assert!(result.ends_with(ELLIPSIS));
    }

    #[test]
    fn test_excerpt_exact_max_not_truncated() {
        let text = "a".repeat(160);
        assert_eq!(excerpt(&text, 160), text);
    }

    #[test]
    fn test_excerpt_multibyte_safe() {
        let text = "こんにちは世界".repeat(40);
        let result = excerpt(&text, 160);
        assert_eq!(result.chars().count(), 161);
        // must be a valid string; slicing inside a code point would have panicked
        assert!(result.ends_with(ELLIPSIS));
    }

    #[test]
    fn test_highlight_empty_query_returns_text_unchanged() {
        let segments = highlight("Hello World", "");
        assert_eq!(segments, vec![Segment::plain("Hello World")]);
    }

    #[test]
    fn test_highlight_whitespace_query_returns_text_unchanged() {
        let segments = highlight("Hello World", "   ");
        assert_eq!(segments, vec![Segment::plain("Hello World")]);
    }

    #[test]
    fn test_highlight_case_insensitive_matches() {
        let segments = highlight("abcABC", "abc");
        assert_eq!(
            segments,
            vec![Segment::matched("abc"), Segment::matched("ABC")]
        );
    }

    #[test]
    fn test_highlight_literal_dot() {
        // '.' is a literal character, not "any character"
        let segments = highlight("a.b", ".");
        assert_eq!(
            segments,
            vec![
                Segment::plain("a"),
                Segment::matched("."),
                Segment::plain("b"),
            ]
        );
    }

    #[test]
    fn test_highlight_no_match_single_plain_segment() {
        let segments = highlight("Hello World", "xyz");
        assert_eq!(segments, vec![Segment::plain("Hello World")]);
    }

    #[test]
    fn test_highlight_preserves_original_case_of_match() {
        let segments = highlight("Rust is RUSTY", "rust");
        assert_eq!(
            segments,
            vec![
                Segment::matched("Rust"),
                Segment::plain(" is "),
                Segment::matched("RUST"),
                Segment::plain("Y"),
            ]
        );
    }

    #[test]
    fn test_highlight_round_trips_text() {
        let text = "The quick brown fox, the lazy dog.";
        for query in ["the", "o", "fox", "", "?", "zzz"] {
            assert_eq!(joined(&highlight(text, query)), text, "query {query:?}");
        }
    }

    #[test]
    fn test_highlight_regex_metacharacters_are_literal() {
        for query in ["(", ")", "[", "]", "*", "+", "?", "$", "^", "\\", "|"] {
            let text = format!("x{query}y");
            let segments = highlight(&text, query);
            assert_eq!(
                segments,
                vec![
                    Segment::plain("x"),
                    Segment::matched(query),
                    Segment::plain("y"),
                ],
                "query {query:?}"
            );
        }
    }

    #[test]
    fn test_highlight_adjacent_matches() {
        let segments = highlight("aaaa", "aa");
        assert_eq!(
            segments,
            vec![Segment::matched("aa"), Segment::matched("aa")]
        );
    }

    #[test]
    fn test_highlight_multibyte_text() {
        let segments = highlight("こんにちは、こんばんは", "こん");
        assert_eq!(joined(&segments), "こんにちは、こんばんは");
        assert_eq!(
            segments.iter().filter(|s| s.highlighted).count(),
            2,
            "both occurrences flagged"
        );
    }
}
