//! Directive scanner
//!
//! Locates `{% ... %}` spans in a document. A marker preceded by a backslash
//! is escaped: it never opens or closes a span and is left for the escape
//! pass. A span lies on a single line.

pub const OPEN_MARKER: &str = "{%";
pub const CLOSE_MARKER: &str = "%}";
pub const ESCAPE: char = '\\';

/// A located directive in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectiveSpan<'a> {
    /// Byte offset of the opening marker
    pub start: usize,
    /// Byte offset just past the closing marker
    pub end: usize,
    /// Text between the markers, trimmed
    pub inner: &'a str,
}

fn is_escaped(text: &str, at: usize) -> bool {
    text[..at].ends_with(ESCAPE)
}

/// Byte offset of the next unescaped `marker` at or after `from`
fn find_unescaped(text: &str, marker: &str, from: usize) -> Option<usize> {
    let mut pos = from;
    while let Some(rel) = text[pos..].find(marker) {
        let at = pos + rel;
        if !is_escaped(text, at) {
            return Some(at);
        }
        pos = at + marker.len();
    }
    None
}

/// All directive spans in document order
pub fn scan_directives(text: &str) -> Vec<DirectiveSpan<'_>> {
    let mut spans = Vec::new();
    let mut pos = 0;

    while let Some(open) = find_unescaped(text, OPEN_MARKER, pos) {
        let body_start = open + OPEN_MARKER.len();
        let line_end = text[body_start..]
            .find('\n')
            .map_or(text.len(), |rel| body_start + rel);

        // The closer must be on the same line with at least one character before it
        let close = find_unescaped(&text[..line_end], CLOSE_MARKER, body_start)
            .filter(|&close| close > body_start);
        let Some(close) = close else {
            pos = body_start;
            continue;
        };

        let end = close + CLOSE_MARKER.len();
        spans.push(DirectiveSpan {
            start: open,
            end,
            inner: text[body_start..close].trim(),
        });
        pos = end;
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn inners(text: &str) -> Vec<&str> {
        scan_directives(text).into_iter().map(|s| s.inner).collect()
    }

    #[test]
    fn test_no_markers() {
        assert!(scan_directives("plain *markdown* text\n").is_empty());
    }

    #[test]
    fn test_spans_in_order_with_offsets() {
        let text = "a {% define X hello %} b {%X%}";
        let spans = scan_directives(text);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].inner, "define X hello");
        assert_eq!(&text[spans[0].start..spans[0].end], "{% define X hello %}");
        assert_eq!(spans[1].inner, "X");
        assert_eq!(spans[1].end, text.len());
    }

    #[test]
    fn test_escaped_open_is_skipped() {
        assert!(scan_directives(r"\{% literally %}").is_empty());
        assert_eq!(inners(r"\{% literally %} {% X %}"), vec!["X"]);
    }

    #[test]
    fn test_escaped_close_is_not_a_terminator() {
        assert_eq!(inners(r"{% define A x\%}y %}"), vec![r"define A x\%}y"]);
        assert!(scan_directives(r"{% X \%}").is_empty());
    }

    #[test]
    fn test_directive_must_be_on_one_line() {
        assert!(scan_directives("{% X\n %}").is_empty());
        assert_eq!(inners("{% broken\n{% Y %}"), vec!["Y"]);
    }

    #[test]
    fn test_unterminated_open() {
        assert!(scan_directives("text {% X").is_empty());
    }

    #[test]
    fn test_empty_directive_is_still_a_span() {
        assert_eq!(inners("{%  %}"), vec![""]);
    }

    #[test]
    fn test_markers_do_not_overlap() {
        assert!(scan_directives("{%}").is_empty());
    }

    #[test]
    fn test_empty_body_is_literal() {
        assert!(scan_directives("100{%%} done").is_empty());
        assert_eq!(inners("{%%} {% X %}"), vec!["X"]);
    }
}
