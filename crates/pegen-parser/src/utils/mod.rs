//! Small text and span utilities shared by the lexer fixture and the parser
//! runtime.

use pegen_source::types::{SourceSpan, Span};

/// The size of a tab character in spaces, for indentation accounting.
pub const TAB_SIZE: usize = 8;

/// Text handling utilities and helpers.
pub mod text {
    /// Determines if a character can be the start of an identifier.
    ///
    /// ## Examples
    ///
    /// ```
    /// use pegen_parser::utils::text::is_id_start;
    ///
    /// assert!(is_id_start('a'));
    /// assert!(is_id_start('Z'));
    /// assert!(is_id_start('_'));
    /// assert!(!is_id_start('0'));
    /// assert!(!is_id_start('-'));
    /// ```
    #[inline]
    #[must_use]
    pub const fn is_id_start(c: char) -> bool { c == '_' || c.is_ascii_alphabetic() }

    /// Determines if a character can be part of an identifier (after the first).
    ///
    /// ## Examples
    ///
    /// ```
    /// use pegen_parser::utils::text::is_id_continue;
    ///
    /// assert!(is_id_continue('a'));
    /// assert!(is_id_continue('0'));
    /// assert!(!is_id_continue('-'));
    /// ```
    #[inline]
    #[must_use]
    pub const fn is_id_continue(c: char) -> bool { c == '_' || c.is_ascii_alphanumeric() }

    /// Computes line starts for a source text: the byte offset where each
    /// line begins, with the first entry always `0`.
    ///
    /// ## Examples
    ///
    /// ```
    /// use pegen_parser::utils::text::compute_line_starts;
    ///
    /// let content = "hello\nworld\n";
    /// let line_starts = compute_line_starts(content);
    /// assert_eq!(line_starts, vec![0, 6, 12]);
    /// ```
    #[must_use]
    pub fn compute_line_starts(content: &str) -> Vec<usize> {
        let mut line_starts = vec![0];

        for (i, c) in content.char_indices() {
            if c == '\n' {
                line_starts.push(i + 1);
            }
        }

        line_starts
    }

    /// Calculates the indentation width in columns starting at a byte
    /// position, counting tabs as `TAB_SIZE` columns.
    ///
    /// ## Examples
    ///
    /// ```
    /// use pegen_parser::utils::text::calculate_indentation;
    ///
    /// assert_eq!(calculate_indentation("    hello", 0), 4);
    /// assert_eq!(calculate_indentation("\thello", 0), 8);
    /// ```
    #[must_use]
    pub fn calculate_indentation(content: &str, start_pos: usize) -> usize {
        let mut count = 0;

        for byte in content.bytes().skip(start_pos) {
            match byte {
                b' ' => count += 1,
                b'\t' => count += super::TAB_SIZE,
                _ => break,
            }
        }

        count
    }
}

pub use text::{compute_line_starts, is_id_continue, is_id_start};

/// Combines a slice of spans into the span that encompasses all of them.
///
/// All spans must come from the same file. Returns `None` for an empty slice.
///
/// ## Examples
///
/// ```
/// use pegen_parser::utils::combine_spans;
/// use pegen_source::types::{FileID, Position, SourceSpan};
///
/// let file_id = FileID::new(1);
/// let span1 = SourceSpan::new(Position::new(1, 1, 0), Position::new(1, 5, 4), file_id);
/// let span2 = SourceSpan::new(Position::new(1, 6, 5), Position::new(1, 10, 9), file_id);
///
/// let combined = combine_spans(&[span1, span2]).unwrap();
/// assert_eq!(combined.start.offset, 0);
/// assert_eq!(combined.end.offset, 9);
/// ```
///
/// ## Panics
///
/// Panics if the spans are not all from the same file.
#[must_use]
pub fn combine_spans(spans: &[SourceSpan]) -> Option<SourceSpan> {
    if spans.is_empty() {
        return None;
    }

    let first = spans[0];
    let last = spans[spans.len() - 1];

    for span in spans {
        assert!(span.file_id == first.file_id, "cannot combine spans from different files");
    }

    Some(SourceSpan { start: first.start, end: last.end, file_id: first.file_id })
}

/// Combines a slice of byte-offset `Span`s into the span that encompasses
/// all of them. Returns `None` for an empty slice.
///
/// ## Examples
///
/// ```
/// use pegen_parser::utils::combine_simple_spans;
/// use pegen_source::types::Span;
///
/// let span1 = Span::new(0, 4);
/// let span2 = Span::new(5, 9);
///
/// let combined = combine_simple_spans(&[span1, span2]).unwrap();
/// assert_eq!(combined.start, 0);
/// assert_eq!(combined.end, 9);
/// ```
#[must_use]
pub fn combine_simple_spans(spans: &[Span]) -> Option<Span> {
    if spans.is_empty() {
        return None;
    }

    let mut start = spans[0].start;
    let mut end = spans[0].end;

    for span in spans.iter().skip(1) {
        start = start.min(span.start);
        end = end.max(span.end);
    }

    Some(Span { start, end })
}
