pub mod answer;
pub mod cursor;

pub use answer::{AnswerSpec, InvalidSpecError};

use cursor::Cursor;

/// The ASCII marker that delimits answer spans in cloze text.
pub const MARKER: u8 = b'*';

/// One segment of parsed cloze text, in document order.
///
/// The `index` on each blank is the exercise's canonical slot ordering: the
/// n-th blank pairs with draggable token n and droppable slot n.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSegment {
    /// Plain text between answer spans. Never trimmed.
    Literal(String),
    /// One answer span, `*`-delimited in the source text.
    Blank { index: usize, spec: AnswerSpec },
}

/// Scans cloze text into literal and blank segments.
///
/// A pair of [`MARKER`] bytes delimits one blank. Two edge cases are
/// intentional and match what authored exercises depend on:
///
/// - An unmatched trailing `*` has no closing marker, so the marker and
///   everything after it are literal text; no blank is produced.
/// - An empty `**` span produces no blank and is consumed silently, without
///   starting a new segment: the literal text on either side merges.
///
/// Pure function: same input, same segments. Fails only when a span parses
/// to zero usable alternatives (see [`AnswerSpec::parse`]).
pub fn parse(text: &str) -> Result<Vec<TextSegment>, InvalidSpecError> {
    let mut cur = Cursor::new(text);
    let mut segments = vec![];
    let mut literal = String::new();
    let mut blank_index = 0;

    while !cur.eof() {
        if cur.peek() != Some(MARKER) {
            // Literal run up to the next marker or end of input.
            let end = cur.find_from(cur.pos(), MARKER).unwrap_or(text.len());
            literal.push_str(&text[cur.pos()..end]);
            cur.bump_n(end - cur.pos());
            continue;
        }

        match cur.find_from(cur.pos() + 1, MARKER) {
            None => {
                // No closing marker: the rest is literal, marker included.
                literal.push_str(cur.rest());
                cur.bump_n(cur.rest().len());
            }
            Some(close) => {
                let inner = &text[cur.pos() + 1..close];
                if inner.is_empty() {
                    // `**`: swallow both markers, keep accumulating the
                    // current literal so the surrounding text merges.
                    cur.bump_n(2);
                } else {
                    if !literal.is_empty() {
                        segments.push(TextSegment::Literal(std::mem::take(&mut literal)));
                    }
                    let spec = AnswerSpec::parse(inner)?;
                    segments.push(TextSegment::Blank {
                        index: blank_index,
                        spec,
                    });
                    blank_index += 1;
                    cur.bump_n(close + 1 - cur.pos());
                }
            }
        }
    }

    if !literal.is_empty() {
        segments.push(TextSegment::Literal(literal));
    }
    Ok(segments)
}
