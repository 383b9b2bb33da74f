use html_escape::decode_html_entities;

/// Raised when an answer span contains no usable alternatives after
/// trimming, e.g. `*:only a tip*` or `* / *`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("answer spec {raw:?} has no usable alternatives")]
pub struct InvalidSpecError {
    /// The raw span text as authored (markers stripped).
    pub raw: String,
}

/// The accepted answers for one blank, plus an optional tip.
///
/// Parsed once from the raw span text and immutable afterwards. The first
/// alternative doubles as the display text of the blank's draggable token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSpec {
    alternatives: Vec<String>,
    tip: Option<String>,
}

impl AnswerSpec {
    /// Separates the solution text from the tip. Only the first occurrence
    /// splits; the tip may contain further colons.
    pub const TIP_SEPARATOR: char = ':';
    /// Separates interchangeable alternatives within the solution text.
    pub const ALTERNATIVE_SEPARATOR: char = '/';

    /// Parses the text between the cloze markers.
    ///
    /// `"big/large:a size tip"` yields alternatives `["big", "large"]` and
    /// tip `"a size tip"`. Alternatives are whitespace-trimmed and
    /// HTML-entity-decoded; empty alternatives are dropped. Fails when
    /// nothing usable remains.
    pub fn parse(raw: &str) -> Result<Self, InvalidSpecError> {
        let (solution, tip) = match raw.split_once(Self::TIP_SEPARATOR) {
            Some((solution, tip)) => (solution, Some(tip.to_string())),
            None => (raw, None),
        };

        let alternatives: Vec<String> = solution
            .split(Self::ALTERNATIVE_SEPARATOR)
            .map(|alt| decode_html_entities(alt.trim()).into_owned())
            .filter(|alt| !alt.is_empty())
            .collect();

        if alternatives.is_empty() {
            return Err(InvalidSpecError {
                raw: raw.to_string(),
            });
        }

        Ok(Self { alternatives, tip })
    }

    /// All accepted alternatives, in authored order. Never empty.
    pub fn alternatives(&self) -> &[String] {
        &self.alternatives
    }

    /// The first alternative, used as the draggable's display text and as
    /// the canonical solution in reports.
    pub fn primary(&self) -> &str {
        &self.alternatives[0]
    }

    /// The tip text, if the span carried one.
    pub fn tip(&self) -> Option<&str> {
        self.tip.as_deref()
    }

    /// Whether `answer` matches any alternative. Case-sensitive exact match
    /// on normalized text; both sides were normalized at parse time.
    pub fn matches(&self, answer: &str) -> bool {
        self.alternatives.iter().any(|alt| alt == answer)
    }
}
