//! Source location tracking

use serde::{Deserialize, Serialize};

/// A byte range in the program source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Move the span forward by `offset` bytes.
    ///
    /// Loop bodies are split on their own, so the statements they produce are
    /// relative to the body text until shifted back into program coordinates.
    pub fn shifted(self, offset: usize) -> Span {
        Span {
            start: self.start + offset,
            end: self.end + offset,
        }
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl From<Span> for std::ops::Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_new() {
        let span = Span::new(10, 20);
        assert_eq!(span.start, 10);
        assert_eq!(span.end, 20);
    }

    #[test]
    fn test_span_shifted() {
        let span = Span::new(2, 9).shifted(14);
        assert_eq!(span, Span::new(16, 23));
    }

    #[test]
    fn test_span_shifted_zero() {
        let span = Span::new(3, 4);
        assert_eq!(span.shifted(0), span);
    }

    #[test]
    fn test_span_display() {
        let span = Span::new(42, 99);
        assert_eq!(format!("{}", span), "42..99");
    }

    #[test]
    fn test_span_to_range() {
        let span = Span::new(5, 15);
        let range: std::ops::Range<usize> = span.into();
        assert_eq!(range, 5..15);
    }

    #[test]
    fn test_span_serde_roundtrip() {
        let json = serde_json::to_string(&Span::new(1, 3)).unwrap();
        assert_eq!(json, r#"{"start":1,"end":3}"#);
        let back: Span = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Span::new(1, 3));
    }
}
