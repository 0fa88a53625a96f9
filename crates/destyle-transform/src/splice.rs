//! Span-based buffer editing.
//!
//! Rewrites are modeled as a list of non-overlapping byte-span replacements
//! computed against one buffer, then applied in a single pass. Applying in
//! reverse offset order keeps earlier spans valid while later ones are
//! spliced, so two textually identical occurrences are each rewritten at
//! their own offset.

/// One replacement of `buffer[start..end]` with `replacement`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splice {
    /// Byte offset where the replaced span starts.
    pub start: usize,

    /// Byte offset one past the replaced span.
    pub end: usize,

    /// Text to put in the span's place.
    pub replacement: String,
}

impl Splice {
    /// Create a replacement for `start..end`.
    pub fn new(start: usize, end: usize, replacement: impl Into<String>) -> Self {
        Self {
            start,
            end,
            replacement: replacement.into(),
        }
    }
}

/// Apply a set of non-overlapping edits to `buffer`.
///
/// Edits may be given in any order; they are sorted by start offset and
/// applied back-to-front. Overlapping edits are a caller bug.
pub fn apply(buffer: &str, mut edits: Vec<Splice>) -> String {
    edits.sort_by_key(|e| e.start);

    debug_assert!(
        edits.windows(2).all(|w| w[0].end <= w[1].start),
        "overlapping splices"
    );

    let mut out = buffer.to_string();
    for edit in edits.iter().rev() {
        out.replace_range(edit.start..edit.end, &edit.replacement);
    }
    out
}
