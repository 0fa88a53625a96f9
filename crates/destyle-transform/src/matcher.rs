//! Recognition of styled-component definitions in raw source text.
//!
//! Finds constructs of the shape
//! ``const <Name> = styled.<tag>`...`;`` without parsing the host language.
//! The head is matched lexically; the template body is closed by an explicit
//! delimiter-balance scan so that backticks nested inside `${...}`
//! interpolations do not terminate the body early. A definition whose body
//! never closes is simply not matched and falls through to manual-rewrite
//! reporting upstream.

use std::fmt;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// A styled-component definition extracted from a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledDefinition {
    /// Byte span of the whole definition within the scanned buffer.
    pub span: Range<usize>,

    /// The full matched text, `const` through the closing `;`.
    pub raw_text: String,

    /// Component identifier (e.g. `Title`).
    pub name: String,

    /// Markup tag the styles attach to (e.g. `h1`).
    pub tag: String,

    /// Template body between the backticks, trimmed.
    pub style_body: String,
}

/// Why a matched definition is not mechanically transformable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Body contains `=>`, so the styles branch on component props.
    DynamicProps,
    /// Body contains `${`, so the styles compose another construct.
    Composition,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::DynamicProps => write!(f, "contains props"),
            SkipReason::Composition => write!(f, "contains mixins"),
        }
    }
}

static DEFINITION_HEAD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"const\s+([A-Za-z_]\w*)\s*=\s*styled\.([A-Za-z_]\w*)\s*`")
        .expect("Invalid definition head regex")
});

/// Find all styled-component definitions in `source`, in source order.
///
/// Matching is non-overlapping; scanning resumes after each complete match,
/// or after the head when the body never closes.
pub fn find_definitions(source: &str) -> Vec<StyledDefinition> {
    let mut definitions = Vec::new();
    let mut pos = 0;

    while let Some(caps) = DEFINITION_HEAD_RE.captures(&source[pos..]) {
        let head = caps.get(0).unwrap();
        let head_start = pos + head.start();
        let body_start = pos + head.end();

        match find_body_end(source, body_start) {
            Some(close) => {
                // `close` is the closing backtick; the `;` follows it.
                let end = close + 2;
                definitions.push(StyledDefinition {
                    span: head_start..end,
                    raw_text: source[head_start..end].to_string(),
                    name: caps.get(1).unwrap().as_str().to_string(),
                    tag: caps.get(2).unwrap().as_str().to_string(),
                    style_body: source[body_start..close].trim().to_string(),
                });
                pos = end;
            }
            None => {
                // Unclosed or malformed body: not a match, keep scanning.
                pos = body_start;
            }
        }
    }

    definitions
}

/// Scan forward from just past the opening backtick and return the offset
/// of the closing backtick, which must be immediately followed by `;`.
///
/// Tracks `${`/`}` interpolation depth; backticks inside an interpolation
/// belong to a nested template and never close the body.
fn find_body_end(source: &str, start: usize) -> Option<usize> {
    let bytes = source.as_bytes();
    let mut depth = 0usize;
    let mut i = start;

    while i < bytes.len() {
        match bytes[i] {
            b'$' if i + 1 < bytes.len() && bytes[i + 1] == b'{' => {
                depth += 1;
                i += 2;
            }
            b'}' if depth > 0 => {
                depth -= 1;
                i += 1;
            }
            b'`' if depth == 0 => {
                if i + 1 < bytes.len() && bytes[i + 1] == b';' {
                    return Some(i);
                }
                return None;
            }
            _ => i += 1,
        }
    }

    None
}

/// Decide whether a matched definition is safe to transform.
///
/// Plain substring tests over the whole matched text, not semantic
/// analysis. Over-skipping is safe, under-skipping is not, so a marker
/// anywhere in the block disqualifies it.
pub fn eligibility(def: &StyledDefinition) -> Result<(), SkipReason> {
    if def.raw_text.contains("=>") {
        return Err(SkipReason::DynamicProps);
    }
    if def.raw_text.contains("${") {
        return Err(SkipReason::Composition);
    }
    Ok(())
}
