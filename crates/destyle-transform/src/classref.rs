//! Rewriting of literal `className` attributes against the name table.
//!
//! Attributes holding plain class strings (quoted or templated) are split
//! into whitespace-separated tokens; tokens known to the per-file
//! [`ClassNameTable`] become interpolated stylesheet references, unknown
//! tokens pass through unchanged as global classes. Occurrences are
//! located by span and spliced individually, so identical attribute text
//! at two offsets never cross-contaminates.

use std::sync::LazyLock;

use regex::Regex;

use crate::component::ClassNameTable;
use crate::naming::StylesheetNaming;
use crate::splice::{self, Splice};

// Matches className="a b", className={'a b'}-style literals and templated
// className={`a b`}. Deliberately excludes `.`-bearing expressions, so
// already-rewritten attributes never match again.
static CLASS_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"className=(["{])`?([\w\s-]+?)`?(["}])"#).expect("Invalid class attribute regex")
});

/// Result of rewriting a file's class attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRewrite {
    /// Buffer with every matched attribute rewritten.
    pub buffer: String,

    /// Tokens that had no table entry and were passed through.
    pub global_classes: Vec<String>,
}

/// Rewrite every literal class attribute in `buffer` against `table`.
pub fn rewrite_class_attributes(
    buffer: &str,
    table: &ClassNameTable,
    naming: &StylesheetNaming,
) -> ClassRewrite {
    let mut edits = Vec::new();
    let mut global_classes = Vec::new();

    for caps in CLASS_ATTR_RE.captures_iter(buffer) {
        let whole = caps.get(0).unwrap();
        let literal = caps.get(2).unwrap().as_str();

        let mut tokens = Vec::new();
        for token in literal.split_whitespace() {
            match table.get(token) {
                Some(canonical) => tokens.push(naming.interpolation(canonical)),
                None => {
                    tracing::warn!(class = token, "treated as global class");
                    global_classes.push(token.to_string());
                    tokens.push(token.to_string());
                }
            }
        }

        let rewritten = format!("className={{`{}`}}", tokens.join(" "));
        edits.push(Splice::new(whole.start(), whole.end(), rewritten));
    }

    ClassRewrite {
        buffer: splice::apply(buffer, edits),
        global_classes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table(entries: &[(&str, &str)]) -> ClassNameTable {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn known_tokens_become_stylesheet_references() {
        let table = table(&[("foo", "fooBar")]);
        let out = rewrite_class_attributes(
            r#"<div className="foo" />"#,
            &table,
            &StylesheetNaming::default(),
        );

        assert_eq!(out.buffer, "<div className={`${styles.fooBar}`} />");
        assert!(out.global_classes.is_empty());
    }

    #[test]
    fn unknown_tokens_pass_through_as_globals() {
        let table = table(&[("foo", "fooBar")]);
        let out = rewrite_class_attributes(
            r#"<div className="foo baz" />"#,
            &table,
            &StylesheetNaming::default(),
        );

        assert_eq!(out.buffer, "<div className={`${styles.fooBar} baz`} />");
        assert_eq!(out.global_classes, vec!["baz".to_string()]);
    }

    #[test]
    fn templated_attributes_are_recognized() {
        let table = table(&[("nav-item", "navItem")]);
        let out = rewrite_class_attributes(
            "<li className={`nav-item`}>x</li>",
            &table,
            &StylesheetNaming::default(),
        );

        assert_eq!(out.buffer, "<li className={`${styles.navItem}`}>x</li>");
    }

    #[test]
    fn identical_attributes_are_rewritten_at_each_offset() {
        let table = table(&[("foo", "foo")]);
        let source = r#"<a className="foo" /><b className="foo" />"#;
        let out = rewrite_class_attributes(source, &table, &StylesheetNaming::default());

        assert_eq!(
            out.buffer,
            "<a className={`${styles.foo}`} /><b className={`${styles.foo}`} />"
        );
    }

    #[test]
    fn rewritten_attributes_do_not_match_again() {
        let table = table(&[("foo", "foo")]);
        let naming = StylesheetNaming::default();

        let once = rewrite_class_attributes(r#"<a className="foo" />"#, &table, &naming);
        let twice = rewrite_class_attributes(&once.buffer, &table, &naming);

        assert_eq!(once.buffer, twice.buffer);
    }

    #[test]
    fn attributes_with_expressions_are_left_alone() {
        let table = table(&[("foo", "foo")]);
        let source = "<a className={cond ? a : b} />";
        let out = rewrite_class_attributes(source, &table, &StylesheetNaming::default());

        assert_eq!(out.buffer, source);
    }
}
