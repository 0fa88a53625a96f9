//! Identifier derivation for generated style classes.
//!
//! Two jobs: derive a style-class identifier from a component name, and
//! normalize existing hyphenated class names into the camel-case form used
//! as selector names in the generated stylesheet. Both are pure; the
//! normalized name is the join key between markup and stylesheet text, so
//! identical input must always produce identical output.

/// Lowercase the first character of an identifier, leaving the rest as-is.
///
/// `lower_first("Title")` is the style-class identifier for a component
/// named `Title`.
pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Normalize a class-name token into a camel-case identifier.
///
/// Tokens without hyphens or underscores only get their first character
/// lowercased. Otherwise doubled hyphens collapse to one, the token is
/// split on hyphens, each segment is capitalized (empty segments become
/// `_`), and the concatenation gets a lowercase first character.
pub fn class_name_to_camel_case(s: &str) -> String {
    if !s.contains('-') && !s.contains('_') {
        return lower_first(s);
    }

    let no_double_dash = s.replace("--", "-");

    let camel: String = no_double_dash.split('-').map(capitalize).collect();
    lower_first(&camel)
}

/// Capitalize a segment: first character uppercased, the rest lowercased.
/// Empty segments (from a leading or trailing hyphen) map to `_`.
fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => "_".to_string(),
    }
}
