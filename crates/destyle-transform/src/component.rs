//! Synthesis of replacement components and their stylesheet rules.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::ident::{class_name_to_camel_case, lower_first};
use crate::matcher::StyledDefinition;
use crate::naming::StylesheetNaming;
use crate::splice::{self, Splice};

/// Mapping from an original selector class name to its canonical generated
/// identifier. Built per file across all transforms, read back by the
/// class-reference rewriter. Later inserts for the same key overwrite;
/// derivation is deterministic so the value never changes.
pub type ClassNameTable = HashMap<String, String>;

/// One eligible definition converted into replacement text plus a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentTransform {
    /// The matched definition text this transform replaces.
    pub original_text: String,

    /// Plain component that applies the generated class.
    pub replacement_text: String,

    /// Style-class identifier, `lower_first` of the component name.
    pub style_class_name: String,

    /// The original style body wrapped in a `.<class> { ... }` block.
    pub style_rule: String,
}

/// Build the replacement component and namespaced style rule for an
/// eligible definition. Pure; CSS declarations are carried verbatim.
pub fn rewrite_component(
    def: &StyledDefinition,
    naming: &StylesheetNaming,
) -> ComponentTransform {
    let style_class_name = lower_first(&def.name);

    let replacement_text = format!(
        "const {name} = (props) => {{\n  \
           const {{children}} = props;\n  \
           return (<{tag} {{...props}} className={{{class_ref}}}>\n    \
             {{children}}\n  \
           </{tag}>);\n\
         }};",
        name = def.name,
        tag = def.tag,
        class_ref = naming.member(&style_class_name),
    );

    let style_rule = format!(
        ".{} {{\n  {}\n}}\n",
        style_class_name, def.style_body
    );

    ComponentTransform {
        original_text: def.raw_text.clone(),
        replacement_text,
        style_class_name,
        style_rule,
    }
}

// Lexical approximation of a class selector; also matches numeric
// fragments like `5em` in `0.5em`, which end up as inert table entries.
static SELECTOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.\s*([\w][\w-]*)").expect("Invalid selector regex"));

/// Scan a style rule for class selectors and record each one's canonical
/// identifier in the table.
pub fn record_selectors(style_rule: &str, table: &mut ClassNameTable) {
    for caps in SELECTOR_RE.captures_iter(style_rule) {
        let name = caps.get(1).unwrap().as_str();
        table.insert(name.to_string(), class_name_to_camel_case(name));
    }
}

/// Rewrite every recorded selector in the aggregated stylesheet text to its
/// canonical identifier, by span.
pub fn rewrite_selectors(style_text: &str, table: &ClassNameTable) -> String {
    let mut edits = Vec::new();

    for caps in SELECTOR_RE.captures_iter(style_text) {
        let m = caps.get(1).unwrap();
        if let Some(canonical) = table.get(m.as_str()) {
            if canonical != m.as_str() {
                edits.push(Splice::new(m.start(), m.end(), canonical.clone()));
            }
        }
    }

    splice::apply(style_text, edits)
}
