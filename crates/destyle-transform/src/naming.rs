//! Naming convention for the generated stylesheet module.

/// Name of the stylesheet import and the file it resolves to.
///
/// The stylesheet file is always `<import_ident>.module.<ext>`, and
/// component code references rules as `<import_ident>.<class>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StylesheetNaming {
    /// Identifier the stylesheet is imported as (e.g. `styles`).
    pub import_ident: String,

    /// Stylesheet extension without the leading dot (e.g. `scss`).
    pub ext: String,
}

impl Default for StylesheetNaming {
    fn default() -> Self {
        Self {
            import_ident: "styles".to_string(),
            ext: "scss".to_string(),
        }
    }
}

impl StylesheetNaming {
    /// File name of the stylesheet module, e.g. `styles.module.scss`.
    pub fn file_name(&self) -> String {
        format!("{}.module.{}", self.import_ident, self.ext)
    }

    /// Import statement binding the stylesheet to its identifier.
    pub fn import_statement(&self) -> String {
        format!(
            "import {} from './{}';",
            self.import_ident,
            self.file_name()
        )
    }

    /// Member expression selecting a rule, e.g. `styles.title`.
    pub fn member(&self, class: &str) -> String {
        format!("{}.{}", self.import_ident, class)
    }

    /// Template-literal interpolation of a rule, e.g. `${styles.title}`.
    pub fn interpolation(&self, class: &str) -> String {
        format!("${{{}}}", self.member(class))
    }
}
