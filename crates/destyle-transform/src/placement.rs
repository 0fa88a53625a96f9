//! Placement policy and filesystem commit for rewritten files.
//!
//! A file either stays where it is (style/index naming convention, with a
//! sibling stylesheet) or moves into its own directory as that directory's
//! entry module, with relative imports adjusted for the extra nesting
//! level. Stylesheet targets accumulate: an existing file is appended to,
//! a missing one is created.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::naming::StylesheetNaming;

/// File name suffixes that keep a file in place.
const IN_PLACE_SUFFIXES: &[&str] = &["style.js", "style.jsx", "index.js", "index.jsx"];

/// Entry module name a relocated component is written as.
const ENTRY_MODULE: &str = "index.jsx";

/// The style-library import the stylesheet import is inserted after.
const STYLED_IMPORT: &str = "import styled from 'styled-components';";

/// Where a rewritten file ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Rewrite the file at its current path; stylesheet goes beside it.
    InPlace,
    /// Move the file into a directory named after its stem.
    Relocate,
}

/// Classify a file name into a placement. Pure.
pub fn classify(file_name: &str) -> Placement {
    if IN_PLACE_SUFFIXES.iter().any(|s| file_name.ends_with(s)) {
        Placement::InPlace
    } else {
        Placement::Relocate
    }
}

/// Final text for one processed file, ready to commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRewriteResult {
    /// Rewritten component buffer, imports already finalized.
    pub component_text: String,

    /// Newline-joined style rules in discovery order, selectors canonical.
    pub stylesheet_text: String,

    /// Where the buffer and stylesheet are written.
    pub placement: Placement,
}

/// Errors from committing a rewrite. Any I/O failure is fatal for the run.
#[derive(Debug, thiserror::Error)]
pub enum PlacementError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn io_err(path: &Path, source: io::Error) -> PlacementError {
    PlacementError::Io {
        path: path.to_path_buf(),
        source,
    }
}

static RELATIVE_CAPITAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'\./([A-Z])").expect("Invalid relative import regex"));

/// Adjust relative imports for one extra level of directory nesting.
///
/// Parent-relative imports gain a level, and same-directory references to
/// a pre-existing `style.module` sibling or to capitalized sibling modules
/// now live one level up.
pub fn adjust_relative_imports(buffer: &str) -> String {
    let buffer = buffer.replace("'../", "'../../");
    let buffer = buffer.replace("'./style.module", "'../style.module");
    RELATIVE_CAPITAL_RE
        .replace_all(&buffer, "'../$1")
        .into_owned()
}

/// Insert the stylesheet import immediately after the style-library import,
/// unless it is already present.
pub fn insert_stylesheet_import(buffer: &str, naming: &StylesheetNaming) -> String {
    let import = naming.import_statement();
    if buffer.contains(&import) {
        return buffer.to_string();
    }
    buffer.replace(STYLED_IMPORT, &format!("{STYLED_IMPORT}\n{import}"))
}

/// Finalize a rewritten buffer for its placement.
///
/// Relocation adjustment runs before the stylesheet import is inserted, so
/// the generated same-directory import is never itself rewritten.
pub fn finalize(buffer: &str, placement: Placement, naming: &StylesheetNaming) -> String {
    let buffer = match placement {
        Placement::InPlace => buffer.to_string(),
        Placement::Relocate => adjust_relative_imports(buffer),
    };
    insert_stylesheet_import(&buffer, naming)
}

/// Write the component buffer and stylesheet to their placement targets.
///
/// Either both targets are written or the error propagates; there is no
/// partial-commit cleanup beyond what already reached disk.
pub fn commit(
    file_path: &Path,
    result: &FileRewriteResult,
    naming: &StylesheetNaming,
) -> Result<(), PlacementError> {
    let dir = file_path.parent().unwrap_or_else(|| Path::new("."));

    match result.placement {
        Placement::InPlace => {
            let style_path = dir.join(naming.file_name());
            write_or_append(&style_path, &result.stylesheet_text)?;
            fs::write(file_path, &result.component_text).map_err(|e| io_err(file_path, e))?;
            tracing::debug!(path = %file_path.display(), "rewrote in place");
        }
        Placement::Relocate => {
            let stem = file_path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("component");
            let new_dir = dir.join(stem);

            match fs::create_dir(&new_dir) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
                Err(e) => return Err(io_err(&new_dir, e)),
            }

            let style_path = new_dir.join(naming.file_name());
            write_or_append(&style_path, &result.stylesheet_text)?;

            let entry_path = new_dir.join(ENTRY_MODULE);
            fs::write(&entry_path, &result.component_text)
                .map_err(|e| io_err(&entry_path, e))?;
            fs::remove_file(file_path).map_err(|e| io_err(file_path, e))?;
            tracing::debug!(
                from = %file_path.display(),
                to = %entry_path.display(),
                "relocated"
            );
        }
    }

    Ok(())
}

/// Append to `path` if it already exists, create it otherwise. Existence is
/// checked immediately before the write; execution is single-threaded so
/// the check cannot race.
fn write_or_append(path: &Path, content: &str) -> Result<(), PlacementError> {
    if path.is_file() {
        let mut file = fs::OpenOptions::new()
            .append(true)
            .open(path)
            .map_err(|e| io_err(path, e))?;
        file.write_all(content.as_bytes())
            .map_err(|e| io_err(path, e))?;
    } else {
        fs::write(path, content).map_err(|e| io_err(path, e))?;
    }
    Ok(())
}
