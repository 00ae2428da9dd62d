//! Conversions that go through the external converter.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use sass_helper_pipe::{SassConvert, ToolError};

use crate::document::{has_suffix, EditorState};
use crate::edit::{self, EditBatch, EditHost};
use crate::error::HelperError;
use crate::precondition::RULE_NESTING;
use crate::selection::selected_text;

/// A stylesheet syntax, named by its file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    Css,
    Scss,
    Sass,
}

impl Dialect {
    /// The dialect named by the end of a path's file name, if any. A bare
    /// `.css` file name counts.
    pub fn from_path(path: &Path) -> Option<Self> {
        [Self::Css, Self::Scss, Self::Sass]
            .into_iter()
            .find(|dialect| has_suffix(path, dialect.extension()))
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Css => "css",
            Self::Scss => "scss",
            Self::Sass => "sass",
        }
    }

    /// The dialects a whole file may be converted from to reach `self`,
    /// with the wording used when the source is not one of them.
    fn sources(self) -> Option<(&'static [Dialect], &'static str)> {
        match self {
            Self::Css => None,
            Self::Scss => Some((&[Self::Css], "css")),
            Self::Sass => Some((&[Self::Css, Self::Scss], "css or scss")),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for Dialect {
    type Err = HelperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "css" => Ok(Self::Css),
            "scss" => Ok(Self::Scss),
            "sass" => Ok(Self::Sass),
            other => Err(HelperError::InvalidTarget(other.to_string())),
        }
    }
}

/// The external program that translates between dialects.
pub trait ConversionTool {
    /// Converts the file at `input` and writes the result to `output`.
    fn convert_file(&self, to: Dialect, input: &Path, output: &Path) -> Result<(), ToolError>;

    /// Converts `text` and returns the result.
    fn convert_text(&self, from: Dialect, to: Dialect, text: &str) -> Result<String, ToolError>;
}

impl ConversionTool for SassConvert {
    fn convert_file(&self, to: Dialect, input: &Path, output: &Path) -> Result<(), ToolError> {
        SassConvert::convert_file(self, to.extension(), input, output)
    }

    fn convert_text(&self, from: Dialect, to: Dialect, text: &str) -> Result<String, ToolError> {
        SassConvert::convert_text(self, from.extension(), to.extension(), text)
    }
}

/// Writes a `target` sibling of `path` (or of the open document when `path`
/// is `None`) and returns where it was written.
///
/// Only css → scss, css → sass and scss → sass are supported. The source is
/// read from disk by the converter, so a document with unsaved changes is
/// refused.
pub fn convert_file(
    editor: Option<&EditorState>,
    target: Dialect,
    path: Option<&Path>,
    tool: &dyn ConversionTool,
) -> Result<PathBuf, HelperError> {
    let (sources, accepted) = target
        .sources()
        .ok_or_else(|| HelperError::InvalidTarget(target.to_string()))?;

    let input = match (path, editor) {
        (Some(path), _) => path,
        (None, Some(editor)) => editor.document.path(),
        (None, None) => return Err(HelperError::NoActiveEditor),
    };

    let source = match Dialect::from_path(input) {
        Some(dialect) if sources.contains(&dialect) => dialect,
        _ => {
            log::debug!("cannot convert {} to {}", input.display(), target);
            return Err(HelperError::UnsupportedConversion(accepted));
        }
    };

    if let Some(editor) = editor {
        if editor.document.is_dirty() && editor.document.path() == input {
            return Err(HelperError::UnsavedChanges);
        }
    }

    let output = sibling(input, source, target);
    tool.convert_file(target, input, &output)?;
    log::info!("converted {} to {}", input.display(), output.display());
    Ok(output)
}

/// `input` with its `from` suffix swapped for `to`'s.
fn sibling(input: &Path, from: Dialect, to: Dialect) -> PathBuf {
    let name = input
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    let stem = name.strip_suffix(from.extension()).unwrap_or(name);
    input.with_file_name(format!("{}{}", stem, to.extension()))
}

/// Pipes the selected css through the converter and replaces the selection
/// with the nested scss it prints.
pub fn nest_rules(
    editor: Option<&EditorState>,
    tool: &dyn ConversionTool,
    host: &mut dyn EditHost,
) -> Result<(), HelperError> {
    let (editor, selection) = RULE_NESTING.check(editor)?;
    let text = selected_text(&editor.document, &selection);

    let nested = tool.convert_text(Dialect::Css, Dialect::Scss, text)?;
    edit::apply(host, &EditBatch::new().replace(selection, nested))
}
