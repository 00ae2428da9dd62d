//! The validation every selection-scoped command runs first.

use crate::document::{EditorState, Selection};
use crate::error::HelperError;

/// What a selection-scoped command needs from the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRequirement {
    /// Completes "You need to have a single selection for ...".
    pub purpose: &'static str,
    /// File extension the document must have.
    pub extension: &'static str,
    pub max_selections: usize,
}

impl SelectionRequirement {
    /// A single selection in an `.scss` document.
    pub const fn single_scss(purpose: &'static str) -> Self {
        Self {
            purpose,
            extension: "scss",
            max_selections: 1,
        }
    }

    /// Checks, in order: an editor is open, the selection count, the file
    /// type. Returns the editor and its primary selection.
    pub fn check<'a>(
        &self,
        editor: Option<&'a EditorState>,
    ) -> Result<(&'a EditorState, Selection), HelperError> {
        let editor = editor.ok_or(HelperError::NoActiveEditor)?;

        if editor.selections.len() > self.max_selections {
            log::debug!(
                "{} selections active, at most {} allowed",
                editor.selections.len(),
                self.max_selections
            );
            return Err(HelperError::MultipleSelections(self.purpose));
        }

        if !editor.document.has_extension(self.extension) {
            log::debug!(
                "{} is not a .{} file",
                editor.document.path().display(),
                self.extension
            );
            return Err(HelperError::WrongFileType(self.extension));
        }

        Ok((editor, editor.selection()))
    }
}

pub const RULE_NESTING: SelectionRequirement =
    SelectionRequirement::single_scss("the css to scss conversion to take place");

pub const PROPERTY_NESTING: SelectionRequirement =
    SelectionRequirement::single_scss("the css to scss conversion to take place");

pub const MIXIN_EXTRACTION: SelectionRequirement =
    SelectionRequirement::single_scss("mixin extraction");
