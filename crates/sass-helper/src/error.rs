//! Error taxonomy shared by every operation.

use sass_helper_input::InputError;
use sass_helper_pipe::ToolError;
use thiserror::Error;

/// Why an operation was refused or failed.
///
/// The `Display` text of each variant is the message shown to the user.
/// Validation variants are produced before any process is spawned or any
/// edit is attempted.
#[derive(Debug, Error)]
pub enum HelperError {
    #[error("No active editor")]
    NoActiveEditor,

    /// The payload completes "You need to have a single selection for ...".
    #[error("You need to have a single selection for {0}")]
    MultipleSelections(&'static str),

    #[error("Sorry, this command works only on {0} files")]
    WrongFileType(&'static str),

    #[error("Save the file before attempting conversion to scss/sass")]
    UnsavedChanges,

    /// The payload lists the source syntaxes the target accepts.
    #[error("Sorry, this command works only on {0} files")]
    UnsupportedConversion(&'static str),

    #[error("Internal Error: unknown conversion target '{0}'")]
    InvalidTarget(String),

    #[error("Sorry, {0}")]
    CannotNest(&'static str),

    #[error("Looks like the selected content has comments, please remove them and try again")]
    ContainsComments,

    #[error("All selected css properties should end with ;")]
    MissingTrailingSemicolon,

    #[error("Sorry, {0}")]
    ParseError(&'static str),

    #[error("Sorry, not all selected properties have the same namespace")]
    NamespaceMismatch,

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error("Failed to apply edits to the document")]
    EditApplication,

    #[error(transparent)]
    Input(#[from] InputError),
}

pub(crate) const CANNOT_NEST_PROPERTIES: &str = "cannot nest properties in the current selection";
pub(crate) const BRACES_IN_SELECTION: &str = "your selection cannot have the characters { or }";
pub(crate) const CANNOT_PARSE: &str = "cannot parse current selection";
pub(crate) const CANNOT_EXTRACT: &str = "cannot extract mixin out of current selection";

impl HelperError {
    /// True for failures reported by the external converter, including
    /// timeouts and a missing executable.
    pub fn is_tool_error(&self) -> bool {
        matches!(self, Self::Tool(_))
    }

    /// Whether the converter rejected its input as malformed css.
    pub fn is_invalid_css(&self) -> bool {
        match self {
            Self::Tool(err) => err.stderr().is_some_and(|s| s.contains("Invalid CSS")),
            _ => false,
        }
    }
}
