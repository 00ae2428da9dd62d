//! The user-facing commands and the notifications they produce.

use std::fmt;
use std::path::PathBuf;

use crate::convert::{self, ConversionTool, Dialect};
use crate::document::EditorState;
use crate::edit::EditHost;
use crate::mixin::{self, Extraction, MixinNameSource};
use crate::nest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Convert a css file (or the open document when `None`) to scss.
    CreateScss(Option<PathBuf>),
    /// Convert a css or scss file (or the open document) to sass.
    CreateSass(Option<PathBuf>),
    NestRules,
    ExtractMixin,
    NestProperties,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateScss(_) => "create-scss",
            Self::CreateSass(_) => "create-sass",
            Self::NestRules => "nest-rules",
            Self::ExtractMixin => "extract-mixin",
            Self::NestProperties => "nest-properties",
        }
    }
}

/// What to show the user once a command finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Info(String),
    Error(String),
}

impl Notification {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Info(message) | Self::Error(message) => message,
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// The collaborators a command may need.
pub struct CommandContext<'a> {
    pub tool: &'a dyn ConversionTool,
    pub host: &'a mut dyn EditHost,
    pub names: &'a dyn MixinNameSource,
}

/// Runs `command` against `editor` and turns the outcome into a
/// notification.
///
/// Nesting commands say nothing when they succeed, and neither does a
/// cancelled mixin extraction.
pub fn dispatch(
    command: &Command,
    editor: Option<&EditorState>,
    ctx: &mut CommandContext<'_>,
) -> Option<Notification> {
    log::debug!("dispatching {}", command.name());

    let outcome = match command {
        Command::CreateScss(path) => convert_to(Dialect::Scss, path, editor, ctx),
        Command::CreateSass(path) => convert_to(Dialect::Sass, path, editor, ctx),
        Command::NestRules => convert::nest_rules(editor, ctx.tool, &mut *ctx.host).map(|_| None),
        Command::NestProperties => nest::nest_properties(editor, &mut *ctx.host).map(|_| None),
        Command::ExtractMixin => {
            mixin::extract_mixin(editor, &mut *ctx.host, ctx.names).map(|outcome| match outcome {
                Extraction::Applied { name } => {
                    Some(Notification::Info(format!("Extracted mixin `{}`", name)))
                }
                Extraction::Cancelled => None,
            })
        }
    };

    outcome.unwrap_or_else(|err| {
        log::debug!("{} failed: {:?}", command.name(), err);
        Some(Notification::Error(err.to_string()))
    })
}

fn convert_to(
    target: Dialect,
    path: &Option<PathBuf>,
    editor: Option<&EditorState>,
    ctx: &CommandContext<'_>,
) -> Result<Option<Notification>, crate::HelperError> {
    convert::convert_file(editor, target, path.as_deref(), ctx.tool)?;
    Ok(Some(Notification::Info(format!(
        "Conversion to {} was successful!",
        target
    ))))
}
