//! Stylesheet refactoring helpers.
//!
//! Five commands, each working on an explicit [`EditorState`] snapshot:
//!
//! | Command | Operation |
//! |---|---|
//! | `create-scss` / `create-sass` | [`convert::convert_file`] through the external converter |
//! | `nest-rules` | [`convert::nest_rules`], piping the selection through the converter |
//! | `nest-properties` | [`nest::nest_properties`] |
//! | `extract-mixin` | [`mixin::extract_mixin`] |
//!
//! Operations never touch the document directly. They describe their changes
//! as an [`EditBatch`] that an [`EditHost`] applies whole or not at all, and
//! they validate everything before spawning the converter or editing.
//!
//! ```rust
//! use sass_helper::{dispatch, Buffer, Command, CommandContext, Document, SassConvert};
//!
//! let mut buffer = Buffer::new(Document::new("site.scss", "margin-top: 1px; margin-left: 2px;"));
//! let editor = buffer.snapshot(vec![buffer.document().full_range()]);
//! let tool = SassConvert::default();
//! let mut ctx = CommandContext { tool: &tool, host: &mut buffer, names: &None::<String> };
//!
//! assert_eq!(dispatch(&Command::NestProperties, Some(&editor), &mut ctx), None);
//! assert_eq!(buffer.document().text(), "margin: {\n\ttop: 1px;\n\tleft: 2px;\n}\n");
//! ```

pub mod cli;
pub mod commands;
pub mod convert;
pub mod declaration;
pub mod document;
pub mod edit;
mod error;
pub mod mixin;
pub mod nest;
pub mod precondition;
pub mod selection;
pub mod settings;

pub use commands::{dispatch, Command, CommandContext, Notification};
pub use convert::{ConversionTool, Dialect};
pub use document::{Document, EditorState, Position, Selection};
pub use edit::{Buffer, EditBatch, EditHost, TextEdit};
pub use error::HelperError;
pub use mixin::{Extraction, MixinNameSource};
pub use settings::Settings;

pub use sass_helper_pipe::{SassConvert, ToolError};
