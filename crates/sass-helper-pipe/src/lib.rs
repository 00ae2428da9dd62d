//! Invocation of the external stylesheet converter.
//!
//! The converter (`sass-convert` by default) is always run as a child
//! process with captured standard output and standard error. [`run_tool`]
//! is the low-level runner; [`SassConvert`] knows the converter's argument
//! conventions for whole-file and standard-input conversions.

pub mod convert;
pub mod process;

pub use convert::SassConvert;
pub use process::{is_installed, run_tool, ToolError};
