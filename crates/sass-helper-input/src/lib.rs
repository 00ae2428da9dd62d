//! Input acquisition for sass-helper.
//!
//! Values such as the converter command, the tool timeout, and the name of
//! an extracted mixin can come from several places. Each place is an
//! [`InputCollector`]; an [`InputChain`] tries them in order and returns the
//! first value found.
//!
//! ```text
//! InputChain
//! ├── ArgSource("tool")          → None (flag not given)
//! ├── EnvSource("SASS_CONVERT")  → Some("bundle exec sass-convert") ← returns this
//! └── default "sass-convert"     → (not reached)
//! ```
//!
//! Environment and terminal access go through [`env::EnvReader`] and
//! [`TerminalIO`] so tests can substitute [`MockEnv`] and [`MockTerminal`].

mod chain;
mod collector;
pub mod env;
mod error;
pub mod sources;

pub use chain::InputChain;
pub use collector::{InputCollector, InputSourceKind, ResolvedInput};
pub use error::InputError;

pub use sources::{ArgSource, EnvSource, MockTerminal, RealTerminal, TerminalIO, TextPromptSource};

pub use env::{MockEnv, RealEnv};
