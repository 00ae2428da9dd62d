//! The places a value can come from: [`ArgSource`], [`EnvSource`] and
//! [`TextPromptSource`]. A fixed fallback is set on the chain itself with
//! [`InputChain::default`](crate::InputChain::default).

mod arg;
mod env;
mod prompt;

pub use arg::ArgSource;
pub use env::EnvSource;
pub use prompt::{MockTerminal, RealTerminal, TerminalIO, TextPromptSource};
