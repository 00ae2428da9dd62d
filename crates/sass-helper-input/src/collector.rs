//! The [`InputCollector`] trait and what a resolved value carries.

use std::fmt;

use clap::ArgMatches;

use crate::InputError;

/// A place a value can come from.
///
/// `collect` returning `Ok(None)` means "nothing here", and the chain moves
/// on to the next source. `is_available` is the cheap check made first, so
/// an interactive source can bow out before it asks anything.
pub trait InputCollector<T>: Send + Sync {
    fn kind(&self) -> InputSourceKind;

    fn is_available(&self, matches: &ArgMatches) -> bool;

    fn collect(&self, matches: &ArgMatches) -> Result<Option<T>, InputError>;

    /// Checked before the chain's own validators.
    fn validate(&self, _value: &T) -> Result<(), String> {
        Ok(())
    }

    /// Whether a rejected value may be asked for again.
    fn can_retry(&self) -> bool {
        self.kind() == InputSourceKind::Prompt
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInput<T> {
    pub value: T,
    pub source: InputSourceKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSourceKind {
    Arg,
    Env,
    Prompt,
    Default,
}

impl fmt::Display for InputSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Arg => "argument",
            Self::Env => "environment variable",
            Self::Prompt => "prompt",
            Self::Default => "default",
        })
    }
}
