//! Where the converter command, its timeout and mixin names come from.
//!
//! | Value | Argument | Environment | Fallback |
//! |---|---|---|---|
//! | converter command | `--tool` | `SASS_CONVERT` | `sass-convert` |
//! | timeout (seconds) | `--timeout` | `SASS_HELPER_TIMEOUT` | 30 |
//! | mixin name | `--name` | | terminal prompt |

use std::time::Duration;

use clap::ArgMatches;
use sass_helper_input::env::EnvReader;
use sass_helper_input::{
    ArgSource, EnvSource, InputChain, InputCollector, InputError, InputSourceKind, RealEnv,
    TerminalIO, TextPromptSource,
};
use sass_helper_pipe::{SassConvert, ToolError};

use crate::mixin::MixinNameSource;

pub const TOOL_ENV: &str = "SASS_CONVERT";
pub const TIMEOUT_ENV: &str = "SASS_HELPER_TIMEOUT";
pub const MIXIN_NAME_PROMPT: &str = "Please enter the name for the extracted mixin";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// The converter command line, before word splitting.
    pub tool: String,
    pub timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tool: SassConvert::DEFAULT_PROGRAM.to_string(),
            timeout: SassConvert::DEFAULT_TIMEOUT,
        }
    }
}

impl Settings {
    pub fn resolve(matches: &ArgMatches) -> Result<Self, InputError> {
        Self::resolve_with(matches, RealEnv)
    }

    pub fn resolve_with<R>(matches: &ArgMatches, env: R) -> Result<Self, InputError>
    where
        R: EnvReader + Clone + 'static,
    {
        let tool = tool_chain(env.clone()).resolve(matches)?;
        let seconds = timeout_chain(env).resolve(matches)?;
        Ok(Self {
            tool,
            timeout: Duration::from_secs(seconds),
        })
    }

    /// The converter these settings describe.
    pub fn converter(&self) -> Result<SassConvert, ToolError> {
        Ok(SassConvert::from_command_line(&self.tool)?.with_timeout(self.timeout))
    }
}

fn tool_chain<R: EnvReader + 'static>(env: R) -> InputChain<String> {
    InputChain::new("converter command")
        .try_source(ArgSource::new("tool"))
        .try_source(EnvSource::with_reader(TOOL_ENV, env))
        .validate(|s| !s.trim().is_empty(), "must not be empty")
        .default(SassConvert::DEFAULT_PROGRAM.to_string())
}

fn timeout_chain<R: EnvReader + 'static>(env: R) -> InputChain<u64> {
    InputChain::new("timeout")
        .try_source(Seconds(ArgSource::new("timeout")))
        .try_source(Seconds(EnvSource::with_reader(TIMEOUT_ENV, env)))
        .validate(|&secs| secs > 0, "must be at least one second")
        .default(SassConvert::DEFAULT_TIMEOUT.as_secs())
}

/// Reads a whole number of seconds from a string source.
struct Seconds<S>(S);

impl<S: InputCollector<String>> InputCollector<u64> for Seconds<S> {
    fn kind(&self) -> InputSourceKind {
        self.0.kind()
    }

    fn is_available(&self, matches: &ArgMatches) -> bool {
        self.0.is_available(matches)
    }

    fn collect(&self, matches: &ArgMatches) -> Result<Option<u64>, InputError> {
        let Some(raw) = self.0.collect(matches)? else {
            return Ok(None);
        };
        raw.trim().parse().map(Some).map_err(|_| {
            InputError::validation("timeout", format!("`{}` is not a number of seconds", raw))
        })
    }
}

/// Asks for a mixin name: the `--name` argument first, then the terminal.
pub struct MixinNamePrompt<'a> {
    matches: &'a ArgMatches,
    chain: InputChain<String>,
}

impl<'a> MixinNamePrompt<'a> {
    pub fn with_terminal<T: TerminalIO + 'static>(matches: &'a ArgMatches, terminal: T) -> Self {
        let prompt = format!("{}: ", MIXIN_NAME_PROMPT);
        Self {
            matches,
            chain: InputChain::new("mixin name")
                .try_source(ArgSource::new("name"))
                .try_source(TextPromptSource::with_terminal(prompt, terminal)),
        }
    }
}

impl MixinNameSource for MixinNamePrompt<'_> {
    fn mixin_name(&self) -> Result<Option<String>, InputError> {
        self.chain.resolve(self.matches).map(Some)
    }
}
