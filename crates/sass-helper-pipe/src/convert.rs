use crate::process::{is_installed, run_tool, ToolError};
use std::ffi::OsString;
use std::path::Path;
use std::time::Duration;

/// How to invoke the external converter.
///
/// The converter is expected to follow `sass-convert`'s conventions:
///
/// - whole files: `<tool> --to <syntax> <input> <output>`
/// - standard input: `<tool> -f <from> --to <syntax>`, result on stdout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SassConvert {
    program: String,
    leading_args: Vec<String>,
    timeout: Duration,
}

impl SassConvert {
    pub const DEFAULT_PROGRAM: &'static str = "sass-convert";
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Parse a command line such as `bundle exec sass-convert`.
    ///
    /// The first word is the program, the rest are passed before the
    /// conversion arguments on every run.
    pub fn from_command_line(line: &str) -> Result<Self, ToolError> {
        let mut words = shell_words::split(line)
            .map_err(|e| ToolError::InvalidCommand(line.to_string(), e.to_string()))?
            .into_iter();
        let program = words
            .next()
            .ok_or_else(|| ToolError::InvalidCommand(line.to_string(), "empty command".into()))?;

        let mut convert = Self::new(program);
        convert.leading_args = words.collect();
        Ok(convert)
    }

    /// Add an argument passed ahead of the conversion arguments.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.leading_args.push(arg.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether the program can be found on `PATH`.
    pub fn is_installed(&self) -> bool {
        is_installed(&self.program)
    }

    /// Convert `input` into `output`, writing the file to disk.
    pub fn convert_file(&self, to: &str, input: &Path, output: &Path) -> Result<(), ToolError> {
        let mut args = self.base_args();
        args.push("--to".into());
        args.push(to.into());
        args.push(input.as_os_str().to_owned());
        args.push(output.as_os_str().to_owned());

        run_tool(&self.program, &args, None, Some(self.timeout))?;
        Ok(())
    }

    /// Pipe `text` through the converter and return what it prints.
    pub fn convert_text(&self, from: &str, to: &str, text: &str) -> Result<String, ToolError> {
        let mut args = self.base_args();
        args.push("-f".into());
        args.push(from.into());
        args.push("--to".into());
        args.push(to.into());

        run_tool(&self.program, &args, Some(text), Some(self.timeout))
    }

    fn base_args(&self) -> Vec<OsString> {
        self.leading_args.iter().map(OsString::from).collect()
    }
}

impl Default for SassConvert {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PROGRAM)
    }
}
