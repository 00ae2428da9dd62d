use std::ffi::OsString;
use std::io::{self, Read, Write};
use std::process::{ChildStdin, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use thiserror::Error;
use wait_timeout::ChildExt;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("`{0}` was not found. Please install the sass command line tool from http://sass-lang.com/install")]
    NotFound(String),
    #[error("Invalid converter command `{0}`: {1}")]
    InvalidCommand(String, String),
    #[error("Command `{0}` timed out after {1:?}")]
    Timeout(String, Duration),
    /// The tool exited unsuccessfully. Displays the tool's standard error
    /// verbatim so callers can look for diagnostics such as "Invalid CSS".
    #[error("{}", failure_message(.command, .status, .stderr))]
    Failed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
    #[error("Command output was not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

impl ToolError {
    /// Standard error captured from a failed run, if any.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Self::Failed { stderr, .. } => Some(stderr),
            _ => None,
        }
    }
}

fn failure_message(command: &str, status: &ExitStatus, stderr: &str) -> String {
    if stderr.trim().is_empty() {
        format!("Command `{}` failed with status {}", command, status)
    } else {
        stderr.to_string()
    }
}

/// Returns true if `program` resolves to an executable on `PATH`.
pub fn is_installed(program: &str) -> bool {
    which::which(program).is_ok()
}

/// Run `program` with `args`, optionally feeding `input` to its stdin.
///
/// Returns the tool's stdout on success. A non-zero exit becomes
/// [`ToolError::Failed`] carrying the captured stderr. If `timeout` elapses
/// first, the process is killed and [`ToolError::Timeout`] is returned.
///
/// Input is written and both output streams are drained on background
/// threads, so neither large input nor large output can stall the wait.
pub fn run_tool(
    program: &str,
    args: &[OsString],
    input: Option<&str>,
    timeout: Option<Duration>,
) -> Result<String, ToolError> {
    let command_line = display_command(program, args);
    log::debug!("running `{}`", command_line);
    let started = Instant::now();

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(if input.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = cmd.spawn().map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            ToolError::NotFound(program.to_string())
        } else {
            ToolError::Io(e)
        }
    })?;

    let stdout = child.stdout.take().map(drain);
    let stderr = child.stderr.take().map(drain);

    let feeder = match (input, child.stdin.take()) {
        (Some(text), Some(stdin)) => Some(feed(stdin, text.to_owned())),
        _ => None,
    };

    let status = match timeout {
        Some(duration) => match child.wait_timeout(duration)? {
            Some(status) => status,
            None => {
                child.kill()?;
                child.wait()?;
                log::warn!("`{}` timed out after {:?}", command_line, duration);
                return Err(ToolError::Timeout(command_line, duration));
            }
        },
        None => child.wait()?,
    };

    if let Some(feeder) = feeder {
        feeder
            .join()
            .map_err(|_| io::Error::other("input writer panicked"))??;
    }
    let stdout = collect(stdout)?;
    let stderr = collect(stderr)?;
    log::debug!(
        "`{}` exited with {} after {:?}",
        command_line,
        status,
        started.elapsed()
    );

    if !status.success() {
        return Err(ToolError::Failed {
            command: command_line,
            status,
            stderr: String::from_utf8_lossy(&stderr).into_owned(),
        });
    }

    Ok(String::from_utf8(stdout)?)
}

/// Writes `text` to the tool's stdin and closes it. A tool that rejects its
/// input may exit before reading all of it, so a broken pipe is not an error.
fn feed(mut stdin: ChildStdin, text: String) -> JoinHandle<io::Result<()>> {
    thread::spawn(move || match stdin.write_all(text.as_bytes()) {
        Err(e) if e.kind() != io::ErrorKind::BrokenPipe => Err(e),
        _ => Ok(()),
    })
}

fn drain<R: Read + Send + 'static>(mut source: R) -> JoinHandle<io::Result<Vec<u8>>> {
    thread::spawn(move || {
        let mut buffer = Vec::new();
        source.read_to_end(&mut buffer)?;
        Ok(buffer)
    })
}

fn collect(reader: Option<JoinHandle<io::Result<Vec<u8>>>>) -> Result<Vec<u8>, ToolError> {
    match reader {
        Some(handle) => {
            let bytes = handle
                .join()
                .map_err(|_| io::Error::other("output reader panicked"))??;
            Ok(bytes)
        }
        None => Ok(Vec::new()),
    }
}

pub(crate) fn display_command(program: &str, args: &[OsString]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(&arg.to_string_lossy());
    }
    line
}
