//! Asking the user on the terminal.

use std::collections::VecDeque;
use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::{Arc, Mutex};

use clap::ArgMatches;

use crate::collector::{InputCollector, InputSourceKind};
use crate::InputError;

/// The terminal a prompt talks to.
pub trait TerminalIO: Send + Sync {
    /// False when stdin is piped or redirected.
    fn is_interactive(&self) -> bool;

    /// Shows `prompt` and reads one line without its line ending.
    /// `Ok(None)` is end of input.
    fn ask(&self, prompt: &str) -> io::Result<Option<String>>;
}

/// stdin for answers, stderr for the prompt so stdout stays free for
/// document output.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealTerminal;

impl TerminalIO for RealTerminal {
    fn is_interactive(&self) -> bool {
        io::stdin().is_terminal()
    }

    fn ask(&self, prompt: &str) -> io::Result<Option<String>> {
        {
            let mut stderr = io::stderr().lock();
            stderr.write_all(prompt.as_bytes())?;
            stderr.flush()?;
        }
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        line.truncate(line.trim_end_matches(['\r', '\n']).len());
        Ok(Some(line))
    }
}

/// A one-line answer, such as the name of an extracted mixin.
///
/// The answer is trimmed. A blank answer is no value; end of input
/// (Ctrl+D) is [`InputError::PromptCancelled`]. Never available without an
/// interactive terminal.
#[derive(Clone)]
pub struct TextPromptSource<T: TerminalIO = RealTerminal> {
    prompt: String,
    terminal: Arc<T>,
}

impl<T: TerminalIO> TextPromptSource<T> {
    pub fn with_terminal(prompt: impl Into<String>, terminal: T) -> Self {
        Self {
            prompt: prompt.into(),
            terminal: Arc::new(terminal),
        }
    }
}

impl<T: TerminalIO + 'static> InputCollector<String> for TextPromptSource<T> {
    fn kind(&self) -> InputSourceKind {
        InputSourceKind::Prompt
    }

    fn is_available(&self, _matches: &ArgMatches) -> bool {
        self.terminal.is_interactive()
    }

    fn collect(&self, matches: &ArgMatches) -> Result<Option<String>, InputError> {
        if !self.is_available(matches) {
            return Ok(None);
        }
        let answer = self
            .terminal
            .ask(&self.prompt)
            .map_err(|e| InputError::PromptFailed(e.to_string()))?
            .ok_or(InputError::PromptCancelled)?;

        let answer = answer.trim();
        Ok((!answer.is_empty()).then(|| answer.to_string()))
    }
}

/// Scripted terminal for tests. Clones share the same script, so a test
/// can keep one to inspect what was asked.
#[derive(Debug, Clone)]
pub struct MockTerminal {
    interactive: bool,
    script: Arc<Mutex<Script>>,
}

#[derive(Debug, Default)]
struct Script {
    answers: VecDeque<String>,
    asked: Vec<String>,
}

impl MockTerminal {
    /// Answers in order, then end of input.
    pub fn with_responses(answers: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let script = Script {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        };
        Self {
            interactive: true,
            script: Arc::new(Mutex::new(script)),
        }
    }

    pub fn with_response(answer: impl Into<String>) -> Self {
        Self::with_responses([answer.into()])
    }

    /// Ends input at the first question.
    pub fn eof() -> Self {
        Self::with_responses(Vec::<String>::new())
    }

    /// Stdin is not a terminal.
    pub fn non_terminal() -> Self {
        Self {
            interactive: false,
            ..Self::eof()
        }
    }

    /// Every prompt shown so far.
    pub fn prompts(&self) -> Vec<String> {
        self.script
            .lock()
            .map(|script| script.asked.clone())
            .unwrap_or_default()
    }
}

impl TerminalIO for MockTerminal {
    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn ask(&self, prompt: &str) -> io::Result<Option<String>> {
        let mut script = self
            .script
            .lock()
            .map_err(|_| io::Error::other("mock terminal poisoned"))?;
        script.asked.push(prompt.to_string());
        Ok(script.answers.pop_front())
    }
}
