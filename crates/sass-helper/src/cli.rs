//! Command-line front end.
//!
//! Each invocation stands in for one editor command: the file named on the
//! command line is the open document, `--selection` the active selections.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgMatches, Args, Parser, Subcommand};
use sass_helper_input::{RealTerminal, TerminalIO};

use crate::commands::{dispatch, Command, CommandContext, Notification};
use crate::document::{Document, Position, Selection};
use crate::edit::Buffer;
use crate::settings::{MixinNamePrompt, Settings};

#[derive(Debug, Parser)]
#[command(
    name = "sass-helper",
    version,
    about = "Stylesheet refactoring and css/scss/sass conversion"
)]
pub struct Cli {
    /// Converter command [env: SASS_CONVERT] [default: sass-convert]
    #[arg(long, value_name = "CMD")]
    pub tool: Option<String>,

    /// Seconds to wait for the converter [env: SASS_HELPER_TIMEOUT] [default: 30]
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<String>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Write a .scss copy of a .css file
    CreateScss { file: Option<PathBuf> },
    /// Write a .sass copy of a .css or .scss file
    CreateSass { file: Option<PathBuf> },
    /// Nest the selected css rules
    NestRules(EditArgs),
    /// Nest the selected namespaced properties
    NestProperties(EditArgs),
    /// Move the selected declarations into a new mixin
    ExtractMixin {
        #[command(flatten)]
        edit: EditArgs,
        /// Name of the mixin; prompts when omitted
        #[arg(long)]
        name: Option<String>,
    },
}

#[derive(Debug, Clone, Args)]
pub struct EditArgs {
    /// The .scss document to edit
    pub file: PathBuf,

    /// Selected range as LINE:COL-LINE:COL, 1-based. Repeatable.
    #[arg(long = "selection", value_name = "RANGE", value_parser = parse_selection)]
    pub selections: Vec<Selection>,

    /// Print the edited document instead of saving it
    #[arg(long)]
    pub stdout: bool,
}

/// Parses `LINE:COL-LINE:COL`, or `LINE:COL` for an empty selection.
pub fn parse_selection(raw: &str) -> Result<Selection, String> {
    let (start, end) = match raw.split_once('-') {
        Some((start, end)) => (parse_position(start)?, parse_position(end)?),
        None => {
            let at = parse_position(raw)?;
            (at, at)
        }
    };
    Ok(Selection::new(start, end))
}

fn parse_position(raw: &str) -> Result<Position, String> {
    let (line, column) = raw
        .trim()
        .split_once(':')
        .ok_or_else(|| format!("expected LINE:COL, got `{}`", raw))?;
    let number = |part: &str| match part.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(format!("`{}` is not a 1-based position", raw)),
    };
    Ok(Position::new(number(line)?, number(column)?))
}

/// Runs the parsed command. `matches` must be the matches `cli` was built
/// from.
pub fn run(cli: &Cli, matches: &ArgMatches) -> anyhow::Result<Option<Notification>> {
    run_with(cli, matches, RealTerminal, &mut io::stdout().lock())
}

/// [`run`] with the terminal a mixin name is asked on and the stream
/// `--stdout` prints to.
pub fn run_with<T: TerminalIO + 'static>(
    cli: &Cli,
    matches: &ArgMatches,
    terminal: T,
    out: &mut dyn Write,
) -> anyhow::Result<Option<Notification>> {
    let settings = Settings::resolve(matches)?;
    let tool = settings.converter()?;
    if !tool.is_installed() {
        log::warn!(
            "`{}` was not found on PATH. Please install the sass command line tool from \
             http://sass-lang.com/install for conversions and rule nesting to work",
            tool.program()
        );
    }

    let sub_matches = matches
        .subcommand()
        .map(|(_, sub)| sub)
        .context("no command given")?;
    let names = MixinNamePrompt::with_terminal(sub_matches, terminal);

    let (command, edit) = match &cli.command {
        CliCommand::CreateScss { file } => (Command::CreateScss(None), conversion_source(file)),
        CliCommand::CreateSass { file } => (Command::CreateSass(None), conversion_source(file)),
        CliCommand::NestRules(edit) => (Command::NestRules, edit_target(edit)?),
        CliCommand::NestProperties(edit) => (Command::NestProperties, edit_target(edit)?),
        CliCommand::ExtractMixin { edit, .. } => (Command::ExtractMixin, edit_target(edit)?),
    };

    let Some((mut buffer, selections, edit)) = edit else {
        let mut buffer = Buffer::new(Document::new(PathBuf::new(), String::new()));
        let mut ctx = CommandContext {
            tool: &tool,
            host: &mut buffer,
            names: &names,
        };
        return Ok(dispatch(&command, None, &mut ctx));
    };

    let editor = buffer.snapshot(selections);
    let notification = {
        let mut ctx = CommandContext {
            tool: &tool,
            host: &mut buffer,
            names: &names,
        };
        dispatch(&command, Some(&editor), &mut ctx)
    };

    if let Some(edit) = edit.filter(|_| buffer.document().is_dirty()) {
        if edit.stdout {
            out.write_all(buffer.document().text().as_bytes())
                .and_then(|_| out.flush())
                .context("failed to print the document")?;
        } else {
            fs::write(&edit.file, buffer.document().text())
                .with_context(|| format!("failed to write {}", edit.file.display()))?;
            log::info!("saved {}", edit.file.display());
        }
        buffer.mark_saved();
    }

    Ok(notification)
}

type Target<'a> = Option<(Buffer, Vec<Selection>, Option<&'a EditArgs>)>;

/// The converter reads its source from disk, so the open document only
/// needs a path.
fn conversion_source(file: &Option<PathBuf>) -> Target<'static> {
    file.as_ref()
        .map(|file| (Buffer::new(Document::new(file, String::new())), Vec::new(), None))
}

fn edit_target(edit: &EditArgs) -> anyhow::Result<Target<'_>> {
    let buffer = Buffer::new(load(&edit.file)?);
    Ok(Some((buffer, edit.selections.clone(), Some(edit))))
}

fn load(path: &Path) -> anyhow::Result<Document> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(Document::new(path, text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MIXIN_NAME_PROMPT;
    use clap::{CommandFactory, FromArgMatches};
    use sass_helper_input::MockTerminal;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        let matches = Cli::command().try_get_matches_from(args).unwrap();
        Cli::from_arg_matches(&matches).unwrap()
    }

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_selection() {
        let sel = parse_selection("2:3-4:1").unwrap();
        assert_eq!(sel.start, Position::new(1, 2));
        assert_eq!(sel.end, Position::new(3, 0));

        let reversed = parse_selection("4:1-2:3").unwrap();
        assert_eq!(reversed, sel);

        assert!(parse_selection("5:1").unwrap().is_empty());
    }

    #[test]
    fn test_parse_selection_rejects_bad_positions() {
        for raw in ["0:1-1:1", "1:1-", "a:b", "3"] {
            assert!(parse_selection(raw).is_err(), "{raw}");
        }
    }

    #[test]
    fn test_repeated_selections() {
        let cli = parse(&[
            "sass-helper",
            "nest-properties",
            "a.scss",
            "--selection",
            "1:1-1:5",
            "--selection",
            "2:1-2:5",
        ]);
        match cli.command {
            CliCommand::NestProperties(edit) => assert_eq!(edit.selections.len(), 2),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_global_options_and_mixin_name() {
        let cli = parse(&[
            "sass-helper",
            "--tool",
            "bundle exec sass-convert",
            "extract-mixin",
            "a.scss",
            "--name",
            "card",
            "--stdout",
        ]);
        assert_eq!(cli.tool.as_deref(), Some("bundle exec sass-convert"));
        match cli.command {
            CliCommand::ExtractMixin { edit, name } => {
                assert_eq!(name.as_deref(), Some("card"));
                assert!(edit.stdout);
                assert!(edit.selections.is_empty());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_create_commands_take_optional_file() {
        let cli = parse(&["sass-helper", "create-sass"]);
        assert!(matches!(cli.command, CliCommand::CreateSass { file: None }));
    }

    const NAMESPACED: &str = "margin-top: 1px;\nmargin-left: 2px;\n";
    const NESTED: &str = "margin: {\n\ttop: 1px;\n\tleft: 2px;\n}\n\n";

    struct Invocation {
        result: anyhow::Result<Option<Notification>>,
        printed: String,
    }

    fn invoke(args: &[&str], terminal: MockTerminal) -> Invocation {
        let matches = Cli::command().try_get_matches_from(args).unwrap();
        let cli = Cli::from_arg_matches(&matches).unwrap();
        let mut out = Vec::new();
        let result = run_with(&cli, &matches, terminal, &mut out);
        Invocation {
            result,
            printed: String::from_utf8(out).unwrap(),
        }
    }

    fn stylesheet(dir: &TempDir, text: &str) -> (PathBuf, String) {
        let path = dir.path().join("site.scss");
        fs::write(&path, text).unwrap();
        let arg = path.to_str().unwrap().to_string();
        (path, arg)
    }

    #[test]
    fn test_edited_document_is_written_back() {
        let dir = TempDir::new().unwrap();
        let (path, file) = stylesheet(&dir, NAMESPACED);

        let run = invoke(
            &["sass-helper", "nest-properties", file.as_str(), "--selection", "1:1-2:18"],
            MockTerminal::non_terminal(),
        );

        assert_eq!(run.result.unwrap(), None);
        assert_eq!(fs::read_to_string(&path).unwrap(), NESTED);
        assert!(run.printed.is_empty());
    }

    #[test]
    fn test_stdout_prints_instead_of_saving() {
        let dir = TempDir::new().unwrap();
        let (path, file) = stylesheet(&dir, NAMESPACED);

        let run = invoke(
            &[
                "sass-helper",
                "nest-properties",
                file.as_str(),
                "--selection",
                "1:1-2:18",
                "--stdout",
            ],
            MockTerminal::non_terminal(),
        );

        assert_eq!(run.result.unwrap(), None);
        assert_eq!(run.printed, NESTED);
        assert_eq!(fs::read_to_string(&path).unwrap(), NAMESPACED);
    }

    #[test]
    fn test_failed_command_leaves_file_alone() {
        let dir = TempDir::new().unwrap();
        let (path, file) = stylesheet(&dir, ".a { margin-top: 1px; }\n");

        let run = invoke(
            &["sass-helper", "nest-properties", file.as_str(), "--selection", "1:1-1:24"],
            MockTerminal::non_terminal(),
        );

        let note = run.result.unwrap().unwrap();
        assert!(note.is_error());
        assert_eq!(note.message(), "Sorry, cannot nest properties in the current selection");
        assert_eq!(fs::read_to_string(&path).unwrap(), ".a { margin-top: 1px; }\n");
    }

    #[test]
    fn test_extract_mixin_takes_name_from_subcommand() {
        let dir = TempDir::new().unwrap();
        let (path, file) = stylesheet(&dir, "color: red;\n");
        let terminal = MockTerminal::eof();

        let run = invoke(
            &[
                "sass-helper",
                "extract-mixin",
                file.as_str(),
                "--selection",
                "1:1-1:12",
                "--name",
                "card",
            ],
            terminal.clone(),
        );

        assert_eq!(
            run.result.unwrap(),
            Some(Notification::Info("Extracted mixin `card`".into()))
        );
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "@mixin card {\n\tcolor: red;\n}\n@include card();\n"
        );
        assert!(terminal.prompts().is_empty());
    }

    #[test]
    fn test_dismissed_prompt_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let (path, file) = stylesheet(&dir, "color: red;\n");
        let terminal = MockTerminal::eof();

        let run = invoke(
            &["sass-helper", "extract-mixin", file.as_str(), "--selection", "1:1-1:12"],
            terminal.clone(),
        );

        assert_eq!(run.result.unwrap(), None);
        assert_eq!(terminal.prompts(), [format!("{}: ", MIXIN_NAME_PROMPT)]);
        assert_eq!(fs::read_to_string(&path).unwrap(), "color: red;\n");
    }

    #[test]
    fn test_missing_mixin_name_without_terminal_is_an_error() {
        let dir = TempDir::new().unwrap();
        let (path, file) = stylesheet(&dir, "color: red;\n");

        let run = invoke(
            &["sass-helper", "extract-mixin", file.as_str(), "--selection", "1:1-1:12"],
            MockTerminal::non_terminal(),
        );

        assert_eq!(
            run.result.unwrap(),
            Some(Notification::Error("No value provided for mixin name.".into()))
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), "color: red;\n");
    }

    #[test]
    fn test_conversion_without_file_has_no_editor() {
        let run = invoke(&["sass-helper", "create-scss"], MockTerminal::non_terminal());
        assert_eq!(
            run.result.unwrap(),
            Some(Notification::Error("No active editor".into()))
        );
    }

    #[test]
    fn test_unreadable_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("gone.scss");

        let run = invoke(
            &["sass-helper", "nest-properties", missing.to_str().unwrap()],
            MockTerminal::non_terminal(),
        );

        let err = run.result.unwrap_err();
        assert!(format!("{:#}", err).starts_with("failed to read "));
    }
}
