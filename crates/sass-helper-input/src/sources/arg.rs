//! A clap argument as an input source.

use clap::ArgMatches;

use crate::collector::{InputCollector, InputSourceKind};
use crate::InputError;

/// The string value of a clap argument, when the user passed it.
///
/// An id the command does not define reads as absent rather than panicking,
/// so one source can be used against every subcommand's matches.
#[derive(Debug, Clone)]
pub struct ArgSource {
    id: String,
}

impl ArgSource {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    fn value<'m>(&self, matches: &'m ArgMatches) -> Option<&'m String> {
        matches.try_get_one::<String>(&self.id).ok().flatten()
    }
}

impl InputCollector<String> for ArgSource {
    fn kind(&self) -> InputSourceKind {
        InputSourceKind::Arg
    }

    fn is_available(&self, matches: &ArgMatches) -> bool {
        self.value(matches).is_some()
    }

    fn collect(&self, matches: &ArgMatches) -> Result<Option<String>, InputError> {
        Ok(self.value(matches).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{Arg, Command};

    fn parse(args: &[&str]) -> ArgMatches {
        Command::new("test")
            .arg(Arg::new("name").long("name"))
            .try_get_matches_from(args)
            .unwrap()
    }

    #[test]
    fn passed_argument_is_collected() {
        let source = ArgSource::new("name");
        let matches = parse(&["test", "--name", "buttons"]);
        assert!(source.is_available(&matches));
        assert_eq!(source.collect(&matches).unwrap().as_deref(), Some("buttons"));
    }

    #[test]
    fn omitted_argument_is_absent() {
        let source = ArgSource::new("name");
        assert!(!source.is_available(&parse(&["test"])));
    }

    #[test]
    fn undefined_id_is_absent() {
        let source = ArgSource::new("timeout");
        let matches = parse(&["test", "--name", "buttons"]);
        assert!(!source.is_available(&matches));
        assert_eq!(source.collect(&matches).unwrap(), None);
    }
}
