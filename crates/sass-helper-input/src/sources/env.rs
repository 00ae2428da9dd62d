//! An environment variable as an input source.

use std::sync::Arc;

use clap::ArgMatches;

use crate::collector::{InputCollector, InputSourceKind};
use crate::env::{EnvReader, RealEnv};
use crate::InputError;

/// The value of an environment variable. Unset and empty are both absent.
#[derive(Clone)]
pub struct EnvSource<R: EnvReader = RealEnv> {
    var: String,
    reader: Arc<R>,
}

impl<R: EnvReader> EnvSource<R> {
    pub fn with_reader(var: impl Into<String>, reader: R) -> Self {
        Self {
            var: var.into(),
            reader: Arc::new(reader),
        }
    }

    fn read(&self) -> Option<String> {
        self.reader.var(&self.var).filter(|value| !value.is_empty())
    }
}

impl<R: EnvReader + 'static> InputCollector<String> for EnvSource<R> {
    fn kind(&self) -> InputSourceKind {
        InputSourceKind::Env
    }

    fn is_available(&self, _matches: &ArgMatches) -> bool {
        self.read().is_some()
    }

    fn collect(&self, _matches: &ArgMatches) -> Result<Option<String>, InputError> {
        Ok(self.read())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MockEnv;
    use clap::Command;

    fn collect(env: MockEnv) -> Option<String> {
        let matches = Command::new("test").try_get_matches_from(["test"]).unwrap();
        let source = EnvSource::with_reader("SASS_CONVERT", env);
        assert_eq!(source.is_available(&matches), source.read().is_some());
        source.collect(&matches).unwrap()
    }

    #[test]
    fn set_variable_is_collected() {
        let env = MockEnv::new().with_var("SASS_CONVERT", "bundle exec sass-convert");
        assert_eq!(collect(env).as_deref(), Some("bundle exec sass-convert"));
    }

    #[test]
    fn unset_and_empty_are_absent() {
        assert_eq!(collect(MockEnv::new()), None);
        assert_eq!(collect(MockEnv::new().with_var("SASS_CONVERT", "")), None);
    }
}
