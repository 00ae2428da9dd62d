//! Ordered fallback over several [`InputCollector`]s.

use std::fmt;

use clap::ArgMatches;

use crate::collector::{InputCollector, InputSourceKind, ResolvedInput};
use crate::InputError;

struct Rule<T> {
    check: Box<dyn Fn(&T) -> bool + Send + Sync>,
    message: String,
}

/// Tries each source in order until one yields a value.
///
/// A value must pass the source's own validation and then every rule added
/// with [`validate`](Self::validate). Retryable sources are asked again
/// after a rejection; for the rest the rejection is final.
///
/// ```ignore
/// let tool = InputChain::<String>::new("converter command")
///     .try_source(ArgSource::new("tool"))
///     .try_source(EnvSource::with_reader("SASS_CONVERT", RealEnv))
///     .default("sass-convert".to_string())
///     .resolve(&matches)?;
/// ```
pub struct InputChain<T> {
    label: String,
    sources: Vec<Box<dyn InputCollector<T>>>,
    rules: Vec<Rule<T>>,
    fallback: Option<T>,
}

impl<T: Clone + Send + Sync + 'static> InputChain<T> {
    /// `label` names the value in error messages.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            sources: Vec::new(),
            rules: Vec::new(),
            fallback: None,
        }
    }

    pub fn try_source(mut self, source: impl InputCollector<T> + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Rejects values for which `check` returns false.
    pub fn validate<F>(mut self, check: F, message: impl Into<String>) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.rules.push(Rule {
            check: Box::new(check),
            message: message.into(),
        });
        self
    }

    /// Used when no source has a value. Not validated.
    pub fn default(mut self, value: T) -> Self {
        self.fallback = Some(value);
        self
    }

    pub fn resolve(&self, matches: &ArgMatches) -> Result<T, InputError> {
        self.resolve_with_source(matches).map(|resolved| resolved.value)
    }

    pub fn resolve_with_source(
        &self,
        matches: &ArgMatches,
    ) -> Result<ResolvedInput<T>, InputError> {
        for source in self.sources.iter().filter(|s| s.is_available(matches)) {
            if let Some(value) = self.collect_valid(source.as_ref(), matches)? {
                log::debug!("{} resolved from {}", self.label, source.kind());
                return Ok(ResolvedInput {
                    value,
                    source: source.kind(),
                });
            }
        }

        match &self.fallback {
            Some(value) => {
                log::debug!("{} resolved from default", self.label);
                Ok(ResolvedInput {
                    value: value.clone(),
                    source: InputSourceKind::Default,
                })
            }
            None => Err(InputError::NoInput(self.label.clone())),
        }
    }

    fn collect_valid(
        &self,
        source: &dyn InputCollector<T>,
        matches: &ArgMatches,
    ) -> Result<Option<T>, InputError> {
        loop {
            let Some(value) = source.collect(matches)? else {
                return Ok(None);
            };
            match self.rejection(source, &value) {
                None => return Ok(Some(value)),
                Some(reason) if source.can_retry() => {
                    eprintln!("Invalid {}: {}", self.label, reason);
                }
                Some(reason) => return Err(InputError::validation(&self.label, reason)),
            }
        }
    }

    fn rejection(&self, source: &dyn InputCollector<T>, value: &T) -> Option<String> {
        if let Err(reason) = source.validate(value) {
            return Some(reason);
        }
        self.rules
            .iter()
            .find(|rule| !(rule.check)(value))
            .map(|rule| rule.message.clone())
    }
}

impl<T> fmt::Debug for InputChain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds: Vec<_> = self.sources.iter().map(|s| s.kind()).collect();
        f.debug_struct("InputChain")
            .field("label", &self.label)
            .field("sources", &kinds)
            .field("rules", &self.rules.len())
            .field("has_default", &self.fallback.is_some())
            .finish()
    }
}
