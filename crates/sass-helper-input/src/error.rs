//! Error types for input collection.

/// Errors that can occur while collecting a value.
#[derive(Debug, Clone, thiserror::Error)]
pub enum InputError {
    /// User cancelled an interactive prompt (EOF).
    #[error("Prompt cancelled by user.")]
    PromptCancelled,

    /// Interactive prompt failed.
    #[error("Prompt failed: {0}")]
    PromptFailed(String),

    /// A collected value was rejected by a validator.
    #[error("Invalid {name}: {reason}")]
    ValidationFailed { name: String, reason: String },

    /// No source produced a value and there is no default.
    #[error("No value provided for {0}.")]
    NoInput(String),
}

impl InputError {
    /// Create a validation error for the named value.
    pub fn validation(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ValidationFailed {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if the user backed out of a prompt.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::PromptCancelled)
    }
}
