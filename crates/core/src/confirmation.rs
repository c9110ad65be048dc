//! Typed-confirmation prompts for destructive actions.

use crate::error::CoreError;

/// Phrase the user must type to delete their account.
pub const DELETE_ACCOUNT_PHRASE: &str = "DELETE";

/// State of a confirmation dialog.
///
/// When typing is required the confirm button is enabled only while the
/// input equals the phrase exactly: case-sensitive, no trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationPrompt {
    phrase: String,
    requires_typing: bool,
    input: String,
}

impl ConfirmationPrompt {
    /// A plain yes/no prompt.
    pub fn simple() -> Self {
        Self {
            phrase: String::new(),
            requires_typing: false,
            input: String::new(),
        }
    }

    pub fn typed(phrase: impl Into<String>) -> Self {
        Self {
            phrase: phrase.into(),
            requires_typing: true,
            input: String::new(),
        }
    }

    /// The account-deletion prompt.
    pub fn delete_account() -> Self {
        Self::typed(DELETE_ACCOUNT_PHRASE)
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// Cleared every time the dialog opens.
    pub fn reset(&mut self) {
        self.input.clear();
    }

    pub fn is_confirm_enabled(&self) -> bool {
        !self.requires_typing || self.input == self.phrase
    }
}

/// Server-side check of a submitted account-deletion confirmation.
pub fn verify_account_deletion(confirmation: &str) -> Result<(), CoreError> {
    if confirmation != DELETE_ACCOUNT_PHRASE {
        return Err(CoreError::Validation(format!(
            "Type {DELETE_ACCOUNT_PHRASE} to confirm account deletion"
        )));
    }
    Ok(())
}
