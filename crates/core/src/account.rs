//! Account deletion cascade steps.

use serde::{Deserialize, Serialize};

/// One step of the account-deletion cascade, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountDeletionStep {
    Memorials,
    Graveyards,
    Profile,
    Sessions,
    Identity,
}

pub const DELETION_ORDER: [AccountDeletionStep; 5] = [
    AccountDeletionStep::Memorials,
    AccountDeletionStep::Graveyards,
    AccountDeletionStep::Profile,
    AccountDeletionStep::Sessions,
    AccountDeletionStep::Identity,
];

impl AccountDeletionStep {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Memorials => "memorials",
            Self::Graveyards => "graveyards",
            Self::Profile => "profile",
            Self::Sessions => "sessions",
            Self::Identity => "identity",
        }
    }

    /// User-facing message when this step fails.
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::Memorials => "Failed to delete memorials",
            Self::Graveyards => "Failed to delete graveyards",
            Self::Profile => "Failed to delete profile",
            Self::Sessions => "Failed to revoke sessions",
            Self::Identity => "Failed to delete identity",
        }
    }
}

impl std::fmt::Display for AccountDeletionStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
