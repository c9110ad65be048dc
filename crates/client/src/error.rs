use gravekeeper_core::account::AccountDeletionStep;
use gravekeeper_core::error::CoreError;
use gravekeeper_core::graveyard::LAST_GRAVEYARD_MESSAGE;

/// Failures talking to the backend.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        /// Machine-readable `code` from the error body.
        code: String,
        message: String,
        /// Set when an account deletion step failed.
        step: Option<AccountDeletionStep>,
    },

    /// No session token is held.
    #[error("Not signed in")]
    NoSession,
}

impl BackendError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The server's message, or the transport error text.
    pub fn message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    pub(crate) fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::NoSession) || self.status() == Some(401)
    }
}

/// Identity provider failures.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("An account with this email already exists")]
    DuplicateAccount,

    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Any other provider error, with the provider's message.
    #[error("{0}")]
    Provider(String),
}

impl AuthError {
    pub(crate) fn from_sign_up(err: BackendError) -> Self {
        match err.status() {
            Some(409) => Self::DuplicateAccount,
            _ => Self::Provider(err.message()),
        }
    }

    pub(crate) fn from_sign_in(err: BackendError) -> Self {
        match err.status() {
            Some(401) => Self::InvalidCredentials,
            _ => Self::Provider(err.message()),
        }
    }
}

/// Errors surfaced by the stores to the UI.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A read or write against the backend failed.
    #[error("{}", .0.message())]
    DataAccess(BackendError),

    #[error("{message}")]
    AccountDeletion {
        step: AccountDeletionStep,
        message: String,
    },

    /// Input rejected before any backend call.
    #[error(transparent)]
    Validation(#[from] CoreError),

    #[error("You must be signed in")]
    NotAuthenticated,

    #[error("{}", LAST_GRAVEYARD_MESSAGE)]
    LastGraveyard,
}

impl From<BackendError> for ClientError {
    fn from(err: BackendError) -> Self {
        if err.is_unauthenticated() {
            return Self::NotAuthenticated;
        }
        match err {
            BackendError::Api {
                step: Some(step),
                message,
                ..
            } => Self::AccountDeletion { step, message },
            other => Self::DataAccess(other),
        }
    }
}
