//! Client-side stores for Gravekeeper.
//!
//! The stores hold the signed-in user's session, graveyards and memorials in
//! memory and only change that state after the backend confirms a write.
//! They talk to the server through the [`MemorialBackend`] trait, which is
//! injected so tests can swap the HTTP implementation for an in-memory one.

pub mod app;
pub mod backend;
pub mod deceased;
pub mod error;
pub mod graveyards;
pub mod http;
pub mod models;
pub mod session;

#[cfg(test)]
mod fake;

pub use app::MemorialApp;
pub use backend::MemorialBackend;
pub use deceased::DeceasedStore;
pub use error::{AuthError, BackendError, ClientError};
pub use graveyards::GraveyardStore;
pub use http::HttpBackend;
pub use session::AuthSession;
