//! Request extractors that gate handlers.
//!
//! - [`auth::AuthUser`] -- the signed-in identity from a JWT Bearer token.
//! - [`service::RequireServiceRole`] -- privileged callers holding the service-role key.

pub mod auth;
pub mod service;
