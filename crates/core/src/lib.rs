//! Domain rules for Gravekeeper memorial gardens.
//!
//! Everything in this crate is pure: no database, no HTTP, no clock beyond
//! what callers pass in. The API server and the client stores both build on
//! these rules so validation and rendering agree on either side of the wire.

pub mod account;
pub mod confirmation;
pub mod error;
pub mod graveyard;
pub mod memorial;
pub mod scene;
pub mod theme;
pub mod tombstone;
pub mod types;
