pub mod account;
pub mod auth;
pub mod catalog;
pub mod deceased;
pub mod graveyard;
pub mod profile;
pub mod scene;
