//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Every query over user-owned
//! data is scoped by the owning user id.

pub mod account_repo;
pub mod deceased_repo;
pub mod graveyard_repo;
pub mod profile_repo;
pub mod session_repo;
pub mod user_repo;

pub use account_repo::{AccountDeletionError, AccountDeletionReport, AccountRepo};
pub use deceased_repo::DeceasedRepo;
pub use graveyard_repo::GraveyardRepo;
pub use profile_repo::ProfileRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
