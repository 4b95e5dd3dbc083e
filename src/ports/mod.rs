//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the generator and an external
//! system (the repository API and the output filesystem).
//! Implementations live in `src/adapters/`.

pub mod filesystem;
pub mod github;

pub use filesystem::FileSystem;
pub use github::{ApiFuture, GitHubApi};
