//! Live adapters for real external interactions.

pub mod filesystem;
pub mod github;

pub use filesystem::LiveFileSystem;
pub use github::LiveGitHubApi;
