//! Cassette format for recording and replaying API interactions.

pub mod format;
pub mod recorder;
pub mod replayer;
