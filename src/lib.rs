// Library root: re-exports all modules so integration tests and external
// consumers can access the crate's public API.

pub mod config;
pub mod matching;
pub mod model;
pub mod report;
pub mod roster;
pub mod scoring;
pub mod stats;
