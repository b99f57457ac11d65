//! TikTok song extraction library - shared modules for the CLI and embedding UIs.

pub mod errors;
pub mod export;
pub mod models;
pub mod normalize;
pub mod progress;
pub mod source;
pub mod store;
pub mod worker;
