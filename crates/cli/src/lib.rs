//! # WordForge CLI
//!
//! Operational tooling over the acquisition and cache APIs: fetch puzzles,
//! inspect and clear the cache, preload records from a file.

pub mod cli;
pub mod commands;
pub mod context;
pub mod utils;

pub use cli::{Cli, Command};
pub use context::AppContext;
