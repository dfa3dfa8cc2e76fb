//! # WordForge Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - Key-value stores (SQLite file, in-memory) for the cache snapshot
//! - HTTP client with timeout and retry/backoff
//! - The Datamuse word source
//! - Configuration loading from files and the environment
//!
//! ## Architecture
//! - Implements traits defined in `wordforge-core`
//! - Contains all "impure" code (I/O, network)

pub mod config;
pub mod database;
pub mod errors;
pub mod http;
pub mod integrations;

// Re-export commonly used items
pub use database::{open_store, MemoryStore, SqliteStore};
pub use errors::InfraError;
pub use http::HttpClient;
pub use integrations::DatamuseSource;
