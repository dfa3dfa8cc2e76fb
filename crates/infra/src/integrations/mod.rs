//! External service integrations

pub mod datamuse;

pub use datamuse::DatamuseSource;
