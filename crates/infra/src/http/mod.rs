//! HTTP transport shared by external integrations

pub mod client;

pub use client::{HttpClient, HttpClientBuilder};
