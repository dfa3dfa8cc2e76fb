//! Infrastructure error conversions

mod conversions;

pub use conversions::{store_error_from_sql, InfraError};
