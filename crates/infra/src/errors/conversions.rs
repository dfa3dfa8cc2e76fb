//! Conversions from external infrastructure errors into domain and port
//! errors.

use reqwest::Error as HttpError;
use rusqlite::Error as SqlError;
use wordforge_core::StoreError;
use wordforge_domain::WordForgeError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub WordForgeError);

impl From<InfraError> for WordForgeError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<WordForgeError> for InfraError {
    fn from(value: WordForgeError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoWordForgeError {
    fn into_wordforge(self) -> WordForgeError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → WordForgeError */
/* -------------------------------------------------------------------------- */

impl IntoWordForgeError for SqlError {
    fn into_wordforge(self) -> WordForgeError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match err.code {
                    ErrorCode::DatabaseBusy => {
                        WordForgeError::Persistence("database is busy".into())
                    }
                    ErrorCode::DatabaseLocked => {
                        WordForgeError::Persistence("database is locked".into())
                    }
                    ErrorCode::DiskFull => WordForgeError::Persistence("disk is full".into()),
                    ErrorCode::CannotOpen => {
                        WordForgeError::Persistence(format!("unable to open database: {message}"))
                    }
                    _ => WordForgeError::Persistence(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => WordForgeError::NotFound("no rows returned by query".into()),
            RE::FromSqlConversionFailure(_, _, cause) => {
                WordForgeError::Persistence(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, _, ty) => {
                WordForgeError::Persistence(format!("invalid column type: {ty}"))
            }
            RE::Utf8Error(_) => {
                WordForgeError::Persistence("invalid UTF-8 returned from sqlite".into())
            }
            RE::InvalidPath(path) => WordForgeError::Config(format!(
                "invalid database path: {}",
                path.to_string_lossy()
            )),
            other => WordForgeError::Persistence(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(value.into_wordforge())
    }
}

/// Classify a SQLite failure for the key-value store port
///
/// Busy and locked databases are transient; a full disk is reported as a
/// quota failure so the cache trims and retries; everything else is a
/// backend failure.
pub fn store_error_from_sql(err: SqlError, payload_len: usize) -> StoreError {
    use rusqlite::ffi::ErrorCode;

    if let SqlError::SqliteFailure(ffi, _) = &err {
        match ffi.code {
            ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked => {
                return StoreError::Transient(err.to_string());
            }
            ErrorCode::DiskFull | ErrorCode::TooBig => {
                return StoreError::QuotaExceeded { needed: payload_len, limit: 0 };
            }
            _ => {}
        }
    }
    StoreError::Backend(err.into_wordforge().to_string())
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → WordForgeError */
/* -------------------------------------------------------------------------- */

impl IntoWordForgeError for HttpError {
    fn into_wordforge(self) -> WordForgeError {
        if self.is_timeout() {
            return WordForgeError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return WordForgeError::Network("HTTP connection failure".into());
        }

        if self.is_decode() {
            return WordForgeError::Network(format!("HTTP response could not be decoded: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                404 => WordForgeError::NotFound(message),
                429 => WordForgeError::Network(message),
                400..=499 => WordForgeError::InvalidInput(message),
                _ => WordForgeError::Network(message),
            };
        }

        WordForgeError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_wordforge())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
