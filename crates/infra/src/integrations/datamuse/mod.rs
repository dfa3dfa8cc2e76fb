/// Datamuse word source
///
/// Implements the core `WordSource` port over the public Datamuse API
/// (`GET /words?sp=<pattern>&md=f&max=<n>`), which needs no API key.
///
/// # Architecture
///
/// - **Client**: `DatamuseSource` - one spelling-pattern query per word
///   length in the requested band, merged and filtered by frequency
/// - **Types**: `DatamuseWord` response rows and frequency tag parsing
///
/// # Usage
///
/// ```no_run
/// use wordforge_core::{WordConstraints, WordSource};
/// use wordforge_domain::{DifficultyLevel, SourceSettings};
/// use wordforge_infra::integrations::DatamuseSource;
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let source = DatamuseSource::from_settings(&SourceSettings::default())?;
/// let constraints = WordConstraints::for_level(DifficultyLevel::new(2)?, 5.0, 50);
/// let words = source.query(&constraints).await?;
/// println!("{} candidates", words.len());
/// # Ok(())
/// # }
/// ```
///
/// # Error Handling
///
/// - **Network errors and 5xx/429**: retried by `HttpClient`, then reported
///   as a retryable `WordSourceError::Network`
/// - **Other non-success statuses**: non-retryable `Network`
/// - **Unparseable bodies**: `InvalidResponse`
/// - **Nothing above the frequency threshold**: `NoCandidates`
pub mod client;
pub mod types;

pub use client::DatamuseSource;
pub use types::DatamuseWord;
