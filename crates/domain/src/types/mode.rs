//! Acquisition modes

use serde::{Deserialize, Serialize};

use crate::impl_domain_enum_conversions;

/// Which tiers an acquisition request may use
///
/// | Mode            | Cache | Source | Curated fallback |
/// |-----------------|-------|--------|------------------|
/// | `Curated`       | no    | no     | always           |
/// | `Hybrid`        | yes   | yes    | on source failure|
/// | `UnlimitedOnly` | yes   | yes    | never            |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcquisitionMode {
    Curated,
    #[default]
    Hybrid,
    #[serde(rename = "unlimited", alias = "unlimited_only")]
    UnlimitedOnly,
}

impl_domain_enum_conversions!(AcquisitionMode {
    Curated => "curated",
    Hybrid => "hybrid",
    UnlimitedOnly => "unlimited",
});

impl AcquisitionMode {
    /// Whether this mode consults the cache and external source
    pub fn uses_source(self) -> bool {
        !matches!(self, Self::Curated)
    }

    /// Whether this mode may fall back to the curated pool
    pub fn allows_curated(self) -> bool {
        !matches!(self, Self::UnlimitedOnly)
    }
}
