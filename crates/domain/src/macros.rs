//! Macro for implementing Display and FromStr for closed domain enums
//!
//! Parsing is case-insensitive; display always uses the canonical lowercase
//! name. Used for values that arrive from config files, environment
//! variables and command-line flags.
//!
//! # Example
//!
//! ```rust
//! use wordforge_domain::impl_domain_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Tier {
//!     Cache,
//!     Source,
//!     Curated,
//! }
//!
//! impl_domain_enum_conversions!(Tier {
//!     Cache => "cache",
//!     Source => "source",
//!     Curated => "curated",
//! });
//!
//! assert_eq!("SOURCE".parse::<Tier>().unwrap(), Tier::Source);
//! assert_eq!(Tier::Curated.to_string(), "curated");
//! ```

/// Implements Display and FromStr for a fieldless enum
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Canonical lowercase name of each variant
///
/// The generated `FromStr` returns `Err(String)` naming the enum and the
/// rejected input.
#[macro_export]
macro_rules! impl_domain_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        impl $enum_name {
            /// Canonical lowercase name
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
