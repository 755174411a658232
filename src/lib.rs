//! domwatch finds registrable look-alikes of a target domain and triages the
//! ones that already resolve by the age of their registration.
//!
//! The pipeline has four stages: the [`target`] parser splits the raw input
//! into a `(name, tld)` pair, the [`generator`] expands it into candidate
//! variants across sixteen transformation techniques, the [`analyzer`]
//! resolves candidates via DNS and pulls WHOIS registration data for the ones
//! that exist, and the [`report`] aggregator orders everything by risk for
//! the output writers.
//!
//! # Example
//! ```
//! use domwatch::config::AnalysisConfig;
//! use domwatch::generator::VariantGenerator;
//! use domwatch::target::Target;
//!
//! let config = AnalysisConfig::new("example.com");
//! let target = Target::parse(config.target()).unwrap();
//! let variants = VariantGenerator::new(&config, &target).generate();
//! assert!(!variants.is_empty());
//! ```

#[cfg(feature = "app-cli")]
pub mod app;
pub mod analyzer;
pub mod config;
pub mod error;
pub mod generator;
pub mod report;
pub mod resolver;
pub mod services;
pub mod target;
pub mod utils;
pub mod variant;

pub use error::Error;
pub use variant::{RecordKind, Technique, TrustLevel, Variant};

pub type Result<T> = std::result::Result<T, error::Error>;
