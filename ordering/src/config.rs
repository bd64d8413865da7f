//! Desk configuration
//!
//! ## Configuration Sources
//! Values are taken, in order of precedence, from:
//! 1. Command-line flags
//! 2. Environment variables (a `.env` file is loaded first if present)
//! 3. Built-in storefront defaults
//!
//! ## Environment Variables
//! - `ORDERING_CATALOG`: path to a JSON catalog replacing the embedded menu
//! - `ORDERING_HALF_SUPPLEMENT`: flat supplement for a half-meter pizza (e.g. `3dt`)
//! - `ORDERING_FULL_SUPPLEMENT`: flat supplement for a full-meter pizza (e.g. `5dt`)

use shared::{Location, Price};
use std::path::PathBuf;

use crate::core::CombinationPolicy;
use crate::error::{OrderingError, OrderingResult};

pub const ENV_CATALOG: &str = "ORDERING_CATALOG";
pub const ENV_HALF_SUPPLEMENT: &str = "ORDERING_HALF_SUPPLEMENT";
pub const ENV_FULL_SUPPLEMENT: &str = "ORDERING_FULL_SUPPLEMENT";

/// Raw, optional settings gathered from flags and environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub catalog: Option<PathBuf>,
    pub half_supplement: Option<String>,
    pub full_supplement: Option<String>,
}

impl ConfigOverrides {
    /// Load `.env` if present; missing files are fine
    pub fn init_env() {
        let _ = dotenv::dotenv();
    }

    /// Fill unset values from the process environment
    pub fn with_env_defaults(self) -> Self {
        self.with_defaults_from(|key| std::env::var(key).ok())
    }

    /// Fill unset values from `lookup`; values already set win
    pub fn with_defaults_from(self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            catalog: self.catalog.or_else(|| lookup(ENV_CATALOG).map(PathBuf::from)),
            half_supplement: self.half_supplement.or_else(|| lookup(ENV_HALF_SUPPLEMENT)),
            full_supplement: self.full_supplement.or_else(|| lookup(ENV_FULL_SUPPLEMENT)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeskConfig {
    pub policy: CombinationPolicy,
    pub locations: Vec<Location>,
    /// `None` means the embedded menu
    pub catalog_path: Option<PathBuf>,
}

impl DeskConfig {
    pub fn from_overrides(overrides: ConfigOverrides) -> OrderingResult<Self> {
        let half = parse_supplement(
            ENV_HALF_SUPPLEMENT,
            overrides.half_supplement.as_deref(),
            CombinationPolicy::DEFAULT_HALF_SUPPLEMENT,
        )?;
        let full = parse_supplement(
            ENV_FULL_SUPPLEMENT,
            overrides.full_supplement.as_deref(),
            CombinationPolicy::DEFAULT_FULL_SUPPLEMENT,
        )?;

        Ok(Self {
            policy: CombinationPolicy::half_or_full(half, full),
            locations: default_locations(),
            catalog_path: overrides.catalog,
        })
    }
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            policy: CombinationPolicy::default(),
            locations: default_locations(),
            catalog_path: None,
        }
    }
}

fn parse_supplement(field: &str, value: Option<&str>, default: Price) -> OrderingResult<Price> {
    match value {
        Some(text) => text
            .parse::<Price>()
            .map_err(|e| OrderingError::config(format!("{field}: {e}"))),
        None => Ok(default),
    }
}

pub fn default_locations() -> Vec<Location> {
    vec![
        Location::new("Bardo Tunis", "52 555 414"),
        Location::new("Ben Arous Tunis", "94 722 566"),
        Location::new("Ksar Hellal Monastir", "52 555 400"),
    ]
}
