//! Store configuration.
//!
//! Paging limits for the query executor. Values can be set in code or
//! picked up from the environment:
//!
//! - `AISLE_DEFAULT_PAGE_SIZE` — page size used when a caller does not
//!   specify one (default 20)
//! - `AISLE_MAX_PAGE_SIZE` — hard cap applied to requested page sizes
//!   (default 1000); oversized requests are clamped, not rejected
//!
//! Unparseable environment values fall back to the defaults.

use std::env;

/// Paging configuration for [`QueryService`](crate::QueryService).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Page size used when the caller does not specify one.
    pub default_page_size: u64,
    /// Hard cap applied to requested page sizes.
    pub max_page_size: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            max_page_size: 1_000,
        }
    }
}

impl StoreConfig {
    /// Build a configuration from `AISLE_*` environment variables,
    /// falling back to defaults for absent or unparseable values.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_page_size: read_env("AISLE_DEFAULT_PAGE_SIZE")
                .unwrap_or(defaults.default_page_size),
            max_page_size: read_env("AISLE_MAX_PAGE_SIZE").unwrap_or(defaults.max_page_size),
        }
    }

    /// Set the default page size.
    pub fn with_default_page_size(mut self, size: u64) -> Self {
        self.default_page_size = size.max(1);
        self
    }

    /// Set the maximum page size.
    pub fn with_max_page_size(mut self, size: u64) -> Self {
        self.max_page_size = size.max(1);
        self
    }
}

fn read_env(key: &str) -> Option<u64> {
    env::var(key).ok()?.parse().ok().filter(|&v| v > 0)
}
