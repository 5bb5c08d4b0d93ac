use std::env;
use std::path::PathBuf;

use crate::{IdsError, Resolver, Result, StreamingScanner, VendorDatabase};

/// Locations searched for `pci.ids` when no explicit path is configured, in order.
pub const DEFAULT_SEARCH_PATHS: &[&str] = &[
    "/usr/share/misc/pci.ids",
    "/usr/share/hwdata/pci.ids",
    "/usr/share/pci.ids",
    "/var/lib/pciutils/pci.ids",
];

/// Environment variable overriding the database path.
pub const PATH_ENV: &str = "PCI_IDS_PATH";

/// Environment variable selecting the lookup strategy (`eager` or `streaming`).
pub const STRATEGY_ENV: &str = "PCI_IDS_STRATEGY";

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Strategy {
    /// Parse the whole database once.
    #[default]
    Eager,
    /// Scan the raw database on every lookup.
    Streaming,
}

impl Strategy {
    /// Parses a strategy name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.eq_ignore_ascii_case("eager") {
            Some(Self::Eager)
        } else if name.eq_ignore_ascii_case("streaming") {
            Some(Self::Streaming)
        } else {
            None
        }
    }
}

/// Where to find the vendor database and how to query it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdsConfig {
    /// Explicit database path. When set, the search path is not consulted.
    pub path: Option<PathBuf>,
    pub strategy: Strategy,
    pub search_paths: Vec<PathBuf>,
}

impl Default for IdsConfig {
    fn default() -> Self {
        Self {
            path: None,
            strategy: Strategy::default(),
            search_paths: DEFAULT_SEARCH_PATHS.iter().map(PathBuf::from).collect(),
        }
    }
}

impl IdsConfig {
    /// Defaults overridden by `PCI_IDS_PATH` and `PCI_IDS_STRATEGY`.
    ///
    /// An empty `PCI_IDS_PATH` is ignored. An unknown strategy falls back to the default
    /// with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|var| env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let path = lookup(PATH_ENV).and_then(|v| {
            let v = v.trim();
            (!v.is_empty()).then(|| PathBuf::from(v))
        });

        let strategy = match lookup(STRATEGY_ENV) {
            Some(value) => Strategy::from_name(&value).unwrap_or_else(|| {
                tracing::warn!(value = %value, "unknown {STRATEGY_ENV}, using the eager strategy");
                Strategy::default()
            }),
            None => Strategy::default(),
        };

        Self {
            path,
            strategy,
            ..Self::default()
        }
    }

    /// Resolves the database path: the explicit path if set, else the first existing
    /// search path.
    pub fn locate(&self) -> Result<PathBuf> {
        if let Some(path) = &self.path {
            tracing::debug!(path = %path.display(), "using configured pci.ids database");
            return Ok(path.clone());
        }
        match self.search_paths.iter().find(|p| p.is_file()) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "selected pci.ids database");
                Ok(path.clone())
            }
            None => Err(IdsError::NotFound {
                searched: self.search_paths.clone(),
            }),
        }
    }

    /// Locates the database and builds a resolver using the configured strategy.
    pub fn load(&self) -> Result<Resolver> {
        let path = self.locate()?;
        Ok(match self.strategy {
            Strategy::Eager => Resolver::Eager(VendorDatabase::load(&path)?),
            Strategy::Streaming => Resolver::Streaming(StreamingScanner::load(&path)?),
        })
    }
}
