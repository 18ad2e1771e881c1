//! Connection URI parsing for the embedded document store.
//!
//! Accepted forms:
//! - `sqlite::memory:` for a private in-memory store.
//! - `sqlite://<path>` or `sqlite:<path>` for a file-backed store.

use super::{StoreError, StoreResult};
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;

const SCHEME: &str = "sqlite:";
const MEMORY_TARGET: &str = ":memory:";

/// Where the store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreTarget {
    Memory,
    File(PathBuf),
}

/// Parsed store connection URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreUri {
    pub target: StoreTarget,
}

impl StoreUri {
    pub fn parse(raw: &str) -> StoreResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(StoreError::InvalidUri("uri is empty".to_string()));
        }

        let rest = trimmed.strip_prefix(SCHEME).ok_or_else(|| {
            StoreError::InvalidUri(format!("expected `{SCHEME}` scheme, got `{trimmed}`"))
        })?;
        let location = rest.strip_prefix("//").unwrap_or(rest);

        if location == MEMORY_TARGET {
            return Ok(Self {
                target: StoreTarget::Memory,
            });
        }
        if location.is_empty() {
            return Err(StoreError::InvalidUri(format!(
                "missing store path in `{trimmed}`"
            )));
        }

        Ok(Self {
            target: StoreTarget::File(PathBuf::from(location)),
        })
    }

    /// Short label used in log lines.
    pub fn mode(&self) -> &'static str {
        match self.target {
            StoreTarget::Memory => "memory",
            StoreTarget::File(_) => "file",
        }
    }
}

impl FromStr for StoreUri {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for StoreUri {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.target {
            StoreTarget::Memory => write!(f, "{SCHEME}{MEMORY_TARGET}"),
            StoreTarget::File(path) => write!(f, "{SCHEME}//{}", path.display()),
        }
    }
}
