//! Locating the resource catalog and switcher definition files.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use tracing::debug;

/// Environment variable naming the resource catalog CSV.
pub const RESOURCES_ENV: &str = "RESOURCE_SWITCHER_RESOURCES";
/// Environment variable naming the switcher definitions JSON.
pub const PARTS_ENV: &str = "RESOURCE_SWITCHER_PARTS";

pub const RESOURCES_FIXTURE: &str = "resources.csv";
pub const PARTS_FIXTURE: &str = "switchers.json";

/// Resolve an input file.
///
/// Searches in the following order:
/// 1. The explicit command-line flag (returned even if it does not exist so
///    the load reports the real error)
/// 2. The environment variable `env_var`
/// 3. Debug fixture path (only in debug builds)
pub fn resolve_input(flag: Option<&Path>, env_var: &str, fixture: &str) -> Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path.to_path_buf());
    }

    let path = candidates(std::env::var(env_var).ok(), fixture)
        .into_iter()
        .find(|p| p.exists())
        .ok_or_else(|| anyhow!("{fixture} not found; pass it explicitly or set {env_var}"))?;
    debug!(path = %path.display(), "resolved input file");
    Ok(path)
}

fn candidates(env_value: Option<String>, fixture: &str) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(value) = env_value.filter(|v| !v.is_empty()) {
        candidates.push(PathBuf::from(value));
    }

    if cfg!(debug_assertions) {
        candidates.push(fixture_path(fixture));
    }

    candidates
}

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures")
        .join(name)
}
