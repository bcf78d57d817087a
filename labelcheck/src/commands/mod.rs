// labelcheck/src/commands/mod.rs

pub mod batch;
pub mod quality;
pub mod verify;

use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

use labelcheck_core::domain::compliance::VerificationConfig;
use labelcheck_core::infrastructure::{load_config, load_config_file};

/// Explicit `--config` wins; otherwise look for labelcheck.yaml in `fallback_dir`.
pub fn resolve_config(explicit: Option<&Path>, fallback_dir: &Path) -> Result<VerificationConfig> {
    debug!(explicit = ?explicit, fallback = %fallback_dir.display(), "Resolving verification config");
    match explicit {
        Some(path) => load_config_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => load_config(fallback_dir)
            .with_context(|| format!("Failed to load config in {}", fallback_dir.display())),
    }
}
