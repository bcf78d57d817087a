// labelcheck-core/src/infrastructure/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::domain::compliance::policy::VerificationConfig;
use crate::error::LabelCheckError;
use crate::infrastructure::error::InfrastructureError;

pub const CONFIG_FILE_NAMES: [&str; 2] = ["labelcheck.yaml", "labelcheck.yml"];
pub const ENV_CONCURRENCY: &str = "LABELCHECK_CONCURRENCY";
pub const ENV_SKIP_QUALITY: &str = "LABELCHECK_SKIP_QUALITY";

/// Looks for a config file in `dir`; built-in defaults apply when there is none.
#[instrument(skip(dir))]
pub fn load_config(dir: &Path) -> Result<VerificationConfig, LabelCheckError> {
    // 1. Discovery
    let config = match find_config(dir) {
        Some(path) => {
            info!(path = ?path, "Loading verification config");
            parse_config(&path)?
        }
        None => {
            info!(dir = ?dir, "No config file found, using defaults");
            VerificationConfig::default()
        }
    };

    // 2. Layering
    finish(config)
}

/// Loads an explicitly requested config file. Unlike `load_config`, a missing
/// file is an error.
#[instrument]
pub fn load_config_file(path: &Path) -> Result<VerificationConfig, LabelCheckError> {
    if !path.is_file() {
        return Err(InfrastructureError::ConfigNotFound(path.display().to_string()).into());
    }
    info!(path = ?path, "Loading verification config");
    finish(parse_config(path)?)
}

fn find_config(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.is_file())
}

fn parse_config(path: &Path) -> Result<VerificationConfig, InfrastructureError> {
    let content = fs::read_to_string(path)?;
    // An empty file is a valid "all defaults" config.
    if content.trim().is_empty() {
        return Ok(VerificationConfig::default());
    }
    Ok(serde_yaml::from_str(&content)?)
}

fn finish(mut config: VerificationConfig) -> Result<VerificationConfig, LabelCheckError> {
    apply_overrides(&mut config, |key| std::env::var(key).ok())?;
    // Fail-secure: a broken policy never reaches the scorer.
    config.ensure_valid()?;
    Ok(config)
}

/// Environment layer on top of the file. `lookup` abstracts `std::env::var`.
pub(crate) fn apply_overrides(
    config: &mut VerificationConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), InfrastructureError> {
    if let Some(val) = lookup(ENV_CONCURRENCY) {
        let parsed = val.trim().parse::<usize>().map_err(|_| {
            InfrastructureError::ConfigError(format!(
                "{ENV_CONCURRENCY} must be a positive integer, got '{val}'"
            ))
        })?;
        info!(old = config.batch.concurrency, new = parsed, "Overriding batch concurrency via ENV");
        config.batch.concurrency = parsed;
    }

    if let Some(val) = lookup(ENV_SKIP_QUALITY) {
        let skip = matches!(
            val.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        );
        info!(skip, "Overriding image quality assessment via ENV");
        config.assess_image_quality = !skip;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::DomainError;
    use anyhow::Result;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_when_no_file() -> Result<()> {
        let dir = tempdir()?;
        let config = load_config(dir.path())?;
        assert_eq!(config.thresholds.brand_name.pass, 0.85);
        assert_eq!(config.warning.header_scan_limit, 10);
        Ok(())
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() -> Result<()> {
        let dir = tempdir()?;
        fs::write(
            dir.path().join("labelcheck.yml"),
            "thresholds:\n  abv:\n    pass: 0.99\n    review: 0.5\nassess_image_quality: false\n",
        )?;

        let config = load_config(dir.path())?;
        assert_eq!(config.thresholds.abv.pass, 0.99);
        assert_eq!(config.thresholds.abv.review, 0.5);
        assert_eq!(config.thresholds.net_contents.pass, 0.90);
        assert!(!config.assess_image_quality);
        Ok(())
    }

    #[test]
    fn test_inverted_thresholds_are_rejected() -> Result<()> {
        let dir = tempdir()?;
        fs::write(
            dir.path().join("labelcheck.yaml"),
            "thresholds:\n  brand_name:\n    pass: 0.6\n    review: 0.7\n",
        )?;

        let err = load_config(dir.path()).err();
        assert!(matches!(
            err,
            Some(LabelCheckError::Domain(DomainError::InvalidThresholds { ref field, .. })) if field == "brand_name"
        ));
        Ok(())
    }

    #[test]
    fn test_bad_yaml_is_an_infrastructure_error() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("labelcheck.yaml"), "thresholds: [1, 2")?;
        let err = load_config(dir.path()).err();
        assert!(matches!(
            err,
            Some(LabelCheckError::Infrastructure(InfrastructureError::YamlError(_)))
        ));
        Ok(())
    }

    #[test]
    fn test_explicit_file_must_exist() -> Result<()> {
        let dir = tempdir()?;
        let err = load_config_file(&dir.path().join("missing.yaml")).err();
        assert!(matches!(
            err,
            Some(LabelCheckError::Infrastructure(InfrastructureError::ConfigNotFound(_)))
        ));
        Ok(())
    }

    #[test]
    fn test_env_overrides() -> Result<()> {
        let mut config = VerificationConfig::default();
        apply_overrides(&mut config, |key| match key {
            ENV_CONCURRENCY => Some("12".to_string()),
            ENV_SKIP_QUALITY => Some("true".to_string()),
            _ => None,
        })?;
        assert_eq!(config.batch.concurrency, 12);
        assert!(!config.assess_image_quality);

        let bad = apply_overrides(&mut config, |key| {
            (key == ENV_CONCURRENCY).then(|| "many".to_string())
        });
        assert!(matches!(bad, Err(InfrastructureError::ConfigError(_))));
        Ok(())
    }
}
