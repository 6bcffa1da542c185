mod schema;

pub use schema::{Currency, Pricing, PricingUpdate, Settings, SettingsUpdate};

use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::scoring::validate_scoring;

/// Get the config directory path (~/.config/erp-scorecard/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("erp-scorecard"))
}

/// Get the default settings file path (~/.config/erp-scorecard/settings.yaml)
pub fn get_settings_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("settings.yaml"))
}

/// Get the default data directory (<platform data dir>/erp-scorecard/)
pub fn get_data_dir() -> Result<PathBuf> {
    let base = dirs::data_dir()
        .or_else(dirs::home_dir)
        .context("Could not determine a data directory")?;
    Ok(base.join("erp-scorecard"))
}

/// Ensure a directory exists
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory at {}", dir.display()))?;
    }
    Ok(())
}

/// Load settings from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to the settings file. If None, uses the default
///   path (~/.config/erp-scorecard/settings.yaml)
///
/// A missing file yields [`Settings::default`].
///
/// # Errors
///
/// Returns an error if:
/// - The settings file cannot be read
/// - The YAML cannot be parsed
pub fn load_settings(path: Option<PathBuf>) -> Result<Settings> {
    let settings_path = match path {
        Some(p) => p,
        None => get_settings_path()?,
    };

    if !settings_path.exists() {
        tracing::info!(
            path = %settings_path.display(),
            "settings file not found, using defaults"
        );
        return Ok(Settings::default());
    }

    let content = fs::read_to_string(&settings_path)
        .with_context(|| format!("Failed to read settings file at {}", settings_path.display()))?;

    let settings: Settings = serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse settings: invalid YAML in {}", settings_path.display()))?;

    tracing::debug!(
        path = %settings_path.display(),
        version = settings.version,
        "loaded settings"
    );

    Ok(settings)
}

/// Save settings to a YAML file atomically, creating the parent directory.
pub fn save_settings(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }

    let yaml = serde_saphyr::to_string(settings)
        .map_err(|e| anyhow::anyhow!("Failed to serialize settings: {}", e))?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(yaml.as_bytes())
        .context("Failed to write settings")?;
    file.commit().context("Failed to save settings")?;

    tracing::info!(path = %path.display(), version = settings.version, "saved settings");
    Ok(())
}

/// Validate settings. Returns all validation errors at once.
pub fn validate_settings(settings: &Settings) -> Result<(), Vec<String>> {
    let mut errors = match validate_scoring(&settings.weights, &settings.rules) {
        Ok(()) => Vec::new(),
        Err(errors) => errors,
    };

    if settings.version == 0 {
        errors.push("version: must be at least 1".to_string());
    }

    let currency = settings.currency;
    if settings.pricing.tier_a_price(currency).is_none() {
        errors.push(format!("pricing.tier_a: no price for {}", currency));
    }
    if settings.pricing.tier_b_price(currency).is_none() {
        errors.push(format!("pricing.tier_b: no price for {}", currency));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Apply an admin update to `current`, returning the new settings only if
/// they validate. The version is bumped.
pub fn update_settings(current: &Settings, update: SettingsUpdate) -> Result<Settings, Vec<String>> {
    let next = current.with_update(update);
    validate_settings(&next)?;
    Ok(next)
}
