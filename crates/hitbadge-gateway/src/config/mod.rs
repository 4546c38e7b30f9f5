//! Service config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use hitbadge_core::error::{BadgeError, Result};

pub use schema::{BadgeSection, BadgeServiceConfig, ServerSection, StoreKind, StoreSection};

/// Config path used when `HITBADGE_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "hitbadge.yaml";

pub fn load_from_file(path: &str) -> Result<BadgeServiceConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| BadgeError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<BadgeServiceConfig> {
    let cfg: BadgeServiceConfig = serde_yaml::from_str(s)
        .map_err(|e| BadgeError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Resolve the config: an explicit `HITBADGE_CONFIG` path must load; the
/// default path is optional and falls back to built-in defaults.
pub fn load_default() -> Result<BadgeServiceConfig> {
    match std::env::var("HITBADGE_CONFIG") {
        Ok(path) => load_from_file(&path),
        Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => load_from_file(DEFAULT_CONFIG_PATH),
        Err(_) => {
            tracing::info!("no config file, using defaults");
            Ok(BadgeServiceConfig::default())
        }
    }
}
