use serde::Deserialize;
use hitbadge_core::error::{BadgeError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BadgeServiceConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub store: StoreSection,

    #[serde(default)]
    pub badge: BadgeSection,
}

impl BadgeServiceConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(BadgeError::UnsupportedVersion);
        }

        self.server.validate()?;
        self.store.validate()?;
        self.badge.validate()?;

        Ok(())
    }
}

impl Default for BadgeServiceConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            store: StoreSection::default(),
            badge: BadgeSection::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self { listen: default_listen() }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        if self.listen.trim().is_empty() {
            return Err(BadgeError::BadRequest("server.listen must not be empty".into()));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:3000".into()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StoreKind {
    #[default]
    Memory,
    Sqlite,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    #[serde(default)]
    pub kind: StoreKind,

    #[serde(default = "default_db_path")]
    pub path: String,

    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            kind: StoreKind::default(),
            path: default_db_path(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

impl StoreSection {
    pub fn validate(&self) -> Result<()> {
        if self.kind == StoreKind::Sqlite && self.path.trim().is_empty() {
            return Err(BadgeError::BadRequest(
                "store.path must not be empty for the sqlite store".into(),
            ));
        }
        if !(1..=60000).contains(&self.busy_timeout_ms) {
            return Err(BadgeError::BadRequest(
                "store.busy_timeout_ms must be between 1 and 60000".into(),
            ));
        }
        Ok(())
    }
}

fn default_db_path() -> String {
    "hitbadge.db".into()
}
fn default_busy_timeout_ms() -> u64 {
    5000
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BadgeSection {
    #[serde(default = "default_label")]
    pub default_label: String,

    /// Style for the "No Site" badge when the request names none.
    #[serde(default = "default_missing_site_style")]
    pub missing_site_style: String,
}

impl Default for BadgeSection {
    fn default() -> Self {
        Self {
            default_label: default_label(),
            missing_site_style: default_missing_site_style(),
        }
    }
}

impl BadgeSection {
    pub fn validate(&self) -> Result<()> {
        if self.default_label.is_empty() {
            return Err(BadgeError::BadRequest("badge.default_label must not be empty".into()));
        }
        if hitbadge_core::badge::StyleId::parse(&self.missing_site_style).is_none() {
            return Err(BadgeError::BadRequest(format!(
                "badge.missing_site_style is not a known style: {}",
                self.missing_site_style
            )));
        }
        Ok(())
    }
}

fn default_label() -> String {
    hitbadge_core::badge::DEFAULT_LABEL.into()
}
fn default_missing_site_style() -> String {
    "flat-red".into()
}
