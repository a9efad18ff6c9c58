//! Routing configuration
//!
//! The routing document is read once, when a [`TaskRouter`](crate::TaskRouter)
//! is built, and is immutable afterwards. Loading is fail-fast: a missing
//! file, an unknown format, a parse error or a missing model role aborts
//! construction instead of falling back to defaults.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

// ============================================================================
// Model Role
// ============================================================================

/// The three model slots the router can select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelRole {
    /// Default model for routine work
    Primary,
    /// Model for complex, multi-file or regulated work
    Complex,
    /// Model for planning and analysis
    Planning,
}

impl ModelRole {
    /// All roles, in config order
    pub const ALL: [ModelRole; 3] = [Self::Primary, Self::Complex, Self::Planning];

    /// Returns the config key for this role
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Complex => "complex",
            Self::Planning => "planning",
        }
    }

    /// Parse a config key; `None` for anything that is not a role
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.as_str() == name)
    }
}

impl fmt::Display for ModelRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Model Profile
// ============================================================================

/// Per-model rate limits
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimits {
    /// Requests allowed per minute; `None` means unbounded
    ///
    /// Accepts any non-negative whole number, including float spellings such
    /// as `50.0`.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_limit"
    )]
    pub requests_per_minute: Option<u64>,
}

fn deserialize_limit<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Limit {
        Whole(u64),
        Float(f64),
    }

    match Option::<Limit>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Limit::Whole(limit)) => Ok(Some(limit)),
        Some(Limit::Float(limit))
            if limit >= 0.0 && limit.fract() == 0.0 && limit < u64::MAX as f64 =>
        {
            Ok(Some(limit as u64))
        }
        Some(Limit::Float(limit)) => Err(serde::de::Error::custom(format!(
            "requestsPerMinute must be a non-negative whole number, got {limit}"
        ))),
    }
}

/// A configured backend model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelProfile {
    /// Backend model name
    pub name: String,
    /// Cost charged per token
    pub cost_per_unit: f64,
    /// Rate limits
    #[serde(default, alias = "requestLimits")]
    pub rate_limits: RateLimits,
}

impl ModelProfile {
    /// Create an unbounded profile
    #[must_use]
    pub fn new(name: impl Into<String>, cost_per_unit: f64) -> Self {
        Self {
            name: name.into(),
            cost_per_unit,
            rate_limits: RateLimits::default(),
        }
    }

    /// Set the per-minute request limit
    #[must_use]
    pub fn with_requests_per_minute(mut self, limit: u64) -> Self {
        self.rate_limits.requests_per_minute = Some(limit);
        self
    }

    /// Cost of `tokens` tokens on this model
    #[must_use]
    pub fn cost_for(&self, tokens: u64) -> f64 {
        tokens as f64 * self.cost_per_unit
    }
}

// ============================================================================
// Model Set
// ============================================================================

/// The `models` section: exactly one profile per [`ModelRole`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSet {
    /// Default model
    pub primary: ModelProfile,
    /// Complex-task model
    pub complex: ModelProfile,
    /// Planning model
    pub planning: ModelProfile,
}

impl ModelSet {
    /// Profile for a role
    #[must_use]
    pub fn get(&self, role: ModelRole) -> &ModelProfile {
        match role {
            ModelRole::Primary => &self.primary,
            ModelRole::Complex => &self.complex,
            ModelRole::Planning => &self.planning,
        }
    }

    /// Look up a profile by role key
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<(ModelRole, &ModelProfile)> {
        ModelRole::from_name(name).map(|role| (role, self.get(role)))
    }

    /// Look up a profile by role key, substituting `primary` when the name
    /// is not a configured role.
    ///
    /// This is the only place the fallback policy lives.
    #[must_use]
    pub fn resolve_or_default(&self, name: &str) -> (ModelRole, &ModelProfile) {
        self.lookup(name).unwrap_or_else(|| {
            warn!(model = %name, "Unknown model requested, falling back to primary");
            (ModelRole::Primary, &self.primary)
        })
    }

    /// Iterate over all roles and their profiles
    pub fn iter(&self) -> impl Iterator<Item = (ModelRole, &ModelProfile)> {
        ModelRole::ALL.into_iter().map(move |role| (role, self.get(role)))
    }
}

// ============================================================================
// Routing Config
// ============================================================================

/// Config file format, picked from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.json`
    Json,
    /// `.toml`
    Toml,
}

impl ConfigFormat {
    /// Detect the format of `path`
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            _ => Err(Error::UnsupportedConfigFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// The routing document
///
/// Only `models` is interpreted. The other sections are carried verbatim
/// for [`TaskRouter::export_config`](crate::TaskRouter::export_config).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingConfig {
    /// Model profiles
    pub models: ModelSet,
    /// Opaque routing strategy section
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routing_strategy: Option<Value>,
    /// Opaque cost optimization section
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_optimization: Option<Value>,
    /// Opaque integration settings section
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integration_settings: Option<Value>,
}

impl RoutingConfig {
    /// Build a config from model profiles only
    #[must_use]
    pub fn new(models: ModelSet) -> Self {
        Self {
            models,
            routing_strategy: None,
            cost_optimization: None,
            integration_settings: None,
        }
    }

    /// Load and validate the routing document at `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::parse(&content, format, path)?;
        info!(
            path = %path.display(),
            primary = %config.models.primary.name,
            complex = %config.models.complex.name,
            planning = %config.models.planning.name,
            "Loaded routing configuration"
        );
        Ok(config)
    }

    /// Parse and validate a routing document held in memory
    pub fn from_content(content: &str, format: ConfigFormat) -> Result<Self> {
        Self::parse(content, format, Path::new("<inline>"))
    }

    fn parse(content: &str, format: ConfigFormat, path: &Path) -> Result<Self> {
        let parse_error = |message: String| Error::ConfigParse {
            path: PathBuf::from(path),
            message,
        };

        let config: Self = match format {
            ConfigFormat::Json => {
                serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?
            }
            ConfigFormat::Toml => toml::from_str(content).map_err(|e| parse_error(e.to_string()))?,
        };

        config.validate()?;
        debug!(path = %path.display(), "Routing configuration validated");
        Ok(config)
    }

    /// Check constraints serde cannot express
    pub fn validate(&self) -> Result<()> {
        for (role, profile) in self.models.iter() {
            if profile.name.trim().is_empty() {
                return Err(Error::InvalidConfig(format!(
                    "models.{role}.name must not be empty"
                )));
            }
            if !profile.cost_per_unit.is_finite() || profile.cost_per_unit < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "models.{role}.costPerUnit must be a non-negative number, got {}",
                    profile.cost_per_unit
                )));
            }
        }
        Ok(())
    }
}
