//! Configuration management for `SiteMetrics`
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::SiteMetricsError;
use crate::metrics::distance::DEFAULT_MINUTES_PER_KM;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteMetricsConfig {
    /// Metric thresholds
    #[serde(default)]
    pub metrics: MetricsConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Thresholds used by the dashboard and the drift report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Average road pace for travel estimates
    #[serde(default = "default_minutes_per_km")]
    pub minutes_per_km: f64,
    /// Radius for counting nearby competitors
    #[serde(default = "default_competitor_radius")]
    pub competitor_radius_km: f64,
    /// Radius for counting reachable factories
    #[serde(default = "default_factory_radius")]
    pub factory_radius_km: f64,
    /// Competitors at or below this distance are tagged near
    #[serde(default = "default_near_competitor")]
    pub near_competitor_km: f64,
    /// Length of the nearest-competitor ranking
    #[serde(default = "default_top_competitors")]
    pub top_competitors: usize,
    /// Allowed gap between stored and computed distances
    #[serde(default = "default_drift_tolerance")]
    pub drift_tolerance_km: f64,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_minutes_per_km() -> f64 {
    DEFAULT_MINUTES_PER_KM
}

fn default_competitor_radius() -> f64 {
    5.0
}

fn default_factory_radius() -> f64 {
    10.0
}

fn default_near_competitor() -> f64 {
    3.0
}

fn default_top_competitors() -> usize {
    5
}

fn default_drift_tolerance() -> f64 {
    0.1
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            minutes_per_km: default_minutes_per_km(),
            competitor_radius_km: default_competitor_radius(),
            factory_radius_km: default_factory_radius(),
            near_competitor_km: default_near_competitor(),
            top_competitors: default_top_competitors(),
            drift_tolerance_km: default_drift_tolerance(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl SiteMetricsConfig {
    /// Load configuration from a file and `SITEMETRICS_` environment variables.
    ///
    /// Without a path the user config directory is tried, then `config.toml`.
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // SITEMETRICS_METRICS__COMPETITOR_RADIUS_KM=4 overrides metrics.competitor_radius_km
        builder = builder.add_source(
            Environment::with_prefix("SITEMETRICS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: SiteMetricsConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        // Apply defaults for missing values
        config.apply_defaults();

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sitemetrics").join("config.toml"))
    }

    /// Treat zeroed or empty fields as unset
    pub fn apply_defaults(&mut self) {
        if self.metrics.minutes_per_km == 0.0 {
            self.metrics.minutes_per_km = default_minutes_per_km();
        }
        if self.metrics.top_competitors == 0 {
            self.metrics.top_competitors = default_top_competitors();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        let m = &self.metrics;

        if !m.minutes_per_km.is_finite() || m.minutes_per_km <= 0.0 {
            return Err(SiteMetricsError::config("Minutes per km must be positive").into());
        }

        if m.minutes_per_km > 60.0 {
            return Err(SiteMetricsError::config("Minutes per km cannot exceed 60").into());
        }

        for (name, value) in [
            ("Competitor radius", m.competitor_radius_km),
            ("Factory radius", m.factory_radius_km),
            ("Near competitor distance", m.near_competitor_km),
            ("Drift tolerance", m.drift_tolerance_km),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SiteMetricsError::config(format!("{name} must not be negative")).into());
            }
            if value > 500.0 {
                return Err(SiteMetricsError::config(format!("{name} cannot exceed 500 km")).into());
            }
        }

        if m.top_competitors > 100 {
            return Err(SiteMetricsError::config("Top competitors cannot exceed 100").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(SiteMetricsError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(SiteMetricsError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}
