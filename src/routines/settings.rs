use config::Config as eConfig;
use eyre::{ensure, Result, WrapErr};
use serde_derive::{Deserialize, Serialize};
use std::path::Path;

use crate::routines::evaluation::dwd::HESSIAN_EPS;
use crate::routines::evaluation::oracle::{DwdConstraint, ProjectionMode};

/// Settings of a DWD problem
///
/// Read from a TOML file with [Settings::from_file], any field can be left out and falls back to its default.
/// Environment variables prefixed with `DWD_` override the file, using `__` between nested keys,
/// e.g. `DWD_MODEL__Q=2`.
#[derive(Debug, Deserialize, Clone, Serialize, PartialEq, Default)]
pub struct Settings {
    #[serde(default)]
    pub model: Model,
    #[serde(default)]
    pub log: Log,
}

/// Hyperparameters of the loss and the feasible set
#[derive(Debug, Deserialize, Clone, Serialize, PartialEq)]
pub struct Model {
    /// Smoothing exponent of the loss, `q = 1` is classical DWD
    #[serde(default = "default_q")]
    pub q: f64,
    /// Radius `R` of the slack ball
    #[serde(default = "default_one")]
    pub radius: f64,
    /// Half-width `u` of the intercept box
    #[serde(default = "default_one")]
    pub bound: f64,
    #[serde(default = "default_hessian_eps")]
    pub hessian_eps: f64,
    #[serde(default)]
    pub projection: ProjectionMode,
}

impl Default for Model {
    fn default() -> Self {
        Model {
            q: default_q(),
            radius: default_one(),
            bound: default_one(),
            hessian_eps: default_hessian_eps(),
            projection: ProjectionMode::default(),
        }
    }
}

/// Logging configuration, see [crate::routines::logger::setup_log]
#[derive(Debug, Deserialize, Clone, Serialize, PartialEq)]
pub struct Log {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Optional log file, written in addition to stdout
    pub file: Option<String>,
}

impl Default for Log {
    fn default() -> Self {
        Log {
            level: default_log_level(),
            file: None,
        }
    }
}

impl Settings {
    /// Read settings from a TOML file, with environment overrides
    pub fn from_file(path: impl AsRef<Path>) -> Result<Settings> {
        let path = path.as_ref();
        let parsed = eConfig::builder()
            .add_source(config::File::from(path).format(config::FileFormat::Toml))
            .add_source(
                config::Environment::with_prefix("DWD")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .wrap_err_with(|| format!("Unable to read settings from {}", path.display()))?;

        let settings: Settings = parsed
            .try_deserialize()
            .wrap_err("Unable to parse settings")?;
        settings.validate()?;

        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        let model = &self.model;
        ensure!(
            model.q.is_finite() && model.q > 0.0,
            "model.q must be positive and finite, got {}",
            model.q
        );
        ensure!(
            model.radius >= 0.0,
            "model.radius must be non-negative, got {}",
            model.radius
        );
        ensure!(
            model.bound >= 0.0,
            "model.bound must be non-negative, got {}",
            model.bound
        );
        ensure!(
            model.hessian_eps >= 0.0,
            "model.hessian_eps must be non-negative, got {}",
            model.hessian_eps
        );
        Ok(())
    }

    /// Feasible set described by these settings
    pub fn constraint(&self) -> DwdConstraint {
        DwdConstraint::new(self.model.radius, self.model.bound).with_mode(self.model.projection)
    }

    /// Pretty-printed JSON snapshot of the settings
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// *********************************
// Default values for deserializing
// *********************************
fn default_q() -> f64 {
    1.0
}

fn default_one() -> f64 {
    1.0
}

fn default_hessian_eps() -> f64 {
    HESSIAN_EPS
}

fn default_log_level() -> String {
    "info".to_string()
}
