//! Solver Configuration Module
//!
//! Provides configuration loading for the StableSwap invariant solver.
//! Supports loading from a TOML file with environment variable overrides.

use crate::defaults::{DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE, ENV_PREFIX};
use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Newton iteration parameters shared by the `D` and `y` solvers
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct SolverConfig {
    /// Upper bound on Newton iterations per call
    pub max_iterations: u32,

    /// Stop once successive approximations differ by at most this many units
    pub tolerance: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl SolverConfig {
    /// Load configuration from an optional TOML file with environment overrides
    ///
    /// Fields absent from every source keep their defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            info!("Loading solver config: {:?}", path);
            builder = builder.add_source(File::from(path).required(true));
        }

        // Override with environment variables (STABLESWAP_ prefix)
        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));

        let settings = builder
            .build()
            .context("Failed to build solver configuration")?;

        let config: SolverConfig = settings
            .try_deserialize()
            .context("Failed to deserialize solver configuration")?;

        config.validate()?;
        debug!(
            max_iterations = config.max_iterations,
            tolerance = config.tolerance,
            "Solver configuration loaded"
        );

        Ok(config)
    }

    /// Reject parameter combinations the solver cannot honour
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            bail!("max_iterations must be at least 1");
        }
        Ok(())
    }
}

/// Convenience function: defaults plus environment overrides
pub fn load_config() -> Result<SolverConfig> {
    SolverConfig::load(None)
}
