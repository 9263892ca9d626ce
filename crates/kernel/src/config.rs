//! Configuration loaded from environment variables.

use std::env;

use anyhow::{Context, Result, anyhow, bail};

use crate::menu::{
    BuildOptions, DEFAULT_LOCATION, DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT, TreeStrategy,
};

/// Build configuration for the `navi` binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Tree assembly strategy (default: indexed).
    pub strategy: TreeStrategy,

    /// Maximum nesting depth before the build fails (default: 64, at most 1024).
    pub max_depth: usize,

    /// Fail on invalid, duplicate or unreachable items (default: false).
    pub strict: bool,

    /// Theme location to load when no menu id is given (default: primary_navigation).
    pub location: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strategy: TreeStrategy::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            strict: false,
            location: DEFAULT_LOCATION.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let strategy = match var("NAVI_STRATEGY") {
            Some(value) => value
                .parse()
                .map_err(|e: String| anyhow!(e))
                .context("NAVI_STRATEGY must be `scan` or `indexed`")?,
            None => TreeStrategy::default(),
        };

        let max_depth: usize = var("NAVI_MAX_DEPTH")
            .unwrap_or_else(|| DEFAULT_MAX_DEPTH.to_string())
            .parse()
            .context("NAVI_MAX_DEPTH must be a valid usize")?;
        if max_depth == 0 || max_depth > MAX_DEPTH_LIMIT {
            bail!("NAVI_MAX_DEPTH must be between 1 and {MAX_DEPTH_LIMIT}, got {max_depth}");
        }

        let strict = var("NAVI_STRICT")
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(false);

        let location = var("NAVI_LOCATION")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_LOCATION.to_string());

        Ok(Self {
            strategy,
            max_depth,
            strict,
            location,
        })
    }

    /// Options for the tree builder.
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions::default()
            .strategy(self.strategy)
            .max_depth(self.max_depth)
            .strict(self.strict)
    }
}
