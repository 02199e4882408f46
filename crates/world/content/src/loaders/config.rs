//! Engine configuration loader.

use std::path::Path;
use std::str::FromStr;

use world_core::{EngineConfig, FramePadding};

use crate::loaders::{LoadResult, read_file};

/// Loader for engine configuration from TOML files and the environment.
pub struct ConfigLoader;

impl ConfigLoader {
    pub const ENV_SEED: &'static str = "WORLD_SEED";
    pub const ENV_MAX_HISTORY: &'static str = "WORLD_MAX_HISTORY";
    pub const ENV_MAX_LOOP_ITERATIONS: &'static str = "WORLD_MAX_LOOP_ITERATIONS";
    pub const ENV_FRAME_PADDING: &'static str = "WORLD_FRAME_PADDING";
    pub const ENV_RECORD_FRAMES: &'static str = "WORLD_RECORD_FRAMES";

    /// Load config data from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<EngineConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<EngineConfig> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))
    }

    /// Applies `WORLD_*` overrides from the process environment.
    pub fn from_env(base: EngineConfig) -> LoadResult<EngineConfig> {
        Self::with_overrides(base, |key| std::env::var(key).ok())
    }

    /// Applies overrides looked up through `lookup`.
    pub fn with_overrides(
        mut config: EngineConfig,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> LoadResult<EngineConfig> {
        if let Some(seed) = parse_var(&lookup, Self::ENV_SEED)? {
            config.seed = seed;
        }
        if let Some(max_history) = parse_var(&lookup, Self::ENV_MAX_HISTORY)? {
            config.max_history = max_history;
        }
        if let Some(max_loop_iterations) = parse_var(&lookup, Self::ENV_MAX_LOOP_ITERATIONS)? {
            config.max_loop_iterations = max_loop_iterations;
        }
        if let Some(padding) = parse_var::<FramePadding>(&lookup, Self::ENV_FRAME_PADDING)? {
            config.frame_padding = padding;
        }
        if let Some(record_frames) = parse_var(&lookup, Self::ENV_RECORD_FRAMES)? {
            config.record_frames = record_frames;
        }
        Ok(config)
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> LoadResult<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let value = raw
        .trim()
        .parse::<T>()
        .map_err(|e| anyhow::anyhow!("Invalid value for {}: '{}' ({})", key, raw, e))?;
    tracing::debug!(key, value = %raw.trim(), "config override from environment");
    Ok(Some(value))
}
