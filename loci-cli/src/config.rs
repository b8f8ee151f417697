use std::fs::read_to_string;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use loci_core::models::ComparisonConfig;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(default)]
pub struct SquishConfig {
    pub wrap_all: bool,
}

///
/// Settings read from `--config`. Missing sections keep their defaults;
/// command line flags take precedence over anything set here.
///
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(default)]
pub struct LociConfig {
    pub comparison: ComparisonConfig,
    pub squish: SquishConfig,
}

impl TryFrom<&Path> for LociConfig {
    type Error = anyhow::Error;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let toml_str = read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: LociConfig = toml::from_str(&toml_str)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        config.comparison.validate()?;
        Ok(config)
    }
}
