use crate::cipher::DEFAULT_SHIFT;
use crate::pipeline::{Pipeline, TransformStep};
use crate::text::{DEFAULT_MAX_RESCAN_PASSES, ReplacePolicy};
use serde::Deserialize;
use std::path::Path;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ConfigReplacePolicy {
    #[default]
    ForwardScan,
    Rescan,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
#[serde(deny_unknown_fields)]
pub struct ReplaceSettings {
    #[serde(default)]
    pub policy: ConfigReplacePolicy,
    /// Only consulted by the `rescan` policy.
    #[serde(default = "default_max_passes")]
    pub max_passes: usize,
}

fn default_max_passes() -> usize {
    DEFAULT_MAX_RESCAN_PASSES
}

impl ReplaceSettings {
    pub fn policy(&self) -> ReplacePolicy {
        match self.policy {
            ConfigReplacePolicy::ForwardScan => ReplacePolicy::ForwardScan,
            ConfigReplacePolicy::Rescan => ReplacePolicy::Rescan {
                max_passes: self.max_passes,
            },
        }
    }
}

impl Default for ReplaceSettings {
    fn default() -> Self {
        Self {
            policy: ConfigReplacePolicy::default(),
            max_passes: default_max_passes(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
#[serde(deny_unknown_fields)]
pub struct CipherSettings {
    #[serde(default = "default_shift")]
    pub shift: i64,
}

fn default_shift() -> i64 {
    DEFAULT_SHIFT
}

impl Default for CipherSettings {
    fn default() -> Self {
        Self {
            shift: default_shift(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
#[serde(deny_unknown_fields)]
pub struct StrbufConfig {
    #[serde(default)]
    pub replace: ReplaceSettings,
    #[serde(default)]
    pub cipher: CipherSettings,
    #[serde(default)]
    pub pipeline: Vec<TransformStep>,
}

impl StrbufConfig {
    pub fn load_from_file(path: &Path) -> Result<Self, anyhow::Error> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file at {:?}: {}", path, e))?;

        Self::from_toml_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file {:?}: {}", path, e))
    }

    pub fn from_toml_str(content: &str) -> Result<Self, anyhow::Error> {
        let config: StrbufConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse TOML: {}", e))?;
        Ok(config)
    }

    /// Builds the configured pipeline with this config's replace policy and shift.
    pub fn build_pipeline(&self) -> Pipeline {
        Pipeline::new(
            self.pipeline.clone(),
            self.replace.policy(),
            self.cipher.shift,
        )
    }
}
