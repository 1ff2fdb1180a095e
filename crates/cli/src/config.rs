//! Configuration file support for preprocessing runs

use anyhow::{Context, Result};
use arxprep_core::{DedupKeep, PipelineConfig};
use arxprep_formats::WriteMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Run configuration as read from a file or from command-line flags.
///
/// Every field is optional so that a file and the command line can be
/// layered; unset fields fall back to [`PipelineConfig::default`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dedup_keep: Option<DedupKeep>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drop_empty: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_id: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_mode: Option<WriteMode>,
}

/// A fully resolved run
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRun {
    pub input: PathBuf,
    pub output: PathBuf,
    pub pipeline: PipelineConfig,
}

fn extension_of(path: &Path) -> &str {
    path.extension().and_then(|s| s.to_str()).unwrap_or("")
}

impl RunConfig {
    /// Load configuration from a file (YAML or TOML)
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = extension_of(path);
        match extension {
            "yaml" | "yml" => serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display())),
            "toml" => toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display())),
            _ => Err(anyhow::anyhow!(
                "Unsupported config file format: {}. Use .yaml, .yml, or .toml",
                extension
            )),
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let extension = extension_of(path);

        let content = match extension {
            "yaml" | "yml" => serde_yaml::to_string(self)?,
            "toml" => toml::to_string_pretty(self)?,
            _ => {
                return Err(anyhow::anyhow!(
                    "Unsupported config file format: {}. Use .yaml, .yml, or .toml",
                    extension
                ))
            }
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Layer `overrides` on top of `self`; set fields in `overrides` win.
    pub fn merge(self, overrides: RunConfig) -> Self {
        Self {
            input: overrides.input.or(self.input),
            output: overrides.output.or(self.output),
            chunk_size: overrides.chunk_size.or(self.chunk_size),
            dedup_keep: overrides.dedup_keep.or(self.dedup_keep),
            drop_empty: overrides.drop_empty.or(self.drop_empty),
            include_id: overrides.include_id.or(self.include_id),
            write_mode: overrides.write_mode.or(self.write_mode),
        }
    }

    /// Pipeline settings with defaults filled in
    pub fn pipeline_config(&self) -> PipelineConfig {
        let defaults = PipelineConfig::default();
        PipelineConfig {
            chunk_size: self.chunk_size.unwrap_or(defaults.chunk_size),
            dedup_keep: self.dedup_keep.unwrap_or(defaults.dedup_keep),
            drop_empty: self.drop_empty.unwrap_or(defaults.drop_empty),
            include_id: self.include_id.unwrap_or(defaults.include_id),
            write_mode: self.write_mode.unwrap_or(defaults.write_mode),
        }
    }

    /// Require input and output paths and resolve the pipeline settings.
    pub fn resolve(self) -> Result<ResolvedRun> {
        let pipeline = self.pipeline_config();
        let input = self
            .input
            .context("No input file given (use --input or set `input` in the config file)")?;
        let output = self
            .output
            .context("No output file given (use --output or set `output` in the config file)")?;

        Ok(ResolvedRun {
            input,
            output,
            pipeline,
        })
    }
}
