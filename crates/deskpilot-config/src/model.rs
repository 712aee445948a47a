//! Configuration schema for Deskpilot.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Root config for the Deskpilot agent core.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DeskpilotConfig {
    #[serde(default, rename = "$schema")]
    pub schema: Option<String>,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub audio: AudioConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub memory: MemoryConfig,
}

impl DeskpilotConfig {
    /// Validate field invariants the rest of the core relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.max_steps == 0 {
            return Err(ConfigError::Invalid(
                "model.max_steps must be at least 1".to_string(),
            ));
        }
        if self.audio.frame_length == 0 {
            return Err(ConfigError::Invalid(
                "audio.frame_length must be at least 1".to_string(),
            ));
        }
        if self.audio.sample_rate == 0 {
            return Err(ConfigError::Invalid(
                "audio.sample_rate must be at least 1".to_string(),
            ));
        }
        if self.display.scale_factor == 0 {
            return Err(ConfigError::Invalid(
                "display.scale_factor must be at least 1".to_string(),
            ));
        }
        if self.memory.embedding_dim == 0 {
            return Err(ConfigError::Invalid(
                "memory.embedding_dim must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Model invocation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Provider identifier (e.g. anthropic).
    #[serde(default = "default_model_provider")]
    pub provider: String,
    /// Model name under the provider.
    #[serde(default = "default_model_name")]
    pub name: String,
    /// Maximum reasoning/tool steps permitted per conversation run.
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
    /// Optional replacement for the built-in instruction prompt.
    #[serde(default)]
    pub system_prompt: Option<String>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: default_model_provider(),
            name: default_model_name(),
            max_steps: default_max_steps(),
            system_prompt: None,
        }
    }
}

/// Microphone capture configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Capture sample rate in Hz.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    /// Samples per capture frame.
    #[serde(default = "default_frame_length")]
    pub frame_length: usize,
    /// Frame count for one-shot captures (~10 seconds at the defaults).
    #[serde(default = "default_one_shot_frames")]
    pub one_shot_frames: usize,
    /// Directory for the scratch WAV file; system temp dir when unset.
    #[serde(default)]
    pub scratch_dir: Option<String>,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            frame_length: default_frame_length(),
            one_shot_frames: default_one_shot_frames(),
            scratch_dir: None,
        }
    }
}

/// Display scaling configuration for the computer tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Fixed divisor between physical pixels and the model's virtual
    /// resolution. Every model-supplied coordinate is multiplied back by
    /// this factor before being applied.
    #[serde(default = "default_scale_factor")]
    pub scale_factor: i64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            scale_factor: default_scale_factor(),
        }
    }
}

/// Vector memory configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Database file path; `~/.deskpilot/memory.db` when unset.
    #[serde(default)]
    pub path: Option<String>,
    /// Width of the embedding vectors the index is created for.
    #[serde(default = "default_embedding_dim")]
    pub embedding_dim: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            path: None,
            embedding_dim: default_embedding_dim(),
        }
    }
}

fn default_model_provider() -> String {
    "anthropic".to_string()
}

fn default_model_name() -> String {
    "claude-3-5-sonnet-latest".to_string()
}

fn default_max_steps() -> usize {
    25
}

fn default_sample_rate() -> u32 {
    16_000
}

fn default_frame_length() -> usize {
    1024
}

fn default_one_shot_frames() -> usize {
    156
}

fn default_scale_factor() -> i64 {
    2
}

fn default_embedding_dim() -> usize {
    1536
}
