//! Bot settings loaded from an optional TOML file.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Bot configuration. Every field is optional in the file.
///
/// ```toml
/// name = "PlayoutBot"
/// default_movetime_ms = 500
/// max_fullmoves = 150
/// seed = 7
/// ```
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BotConfig {
    /// Reported in `id name`.
    #[serde(default = "default_name")]
    pub name: String,
    /// Reported in `id author`.
    #[serde(default = "default_author")]
    pub author: String,
    /// Thinking time when `go` carries neither movetime nor a clock.
    #[serde(default = "default_movetime_ms")]
    pub default_movetime_ms: u64,
    /// Playouts still running past this full-move number count as draws.
    #[serde(default = "default_max_fullmoves")]
    pub max_fullmoves: u32,
    /// Fixed RNG seed for reproducible play. Seeded from the OS when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_name() -> String {
    "PlayoutBot".to_string()
}

fn default_author() -> String {
    "Tom Metten".to_string()
}

fn default_movetime_ms() -> u64 {
    1000
}

fn default_max_fullmoves() -> u32 {
    150
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            author: default_author(),
            default_movetime_ms: default_movetime_ms(),
            max_fullmoves: default_max_fullmoves(),
            seed: None,
        }
    }
}

impl BotConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}
