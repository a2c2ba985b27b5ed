//! nativecall Configuration
//!
//! Handles parsing and management of nativecall.toml configuration files.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name searched for by [`NativecallConfig::find_and_load`].
pub const CONFIG_FILE_NAME: &str = "nativecall.toml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config file not found: {0}")]
    NotFound(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Root configuration structure matching nativecall.toml.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct NativecallConfig {
    /// Where the shared library lives
    #[serde(default)]
    pub library: LibraryConfig,

    /// Sample data for the demo run
    #[serde(default)]
    pub demo: DemoConfig,
}

impl NativecallConfig {
    /// Load configuration from a file path.
    ///
    /// A relative `library.dir` is taken relative to the directory holding
    /// the file, not the current directory.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let mut config: NativecallConfig = toml::from_str(&content)?;
        if let Some(base) = path.parent() {
            config.library.rebase(base);
        }
        Ok(config)
    }

    /// Load configuration from the current directory or parents.
    pub fn load_from_cwd() -> ConfigResult<Self> {
        let cwd = std::env::current_dir()?;
        Self::find_and_load(&cwd)
    }

    /// Find and load configuration by searching up from the given directory.
    pub fn find_and_load(start_dir: &Path) -> ConfigResult<Self> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Self::load(&config_path);
            }
            if !dir.pop() {
                return Ok(Self::default());
            }
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Shared library location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LibraryConfig {
    /// Directory holding the library
    #[serde(default = "default_dir")]
    pub dir: PathBuf,

    /// Logical library name, without prefix or extension
    #[serde(default = "default_name")]
    pub name: String,
}

impl LibraryConfig {
    /// Anchor a relative `dir` at `base`
    pub fn rebase(&mut self, base: &Path) {
        if self.dir.is_relative() {
            self.dir = base.join(&self.dir);
        }
    }
}

fn default_dir() -> PathBuf {
    PathBuf::from("build")
}

fn default_name() -> String {
    "mylib".to_string()
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            name: default_name(),
        }
    }
}

/// Inputs for the demo call sequence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DemoConfig {
    /// Arguments for `twice_int`
    #[serde(default = "default_ints")]
    pub ints: Vec<i32>,

    /// Argument for `twice_float`
    #[serde(default = "default_float")]
    pub float: f32,

    /// Strings for `print_str`, sent as UTF-8 bytes
    #[serde(default = "default_strings")]
    pub strings: Vec<String>,

    /// Number of random floats handed to `test_array`
    #[serde(default = "default_array_len")]
    pub array_len: usize,

    /// Fixed RNG seed; random when unset
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_ints() -> Vec<i32> {
    vec![21, 32]
}

#[allow(clippy::approx_constant)]
fn default_float() -> f32 {
    3.14
}

fn default_strings() -> Vec<String> {
    vec!["Hello, C++!".to_string(), "我系佳佳辉".to_string()]
}

fn default_array_len() -> usize {
    16
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            ints: default_ints(),
            float: default_float(),
            strings: default_strings(),
            array_len: default_array_len(),
            seed: None,
        }
    }
}
