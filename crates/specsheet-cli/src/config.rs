//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use specsheet_extractor::ExtractorConfig;
use specsheet_sink::{ImageMode, ImageOptions};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name
    #[serde(default = "default_profile")]
    pub active_profile: String,

    /// Available profiles, one per price-list layout
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Price-list layout profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    /// Price list to read
    pub input_path: PathBuf,

    /// Catalog to write
    pub output_path: PathBuf,

    /// Directory of cell-named images next to the price list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images_dir: Option<PathBuf>,

    /// CSV field delimiter
    pub delimiter: char,

    /// Drop text lines without a unit token
    pub skip_lines_without_units: bool,

    /// Image output options
    pub images: ImageOptions,

    /// Column layout and extraction settings
    pub extractor: ExtractorConfig,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("price.csv"),
            output_path: PathBuf::from("catalog.json"),
            images_dir: None,
            delimiter: ',',
            skip_lines_without_units: true,
            images: ImageOptions::default(),
            extractor: ExtractorConfig::default(),
        }
    }
}

impl Profile {
    /// Price-list layout with conventional image URLs
    pub fn price_list() -> Self {
        Self {
            images: ImageOptions {
                mode: ImageMode::Url,
                url_base: "https://ene-rgy.ru/images".to_string(),
                ..Default::default()
            },
            extractor: ExtractorConfig::price_list(),
            ..Default::default()
        }
    }

    /// CSV delimiter as a byte.
    pub fn delimiter_byte(delimiter: char) -> Result<u8> {
        u8::try_from(delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                CliError::InvalidInput(format!("Delimiter must be ASCII, got '{}'", delimiter))
            })
    }
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".specsheet").join("config.toml"))
    }

    /// Load configuration from `path`, or the defaults when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Check every profile's settings.
    pub fn validate(&self) -> Result<()> {
        for (name, profile) in &self.profiles {
            profile
                .extractor
                .validate()
                .and_then(|_| profile.images.validate())
                .map_err(|e| CliError::Config(format!("Profile '{}': {}", name, e)))?;
        }
        Ok(())
    }

    /// Get the active profile.
    pub fn get_active_profile(&self) -> Result<&Profile> {
        self.profiles
            .get(&self.active_profile)
            .ok_or_else(|| CliError::Config(format!("Profile '{}' not found", self.active_profile)))
    }

    /// Add or update a profile.
    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Switch to a different profile.
    pub fn switch_profile(&mut self, name: String) -> Result<()> {
        if !self.profiles.contains_key(&name) {
            return Err(CliError::Config(format!("Profile '{}' does not exist", name)));
        }
        self.active_profile = name;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        let mut profiles = BTreeMap::new();
        profiles.insert("default".to_string(), Profile::default());
        profiles.insert("price-list".to_string(), Profile::price_list());

        Self {
            active_profile: "default".to_string(),
            profiles,
            settings: Settings::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_profile() -> String {
    "default".to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
