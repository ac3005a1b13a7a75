use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::encode::writer::OutputFormat;
use crate::render::lcd::RenderStyle;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub spectrum: SpectrumSection,
    #[serde(default)]
    pub adc: AdcSection,
    #[serde(default)]
    pub display: DisplaySection,
}

#[derive(Debug, Deserialize)]
pub struct SpectrumSection {
    #[serde(default = "default_samples")]
    pub samples: usize,
    #[serde(default = "default_bins")]
    pub bins: usize,
    #[serde(default = "default_sampling_frequency")]
    pub sampling_frequency: f64,
}

#[derive(Debug, Deserialize)]
pub struct AdcSection {
    #[serde(default = "default_adc_bits")]
    pub bits: u32,
    #[serde(default = "default_gain")]
    pub gain: f64,
}

#[derive(Debug, Default, Deserialize)]
pub struct DisplaySection {
    #[serde(default)]
    pub style: RenderStyle,
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for SpectrumSection {
    fn default() -> Self {
        Self {
            samples: default_samples(),
            bins: default_bins(),
            sampling_frequency: default_sampling_frequency(),
        }
    }
}

impl Default for AdcSection {
    fn default() -> Self {
        Self {
            bits: default_adc_bits(),
            gain: default_gain(),
        }
    }
}

pub fn default_samples() -> usize { 128 }
pub fn default_bins() -> usize { 16 }
pub fn default_sampling_frequency() -> f64 { 1800.0 }
pub fn default_adc_bits() -> u32 { 10 }
pub fn default_gain() -> f64 { 1.0 }

pub fn load_config(path: &Path) -> Option<Config> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            log::warn!("Cannot read config {}: {}", path.display(), err);
            return None;
        }
    };
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(err) => {
            log::warn!("Invalid config {}: {}", path.display(), err);
            None
        }
    }
}

/// `./lcdbars.toml`, then `~/.config/lcdbars/config.toml`, then the
/// platform config directory.
pub fn discover_config() -> Option<PathBuf> {
    let local = PathBuf::from("lcdbars.toml");
    if local.exists() {
        return Some(local);
    }
    if let Some(home) = dirs::home_dir() {
        let xdg = home.join(".config").join("lcdbars").join("config.toml");
        if xdg.exists() {
            return Some(xdg);
        }
    }
    if let Some(config_dir) = dirs::config_dir() {
        let platform = config_dir.join("lcdbars").join("config.toml");
        if platform.exists() {
            return Some(platform);
        }
    }
    None
}
