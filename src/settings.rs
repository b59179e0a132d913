//! Simulation settings
//!
//! Persisted as JSON. Missing fields fall back to defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::FRAME_DELAY_US;
use crate::error::Result;
use crate::renderer::{ColorToken, DEFAULT_PALETTE, Palette};
use crate::sim::SimParams;

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Population and force-law tuning
    pub sim: SimParams,
    /// Sleep between ticks (microseconds)
    pub frame_delay_us: u64,
    /// RNG seed; drawn at startup when absent
    pub seed: Option<u64>,
    /// Background color followed by one color per particle kind
    pub palette: Vec<ColorToken>,
    /// Glyph painted for each particle cell
    pub glyph: char,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sim: SimParams::default(),
            frame_delay_us: FRAME_DELAY_US,
            seed: None,
            palette: DEFAULT_PALETTE.to_vec(),
            glyph: ' ',
        }
    }
}

impl Settings {
    /// Settings file looked up in the working directory
    pub const FILE_NAME: &'static str = "particle-term.json";

    pub fn frame_delay(&self) -> Duration {
        Duration::from_micros(self.frame_delay_us)
    }

    /// Check simulation parameters and that the palette covers every kind
    pub fn validate(&self) -> Result<()> {
        self.sim.validate()?;
        self.palette()?;
        Ok(())
    }

    /// Validated palette for the configured number of kinds
    pub fn palette(&self) -> Result<Palette> {
        Palette::new(self.palette.clone(), self.sim.n_types)
    }

    /// Configured seed, or a fresh one from the OS
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path.as_ref())?;
        let settings: Settings = serde_json::from_str(&json)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Load from [`Self::FILE_NAME`] if present, else defaults
    pub fn load() -> Result<Self> {
        let path = Path::new(Self::FILE_NAME);
        if path.exists() {
            return Self::load_from(path);
        }
        log::info!("Using default settings");
        Ok(Self::default())
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
