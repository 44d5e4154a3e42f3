//! Generator configuration
//!
//! The file format mirrors the historical option names (`percentFill`,
//! `biome-dist`, `direct-dist`). Everything is optional and falls back to
//! [`GeneratorConfig::default`]. [`GeneratorConfig::validate`] turns the raw
//! options into [`GenerationParams`] that the generation stages consume.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::biomes::{BiomeLabel, BIOME_COUNT};
use crate::error::ConfigError;
use crate::growth::Direction;

/// Generation algorithm selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GenerationMode {
    /// Plant seeds, assign biomes, grow frontiers.
    #[default]
    SeedBiome,
    /// Continent-first generation. Reserved, not implemented.
    SeedContinental,
}

impl GenerationMode {
    /// Parse from string (for config files and CLI)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "seed-biome" | "biome" => Some(Self::SeedBiome),
            "seed-continental" | "continental" => Some(Self::SeedContinental),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::SeedBiome => "seed-biome",
            Self::SeedContinental => "seed-continental",
        }
    }
}

/// Raw `rolls` option: a fixed count or a flag requesting random counts.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RollsSetting {
    Count(i64),
    Random(bool),
}

/// How many neighbours a frontier cell grows into per round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rolls {
    /// Always this many (capped by the available directions).
    Fixed(usize),
    /// Uniform in `[1, available directions]`.
    Random,
}

impl Default for Rolls {
    fn default() -> Self {
        Rolls::Fixed(1)
    }
}

/// Relative likelihood of each concrete biome, in [`BiomeLabel::CONCRETE`] order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BiomeWeights(pub [f64; BIOME_COUNT]);

impl BiomeWeights {
    pub fn uniform() -> Self {
        Self([1.0; BIOME_COUNT])
    }

    /// Weight of one biome; zero for `Null` and `SeedMarker`.
    pub fn weight(&self, label: BiomeLabel) -> f64 {
        BiomeLabel::CONCRETE
            .iter()
            .position(|&b| b == label)
            .map(|i| self.0[i])
            .unwrap_or(0.0)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// Relative likelihood of each growth direction, indexed by [`Direction::index`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionWeights(pub [f64; 4]);

impl DirectionWeights {
    pub fn uniform() -> Self {
        Self([0.25; 4])
    }

    pub fn weight(&self, dir: Direction) -> f64 {
        self.0[dir.index()]
    }
}

/// Validated parameters for one generation run.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationParams {
    /// Grid side length
    pub scale: usize,
    /// Number of seeds to plant
    pub seed_count: usize,
    /// Raw mode name, resolved by the driver
    pub mode: String,
    pub rolls: Rolls,
    pub biome_weights: BiomeWeights,
    pub direction_weights: DirectionWeights,
}

/// Configuration as read from JSON or assembled by the CLI.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Grid side length
    pub scale: i64,
    /// Fraction of cells to seed; exactly one seed when absent
    #[serde(rename = "percentFill")]
    pub percent_fill: Option<f64>,
    /// `seed-biome` or `seed-continental`
    pub mode: String,
    pub rolls: Option<RollsSetting>,
    /// Forest, Grassland, Desert, Snowy, Mountain, Water
    #[serde(rename = "biome-dist")]
    pub biome_dist: Vec<f64>,
    /// Keys U, R, D, L
    #[serde(rename = "direct-dist")]
    pub direct_dist: BTreeMap<String, f64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            scale: 10,
            percent_fill: None,
            mode: GenerationMode::SeedBiome.name().to_string(),
            rolls: None,
            biome_dist: vec![0.2; BIOME_COUNT],
            direct_dist: Direction::ALL
                .iter()
                .map(|d| (d.key().to_string(), 0.25))
                .collect(),
        }
    }
}

impl GeneratorConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(ConfigError::Parse)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        Self::from_json_str(&content)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(ConfigError::Parse)
    }

    /// Check every option and resolve it into [`GenerationParams`].
    pub fn validate(&self) -> Result<GenerationParams, ConfigError> {
        if self.scale <= 0 {
            return Err(ConfigError::InvalidScale(self.scale));
        }
        let scale = usize::try_from(self.scale)
            .map_err(|_| ConfigError::ScaleTooLarge(self.scale))?;
        let cells = scale
            .checked_mul(scale)
            .ok_or(ConfigError::ScaleTooLarge(self.scale))?;

        let seed_count = match self.percent_fill {
            Some(p) if !(0.0..=1.0).contains(&p) => {
                return Err(ConfigError::InvalidPercentFill(p));
            }
            Some(p) => (p * cells as f64).floor() as usize,
            None => 1,
        };

        let rolls = match self.rolls {
            None | Some(RollsSetting::Random(false)) => Rolls::Fixed(1),
            Some(RollsSetting::Random(true)) => Rolls::Random,
            Some(RollsSetting::Count(n)) if n < 1 => return Err(ConfigError::InvalidRolls(n)),
            Some(RollsSetting::Count(n)) => Rolls::Fixed(n as usize),
        };

        Ok(GenerationParams {
            scale,
            seed_count,
            mode: self.mode.clone(),
            rolls,
            biome_weights: self.biome_weights()?,
            direction_weights: self.direction_weights()?,
        })
    }

    fn biome_weights(&self) -> Result<BiomeWeights, ConfigError> {
        if self.biome_dist.len() != BIOME_COUNT {
            return Err(ConfigError::BiomeDistLength {
                expected: BIOME_COUNT,
                got: self.biome_dist.len(),
            });
        }
        let mut weights = [0.0; BIOME_COUNT];
        for (i, &w) in self.biome_dist.iter().enumerate() {
            check_weight("biome-dist", BiomeLabel::CONCRETE[i].display_name(), w)?;
            weights[i] = w;
        }
        if weights.iter().sum::<f64>() <= 0.0 {
            return Err(ConfigError::ZeroTotalWeight("biome-dist"));
        }
        Ok(BiomeWeights(weights))
    }

    fn direction_weights(&self) -> Result<DirectionWeights, ConfigError> {
        let mut weights = [None; 4];
        for (key, &w) in &self.direct_dist {
            let dir = Direction::from_key(key)
                .ok_or_else(|| ConfigError::UnknownDirection(key.clone()))?;
            check_weight("direct-dist", key, w)?;
            weights[dir.index()] = Some(w);
        }

        let mut resolved = [0.0; 4];
        for dir in Direction::ALL {
            resolved[dir.index()] =
                weights[dir.index()].ok_or(ConfigError::MissingDirection(dir.key()))?;
        }
        Ok(DirectionWeights(resolved))
    }
}

fn check_weight(field: &'static str, key: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NegativeWeight {
            field,
            key: key.to_string(),
            value,
        })
    }
}
