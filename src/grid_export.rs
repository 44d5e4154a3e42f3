//! Comparison sheets
//!
//! Renders the same configuration and RNG seed under several growth
//! settings side by side, so the effect of `direct-dist` and `rolls` can be
//! judged at a glance.

use std::error::Error;
use std::path::Path;

use image::{ImageBuffer, Rgb, RgbImage};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::{GeneratorConfig, RollsSetting};
use crate::export::render_biome_map;
use crate::growth::Direction;
use crate::world::generate;

/// One column of a comparison sheet.
#[derive(Clone, Debug, PartialEq)]
pub struct GrowthVariant {
    pub name: &'static str,
    /// Weights in U, R, D, L order
    pub direct_dist: [f64; 4],
    pub random_rolls: bool,
}

impl GrowthVariant {
    /// Built-in presets.
    pub fn presets() -> Vec<GrowthVariant> {
        vec![
            GrowthVariant { name: "uniform", direct_dist: [0.25; 4], random_rolls: false },
            GrowthVariant { name: "uniform-random", direct_dist: [0.25; 4], random_rolls: true },
            GrowthVariant { name: "north-east", direct_dist: [0.5, 0.5, 0.1, 0.1], random_rolls: false },
            GrowthVariant { name: "horizontal", direct_dist: [0.05, 0.45, 0.05, 0.45], random_rolls: false },
            GrowthVariant { name: "vertical", direct_dist: [0.45, 0.05, 0.45, 0.05], random_rolls: false },
        ]
    }

    /// `base` with this variant's growth settings applied. Fixed variants
    /// always claim one neighbour per round, whatever `base` asks for.
    pub fn apply(&self, base: &GeneratorConfig) -> GeneratorConfig {
        let mut config = base.clone();
        config.direct_dist = Direction::ALL
            .iter()
            .map(|d| (d.key().to_string(), self.direct_dist[d.index()]))
            .collect();
        config.rolls = if self.random_rolls {
            Some(RollsSetting::Random(true))
        } else {
            None
        };
        config
    }
}

/// Layout of a comparison sheet.
#[derive(Clone, Debug)]
pub struct GridExportConfig {
    pub base: GeneratorConfig,
    /// RNG seed shared by every variant
    pub seed: u64,
    /// Pixels per cell
    pub pixel_scale: u32,
    /// Padding between variants in pixels
    pub cell_padding: u32,
}

impl Default for GridExportConfig {
    fn default() -> Self {
        Self {
            base: GeneratorConfig {
                scale: 64,
                percent_fill: Some(0.002),
                ..Default::default()
            },
            seed: 42,
            pixel_scale: 4,
            cell_padding: 4,
        }
    }
}

/// Generate every variant and lay the maps out left to right.
pub fn render_comparison_sheet(
    config: &GridExportConfig,
    variants: &[GrowthVariant],
) -> Result<RgbImage, Box<dyn Error>> {
    let maps = variants
        .iter()
        .map(|variant| -> Result<RgbImage, Box<dyn Error>> {
            let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
            let map = generate(&variant.apply(&config.base), &mut rng)?;
            Ok(render_biome_map(&map.snapshot(), config.pixel_scale)?)
        })
        .collect::<Result<Vec<RgbImage>, Box<dyn Error>>>()?;

    let cell_w = maps.first().map(|m| m.width()).unwrap_or(0);
    let cell_h = maps.first().map(|m| m.height()).unwrap_or(0);
    let padding = config.cell_padding;
    let count = maps.len() as u32;

    let sheet_w = count
        .checked_mul(cell_w)
        .and_then(|w| w.checked_add(count.saturating_sub(1).checked_mul(padding)?))
        .ok_or("comparison sheet is too wide")?;
    let mut sheet: RgbImage = ImageBuffer::from_pixel(sheet_w, cell_h, Rgb([20, 20, 20]));

    for (i, map_img) in maps.iter().enumerate() {
        let x_offset = i as u32 * (cell_w + padding);
        for (x, y, pixel) in map_img.enumerate_pixels() {
            sheet.put_pixel(x_offset + x, y, *pixel);
        }
    }

    Ok(sheet)
}

/// Render a comparison sheet and save it to `path`.
pub fn export_comparison_sheet(
    config: &GridExportConfig,
    variants: &[GrowthVariant],
    path: &Path,
) -> Result<(), Box<dyn Error>> {
    println!("Generating comparison sheet ({} variants)...", variants.len());
    for (i, variant) in variants.iter().enumerate() {
        println!("  {}: {}", i + 1, variant.name);
    }
    let sheet = render_comparison_sheet(config, variants)?;
    sheet.save(path)?;
    println!("Exported comparison sheet to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Rolls;

    fn small_config() -> GridExportConfig {
        GridExportConfig {
            base: GeneratorConfig {
                scale: 8,
                percent_fill: Some(0.05),
                ..Default::default()
            },
            seed: 1,
            pixel_scale: 2,
            cell_padding: 3,
        }
    }

    #[test]
    fn test_sheet_dimensions() {
        let variants = GrowthVariant::presets();
        let sheet = render_comparison_sheet(&small_config(), &variants).unwrap();
        let n = variants.len() as u32;
        assert_eq!(sheet.width(), n * 16 + (n - 1) * 3);
        assert_eq!(sheet.height(), 16);
        // Padding column between the first two maps
        assert_eq!(sheet.get_pixel(16, 0).0, [20, 20, 20]);
    }

    #[test]
    fn test_variant_overrides_growth_only() {
        let base = small_config().base;
        let variant = &GrowthVariant::presets()[2];
        let config = variant.apply(&base);
        assert_eq!(config.scale, base.scale);
        assert_eq!(config.direct_dist["U"], 0.5);
        assert_eq!(config.direct_dist["L"], 0.1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_fixed_variant_ignores_random_base_rolls() {
        let mut base = small_config().base;
        base.rolls = Some(RollsSetting::Random(true));
        let presets = GrowthVariant::presets();

        let fixed = presets[0].apply(&base).validate().unwrap();
        assert_eq!(fixed.rolls, Rolls::Fixed(1));
        let random = presets[1].apply(&base).validate().unwrap();
        assert_eq!(random.rolls, Rolls::Random);
    }

    #[test]
    fn test_invalid_base_fails() {
        let mut config = small_config();
        config.base.scale = 0;
        assert!(render_comparison_sheet(&config, &GrowthVariant::presets()).is_err());
    }
}
