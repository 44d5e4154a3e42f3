use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use image::error::{ImageError, LimitError, LimitErrorKind};
use image::{ImageBuffer, Rgb, RgbImage};
use serde::Serialize;

use crate::biomes::{BiomeGrid, BiomeLabel};
use crate::world::GeneratedMap;

/// Anything that can be rasterised one cell at a time.
pub trait RasterSource {
    /// `(rows, cols)`
    fn dimensions(&self) -> (usize, usize);

    /// RGB colour of the cell at `(row, col)`.
    fn label_at(&self, row: usize, col: usize) -> [u8; 3];
}

/// Immutable copy of a finished grid handed to renderers.
#[derive(Clone, Debug, PartialEq)]
pub struct MapSnapshot {
    grid: BiomeGrid,
}

impl MapSnapshot {
    pub fn new(grid: &BiomeGrid) -> Self {
        Self { grid: grid.clone() }
    }

    /// Label at `(row, col)`, `Null` outside the grid.
    pub fn biome_at(&self, row: usize, col: usize) -> BiomeLabel {
        self.grid.get(row, col).copied().unwrap_or_default()
    }
}

impl RasterSource for MapSnapshot {
    fn dimensions(&self) -> (usize, usize) {
        (self.grid.height, self.grid.width)
    }

    fn label_at(&self, row: usize, col: usize) -> [u8; 3] {
        self.biome_at(row, col).color()
    }
}

/// Image side in pixels for `cells` cells of `scale` pixels each.
fn scaled_side(cells: usize, scale: u32) -> Result<u32, ImageError> {
    u32::try_from(cells)
        .ok()
        .and_then(|cells| cells.checked_mul(scale))
        .ok_or_else(|| ImageError::Limits(LimitError::from_kind(LimitErrorKind::DimensionError)))
}

/// Render one `pixel_scale`x`pixel_scale` block per cell.
///
/// Fails when the scaled image would not fit in `u32` pixel dimensions.
pub fn render_biome_map(source: &dyn RasterSource, pixel_scale: u32) -> Result<RgbImage, ImageError> {
    let scale = pixel_scale.max(1);
    let (rows, cols) = source.dimensions();
    let mut img: RgbImage = ImageBuffer::new(scaled_side(cols, scale)?, scaled_side(rows, scale)?);

    for row in 0..rows {
        for col in 0..cols {
            let color = Rgb(source.label_at(row, col));
            for dy in 0..scale {
                for dx in 0..scale {
                    img.put_pixel(col as u32 * scale + dx, row as u32 * scale + dy, color);
                }
            }
        }
    }

    Ok(img)
}

/// Export a biome map as an image; the format follows the file extension.
pub fn export_biome_map(
    source: &dyn RasterSource,
    path: &Path,
    pixel_scale: u32,
) -> Result<(), image::ImageError> {
    render_biome_map(source, pixel_scale)?.save(path)
}

/// JSON form of a generated map.
#[derive(Serialize)]
struct MapDocument<'a> {
    scale: usize,
    seeds: &'a [crate::growth::Seed],
    stats: &'a crate::growth::ExpansionStats,
    rows: Vec<&'a [BiomeLabel]>,
}

/// Write the label grid, seeds and expansion totals as pretty JSON.
pub fn export_map_json(map: &GeneratedMap, path: &Path) -> io::Result<()> {
    let doc = MapDocument {
        scale: map.scale(),
        seeds: &map.seeds,
        stats: &map.stats,
        rows: map.grid.rows().collect(),
    };
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, &doc).map_err(io::Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::world::generate;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn small_map() -> GeneratedMap {
        let config = GeneratorConfig {
            scale: 6,
            percent_fill: Some(0.1),
            ..Default::default()
        };
        generate(&config, &mut ChaCha8Rng::seed_from_u64(10)).unwrap()
    }

    #[test]
    fn test_snapshot_colors_match_grid() {
        let mut grid = BiomeGrid::square(2);
        grid.set(0, 1, BiomeLabel::Desert).unwrap();
        let snapshot = MapSnapshot::new(&grid);

        assert_eq!(snapshot.dimensions(), (2, 2));
        assert_eq!(snapshot.label_at(0, 1), [230, 200, 150]);
        assert_eq!(snapshot.label_at(1, 1), [0, 0, 0]);
        assert_eq!(snapshot.biome_at(9, 9), BiomeLabel::Null);
    }

    #[test]
    fn test_render_scales_pixels() {
        let mut grid = BiomeGrid::square(2);
        grid.set(1, 0, BiomeLabel::Water).unwrap();
        let img = render_biome_map(&MapSnapshot::new(&grid), 3).unwrap();

        assert_eq!(img.dimensions(), (6, 6));
        // Row 1, col 0 covers x 0..3, y 3..6
        assert_eq!(img.get_pixel(2, 5).0, [10, 10, 250]);
        assert_eq!(img.get_pixel(3, 5).0, [0, 0, 0]);
    }

    #[test]
    fn test_oversized_image_is_an_error() {
        let grid = BiomeGrid::square(3);
        let result = render_biome_map(&MapSnapshot::new(&grid), u32::MAX / 2);
        assert!(matches!(result, Err(ImageError::Limits(_))));
    }

    #[test]
    fn test_export_png_and_json() {
        let map = small_map();
        let dir = tempfile::tempdir().unwrap();

        let png = dir.path().join("map.png");
        export_biome_map(&map.snapshot(), &png, 2).unwrap();
        let img = image::open(&png).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (12, 12));

        let json = dir.path().join("map.json");
        export_map_json(&map, &json).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json).unwrap()).unwrap();
        assert_eq!(value["scale"], 6);
        assert_eq!(value["rows"].as_array().unwrap().len(), 6);
        assert_eq!(value["seeds"].as_array().unwrap().len(), map.seeds.len());
    }

    #[test]
    fn test_failed_export_leaves_map_intact() {
        let map = small_map();
        let before = map.grid.clone();
        let bad = Path::new("/nonexistent-dir/out/map.png");
        assert!(export_biome_map(&map.snapshot(), bad, 1).is_err());
        assert_eq!(map.grid, before);
    }
}
