//! ASCII rendering and export module for biome maps
//!
//! Provides functions to render generated maps as ASCII text, optionally
//! coloured with 24-bit ANSI escapes, and export them to files.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use chrono::Local;

use crate::biomes::{BiomeGrid, BiomeLabel};
use crate::world::GeneratedMap;

/// Get ASCII character for a biome
pub fn biome_char(biome: BiomeLabel) -> char {
    match biome {
        BiomeLabel::Forest => 'T',
        BiomeLabel::Grassland => '"',
        BiomeLabel::Desert => 'd',
        BiomeLabel::Snowy => '#',
        BiomeLabel::Mountain => '^',
        BiomeLabel::Water => '~',
        BiomeLabel::Null => ' ',
        BiomeLabel::SeedMarker => '@',
    }
}

/// Render the grid with one character per cell.
pub fn render_ascii_map(grid: &BiomeGrid) -> String {
    let mut result = String::with_capacity((grid.width + 1) * grid.height);
    for row in grid.rows() {
        result.extend(row.iter().map(|&b| biome_char(b)));
        result.push('\n');
    }
    result
}

/// Print ASCII map to stdout
pub fn print_ascii_map(grid: &BiomeGrid) {
    print!("{}", render_ascii_map(grid));
}

/// Generate legend for biome characters
pub fn biome_legend() -> String {
    let mut legend = String::new();
    legend.push_str("=== BIOME LEGEND ===\n");
    for biome in BiomeLabel::CONCRETE {
        legend.push_str(&format!("  {} {}\n", biome_char(biome), biome.display_name()));
    }
    legend.push_str("  (blank) Unfilled\n");
    legend
}

// ============================================================================
// COLORIZED ASCII RENDERING
// ============================================================================

/// Foreground colour: a darkened version of the biome colour so the
/// character stays readable on its own background.
pub fn biome_fg_color(biome: BiomeLabel) -> (u8, u8, u8) {
    let [r, g, b] = biome.color();
    (r / 2, g / 2, b / 2)
}

pub fn biome_bg_color(biome: BiomeLabel) -> (u8, u8, u8) {
    let [r, g, b] = biome.color();
    (r, g, b)
}

/// Format a character with ANSI true color (24-bit)
pub fn ansi_colored_char(ch: char, fg: (u8, u8, u8), bg: (u8, u8, u8)) -> String {
    format!(
        "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m{}\x1b[0m",
        fg.0, fg.1, fg.2,
        bg.0, bg.1, bg.2,
        ch
    )
}

/// Render the grid with ANSI colours, two characters per cell so cells look square.
pub fn render_colored_ascii_map(grid: &BiomeGrid) -> String {
    let mut result = String::new();
    for row in grid.rows() {
        for &biome in row {
            let ch = biome_char(biome);
            let cell = ansi_colored_char(ch, biome_fg_color(biome), biome_bg_color(biome));
            result.push_str(&cell);
            result.push_str(&ansi_colored_char(' ', biome_fg_color(biome), biome_bg_color(biome)));
        }
        result.push_str("\x1b[0m\n"); // Reset at end of line
    }
    result
}

/// Print colorized ASCII map to stdout
pub fn print_colored_ascii_map(grid: &BiomeGrid) {
    print!("{}", render_colored_ascii_map(grid));
}

/// Colour swatch legend for terminals.
pub fn biome_legend_colored() -> String {
    let mut legend = String::new();
    for biome in BiomeLabel::CONCRETE {
        let swatch = ansi_colored_char(biome_char(biome), biome_fg_color(biome), biome_bg_color(biome));
        legend.push_str(&format!("  {} {}\n", swatch, biome.display_name()));
    }
    legend
}

/// Export a generated map to a plain-text world file
pub fn export_world_file(map: &GeneratedMap, seed: u64, path: &Path) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    write_world_file(&mut file, map, seed)?;
    file.flush()
}

fn write_world_file(out: &mut impl Write, map: &GeneratedMap, seed: u64) -> io::Result<()> {
    let params = &map.params;

    // Header
    writeln!(out, "=== BIOME SEEDER WORLD FILE ===")?;
    writeln!(out, "Seed: {}", seed)?;
    writeln!(out, "Size: {}x{}", params.scale, params.scale)?;
    writeln!(out, "Mode: {}", params.mode)?;
    writeln!(out, "Seeds planted: {}", map.seeds.len())?;
    writeln!(out, "Rolls: {:?}", params.rolls)?;
    writeln!(out, "Generated: {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(out)?;

    writeln!(out, "=== MAP ===")?;
    write!(out, "{}", render_ascii_map(&map.grid))?;
    writeln!(out)?;

    write!(out, "{}", biome_legend())?;
    writeln!(out)?;

    // Statistics
    let stats = map.biome_stats();
    writeln!(out, "=== STATISTICS ===")?;
    writeln!(out, "Total cells: {}", stats.total_cells)?;
    writeln!(out, "Coverage: {:.1}%", stats.coverage() * 100.0)?;
    writeln!(
        out,
        "Expansion: {} rounds, {} cells grown",
        map.stats.rounds, map.stats.cells_grown
    )?;
    writeln!(out)?;

    writeln!(out, "Biome Distribution:")?;
    let mut sorted_stats: Vec<_> = stats.counts.iter().collect();
    sorted_stats.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0))); // Sort by count descending
    for (biome, count) in sorted_stats {
        let pct = 100.0 * *count as f64 / stats.total_cells.max(1) as f64;
        writeln!(out, "  {:10} {} {:>6} ({:>5.1}%)", biome.display_name(), biome_char(*biome), count, pct)?;
    }

    writeln!(out)?;
    writeln!(out, "=== SEEDS ===")?;
    for seed in &map.seeds {
        writeln!(out, "({}, {}) {}", seed.point.row, seed.point.col, seed.biome.display_name())?;
    }

    Ok(())
}
