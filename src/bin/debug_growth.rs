//! Debug script to watch frontier expansion round by round as ASCII

use biome_seeder::ascii::{biome_legend, render_ascii_map};
use biome_seeder::biomes::BiomeGrid;
use biome_seeder::config::{GeneratorConfig, RollsSetting};
use biome_seeder::growth::RoundReport;
use biome_seeder::world::Generator;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fs::File;
use std::io::Write;

fn main() {
    let seed = 12345u64;
    let config = GeneratorConfig {
        scale: 32,
        percent_fill: Some(0.004),
        rolls: Some(RollsSetting::Random(true)),
        biome_dist: vec![0.5, 0.5, 0.1, 0.1, 0.1, 0.1],
        ..Default::default()
    };

    let generator = Generator::new(&config).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    // Open output file
    let mut file = File::create("growth_debug.txt").unwrap();
    writeln!(file, "=== FRONTIER GROWTH DEBUG ({0}x{0}) seed={1} ===", config.scale, seed).unwrap();
    write!(file, "{}", biome_legend()).unwrap();
    writeln!(file).unwrap();

    let mut observe = |report: &RoundReport, grid: &BiomeGrid| {
        writeln!(
            file,
            "--- round {} ({} active clusters, {} cells grown) ---",
            report.round, report.active_clusters, report.cells_grown
        )
        .unwrap();
        write!(file, "{}", render_ascii_map(grid)).unwrap();
    };

    let map = generator.generate_observed(&mut rng, Some(&mut observe)).unwrap();

    println!("Seeds: {}", map.seeds.len());
    for s in &map.seeds {
        println!("  ({:>2}, {:>2}) {}", s.point.row, s.point.col, s.biome.display_name());
    }
    println!(
        "Rounds: {} ({} with growth), cells grown: {}",
        map.stats.rounds, map.stats.growth_rounds, map.stats.cells_grown
    );
    println!("Round-by-round maps written to growth_debug.txt");
}
