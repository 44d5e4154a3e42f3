use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

use biome_seeder::ascii;
use biome_seeder::biomes::BiomeLabel;
use biome_seeder::config::{GeneratorConfig, RollsSetting};
use biome_seeder::export::{export_biome_map, export_map_json};
use biome_seeder::grid_export::{export_comparison_sheet, GridExportConfig, GrowthVariant};
use biome_seeder::world::Generator;

#[derive(Parser, Debug)]
#[command(name = "biome_seeder")]
#[command(about = "Grow biome maps from randomly planted seeds")]
struct Args {
    /// JSON config file (scale, percentFill, mode, rolls, biome-dist, direct-dist)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Grid side length
    #[arg(short = 'S', long)]
    scale: Option<i64>,

    /// Fraction of cells to seed (0.0-1.0); one seed if unset
    #[arg(short, long)]
    fill: Option<f64>,

    /// Generation mode (seed-biome, seed-continental)
    #[arg(short, long)]
    mode: Option<String>,

    /// Fixed number of neighbours each frontier cell claims per round
    #[arg(long, conflicts_with = "random_rolls")]
    rolls: Option<i64>,

    /// Claim a random number of neighbours per round
    #[arg(long)]
    random_rolls: bool,

    /// Biome weights: Forest,Grassland,Desert,Snowy,Mountain,Water
    #[arg(long, value_parser = parse_biome_dist)]
    biome_dist: Option<BiomeDist>,

    /// Direction weights, e.g. U=0.5,R=0.5,D=0.1,L=0.1
    #[arg(long, value_parser = parse_direct_dist)]
    direct_dist: Option<BTreeMap<String, f64>>,

    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Write the map as an image (format from extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pixels per cell in image output
    #[arg(long, default_value = "4")]
    pixel_scale: u32,

    /// Print the map to the terminal
    #[arg(long)]
    ascii: bool,

    /// Use plain characters instead of ANSI colours for --ascii
    #[arg(long)]
    no_color: bool,

    /// Export an ASCII world file with statistics
    #[arg(long)]
    export_world: Option<PathBuf>,

    /// Export labels, seeds and statistics as JSON
    #[arg(long)]
    export_json: Option<PathBuf>,

    /// Render every growth preset side by side instead of a single map
    #[arg(long)]
    compare: Option<PathBuf>,

    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,
}

/// Comma-separated biome weights.
#[derive(Clone, Debug)]
struct BiomeDist(Vec<f64>);

fn parse_biome_dist(s: &str) -> Result<BiomeDist, String> {
    s.split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|e| format!("invalid weight {:?}: {}", part, e))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(BiomeDist)
}

fn parse_direct_dist(s: &str) -> Result<BTreeMap<String, f64>, String> {
    s.split(',')
        .map(|pair| {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| format!("expected KEY=WEIGHT, got {:?}", pair))?;
            let weight = value
                .trim()
                .parse::<f64>()
                .map_err(|e| format!("invalid weight for {}: {}", key, e))?;
            Ok((key.trim().to_uppercase(), weight))
        })
        .collect()
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// File config (or defaults) with command-line overrides applied.
fn build_config(args: &Args) -> Result<GeneratorConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => GeneratorConfig::from_json_file(path)?,
        None => GeneratorConfig::default(),
    };

    if let Some(scale) = args.scale {
        config.scale = scale;
    }
    if let Some(fill) = args.fill {
        config.percent_fill = Some(fill);
    }
    if let Some(ref mode) = args.mode {
        config.mode = mode.clone();
    }
    if let Some(rolls) = args.rolls {
        config.rolls = Some(RollsSetting::Count(rolls));
    }
    if args.random_rolls {
        config.rolls = Some(RollsSetting::Random(true));
    }
    if let Some(ref weights) = args.biome_dist {
        config.biome_dist = weights.0.clone();
    }
    if let Some(ref weights) = args.direct_dist {
        config.direct_dist = weights.clone();
    }

    Ok(config)
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = build_config(&args)?;

    // Initialize RNG
    let seed = args.seed.unwrap_or_else(|| rand::random());

    if let Some(ref path) = args.compare {
        let sheet = GridExportConfig {
            base: config,
            seed,
            pixel_scale: args.pixel_scale,
            ..Default::default()
        };
        return export_comparison_sheet(&sheet, &GrowthVariant::presets(), path);
    }

    let generator = Generator::new(&config)?;
    let params = generator.params();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    println!("Generating biome map with seed: {}", seed);
    println!("Map size: {}x{} ({})", params.scale, params.scale, generator.mode().name());
    println!("Planting {} seeds and expanding frontiers...", params.seed_count);

    let map = generator.generate(&mut rng)?;

    println!(
        "Expansion complete: {} clusters, {} rounds, {} cells grown",
        map.stats.clusters, map.stats.rounds, map.stats.cells_grown
    );
    let stats = map.biome_stats();
    println!("Coverage: {:.1}%", stats.coverage() * 100.0);
    for biome in BiomeLabel::CONCRETE {
        let count = stats.count(biome);
        if count > 0 {
            println!("  {:10} {:>7}", biome.display_name(), count);
        }
    }

    if args.ascii {
        if args.no_color {
            ascii::print_ascii_map(&map.grid);
            print!("{}", ascii::biome_legend());
        } else {
            ascii::print_colored_ascii_map(&map.grid);
            print!("{}", ascii::biome_legend_colored());
        }
    }

    // Export failures are reported but never discard the finished map
    if let Some(ref path) = args.output {
        match export_biome_map(&map.snapshot(), path, args.pixel_scale) {
            Ok(()) => println!("Exported map image to {}", path.display()),
            Err(e) => eprintln!("Failed to export map image: {}", e),
        }
    }
    if let Some(ref path) = args.export_world {
        match ascii::export_world_file(&map, seed, path) {
            Ok(()) => println!("Exported world file to {}", path.display()),
            Err(e) => eprintln!("Failed to export world file: {}", e),
        }
    }
    if let Some(ref path) = args.export_json {
        match export_map_json(&map, path) {
            Ok(()) => println!("Exported map JSON to {}", path.display()),
            Err(e) => eprintln!("Failed to export map JSON: {}", e),
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
