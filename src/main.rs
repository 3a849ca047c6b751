//! Circle Packing Generator
//!
//! Generates a non-overlapping circle packing and writes it out as JSON, a
//! raw data-texture dump, or a PNG snapshot.

use clap::Parser;

use circle_pack_sim::config::PackingConfig;
use circle_pack_sim::export::{self, CircleDataTexture};
use circle_pack_sim::packing::{CirclePacker, CirclePacking, Topology, Xorshift64};

/// Stochastic circle packing for disk and sphere-surface containers
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Container topology (disk or sphere)
    #[arg(short, long)]
    topology: Option<Topology>,

    /// Override container radius
    #[arg(long)]
    container_radius: Option<f32>,

    /// Override minimum circle radius
    #[arg(long)]
    min_radius: Option<f32>,

    /// Override maximum circle radius
    #[arg(long)]
    max_radius: Option<f32>,

    /// Override consecutive failed attempt budget
    #[arg(long)]
    attempts: Option<u32>,

    /// Override circle count cap
    #[arg(long)]
    circles: Option<usize>,

    /// Fixed random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Write the packing as JSON to this path
    #[arg(long)]
    json: Option<String>,

    /// Write the raw RGBA float data texture to this path
    #[arg(long)]
    texture: Option<String>,

    /// Write a PNG snapshot to this path (disk topology only)
    #[arg(long)]
    image: Option<String>,
}

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = if let Some(ref path) = args.config {
        match PackingConfig::from_file(path) {
            Ok(cfg) => {
                log::info!("Loaded config from {}", path);
                cfg
            }
            Err(e) => {
                log::warn!("Failed to load config: {}, using defaults", e);
                PackingConfig::default()
            }
        }
    } else {
        PackingConfig::default()
    };

    // Merge CLI overrides
    if let Some(topology) = args.topology {
        config.packing.topology = topology;
    }
    if let Some(container_radius) = args.container_radius {
        config.packing.container_radius = container_radius;
    }
    if let Some(min_radius) = args.min_radius {
        config.packing.min_circle_radius = min_radius;
    }
    if let Some(max_radius) = args.max_radius {
        config.packing.max_circle_radius = max_radius;
    }
    if let Some(attempts) = args.attempts {
        config.packing.max_attempts = attempts;
    }
    if let Some(circles) = args.circles {
        config.packing.max_circles = circles;
    }
    if args.seed.is_some() {
        config.packing.seed = args.seed;
    }

    let request = config.packing.request();
    let packer = match CirclePacker::new(request) {
        Ok(packer) => packer,
        Err(e) => {
            log::error!("Invalid packing request: {}", e);
            std::process::exit(1);
        }
    };

    let mut rng = match config.packing.seed {
        Some(seed) => Xorshift64::new(seed),
        None => Xorshift64::from_entropy(),
    };

    log::info!(
        "Packing {} container: radius {}, circle radii [{}, {}], budget {}, cap {}",
        config.packing.topology.name(),
        request.container_radius,
        request.min_circle_radius,
        request.max_circle_radius,
        request.max_attempts,
        request.max_circles
    );

    let packing = packer.generate(config.packing.topology, &mut rng);
    log::info!(
        "Placed {} circles covering {:.1}% of the container",
        packing.len(),
        packing.coverage(request.container_radius) * 100.0
    );

    if let Some(ref path) = args.json {
        if let Err(e) = export::write_packing_json(path, &packing) {
            log::error!("Failed to export JSON: {}", e);
            std::process::exit(1);
        }
        log::info!("Saved: {}", path);
    }

    if let Some(ref path) = args.texture {
        let texture = CircleDataTexture::encode(&packing);
        if let Err(e) = texture.write_to(path) {
            log::error!("Failed to export texture: {}", e);
            std::process::exit(1);
        }
        log::info!("Saved: {} ({}x{} texels)", path, texture.size(), texture.size());
    }

    if let Some(ref path) = args.image {
        match &packing {
            CirclePacking::Disk(circles) => {
                let size = config.output.image_size;
                let result =
                    export::rasterize_disk_packing(circles, request.container_radius, &config.output)
                        .and_then(|data| export::save_png(path, size, size, &data));
                match result {
                    Ok(()) => log::info!("Saved: {}", path),
                    Err(e) => {
                        log::error!("Failed to export image: {}", e);
                        std::process::exit(1);
                    }
                }
            }
            CirclePacking::Sphere(_) => {
                log::warn!("Image export supports only disk packings, skipping {}", path);
            }
        }
    }
}
