use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use grainfall::AppConfig;
use grainfall::headless::{GifCapture, PRESETS, PixelRenderer, Scenario, ScenarioRunner};
use grainfall::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (RON); defaults to ./grainfall.ron if present
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Preset name or path to a RON scenario
    #[arg(short, long)]
    scenario: Option<String>,

    /// Number of frames to simulate
    #[arg(short, long)]
    frames: Option<u64>,

    /// RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Save the final frame as a PNG
    #[arg(long)]
    png: Option<PathBuf>,

    /// Record the run as an animated GIF
    #[arg(long)]
    gif: Option<PathBuf>,

    /// Print the material palette and presets, then exit
    #[arg(long)]
    list_materials: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.list_materials {
        list_materials();
        return Ok(());
    }

    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config.sandbox.seed = Some(seed);
    }
    let frames = args.frames.unwrap_or(config.run.frames);
    let scenario_name = args.scenario.unwrap_or_else(|| config.run.scenario.clone());

    let mut scenario = Scenario::resolve(&scenario_name)?;
    if args.seed.is_some() {
        // Command line wins over a seed baked into the scenario
        scenario.seed = args.seed;
    }

    let mut runner = ScenarioRunner::new(scenario, &config.sandbox, config.brush.size)?;
    let materials = Materials::new();
    let mut renderer = PixelRenderer::for_sandbox(runner.sandbox(), config.capture.cell_size as usize);

    let mut capture = match &args.gif {
        Some(_) => Some(
            GifCapture::for_renderer(&renderer, config.capture.gif_fps)?
                .with_stride(config.capture.capture_every),
        ),
        None => None,
    };

    let report = runner.run(frames, |sandbox| {
        if let Some(capture) = capture.as_mut() {
            if capture.wants_frame(sandbox.frame()) {
                renderer.render(sandbox, &materials);
                capture.capture_frame(&renderer);
            }
        }
        Ok(())
    })?;

    log::info!("{report}");

    if let (Some(path), Some(capture)) = (&args.gif, &capture) {
        capture
            .save(path)
            .with_context(|| format!("Failed to save GIF to {}", path.display()))?;
    }

    if let Some(path) = &args.png {
        renderer.render(runner.sandbox(), &materials);
        renderer.save_png(path)?;
        log::info!("Saved final frame to {}", path.display());
    }

    Ok(())
}

fn list_materials() {
    let materials = Materials::new();
    println!("Materials (hotkey, name, type, color):");
    for def in materials.iter() {
        println!(
            "  {}  {:<6} {:?} #{:02x}{:02x}{:02x}",
            def.material.tag(),
            def.name,
            def.material_type,
            def.color[0],
            def.color[1],
            def.color[2]
        );
    }
    println!("Presets: {}", PRESETS.join(", "));
}
