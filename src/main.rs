// Copyright 2020 TwoCookingMice

use macaron::core::error::Result;
use macaron::core::scene_loader::load_scene_with_settings;
use macaron::core::sensor::Sensor;
use macaron::io::image_utils;
use macaron::renderers::simple::{ SimpleRenderer, Renderer };

use clap::Parser;
use log::{error, info};
use std::path::PathBuf;

/// Render a scene description with the Monte Carlo path tracer.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Scene description (XML).
    scene: PathBuf,

    /// Output image, `.exr` or `.png`. Defaults to the scene name with `.exr`.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Samples per pixel, overriding the scene's sampler.
    #[arg(long)]
    spp: Option<u32>,

    /// Seed of the per-pixel sample streams, overriding the scene's sampler.
    #[arg(long)]
    seed: Option<u64>,

    /// Worker threads, all cores by default.
    #[arg(long)]
    threads: Option<usize>,

    /// Hide the progress bar.
    #[arg(long)]
    quiet: bool,
}

impl Cli {
    fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(output) => output.clone(),
            None => self.scene.with_extension("exr"),
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let load_result = load_scene_with_settings(&cli.scene)?;

    let spp = cli.spp.unwrap_or(load_result.samples_per_pixel);
    let seed = cli.seed.unwrap_or(load_result.seed);
    let camera = load_result.camera;
    info!("{}", camera.describe());

    let mut renderer = SimpleRenderer::new(load_result.integrator, spp, seed)
        .with_progress(!cli.quiet);
    if let Some(threads) = cli.threads {
        renderer = renderer.with_threads(threads);
    }

    let image = renderer.render(&load_result.scene, &camera)?;
    let output = cli.output_path();
    image_utils::write_image(&image, &output)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        error!("{}", err);
        std::process::exit(1);
    }
}
