// Copyright @yucwang 2021

use crate::core::error::{RenderError, Result};
use crate::core::integrator::Integrator;
use crate::core::sampler::{IndependentSampler, Sampler};
use crate::core::scene::Scene;
use crate::core::sensor::Sensor;
use crate::math::bitmap::Bitmap;
use crate::math::constants::{Float, Vector2f, Vector3f};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

pub use super::renderer::Renderer;

struct Block {
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
    pixels: Vec<Vector3f>,
}

/// Block-parallel driver: workers pull image blocks from an atomic
/// counter and every pixel owns its own sample stream.
pub struct SimpleRenderer {
    integrator: Box<dyn Integrator>,
    spp: u32,
    seed: u64,
    threads: Option<usize>,
    block_size: usize,
    show_progress: bool,
}

impl SimpleRenderer {
    pub fn new(integrator: Box<dyn Integrator>, spp: u32, seed: u64) -> Self {
        Self {
            integrator,
            spp: spp.max(1),
            seed,
            threads: None,
            block_size: 32,
            show_progress: true,
        }
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads.max(1));
        self
    }

    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size.max(1);
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn integrator(&self) -> &dyn Integrator {
        self.integrator.as_ref()
    }

    fn render_block(&self, scene: &Scene, sensor: &dyn Sensor,
                    x0: usize, y0: usize, x1: usize, y1: usize) -> Result<Block> {
        let width = sensor.width() as Float;
        let height = sensor.height() as Float;
        let inv_spp = 1.0 / (self.spp as Float);
        let mut pixels = Vec::with_capacity((x1 - x0) * (y1 - y0));

        for y in y0..y1 {
            for x in x0..x1 {
                let mut sampler = IndependentSampler::for_pixel(self.seed, x, y);
                let mut color = Vector3f::zeros();
                for _ in 0..self.spp {
                    let jitter = sampler.next_2d();
                    let u = Vector2f::new((x as Float + jitter.x) / width, (y as Float + jitter.y) / height);
                    let ray = sensor.sample_ray(&u);
                    let radiance = self.integrator.li(scene, &mut sampler, &ray)?;
                    color += radiance.to_vector();
                }
                pixels.push(color * inv_spp);
            }
        }

        Ok(Block { x0, y0, x1, y1, pixels })
    }
}

impl Renderer for SimpleRenderer {
    fn render(&self, scene: &Scene, sensor: &dyn Sensor) -> Result<Bitmap> {
        self.integrator.preprocess(scene)?;

        let width = sensor.width();
        let height = sensor.height();
        let mut bitmap = Bitmap::new(width, height);
        if width == 0 || height == 0 {
            return Ok(bitmap);
        }

        let block_size = self.block_size;
        let blocks_x = (width + block_size - 1) / block_size;
        let blocks_y = (height + block_size - 1) / block_size;
        let total_blocks = blocks_x * blocks_y;
        let thread_count = self.threads.unwrap_or_else(|| {
            thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
        });

        info!("Rendering {}x{} at {} spp with {} on {} threads",
              width, height, self.spp, self.integrator.name(), thread_count);
        let start = Instant::now();

        let progress = if self.show_progress {
            ProgressBar::new(total_blocks as u64)
        } else {
            ProgressBar::hidden()
        };
        progress.set_style(
            ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} blocks")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let next_block = AtomicUsize::new(0);
        let aborted = AtomicBool::new(false);
        let (tx, rx) = mpsc::channel::<Result<Block>>();
        let mut failure: Option<RenderError> = None;

        thread::scope(|scope| {
            for _ in 0..thread_count {
                let tx = tx.clone();
                let next_block = &next_block;
                let aborted = &aborted;
                scope.spawn(move || {
                    loop {
                        if aborted.load(Ordering::Relaxed) {
                            break;
                        }
                        let block_index = next_block.fetch_add(1, Ordering::Relaxed);
                        if block_index >= total_blocks {
                            break;
                        }

                        let x0 = (block_index % blocks_x) * block_size;
                        let y0 = (block_index / blocks_x) * block_size;
                        let x1 = (x0 + block_size).min(width);
                        let y1 = (y0 + block_size).min(height);

                        let block = self.render_block(scene, sensor, x0, y0, x1, y1);
                        if block.is_err() {
                            aborted.store(true, Ordering::Relaxed);
                        }
                        if tx.send(block).is_err() {
                            break;
                        }
                    }
                });
            }

            drop(tx);
            for block in rx.iter() {
                match block {
                    Ok(block) => {
                        let block_width = block.x1 - block.x0;
                        for y in block.y0..block.y1 {
                            for x in block.x0..block.x1 {
                                bitmap[(x, y)] = block.pixels[(x - block.x0) + block_width * (y - block.y0)];
                            }
                        }
                        progress.inc(1);
                    }
                    Err(err) => {
                        if failure.is_none() {
                            failure = Some(err);
                        }
                    }
                }
            }
        });
        progress.finish_and_clear();

        if let Some(err) = failure {
            return Err(err);
        }

        let anomalies = self.integrator.anomaly_count();
        if anomalies > 0 {
            warn!("{} paths were terminated early by the refractive index guard", anomalies);
        }
        info!("Render finished in {:.2?}", start.elapsed());

        Ok(bitmap)
    }
}
