use std::io::{self, Write};
use std::num::NonZeroU16;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::tracer::ray_color;
use crate::{Camera, Color, CrateRng, HitList, Rgb};

/// Everything about a render that isn't the scene or the camera.
#[derive(Clone, Debug)]
pub struct RenderSettings {
    pub samples: NonZeroU16,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Jitter samples inside each pixel. When off, each pixel gets exactly one sample.
    pub antialias: bool,
    pub seed: u64,
    /// Render scanlines on the rayon thread pool
    pub parallel: bool,
    /// Report scanline progress on stderr
    pub progress: bool,
}
impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            samples: NonZeroU16::new(100).unwrap(),
            max_depth: 50,
            antialias: true,
            seed: 0,
            parallel: false,
            progress: false,
        }
    }
}
impl RenderSettings {
    /// Samples actually taken per pixel
    pub fn samples(&self) -> u16 {
        if self.antialias {
            self.samples.get()
        } else {
            1
        }
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct RenderStats {
    /// Total ray segments traced
    pub rays: u64,
    pub elapsed: Duration,
}

pub struct Screen {
    pub width: usize,
    pub height: usize,
    /// Flat buffer of 24-bit pixels with length of `width * height`, top row first
    pub buffer: Box<[Rgb]>,
}
impl Screen {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            buffer: vec![Rgb::default(); width * height].into(),
        }
    }

    /// `y` counts down from the top row.
    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        self.buffer[y * self.width + x]
    }

    /// Encodes each Pixel into `0RGB`
    pub fn encode(&self) -> Box<[u32]> {
        self.buffer.iter().map(|p| p.encode()).collect()
    }

    pub fn rows_mut(&mut self) -> std::slice::ChunksExactMut<Rgb> {
        self.buffer.chunks_exact_mut(self.width)
    }

    pub fn par_rows_mut(&mut self) -> rayon::slice::ChunksExactMut<Rgb> {
        self.buffer.par_chunks_exact_mut(self.width)
    }

    /// Fill the screen with a render of `world` seen through `camera`.
    ///
    /// Each row draws from its own rng seeded from `settings.seed` and the row, so the
    /// result only depends on the inputs, serial or not.
    pub fn render(
        &mut self,
        camera: &Camera,
        world: &HitList,
        settings: &RenderSettings,
    ) -> RenderStats {
        let start = Instant::now();
        let (width, height) = (self.width, self.height);
        let progress = Progress::new(height, settings.progress);

        let render_row = |(y, row): (usize, &mut [Rgb])| {
            let mut rng = CrateRng::seed_from_u64(row_seed(settings.seed, y));
            let mut rays = 0;
            // The image plane's `j` grows upward
            let row_j = (height - y - 1) as f64;
            for (x, pix) in row.iter_mut().enumerate() {
                let mut color = Color::BLACK;
                for _ in 0..settings.samples() {
                    let (di, dj) = if settings.antialias {
                        (rng.gen::<f64>(), rng.gen::<f64>())
                    } else {
                        (0., 0.)
                    };
                    let i = (x as f64 + di) / (width.max(2) - 1) as f64;
                    let j = (row_j + dj) / (height.max(2) - 1) as f64;

                    let ray = camera.get_ray(i, j, &mut rng);
                    color += ray_color(&ray, world, settings.max_depth, &mut rng, &mut rays);
                }
                *pix = color.to_rgb(settings.samples());
            }
            progress.tick();
            rays
        };

        let rays: u64 = if settings.parallel {
            self.par_rows_mut().enumerate().map(render_row).sum()
        } else {
            self.rows_mut().enumerate().map(render_row).sum()
        };
        progress.finish();

        RenderStats {
            rays,
            elapsed: start.elapsed(),
        }
    }
}

/// Seed for a scanline's rng. Never equal to `seed`, which also builds the scene.
fn row_seed(seed: u64, row: usize) -> u64 {
    seed ^ (row as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Scanline counter printed to stderr.
struct Progress {
    total: usize,
    done: AtomicUsize,
    enabled: bool,
}
impl Progress {
    fn new(total: usize, enabled: bool) -> Self {
        Self {
            total,
            done: AtomicUsize::new(0),
            enabled,
        }
    }

    fn tick(&self) {
        let done = self.done.fetch_add(1, Ordering::Relaxed) + 1;
        if self.enabled {
            let percent = (done as f64 / self.total as f64 * 100.).round();
            eprint!("\rScanlines: {}/{} ({}%)", done, self.total, percent);
            let _ = io::stderr().flush();
        }
    }

    fn finish(&self) {
        if self.enabled {
            eprintln!("\nDone.");
        }
    }
}
