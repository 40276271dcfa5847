use std::fs::File;
use std::io::{self, BufWriter};

use anyhow::{Context, Result};
use log::{debug, info, warn};
use minifb::{Key, Window, WindowOptions};
use rand::SeedableRng;

use spheretrace::{config, ppm, CrateRng, Screen};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = config::GLOBAL();
    let seed = config.seed.unwrap_or_else(rand::random);
    let (width, height) = (config.width.get(), config.height());
    info!("Rendering {} with seed {}", config.scene, seed);
    info!(
        "{}x{} pixels, {} samples per pixel, max depth {}",
        width,
        height,
        config.render_settings(seed).samples(),
        config.max_depth
    );

    if !config.antialias && config.samples.get() > 1 {
        warn!(
            "Antialiasing is off, ignoring {} samples per pixel",
            config.samples
        );
    }

    let mut rng = CrateRng::seed_from_u64(seed);
    let (camera, world) = config.scene.create(config.aspect_ratio, &mut rng)?;
    info!("Scene has {} objects", world.len());
    debug!("{:?}", camera);

    let settings = config.render_settings(seed);
    debug!("{:?}", settings);
    let mut screen = Screen::new(width, height);
    let stats = screen.render(&camera, &world, &settings);
    info!("Traced {} rays in {:.2?}", stats.rays, stats.elapsed);

    match &config.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Couldn't create {}", path.display()))?;
            ppm::write_ppm(BufWriter::new(file), &screen)
                .with_context(|| format!("Couldn't write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            ppm::write_ppm(BufWriter::new(stdout.lock()), &screen)
                .context("Couldn't write image to stdout")?;
        }
    }

    if config.show {
        show(&screen)?;
    }
    Ok(())
}

/// Display the render until the window is closed or Escape is pressed.
fn show(screen: &Screen) -> Result<()> {
    let mut window = Window::new(
        "spheretrace",
        screen.width,
        screen.height,
        WindowOptions::default(),
    )
    .context("Couldn't open preview window")?;
    window.limit_update_rate(Some(config::GLOBAL().delay));

    let buffer = screen.encode();
    while window.is_open() && !window.is_key_down(Key::Escape) {
        window
            .update_with_buffer(&buffer, screen.width, screen.height)
            .context("Couldn't update preview window")?;
    }
    Ok(())
}
