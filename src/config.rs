use std::f64::consts::FRAC_PI_4;
use std::num::{NonZeroU16, NonZeroU32, NonZeroUsize};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, ensure, Context, Result};
use once_cell::sync::OnceCell;
use rand::Rng;
use structopt::StructOpt;
use strum::VariantNames;
use strum_macros::Display as StrumDisplay;
use strum_macros::{EnumString, EnumVariantNames};

use crate::{Camera, Color, CrateRng, Dielectric, HitList, Lambertian, Material, Metal, Sphere};
use crate::{RenderSettings, Vec3};

static CONFIG: OnceCell<Config> = OnceCell::new();

#[allow(non_snake_case)]
/// Return a `Config` built from command line args
pub fn GLOBAL() -> &'static Config {
    CONFIG.get_or_init(Config::from_args)
}

#[derive(Clone, Debug, StructOpt)]
pub struct Config {
    #[structopt(short, long, default_value = "400", display_order = 0)]
    /// Width of render
    pub width: NonZeroUsize,

    #[structopt(
        short,
        long,
        default_value = "16:9",
        display_order = 1,
        parse(try_from_str = parse_aspect_ratio),
    )]
    /// Width over height, as `W:H` or a decimal. The height is derived from it
    pub aspect_ratio: f64,

    #[structopt(
        help = "Disable antialiasing",
        short = "n",
        long = "no-aa",
        // Disable antialiasing if the flag is given at least once
        parse(from_occurrences = invert_bool),
    )]
    /// Controls antialiasing
    pub antialias: bool,

    #[structopt(short, long, default_value = "100")]
    /// Number of samples per pixel
    pub samples: NonZeroU16,

    #[structopt(short, long, default_value = "50")]
    /// Maximum ray bounce depth
    pub max_depth: NonZeroU32,

    #[structopt(short = "r", long = "rng")]
    /// Use a specific seed for the rng.
    pub seed: Option<u64>,

    #[structopt(short, long, parse(from_os_str))]
    /// Write the image here instead of stdout
    pub output: Option<PathBuf>,

    #[structopt(short, long)]
    /// Render scanlines in parallel. The image is the same either way
    pub parallel: bool,

    #[structopt(long)]
    /// Show the finished render in a window
    pub show: bool,

    // Run at 30 fps
    #[structopt(skip = Duration::from_secs_f64(1. / 30.))]
    /// Controls the framerate of the preview window
    pub delay: Duration,

    #[structopt(
        default_value = "Random",
        // Using this instead of possible_values because possible_values doesn't wrap properly
        parse(try_from_str = parse_scene),
    )]
    /// The scene to render
    pub scene: Scene,
}

impl Config {
    pub fn height(&self) -> usize {
        ((self.width.get() as f64 / self.aspect_ratio) as usize).max(1)
    }

    pub fn render_settings(&self, seed: u64) -> RenderSettings {
        RenderSettings {
            samples: self.samples,
            max_depth: self.max_depth.get(),
            antialias: self.antialias,
            seed,
            parallel: self.parallel,
            progress: true,
        }
    }
}

fn parse_scene(s: &str) -> Result<Scene> {
    s.parse::<Scene>().map_err(|_| {
        anyhow!(
            "\"{}\" isn't a Scene.\nPossible values: {:#?}",
            s,
            Scene::VARIANTS
        )
    })
}

/// Accepts `16:9` style ratios as well as plain numbers.
fn parse_aspect_ratio(s: &str) -> Result<f64> {
    let ratio = match s.split_once(':') {
        Some((w, h)) => {
            let w: f64 = w.trim().parse().with_context(|| format!("Bad width in \"{}\"", s))?;
            let h: f64 = h.trim().parse().with_context(|| format!("Bad height in \"{}\"", s))?;
            w / h
        }
        None => s
            .trim()
            .parse()
            .with_context(|| format!("\"{}\" isn't an aspect ratio", s))?,
    };
    ensure!(
        ratio.is_finite() && ratio > 0.,
        "Aspect ratio must be positive: \"{}\"",
        s
    );
    Ok(ratio)
}

fn invert_bool(i: u64) -> bool {
    i == 0
}

#[derive(Copy, Clone, Debug, StrumDisplay, EnumString, EnumVariantNames, PartialEq)]
pub enum Scene {
    Random,
    Balls,
    WideAngle,
    Single,
}

impl Scene {
    pub fn create(self, aspect_ratio: f64, rng: &mut CrateRng) -> Result<(Camera, HitList)> {
        Ok((self.camera(aspect_ratio)?, self.world(rng)))
    }

    pub fn camera(self, aspect_ratio: f64) -> Result<Camera> {
        use Scene::*;
        let result = match self {
            Random => Camera::builder()
                .origin([13., 2., 3.])
                .look_at([0., 0., 0.])
                .vfov_degrees(20.)
                .aspect_ratio(aspect_ratio)
                .aperture(0.1)
                .focus_dist(10.)
                .build(),
            Balls => Camera::builder()
                .origin([3., 3., 2.])
                .look_at([0., 0., -1.])
                .vfov_degrees(20.)
                .aspect_ratio(aspect_ratio)
                .aperture(2.)
                .build(),
            WideAngle | Single => Camera::builder()
                .origin([0., 0., 0.])
                .look_at([0., 0., -1.])
                .vfov_degrees(90.)
                .aspect_ratio(aspect_ratio)
                .build(),
        };

        result.map_err(|err| err.context(self))
    }

    pub fn world(self, rng: &mut CrateRng) -> HitList {
        use Scene::*;

        match self {
            Random => {
                let mut world = HitList::new();
                world.push(Sphere::from(
                    [0., -1000., 0.],
                    1000.,
                    Lambertian::new([0.5, 0.5, 0.5]),
                ));

                // Every small glass ball is the same glass
                let glass = Material::from(Dielectric::new(1.5)).arc();
                for a in -11..11 {
                    for b in -11..11 {
                        let (x, z) = (0.9 * rng.gen::<f64>(), 0.9 * rng.gen::<f64>());
                        let center = Vec3::new(a as f64 + x, 0.2, b as f64 + z);
                        if (center - Vec3::new(4., 0.2, 0.)).norm() <= 0.9 {
                            continue;
                        }
                        let material = rng.gen::<f64>();
                        if material < 0.8 {
                            // diffuse
                            let albedo = Color::rand(rng) * Color::rand(rng);
                            world.push(Sphere::new(center, 0.2, Lambertian::new(albedo)));
                        } else if material < 0.95 {
                            // metal
                            let albedo = Color::rand_range(rng, 0.5, 1.);
                            let fuzz = rng.gen_range(0., 0.5);
                            world.push(Sphere::new(center, 0.2, Metal::new(albedo, fuzz)));
                        } else {
                            // glass
                            world.push(Sphere::new(center, 0.2, glass.clone()));
                        }
                    }
                }

                world.push(Sphere::from([0., 1., 0.], 1., glass));
                world.push(Sphere::from(
                    [-4., 1., 0.],
                    1.,
                    Lambertian::new([0.4, 0.2, 0.1]),
                ));
                world.push(Sphere::from([4., 1., 0.], 1., Metal::from([0.7, 0.6, 0.5], 0.)));

                world
            }
            Balls => {
                let mut world = HitList::new();
                world.push(Sphere::from(
                    [0., -100.5, -1.],
                    100.,
                    Lambertian::new([0.8, 0.8, 0.]),
                ));
                world.push(Sphere::from(
                    [0., 0., -1.],
                    0.5,
                    Lambertian::new([0.1, 0.2, 0.5]),
                ));

                // Hollow glass ball: the inner sphere's normals point inward
                let glass = Material::from(Dielectric::new(1.5)).arc();
                world.push(Sphere::from([-1., 0., -1.], 0.5, glass.clone()));
                world.push(Sphere::from([-1., 0., -1.], -0.45, glass));

                world.push(Sphere::from(
                    [1., 0., -1.],
                    0.5,
                    Metal::from([0.8, 0.6, 0.2], 0.3),
                ));

                world
            }
            WideAngle => {
                let radius = FRAC_PI_4.cos();
                let mut world = HitList::new();
                world.push(Sphere::from(
                    [-radius, 0., -1.],
                    radius,
                    Lambertian::new([0., 0., 1.]),
                ));
                world.push(Sphere::from(
                    [radius, 0., -1.],
                    radius,
                    Lambertian::new([1., 0., 0.]),
                ));

                world
            }
            Single => {
                let mut world = HitList::new();
                world.push(Sphere::from(
                    [0., -100.5, -1.],
                    100.,
                    Lambertian::new([0.5, 0.5, 0.5]),
                ));
                world.push(Sphere::from(
                    [0., 0., -1.],
                    0.5,
                    Lambertian::new([0.5, 0.5, 0.5]),
                ));

                world
            }
        }
    }
}

#[cfg(test)]
mod parse_test {
    use super::*;

    #[test]
    fn right_case() {
        assert_eq!("Random".parse::<Scene>().unwrap(), Scene::Random);
        assert_eq!("WideAngle".parse::<Scene>().unwrap(), Scene::WideAngle);
    }

    #[test]
    fn wrong_case() {
        "random".parse::<Scene>().unwrap_err();
        "rANDOM".parse::<Scene>().unwrap_err();
        "wideangle".parse::<Scene>().unwrap_err();
        "wide-angle".parse::<Scene>().unwrap_err();
        "wide_angle".parse::<Scene>().unwrap_err();
        "Wide_angle".parse::<Scene>().unwrap_err();
    }

    #[test]
    fn aspect_ratios() {
        assert_eq!(parse_aspect_ratio("16:9").unwrap(), 16. / 9.);
        assert_eq!(parse_aspect_ratio(" 2 : 1 ").unwrap(), 2.);
        assert_eq!(parse_aspect_ratio("1.5").unwrap(), 1.5);
        parse_aspect_ratio("16x9").unwrap_err();
        parse_aspect_ratio("0").unwrap_err();
        parse_aspect_ratio("1:0").unwrap_err();
        parse_aspect_ratio("-2").unwrap_err();
    }

    #[test]
    fn height_is_derived_from_width() {
        let config = Config::from_iter(&["spheretrace", "--width", "400"]);
        assert_eq!(config.height(), 225);
        let config = Config::from_iter(&["spheretrace", "-w", "1", "-a", "4"]);
        assert_eq!(config.height(), 1);
    }

    #[test]
    fn defaults() {
        let config = Config::from_iter(&["spheretrace"]);
        assert_eq!(config.scene, Scene::Random);
        assert!(config.antialias);
        assert!(config.seed.is_none());
        assert!(config.output.is_none());

        let config = Config::from_iter(&["spheretrace", "-n", "-r", "7", "Balls"]);
        assert!(!config.antialias);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.scene, Scene::Balls);
        assert_eq!(config.render_settings(7).samples(), 1);
    }
}

#[cfg(test)]
mod scene_test {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn every_scene_builds() {
        for name in Scene::VARIANTS {
            let scene: Scene = name.parse().unwrap();
            let mut rng = CrateRng::seed_from_u64(0);
            let (_camera, world) = scene.create(16. / 9., &mut rng).unwrap();
            assert!(!world.is_empty(), "{} is empty", scene);
        }
    }

    #[test]
    fn random_scene_is_reproducible() {
        let count = |seed| Scene::Random.world(&mut CrateRng::seed_from_u64(seed)).len();
        assert_eq!(count(5), count(5));
        // Ground, three big spheres, and most of the 22x22 grid
        assert!(count(5) > 400);
    }

    #[test]
    fn balls_share_one_glass() {
        let world = Scene::Balls.world(&mut CrateRng::seed_from_u64(0));
        let glass: Vec<_> = world
            .0
            .iter()
            .filter_map(|shape| match shape {
                crate::Shape::Sphere(s) => match *s.material {
                    Material::Dielectric(_) => Some(s),
                    _ => None,
                },
            })
            .collect();
        assert_eq!(glass.len(), 2);
        assert!(std::sync::Arc::ptr_eq(&glass[0].material, &glass[1].material));
        assert!(glass[1].radius < 0.);
    }
}
