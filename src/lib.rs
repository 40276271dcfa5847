pub mod camera;
pub mod color;
pub mod config;
pub mod hit;
pub mod material;
pub mod ppm;
pub mod ray;
pub mod screen;
pub mod shape;
pub mod tracer;
pub mod vec3;

pub use camera::{Camera, CameraBuilder};
pub use color::{Color, Rgb};
pub use hit::{Hit, HitList, Hittable};
pub use material::{Dielectric, Lambertian, Material, Metal, Scatter};
pub use ray::Ray;
pub use screen::{RenderSettings, RenderStats, Screen};
pub use shape::{Shape, Sphere};
pub use vec3::Vec3;

/// The rng used throughout the crate. Always explicitly seeded.
pub type CrateRng = rand::rngs::SmallRng;

#[cfg(test)]
pub(crate) mod test_util {
    use rand::SeedableRng;

    use crate::CrateRng;

    pub const EPS: f64 = 1e-9;

    pub fn rng(seed: u64) -> CrateRng {
        CrateRng::seed_from_u64(seed)
    }

    pub fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }
}
