//! The radiance estimator.

use crate::{Color, CrateRng, Hittable, Ray, Vec3};

/// Smallest accepted hit parameter. Keeps scattered rays from hitting the surface they
/// left because of floating point error (shadow acne).
pub const T_MIN: f64 = 0.001;

const SKY_BLUE: Color = Color::new(0.5, 0.7, 1.);

/// Estimates the light travelling backwards along `ray`.
///
/// Every traced ray segment increments `rays`. Once `depth` bounces are used up no more light
/// is gathered.
pub fn ray_color<H: Hittable + ?Sized>(
    ray: &Ray,
    world: &H,
    depth: u32,
    rng: &mut CrateRng,
    rays: &mut u64,
) -> Color {
    if depth == 0 {
        return Color::BLACK;
    }
    *rays += 1;

    match world.hit(ray, &(T_MIN..=f64::INFINITY)) {
        Some(hit) => match hit.material.scatter(ray, &hit, rng) {
            Some(scatter) => {
                scatter.attenuation * ray_color(&scatter.ray, world, depth - 1, rng, rays)
            }
            None => Color::BLACK,
        },
        None => background(ray),
    }
}

/// Vertical white to blue gradient of the sky.
///
/// # Example
/// ```
/// # use spheretrace::{tracer, Color, Ray, Vec3};
/// let up = Ray::new(Vec3::ORIGIN, Vec3::UNIT_Y);
/// assert_eq!(tracer::background(&up), Color::new(0.5, 0.7, 1.));
/// ```
pub fn background(ray: &Ray) -> Color {
    let unit_dir = Vec3::normalized(ray.dir);
    let t = 0.5 * (unit_dir.y + 1.);
    Color::WHITE.lerp(SKY_BLUE, t)
}
