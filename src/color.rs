use std::ops;

use rand::distributions::{Distribution, Uniform};
use rand::Rng;

use crate::CrateRng;

/// Linear RGB radiance. Each channel is nominally in 0.0 to 1.0 but isn't clamped until
/// `Color::to_rgb`. The default is black, the empty sum of samples.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}
impl Color {
    pub const BLACK: Self = Self::new(0., 0., 0.);
    pub const WHITE: Self = Self::new(1., 1., 1.);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn rand(rng: &mut CrateRng) -> Self {
        let albedo = rng.gen::<[f64; 3]>();
        albedo.into()
    }

    pub fn rand_range(rng: &mut CrateRng, low: f64, high: f64) -> Self {
        let distr = Uniform::new(low, high);
        let albedo = [distr.sample(rng), distr.sample(rng), distr.sample(rng)];
        albedo.into()
    }

    /// Linear interpolation from `self` (at `t = 0`) to `other` (at `t = 1`).
    pub fn lerp(self, other: Color, t: f64) -> Self {
        (1. - t) * self + t * other
    }

    /// Average `samples` accumulated samples, gamma correct for gamma 2.0 and
    /// quantize to 8 bits per channel.
    ///
    /// # Example
    /// ```
    /// # use spheretrace::{Color, Rgb};
    /// let sum = Color::new(4., 1., 0.);
    /// assert_eq!(sum.to_rgb(4), Rgb::new(255, 128, 0));
    /// ```
    pub fn to_rgb(self, samples: u16) -> Rgb {
        let scale = 1. / f64::from(samples);
        let channel = |c: f64| {
            let c = (scale * c).sqrt();
            // `max` drops NAN, so NAN ends up as 0
            (256. * c.max(0.).min(0.999)) as u8
        };
        Rgb::new(channel(self.r), channel(self.g), channel(self.b))
    }
}

impl From<[f64; 3]> for Color {
    fn from(a: [f64; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }
}

impl ops::Add for Color {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}
impl ops::AddAssign for Color {
    fn add_assign(&mut self, rhs: Self) {
        self.r += rhs.r;
        self.g += rhs.g;
        self.b += rhs.b;
    }
}
/// Multiply the corresponding channels together
impl ops::Mul for Color {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self::new(self.r * rhs.r, self.g * rhs.g, self.b * rhs.b)
    }
}
impl ops::Mul<f64> for Color {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self::new(self.r * rhs, self.g * rhs, self.b * rhs)
    }
}
impl ops::Mul<Color> for f64 {
    type Output = Color;

    fn mul(self, rhs: Color) -> Self::Output {
        rhs * self
    }
}

/// A tone mapped 24-bit pixel
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}
impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Encodes the pixel into `0RGB`
    pub fn encode(self) -> u32 {
        let (r, g, b) = (self.r as u32, self.g as u32, self.b as u32);
        (r << 16) | (g << 8) | b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gamma_correction_takes_square_root() {
        // sqrt(0.25) = 0.5 -> 128
        assert_eq!(Color::new(0.25, 0.25, 0.25).to_rgb(1), Rgb::new(128, 128, 128));
    }

    #[test]
    fn tone_mapping_clamps() {
        let rgb = Color::new(-1., 9., f64::NAN).to_rgb(1);
        assert_eq!(rgb, Rgb::new(0, 255, 0));
    }

    #[test]
    fn averages_over_samples() {
        let mut sum = Color::BLACK;
        for _ in 0..10 {
            sum += Color::new(0.25, 0., 1.);
        }
        assert_eq!(sum.to_rgb(10), Rgb::new(128, 0, 255));
    }

    #[test]
    fn default_is_an_empty_sum() {
        assert_eq!(Color::default(), Color::BLACK);
        let mut sum = Color::default();
        sum += Color::new(0.25, 0.25, 0.25);
        assert_eq!(sum.to_rgb(1), Rgb::new(128, 128, 128));
    }

    #[test]
    fn lerp_endpoints() {
        let blue = Color::new(0.5, 0.7, 1.);
        assert_eq!(Color::WHITE.lerp(blue, 0.), Color::WHITE);
        assert_eq!(Color::WHITE.lerp(blue, 1.), blue);
    }

    #[test]
    fn encode_0rgb() {
        assert_eq!(Rgb::new(0x12, 0x34, 0x56).encode(), 0x0012_3456);
    }
}
