use std::ops;

use anyhow::{ensure, Result};
use rand_distr::Distribution;

use crate::CrateRng;

/// Used for points and directions.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}
const ERR_NORMED_0: &str = "Tried to normalize vector of length 0!";
/// Components smaller than this count as zero in `Vec3::near_zero`
const NEAR_ZERO: f64 = 1e-8;
impl Vec3 {
    pub const ORIGIN: Self = Self::new(0., 0., 0.);
    // The standard basis
    pub const UNIT_X: Self = Self::new(1., 0., 0.);
    pub const UNIT_Y: Self = Self::new(0., 1., 0.);
    pub const UNIT_Z: Self = Self::new(0., 0., 1.);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The caller must make sure `v` isn't the zero vector.
    ///
    /// # Example
    /// ```
    /// # use spheretrace::vec3::Vec3;
    /// let a = Vec3::new(0., 0., 5.);
    /// let b = Vec3::normalized(a);
    /// assert_eq!(b, Vec3::UNIT_Z);
    /// ```
    pub fn normalized(v: Vec3) -> Self {
        let normed = v / v.norm();
        debug_assert!(!normed.is_nan(), "{}", ERR_NORMED_0);
        normed
    }

    /// # Example
    /// ```
    /// # use spheretrace::vec3::Vec3;
    /// let a = Vec3::new(0., 0., 0.);
    /// assert!(Vec3::checked_normalized(a).is_err());
    /// ```
    pub fn checked_normalized(v: Vec3) -> Result<Self> {
        let norm = v.norm();
        ensure!(norm != 0., ERR_NORMED_0);
        Ok(v / norm)
    }

    /// Samples uniformly from the surface of the unit sphere in three dimensions.
    pub fn rand_unit_sphere(rng: &mut CrateRng) -> Self {
        let ret: [f64; 3] = rand_distr::UnitSphere.sample(rng);
        ret.into()
    }

    /// Samples uniformly from the interior of the unit sphere.
    pub fn rand_unit_ball(rng: &mut CrateRng) -> Self {
        let ret: [f64; 3] = rand_distr::UnitBall.sample(rng);
        ret.into()
    }

    /// Samples uniformly from the unit disc in the `x` and `y` dimensions. `z` is 0.
    pub fn rand_unit_disk(rng: &mut CrateRng) -> Self {
        let ret: [f64; 2] = rand_distr::UnitDisc.sample(rng);
        Self::new(ret[0], ret[1], 0.)
    }

    pub fn norm(&self) -> f64 {
        self.norm_squared().sqrt()
    }

    pub fn norm_squared(&self) -> f64 {
        self.x.powi(2) + self.y.powi(2) + self.z.powi(2)
    }

    /// # Example
    /// ```
    /// # use spheretrace::vec3::Vec3;
    /// let a = Vec3::new(4., 8., 10.);
    /// let b = Vec3::new(9., 2., 7.);
    /// assert_eq!(a.dot(b), 122.);
    /// ```
    pub fn dot(&self, rhs: Vec3) -> f64 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    /// # Example
    /// ```
    /// # use spheretrace::vec3::Vec3;
    /// let a = Vec3::new(2., 3., 4.);
    /// let b = Vec3::new(5., 6., 7.);
    /// assert_eq!(a.cross(b), Vec3::new(-3., 6., -3.));
    /// ```
    pub fn cross(&self, rhs: Vec3) -> Self {
        Self {
            x: self.y * rhs.z - self.z * rhs.y,
            y: self.z * rhs.x - self.x * rhs.z,
            z: self.x * rhs.y - self.y * rhs.x,
        }
    }

    /// Mirror `self` about the unit vector `normal`.
    pub fn reflect(&self, normal: Vec3) -> Self {
        *self - 2. * self.dot(normal) * normal
    }

    /// Bend the unit vector `self` through a surface with unit `normal`.
    pub fn refract(&self, normal: Vec3, eta_i_over_eta_t: f64) -> Self {
        let cos_theta = (-*self).dot(normal).min(1.);
        let refract_perp = eta_i_over_eta_t * (*self + cos_theta * normal);
        let refract_parallel = -normal * (1. - refract_perp.norm_squared()).abs().sqrt();
        refract_perp + refract_parallel
    }

    /// True if every component is close to 0.
    pub fn near_zero(&self) -> bool {
        self.x.abs() < NEAR_ZERO && self.y.abs() < NEAR_ZERO && self.z.abs() < NEAR_ZERO
    }

    pub fn is_nan(&self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl ops::Neg for Vec3 {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl ops::Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}
impl ops::AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl ops::Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}
impl ops::SubAssign for Vec3 {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

impl ops::Mul<f64> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
            z: self.z * rhs,
        }
    }
}
impl ops::Mul<Vec3> for f64 {
    type Output = Vec3;

    fn mul(self, rhs: Vec3) -> Self::Output {
        rhs * self
    }
}
impl ops::MulAssign<f64> for Vec3 {
    fn mul_assign(&mut self, rhs: f64) {
        self.x *= rhs;
        self.y *= rhs;
        self.z *= rhs;
    }
}

impl ops::Div<f64> for Vec3 {
    type Output = Self;

    fn div(self, rhs: f64) -> Self::Output {
        Self {
            x: self.x / rhs,
            y: self.y / rhs,
            z: self.z / rhs,
        }
    }
}
impl ops::DivAssign<f64> for Vec3 {
    fn div_assign(&mut self, rhs: f64) {
        self.x /= rhs;
        self.y /= rhs;
        self.z /= rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{approx, rng};

    fn approx_eq(a: Vec3, b: Vec3) -> bool {
        approx(a.x, b.x) && approx(a.y, b.y) && approx(a.z, b.z)
    }

    #[test]
    fn reflect_is_an_involution() {
        let normal = Vec3::normalized(Vec3::new(1., 2., -0.5));
        for d in &[
            Vec3::new(1., -1., 0.),
            Vec3::new(-3., 0.25, 7.),
            Vec3::new(0., 0., 1.),
        ] {
            let back = d.reflect(normal).reflect(normal);
            assert!(approx_eq(back, *d), "{:?} != {:?}", back, d);
        }
    }

    #[test]
    fn reflect_flips_normal_component() {
        let d = Vec3::new(1., -1., 0.);
        assert_eq!(d.reflect(Vec3::UNIT_Y), Vec3::new(1., 1., 0.));
    }

    #[test]
    fn refract_at_normal_incidence_goes_straight() {
        let d = Vec3::new(0., 0., -1.);
        let out = d.refract(Vec3::UNIT_Z, 1. / 1.5);
        assert!(approx_eq(out, d), "{:?}", out);
    }

    #[test]
    fn refract_bends_toward_normal_entering_denser_medium() {
        let d = Vec3::normalized(Vec3::new(1., -1., 0.));
        let out = d.refract(Vec3::UNIT_Y, 1. / 1.5);
        // Snell: sin(out) = sin(in) / 1.5
        let sin_in = d.x;
        assert!(approx(out.x, sin_in / 1.5));
        assert!(out.y < 0.);
        assert!(approx(out.norm(), 1.));
    }

    #[test]
    fn near_zero() {
        assert!(Vec3::ORIGIN.near_zero());
        assert!(Vec3::new(1e-9, -1e-9, 0.).near_zero());
        assert!(!Vec3::new(1e-9, 1e-3, 0.).near_zero());
    }

    #[test]
    fn random_samples_stay_in_bounds() {
        let mut rng = rng(7);
        for _ in 0..1000 {
            assert!((Vec3::rand_unit_sphere(&mut rng).norm() - 1.).abs() < 1e-9);
            assert!(Vec3::rand_unit_ball(&mut rng).norm() <= 1.);
            let disk = Vec3::rand_unit_disk(&mut rng);
            assert!(disk.norm() <= 1.);
            assert_eq!(disk.z, 0.);
        }
    }
}
