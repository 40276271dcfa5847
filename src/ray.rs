use crate::Vec3;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Not necessarily unit length
    pub dir: Vec3,
}
impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }

    /// The point along the ray at parameter `t`.
    ///
    /// # Example
    /// ```
    /// # use spheretrace::{Ray, Vec3};
    /// let ray = Ray::new(Vec3::new(1., 0., 0.), Vec3::new(0., 2., 0.));
    /// assert_eq!(ray.at(1.5), Vec3::new(1., 3., 0.));
    /// ```
    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + t * self.dir
    }
}
