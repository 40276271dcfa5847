use std::ops::RangeInclusive;
use std::sync::Arc;

use crate::{Hit, Hittable, Material, Ray, Vec3};

/// Every kind of surface that can be put in a scene.
#[derive(Clone, Debug)]
pub enum Shape {
    Sphere(Sphere),
}
impl Hittable for Shape {
    fn hit(&self, ray: &Ray, hit_time: &RangeInclusive<f64>) -> Option<Hit> {
        match self {
            Shape::Sphere(sphere) => sphere.hit(ray, hit_time),
        }
    }
}
impl From<Sphere> for Shape {
    fn from(sphere: Sphere) -> Self {
        Shape::Sphere(sphere)
    }
}

/// A negative `radius` keeps the geometry but flips the normals inward. Useful for hollow
/// glass.
#[derive(Clone, Debug)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f64,
    pub material: Arc<Material>,
}
impl Sphere {
    pub fn new<M: Into<Arc<Material>>>(center: Vec3, radius: f64, material: M) -> Self {
        Self {
            center,
            radius,
            material: material.into(),
        }
    }

    pub fn from<M: Into<Arc<Material>>>(c: [f64; 3], radius: f64, material: M) -> Self {
        Self::new(c.into(), radius, material)
    }
}
impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, hit_time: &RangeInclusive<f64>) -> Option<Hit> {
        let oc = ray.origin - self.center;
        let a = ray.dir.norm_squared();
        let half_b = oc.dot(ray.dir);
        let c = oc.norm_squared() - self.radius.powi(2);
        let disciminant = half_b.powi(2) - a * c;

        if disciminant < 0. {
            return None;
        }
        let root = disciminant.sqrt();

        // Find the nearest root in range
        let t = [(-half_b - root) / a, (-half_b + root) / a]
            .iter()
            .copied()
            .find(|t| hit_time.contains(t))?;

        let point = ray.at(t);
        let outward_normal = (point - self.center) / self.radius;
        Some(Hit::ray(point, outward_normal, t, ray, &self.material))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::approx;
    use crate::tracer::T_MIN;
    use crate::Lambertian;

    fn unit_at(center: [f64; 3], radius: f64) -> Sphere {
        Sphere::from(center, radius, Lambertian::new([0.5, 0.5, 0.5]))
    }

    #[test]
    fn ray_aimed_at_center() {
        let sphere = unit_at([0., 0., -3.], 0.5);
        // Direction isn't normalized, `t` is in units of `dir`
        let ray = Ray::new(Vec3::ORIGIN, Vec3::new(0., 0., -1.));
        let hit = sphere.hit(&ray, &(T_MIN..=f64::INFINITY)).unwrap();

        assert!(approx(hit.t, 3. - 0.5));
        assert!(hit.front_face);
        assert!(approx(hit.normal.norm(), 1.));
        // Parallel to (point - center)
        let radial = Vec3::normalized(hit.point - sphere.center);
        assert!(approx(hit.normal.dot(radial), 1.));
    }

    #[test]
    fn miss_is_not_an_error() {
        let sphere = unit_at([0., 0., -3.], 0.5);
        let ray = Ray::new(Vec3::ORIGIN, Vec3::new(0., 1., 0.));
        assert!(sphere.hit(&ray, &(T_MIN..=f64::INFINITY)).is_none());
    }

    #[test]
    fn outward_ray_from_surface_does_not_self_intersect() {
        let sphere = unit_at([1., 2., 3.], 2.);
        for dir in &[
            Vec3::UNIT_X,
            Vec3::new(0., -1., 0.),
            Vec3::normalized(Vec3::new(1., 1., -1.)),
        ] {
            let origin = sphere.center + sphere.radius * *dir;
            let ray = Ray::new(origin, *dir);
            assert!(sphere.hit(&ray, &(T_MIN..=f64::INFINITY)).is_none());
        }
    }

    #[test]
    fn inside_hits_far_side_back_face() {
        let sphere = unit_at([0., 0., 0.], 2.);
        let ray = Ray::new(Vec3::ORIGIN, Vec3::UNIT_X);
        let hit = sphere.hit(&ray, &(T_MIN..=f64::INFINITY)).unwrap();

        assert!(approx(hit.t, 2.));
        assert!(!hit.front_face);
        // Points against the ray, back toward the center
        assert_eq!(hit.normal, -Vec3::UNIT_X);
    }

    #[test]
    fn negative_radius_flips_normal() {
        let outer = unit_at([0., 0., -3.], 0.5);
        let hollow = unit_at([0., 0., -3.], -0.5);
        let ray = Ray::new(Vec3::ORIGIN, Vec3::new(0., 0., -1.));
        let range = T_MIN..=f64::INFINITY;

        let a = outer.hit(&ray, &range).unwrap();
        let b = hollow.hit(&ray, &range).unwrap();
        // Same geometry
        assert!(approx(a.t, b.t));
        // Stored normal still opposes the ray, but the face is reversed
        assert_eq!(a.normal, b.normal);
        assert!(a.front_face);
        assert!(!b.front_face);
    }

    #[test]
    fn shape_dispatches_to_sphere() {
        let shape = Shape::from(unit_at([0., 0., -3.], 0.5));
        let ray = Ray::new(Vec3::ORIGIN, Vec3::new(0., 0., -2.));
        let hit = shape.hit(&ray, &(T_MIN..=f64::INFINITY)).unwrap();
        assert!(approx(hit.t, 1.25));
    }
}
