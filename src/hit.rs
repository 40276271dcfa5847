use std::fmt::Debug;
use std::ops::RangeInclusive;

use crate::{Material, Ray, Shape, Vec3};

pub struct Hit<'a> {
    pub point: Vec3,
    /// A unit-length normal vector. Always points against the incident ray.
    pub normal: Vec3,
    /// Ray parameter of the hit
    pub t: f64,
    /// Hit the front face or back face of object
    pub front_face: bool,
    /// The material that was hit
    pub material: &'a Material,
}
impl<'a> Hit<'a> {
    pub fn new(
        point: Vec3,
        normal: Vec3,
        t: f64,
        front_face: bool,
        material: &'a Material,
    ) -> Self {
        Self {
            point,
            normal,
            t,
            front_face,
            material,
        }
    }

    /// Builds a hit from the surface's outward normal, flipping it to face `ray`.
    pub fn ray(
        point: Vec3,
        mut normal: Vec3,
        t: f64,
        ray: &Ray,
        material: &'a Material,
    ) -> Self {
        // Dot product is negative when ray hits back face
        let front_face = ray.dir.dot(normal) < 0.;
        // Make suface normal always point against incident ray
        if !front_face {
            normal *= -1.;
        }
        Self::new(point, normal, t, front_face, material)
    }
}

pub trait Hittable: Sync + Debug {
    /// Returns the hit determined by a ray. If there is no hit or the hit's `t` isn't contained
    /// by `hit_time`, returns `None`.
    fn hit(&self, ray: &Ray, hit_time: &RangeInclusive<f64>) -> Option<Hit>;
}

/// The scene. Read only while rendering.
#[derive(Default, Debug)]
pub struct HitList(pub Vec<Shape>);
impl HitList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push<T: Into<Shape>>(&mut self, val: T) {
        self.0.push(val.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
impl Hittable for HitList {
    fn hit(&self, ray: &Ray, hit_time: &RangeInclusive<f64>) -> Option<Hit> {
        let mut range = hit_time.clone();
        let mut closest = None;
        for obj in &self.0 {
            if let Some(hit) = obj.hit(ray, &range) {
                // Later hits must be closer
                range = *range.start()..=hit.t;
                closest = Some(hit);
            }
        }
        closest
    }
}
