use anyhow::{Context, Result};

use crate::{CrateRng, Ray, Vec3};

#[derive(Clone, Debug)]
pub struct Camera {
    pub origin: Vec3,
    pub horiz: Vec3,
    pub vert: Vec3,
    pub lower_left: Vec3,

    /// Used for depth of field. `None` makes a pinhole camera.
    pub lens_radius: Option<f64>,
    /// Width part of the orthonormal basis.
    pub u: Vec3,
    /// Height part of the orthonormal basis.
    pub v: Vec3,
    /// Depth part of the orthonormal basis. The camera looks along `-w`.
    pub w: Vec3,
}
impl Camera {
    pub fn builder() -> CameraBuilder {
        CameraBuilder::default()
    }

    /// `i` and `j` go from `0.0` to `1.0` across the viewport, starting at the lower left.
    pub fn get_ray(&self, i: f64, j: f64, rng: &mut CrateRng) -> Ray {
        let origin = if let Some(radius) = self.lens_radius {
            let rand_disk = radius * Vec3::rand_unit_disk(rng);
            let offset = rand_disk.x * self.u + rand_disk.y * self.v;
            self.origin + offset
        } else {
            self.origin
        };

        Ray::new(
            origin,
            self.lower_left + i * self.horiz + j * self.vert - origin,
        )
    }
}

#[derive(Clone, Debug)]
pub struct CameraBuilder {
    origin: Vec3,
    look_at: Vec3,
    view_up: Vec3,
    vfov_degrees: f64,
    aspect_ratio: f64,
    /// Diameter of the lens. `None` or `0.0` disables depth of field.
    aperture: Option<f64>,
    /// If None, defaults to magnitude of vector between `origin` and `look_at`.
    focus_dist: Option<f64>,
}
impl CameraBuilder {
    pub fn build(&self) -> Result<Camera> {
        let lens_radius = self.aperture.filter(|&a| a > 0.).map(|a| a / 2.);
        let focus_dist = self
            .focus_dist
            .unwrap_or_else(|| (self.origin - self.look_at).norm());

        let theta = self.vfov_degrees.to_radians() / 2.;
        let half_height = focus_dist * theta.tan();
        let half_width = self.aspect_ratio * half_height;

        // Gram-Schmidt against the view direction; each step fails on a degenerate setup
        let w = Vec3::checked_normalized(self.origin - self.look_at)
            .context("look-from and look-at are the same point")
            .with_context(|| self.describe())?;
        let view_up = Vec3::checked_normalized(self.view_up)
            .context("view-up has zero length")
            .with_context(|| self.describe())?;
        let u = Vec3::checked_normalized(view_up.cross(w))
            .context("view-up is parallel to the viewing direction")
            .with_context(|| self.describe())?;

        let v = w.cross(u);
        let lower_left = self.origin - u * half_width - v * half_height - focus_dist * w;
        let horiz = 2. * u * half_width;
        let vert = 2. * v * half_height;

        Ok(Camera {
            origin: self.origin,
            horiz,
            vert,
            lower_left,
            lens_radius,
            u,
            v,
            w,
        })
    }

    fn describe(&self) -> String {
        format!(
            "Invalid camera: look-from {:?}, look-at {:?}, view-up {:?}",
            self.origin, self.look_at, self.view_up
        )
    }

    pub fn origin<T: Into<Vec3>>(&mut self, origin: T) -> &mut Self {
        self.origin = origin.into();
        self
    }
    pub fn look_at<T: Into<Vec3>>(&mut self, look_at: T) -> &mut Self {
        self.look_at = look_at.into();
        self
    }
    pub fn vfov_degrees(&mut self, vfov: f64) -> &mut Self {
        self.vfov_degrees = vfov;
        self
    }
    pub fn aspect_ratio(&mut self, aspect_ratio: f64) -> &mut Self {
        self.aspect_ratio = aspect_ratio;
        self
    }
    pub fn view_up<T: Into<Vec3>>(&mut self, view_up: T) -> &mut Self {
        self.view_up = view_up.into();
        self
    }
    /// Diameter of the lens. `None` or `0.0` disables depth of field.
    pub fn aperture<T: Into<Option<f64>>>(&mut self, aperture: T) -> &mut Self {
        self.aperture = aperture.into();
        self
    }
    /// If None, defaults to magnitude of vector between `origin` and `look_at`.
    pub fn focus_dist<T: Into<Option<f64>>>(&mut self, dist: T) -> &mut Self {
        self.focus_dist = dist.into();
        self
    }
}
impl Default for CameraBuilder {
    fn default() -> Self {
        Self {
            origin: Vec3::ORIGIN,
            look_at: Vec3::new(0., 0., -1.),
            view_up: Vec3::UNIT_Y,
            vfov_degrees: 90.,
            aspect_ratio: 16. / 9.,
            aperture: None,
            focus_dist: None,
        }
    }
}
