use std::sync::Arc;

use rand::Rng;

use crate::{Color, CrateRng, Hit, Ray, Vec3};

/// A scattered ray and its color information
#[derive(Debug)]
pub struct Scatter {
    pub attenuation: Color,
    pub ray: Ray,
}
impl Scatter {
    pub fn new(attenuation: Color, ray: Ray) -> Self {
        Self { attenuation, ray }
    }
}

/// Surface response to light. Immutable, and shared between any number of shapes.
#[derive(Clone, Debug)]
pub enum Material {
    Lambertian(Lambertian),
    Metal(Metal),
    Dielectric(Dielectric),
}
impl Material {
    /// A material will either absorb a ray (`None`) or scatter it.
    pub fn scatter(&self, ray: &Ray, hit: &Hit, rng: &mut CrateRng) -> Option<Scatter> {
        match self {
            Material::Lambertian(m) => m.scatter(ray, hit, rng),
            Material::Metal(m) => m.scatter(ray, hit, rng),
            Material::Dielectric(m) => m.scatter(ray, hit, rng),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

macro_rules! impl_material_from {
    ($($variant:ident),*) => {$(
        impl From<$variant> for Material {
            fn from(m: $variant) -> Self {
                Material::$variant(m)
            }
        }
        impl From<$variant> for Arc<Material> {
            fn from(m: $variant) -> Self {
                Material::from(m).arc()
            }
        }
    )*};
}
impl_material_from!(Lambertian, Metal, Dielectric);

#[derive(Clone, Debug)]
/// Diffuse reflection
pub struct Lambertian {
    pub albedo: Color,
}
impl Lambertian {
    pub fn new<T: Into<Color>>(albedo: T) -> Self {
        Self {
            albedo: albedo.into(),
        }
    }

    fn scatter(&self, _ray: &Ray, hit: &Hit, rng: &mut CrateRng) -> Option<Scatter> {
        let scatter_dir = diffuse_dir(hit.normal, Vec3::rand_unit_sphere(rng));
        let scattered = Ray::new(hit.point, scatter_dir);
        Some(Scatter::new(self.albedo, scattered))
    }
}

/// Offset the normal by a random unit vector, falling back to the normal itself when the
/// two almost cancel out.
fn diffuse_dir(normal: Vec3, offset: Vec3) -> Vec3 {
    let dir = normal + offset;
    if dir.near_zero() {
        normal
    } else {
        dir
    }
}

#[derive(Clone, Debug)]
pub struct Metal {
    pub albedo: Color,
    /// The fuzziness of the Metal. Is between `0.0` and `1.0`
    pub fuzz: f64,
}
impl Metal {
    pub fn new(albedo: Color, fuzz: f64) -> Self {
        let fuzz = fuzz.min(1.);
        Self { albedo, fuzz }
    }

    pub fn from(a: [f64; 3], fuzz: f64) -> Self {
        Self::new(a.into(), fuzz)
    }

    fn scatter(&self, ray: &Ray, hit: &Hit, rng: &mut CrateRng) -> Option<Scatter> {
        let reflected = Vec3::normalized(ray.dir).reflect(hit.normal);
        let fuzz = self.fuzz * Vec3::rand_unit_ball(rng);
        let scattered = Ray::new(hit.point, reflected + fuzz);

        // The fuzz scattered below the surface
        if scattered.dir.dot(hit.normal) <= 0. {
            return None;
        }
        Some(Scatter::new(self.albedo, scattered))
    }
}

#[derive(Clone, Debug)]
pub struct Dielectric {
    pub ref_index: f64,
}
impl Dielectric {
    pub fn new(ref_index: f64) -> Self {
        Self { ref_index }
    }

    /// Schlick's approximation of the Fresnel reflectance.
    ///
    /// # Example
    /// ```
    /// # use spheretrace::Dielectric;
    /// // Grazing incidence reflects everything
    /// assert!((Dielectric::schlick(0., 1.5) - 1.).abs() < 1e-12);
    /// ```
    pub fn schlick(cos: f64, ref_index: f64) -> f64 {
        let r0 = (1. - ref_index) / (1. + ref_index);
        let r0 = r0 * r0;
        r0 + (1. - r0) * (1. - cos).powi(5)
    }

    fn scatter(&self, ray: &Ray, hit: &Hit, rng: &mut CrateRng) -> Option<Scatter> {
        let eta_i_over_eta_t = if hit.front_face {
            1. / self.ref_index
        } else {
            self.ref_index
        };
        let unit_dir = Vec3::normalized(ray.dir);
        let cos_theta = (-unit_dir).dot(hit.normal).min(1.0);
        let sin_theta = (1. - cos_theta.powi(2)).sqrt();

        let cannot_refract = eta_i_over_eta_t * sin_theta > 1.0;
        let dir = if cannot_refract
            || rng.gen::<f64>() < Self::schlick(cos_theta, eta_i_over_eta_t)
        {
            unit_dir.reflect(hit.normal)
        } else {
            unit_dir.refract(hit.normal, eta_i_over_eta_t)
        };

        let scattered = Ray::new(hit.point, dir);
        Some(Scatter::new(Color::WHITE, scattered))
    }
}
