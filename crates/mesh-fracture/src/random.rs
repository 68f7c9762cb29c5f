//! Random source used to place cutting planes and scatter debris.

use nalgebra::Vector3;
use rand::Rng;

/// The random draws the fracture pipeline needs.
///
/// Every [`rand::Rng`] implements this, so a seeded `StdRng` makes a fracture
/// reproducible. Tests can implement it directly to place planes exactly.
pub trait FractureRng {
    /// A uniformly distributed unit vector.
    fn next_unit_vector(&mut self) -> Vector3<f32>;

    /// A float in `[min, max]`. Returns `min` if the range is empty.
    fn next_float(&mut self, min: f32, max: f32) -> f32;

    /// A point uniformly distributed inside a ball of the given radius,
    /// relative to its center.
    fn next_inside_sphere(&mut self, radius: f32) -> Vector3<f32>;
}

impl<R: Rng + ?Sized> FractureRng for R {
    fn next_unit_vector(&mut self) -> Vector3<f32> {
        loop {
            let v = unit_cube_sample(self);
            let norm_sq = v.norm_squared();
            if norm_sq > 1e-6 && norm_sq <= 1.0 {
                return v / norm_sq.sqrt();
            }
        }
    }

    fn next_float(&mut self, min: f32, max: f32) -> f32 {
        if min < max {
            self.gen_range(min..=max)
        } else {
            min
        }
    }

    fn next_inside_sphere(&mut self, radius: f32) -> Vector3<f32> {
        loop {
            let v = unit_cube_sample(self);
            if v.norm_squared() <= 1.0 {
                return v * radius;
            }
        }
    }
}

fn unit_cube_sample<R: Rng + ?Sized>(rng: &mut R) -> Vector3<f32> {
    Vector3::new(
        rng.gen_range(-1.0..=1.0),
        rng.gen_range(-1.0..=1.0),
        rng.gen_range(-1.0..=1.0),
    )
}
