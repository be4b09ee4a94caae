use std::ops::{Add, AddAssign};

use glam::{vec3, Mat4, Vec3};

/// Axis-aligned bounding box.
///
/// Starts empty (with `min` at positive infinity and `max` at negative
/// infinity), so that growing it by anything yields that thing's extent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    min: Vec3,
    max: Vec3,
}

impl Bounds {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn min(&self) -> Vec3 {
        self.min
    }

    pub fn max(&self) -> Vec3 {
        self.max
    }

    pub fn extent(&self) -> Vec3 {
        self.max() - self.min()
    }

    /// Half of the surface area; that's what SAH uses as its cost proxy.
    pub fn half_area(&self) -> f32 {
        let extent = self.extent();

        extent.x * extent.y + extent.y * extent.z + extent.z * extent.x
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    pub fn grow(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Returns bounds enclosing all eight corners of this box after being
    /// transformed.
    ///
    /// For rotated boxes (and boxes approximating round things) the result
    /// is conservative, not tight.
    pub fn with_transform(&self, xform: Mat4) -> Self {
        if self.is_empty() {
            return *self;
        }

        (0..8)
            .map(|i| {
                let point = vec3(
                    if i & 1 > 0 { self.max.x } else { self.min.x },
                    if i & 2 > 0 { self.max.y } else { self.min.y },
                    if i & 4 > 0 { self.max.z } else { self.min.z },
                );

                xform.transform_point3(point)
            })
            .collect()
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY))
    }
}

impl Add<Vec3> for Bounds {
    type Output = Self;

    fn add(mut self, rhs: Vec3) -> Self::Output {
        self += rhs;
        self
    }
}

impl AddAssign<Vec3> for Bounds {
    fn add_assign(&mut self, rhs: Vec3) {
        self.grow(rhs);
    }
}

impl FromIterator<Vec3> for Bounds {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = Vec3>,
    {
        let mut this = Self::default();

        for item in iter {
            this += item;
        }

        this
    }
}

impl Add<Self> for Bounds {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl AddAssign<Self> for Bounds {
    fn add_assign(&mut self, rhs: Self) {
        self.min = self.min.min(rhs.min);
        self.max = self.max.max(rhs.max);
    }
}

impl FromIterator<Self> for Bounds {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = Self>,
    {
        let mut this = Self::default();

        for item in iter {
            this += item;
        }

        this
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::Quat;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    fn random_points(rng: &mut StdRng) -> Vec<Vec3> {
        let len = rng.gen_range(1..16);

        (0..len)
            .map(|_| {
                vec3(
                    rng.gen_range(-100.0..100.0),
                    rng.gen_range(-100.0..100.0),
                    rng.gen_range(-100.0..100.0),
                )
            })
            .collect()
    }

    #[test]
    fn union() {
        let mut rng = StdRng::seed_from_u64(1234);

        for _ in 0..64 {
            let p = random_points(&mut rng);
            let q = random_points(&mut rng);

            let p_bounds: Bounds = p.iter().copied().collect();
            let q_bounds: Bounds = q.iter().copied().collect();
            let target = p_bounds + q_bounds;

            let expected_min = p
                .iter()
                .chain(q.iter())
                .fold(Vec3::splat(f32::INFINITY), |acc, p| acc.min(*p));

            assert_eq!(expected_min, target.min());

            for point in p.iter().chain(q.iter()) {
                assert!(target.contains(*point));
            }
        }
    }

    #[test]
    fn empty() {
        let target = Bounds::default();

        assert!(target.is_empty());
        assert!(!target.contains(Vec3::ZERO));

        // Union with an empty box is a no-op
        let bounds = Bounds::new(Vec3::ZERO, Vec3::ONE);

        assert_eq!(bounds, bounds + target);
        assert_eq!(bounds, target + bounds);
        assert!(!(target + Vec3::ZERO).is_empty());
    }

    #[test]
    fn half_area() {
        let target = Bounds::new(Vec3::ZERO, vec3(1.0, 2.0, 3.0));

        assert_relative_eq!(target.half_area(), 2.0 + 6.0 + 3.0);
    }

    #[test]
    fn with_transform() {
        let target = Bounds::new(Vec3::NEG_ONE, Vec3::ONE).with_transform(
            Mat4::from_scale_rotation_translation(
                Vec3::splat(2.0),
                Quat::from_rotation_z(std::f32::consts::FRAC_PI_4),
                vec3(10.0, 0.0, 0.0),
            ),
        );

        let diagonal = 2.0 * std::f32::consts::SQRT_2;

        assert_relative_eq!(target.min().x, 10.0 - diagonal, epsilon = 1e-4);
        assert_relative_eq!(target.max().x, 10.0 + diagonal, epsilon = 1e-4);
        assert_relative_eq!(target.min().z, -2.0, epsilon = 1e-4);
        assert_relative_eq!(target.max().z, 2.0, epsilon = 1e-4);

        assert!(Bounds::default()
            .with_transform(Mat4::IDENTITY)
            .is_empty());
    }
}
