use glam::{Mat4, Vec3};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
    inv_direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            inv_direction: 1.0 / direction,
        }
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn at(&self, time: f32) -> Vec3 {
        self.origin + self.direction * time
    }

    /// Moves this ray into another space.
    ///
    /// The direction is deliberately left unnormalized, so that times found
    /// in the transformed space are also valid in the original one.
    pub fn transform(&self, xform: &Mat4) -> Self {
        Self::new(
            xform.transform_point3(self.origin),
            xform.transform_vector3(self.direction),
        )
    }

    /// Returns the time at which this ray enters given box, or infinity if
    /// the box is missed, lies behind the ray or starts at or past `reach`.
    ///
    /// When the ray starts inside the box, the returned time is negative.
    pub fn intersect_bounds(&self, min: Vec3, max: Vec3, reach: f32) -> f32 {
        let hit_min = (min - self.origin) * self.inv_direction;
        let hit_max = (max - self.origin) * self.inv_direction;

        let entry = hit_min.min(hit_max).max_element();
        let exit = hit_min.max(hit_max).min_element();

        if exit >= entry && exit > 0.0 && entry < reach {
            entry
        } else {
            f32::INFINITY
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::{vec3, Quat};

    use super::*;

    #[test]
    fn intersect_bounds() {
        let min = vec3(-1.0, -1.0, -1.0);
        let max = vec3(1.0, 1.0, 1.0);

        // ---
        // Case 1: Box in front of the ray

        let ray = Ray::new(vec3(0.0, 0.0, 5.0), vec3(0.0, 0.0, -1.0));

        assert_relative_eq!(4.0, ray.intersect_bounds(min, max, f32::INFINITY));

        // ---
        // Case 2: Box farther than the reach

        assert_eq!(f32::INFINITY, ray.intersect_bounds(min, max, 4.0));
        assert_eq!(f32::INFINITY, ray.intersect_bounds(min, max, 3.0));

        // ---
        // Case 3: Box behind the ray

        let ray = Ray::new(vec3(0.0, 0.0, 5.0), vec3(0.0, 0.0, 1.0));

        assert_eq!(
            f32::INFINITY,
            ray.intersect_bounds(min, max, f32::INFINITY)
        );

        // ---
        // Case 4: Ray starting inside the box

        let ray = Ray::new(vec3(0.0, 0.0, 0.0), vec3(0.0, 0.0, 1.0));

        assert_relative_eq!(
            -1.0,
            ray.intersect_bounds(min, max, f32::INFINITY)
        );

        // ---
        // Case 5: Ray passing beside the box

        let ray = Ray::new(vec3(3.0, 0.0, 5.0), vec3(0.0, 0.0, -1.0));

        assert_eq!(
            f32::INFINITY,
            ray.intersect_bounds(min, max, f32::INFINITY)
        );
    }

    #[test]
    fn transform_preserves_time() {
        let xform = Mat4::from_scale_rotation_translation(
            vec3(2.0, 3.0, 4.0),
            Quat::from_rotation_y(0.7),
            vec3(1.0, -2.0, 3.0),
        );

        let ray = Ray::new(vec3(0.5, 1.5, -2.0), vec3(0.3, -0.2, 0.9));
        let local = ray.transform(&xform.inverse());

        for time in [0.0, 1.0, 2.5] {
            let point = xform.transform_point3(local.at(time));

            assert_relative_eq!(point.x, ray.at(time).x, epsilon = 1e-4);
            assert_relative_eq!(point.y, ray.at(time).y, epsilon = 1e-4);
            assert_relative_eq!(point.z, ray.at(time).z, epsilon = 1e-4);
        }
    }
}
