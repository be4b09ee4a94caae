//! Analytic primitives; all of them are tested in their local space, where
//! the plane is `z = 0`, the sphere is the unit sphere and the cube spans
//! `-1..=1` on each axis.
//!
//! On a hit, these functions overwrite the hit's time, primitive index and
//! coordinates - attributing the hit to an object is up to the caller.

use glam::{vec3, Vec3};

use crate::{Hit, Ray, EPSILON, PLANE_EXTENT};

/// Intersects the `z = 0` plane, at `-origin.z / direction.z`.
///
/// The plane is finite: it ends at [`PLANE_EXTENT`] along x and y, matching
/// [`plane_bounds()`]. Rays closer to parallel than [`EPSILON`] miss it.
pub fn hit_plane(ray: Ray, hit: &mut Hit) -> bool {
    if ray.direction().z.abs() < EPSILON {
        return false;
    }

    let time = -ray.origin().z / ray.direction().z;

    if !is_closer(time, hit) {
        return false;
    }

    let point = ray.at(time).truncate();

    if (point.x.abs() > PLANE_EXTENT) | (point.y.abs() > PLANE_EXTENT) {
        return false;
    }

    let uv = point - point.floor();

    hit.time = time;
    hit.primitive_index = 0;
    hit.primitive_coordinates = uv.extend(0.0);

    true
}

pub fn hit_sphere(ray: Ray, hit: &mut Hit) -> bool {
    let a = ray.direction().length_squared();
    let half_b = ray.origin().dot(ray.direction());
    let c = ray.origin().length_squared() - 1.0;
    let discriminant = half_b * half_b - a * c;

    if discriminant < 0.0 {
        return false;
    }

    let sqrt_discriminant = discriminant.sqrt();
    let near = (-half_b - sqrt_discriminant) / a;

    // If the nearer root lies behind the ray, we're inside the sphere
    let time = if near >= 0.0 {
        near
    } else {
        (-half_b + sqrt_discriminant) / a
    };

    if !is_closer(time, hit) {
        return false;
    }

    hit.time = time;
    hit.primitive_index = 0;
    hit.primitive_coordinates = ray.at(time);

    true
}

pub fn hit_cube(ray: Ray, hit: &mut Hit) -> bool {
    let hit_min = (Vec3::NEG_ONE - ray.origin()) / ray.direction();
    let hit_max = (Vec3::ONE - ray.origin()) / ray.direction();

    let entry = hit_min.min(hit_max).max_element();
    let exit = hit_min.max(hit_max).min_element();

    if (exit < entry) | (exit < 0.0) {
        return false;
    }

    // If we've entered the cube before the ray's origin, we're inside it
    let time = if entry >= 0.0 { entry } else { exit };

    if !is_closer(time, hit) {
        return false;
    }

    hit.time = time;
    hit.primitive_index = 0;
    hit.primitive_coordinates = ray.at(time).clamp(Vec3::NEG_ONE, Vec3::ONE);

    true
}

/// Local-space bounds of given primitive.
pub fn plane_bounds() -> (Vec3, Vec3) {
    (
        vec3(-PLANE_EXTENT, -PLANE_EXTENT, 0.0),
        vec3(PLANE_EXTENT, PLANE_EXTENT, 0.0),
    )
}

pub fn unit_bounds() -> (Vec3, Vec3) {
    (Vec3::NEG_ONE, Vec3::ONE)
}

fn is_closer(time: f32, hit: &Hit) -> bool {
    (time >= 0.0) & (time < hit.time)
}
