use approx::assert_relative_eq;
use glam::{vec3, Quat, Vec3};
use lumen::gpu::{Hit, ObjectType, Ray};
use lumen::{
    Entity, EntityKind, Material, Mesh, MeshFace, Scene, SceneDirty,
    Transform,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const EPSILON: f32 = 1e-4;

fn scene() -> Scene {
    let mut scene = Scene::new();

    scene.add_material(Material::new("default"));
    scene
}

fn cube(scene: &mut Scene, position: Vec3) -> lumen::EntityId {
    let cube = Entity::new("cube", EntityKind::Cube { material_index: 0 })
        .with_transform(
            Transform::from_position(position).with_scale(Vec3::splat(0.5)),
        );

    scene.add_entity(None, cube).unwrap()
}

fn random_vec3(rng: &mut StdRng, range: f32) -> Vec3 {
    vec3(
        rng.gen_range(-range..range),
        rng.gen_range(-range..range),
        rng.gen_range(-range..range),
    )
}

#[test]
fn quad() {
    let mut scene = scene();

    let mesh = scene.add_mesh(Mesh::new(vec![
        MeshFace::new([
            vec3(0.0, 0.0, 0.0),
            vec3(1.0, 0.0, 0.0),
            vec3(1.0, 1.0, 0.0),
        ]),
        MeshFace::new([
            vec3(0.0, 0.0, 0.0),
            vec3(1.0, 1.0, 0.0),
            vec3(0.0, 1.0, 0.0),
        ]),
    ]));

    let quad = scene
        .add_entity(
            None,
            Entity::new(
                "quad",
                EntityKind::MeshInstance {
                    mesh_index: mesh,
                    material_index: 0,
                },
            ),
        )
        .unwrap();

    scene.pack().unwrap();

    let (entity, hit) = scene
        .pick(Ray::new(vec3(0.5, 0.5, 1.0), vec3(0.0, 0.0, -1.0)))
        .unwrap();

    let coords = hit.primitive_coordinates;

    assert_eq!(quad, entity);
    assert_eq!(Some(ObjectType::MeshInstance), hit.object_type);
    assert_eq!(0, hit.object_index);
    assert_relative_eq!(1.0, hit.time, epsilon = EPSILON);
    assert_relative_eq!(1.0, coords.x + coords.y + coords.z, epsilon = EPSILON);

    // ---

    assert!(scene
        .pick(Ray::new(vec3(1.5, 0.5, 1.0), vec3(0.0, 0.0, -1.0)))
        .is_none());
}

#[test]
fn scaled_sphere() {
    let mut scene = scene();

    let sphere =
        Entity::new("sphere", EntityKind::Sphere { material_index: 0 })
            .with_transform(Transform::default().with_scale(Vec3::splat(2.0)));

    let sphere = scene.add_entity(None, sphere).unwrap();

    scene.pack().unwrap();

    let (entity, hit) = scene
        .pick(Ray::new(vec3(0.0, 0.0, 5.0), vec3(0.0, 0.0, -1.0)))
        .unwrap();

    assert_eq!(sphere, entity);
    assert_eq!(Some(ObjectType::Sphere), hit.object_type);
    assert_relative_eq!(3.0, hit.time, epsilon = EPSILON);
}

#[test]
fn three_boxes() {
    let mut scene = scene();
    let left = cube(&mut scene, vec3(-10.0, 0.0, 0.0));
    let middle = cube(&mut scene, vec3(0.0, 0.0, 0.0));
    let right = cube(&mut scene, vec3(10.0, 0.0, 0.0));

    scene.pack().unwrap();

    // ---
    // Case 1: Ray going through the middle box only

    let ray = Ray::new(vec3(0.0, 0.0, 5.0), vec3(0.0, 0.0, -1.0));
    let (entity, hit) = scene.pick(ray).unwrap();

    assert_eq!(middle, entity);
    assert_eq!(Some(ObjectType::Cube), hit.object_type);
    assert_eq!(1, hit.object_index);
    assert_relative_eq!(4.5, hit.time, epsilon = EPSILON);

    // ---
    // Case 2: Ray going along all three boxes, starting from the right

    let ray = Ray::new(vec3(20.0, 0.0, 0.0), vec3(-1.0, 0.0, 0.0));
    let (entity, hit) = scene.pick(ray).unwrap();

    assert_eq!(right, entity);
    assert_relative_eq!(9.5, hit.time, epsilon = EPSILON);

    // ---
    // Case 3: Ray going between the boxes

    let ray = Ray::new(vec3(5.0, 0.0, 5.0), vec3(0.0, 0.0, -1.0));

    assert!(scene.pick(ray).is_none());

    // ---
    // Case 4: Removing the middle box

    scene.remove_entity(middle).unwrap();
    scene.pack().unwrap();

    let ray = Ray::new(vec3(0.0, 0.0, 5.0), vec3(0.0, 0.0, -1.0));

    assert!(scene.pick(ray).is_none());

    let ray = Ray::new(vec3(-20.0, 0.0, 0.0), vec3(1.0, 0.0, 0.0));

    assert_eq!(left, scene.pick(ray).unwrap().0);
}

#[test]
fn plane() {
    let mut scene = scene();

    // Rotated so that its local z-axis points towards +y
    let plane = Entity::new("plane", EntityKind::Plane { material_index: 0 })
        .with_transform(
            Transform::from_position(vec3(0.0, -1.0, 0.0)).with_rotation(
                Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2),
            ),
        );

    let plane = scene.add_entity(None, plane).unwrap();

    scene.pack().unwrap();

    let (entity, hit) = scene
        .pick(Ray::new(vec3(3.0, 4.0, -7.0), vec3(0.0, -1.0, 0.0)))
        .unwrap();

    assert_eq!(plane, entity);
    assert_eq!(Some(ObjectType::Plane), hit.object_type);
    assert_relative_eq!(5.0, hit.time, epsilon = EPSILON);

    assert!(scene
        .pick(Ray::new(vec3(3.0, 4.0, -7.0), vec3(0.0, 1.0, 0.0)))
        .is_none());
}

/// Checks that traversing the mesh BVH finds exactly what testing each face
/// one by one finds.
#[test]
fn mesh_bvh_matches_brute_force() {
    let mut rng = StdRng::seed_from_u64(1234);

    for face_count in [1, 2, 7, 64, 500] {
        let faces = (0..face_count)
            .map(|_| {
                let p0 = random_vec3(&mut rng, 10.0);

                MeshFace::new([
                    p0,
                    p0 + random_vec3(&mut rng, 2.0),
                    p0 + random_vec3(&mut rng, 2.0),
                ])
            })
            .collect();

        let mut scene = scene();
        let mesh = scene.add_mesh(Mesh::new(faces));

        scene
            .add_entity(
                None,
                Entity::new(
                    "mesh",
                    EntityKind::MeshInstance {
                        mesh_index: mesh,
                        material_index: 0,
                    },
                ),
            )
            .unwrap();

        scene.pack().unwrap();

        for _ in 0..200 {
            let origin = random_vec3(&mut rng, 15.0);
            let target = random_vec3(&mut rng, 10.0);
            let ray = Ray::new(origin, target - origin);

            let mut expected = Hit::none();

            let faces = scene.mesh_face_pack();

            for (face_index, face) in faces.iter().enumerate() {
                face.hit(ray, face_index as u32, &mut expected);
            }

            let mut actual = Hit::none();

            scene.trace(ray, &mut actual);

            assert_eq!(expected.is_some(), actual.is_some());

            if expected.is_some() {
                assert_relative_eq!(expected.time, actual.time, epsilon = 1e-5);
                assert_eq!(0, actual.object_index);
            }
        }
    }
}

/// Checks that traversing the scene BVH finds exactly what testing each
/// object one by one finds.
#[test]
fn scene_bvh_matches_flat_scan() {
    let mut rng = StdRng::seed_from_u64(4321);
    let mut scene = scene();

    let mesh = scene.add_mesh(Mesh::new(vec![
        MeshFace::new([Vec3::NEG_ONE, vec3(1.0, -1.0, 0.0), Vec3::Y]),
        MeshFace::new([Vec3::NEG_ONE, Vec3::Y, vec3(-1.0, 1.0, 1.0)]),
    ]));

    for _ in 0..64 {
        let kind = match rng.gen_range(0..4) {
            0 => EntityKind::Sphere { material_index: 0 },
            1 => EntityKind::Cube { material_index: 0 },
            2 => EntityKind::Plane { material_index: 0 },
            _ => EntityKind::MeshInstance {
                mesh_index: mesh,
                material_index: 0,
            },
        };

        let transform = Transform::from_position(random_vec3(&mut rng, 30.0))
            .with_rotation(Quat::from_rotation_y(rng.gen_range(0.0..6.0)))
            .with_scale(Vec3::splat(rng.gen_range(0.5..3.0)));

        let object = Entity::new("object", kind).with_transform(transform);

        scene.add_entity(None, object).unwrap();
    }

    // Floor far below everything else, so that rays can reach its edges
    let floor = Entity::new("floor", EntityKind::Plane { material_index: 0 })
        .with_transform(Transform::from_position(vec3(0.0, 0.0, -100.0)));

    scene.add_entity(None, floor).unwrap();

    let acted = scene.pack().unwrap();

    assert!(acted.contains(SceneDirty::Shapes));
    assert_eq!(65, scene.scene_object_pack().len());
    assert_eq!(129, scene.scene_node_pack().len());

    let check = |ray: Ray| {
        let mut expected = Hit::none();

        scene.intersect(ray, &mut expected);

        let mut actual = Hit::none();
        let got_hit = scene.trace(ray, &mut actual);

        assert_eq!(expected.is_some(), got_hit);

        if got_hit {
            assert_relative_eq!(expected.time, actual.time, epsilon = 1e-4);
        }

        got_hit
    };

    let mut hits = 0;

    for _ in 0..500 {
        let origin = random_vec3(&mut rng, 50.0);
        let target = random_vec3(&mut rng, 30.0);

        if check(Ray::new(origin, target - origin)) {
            hits += 1;
        }
    }

    // ---
    // Rays close to the floor's edges, just inside and just outside

    let down = vec3(0.0, 0.0, -1.0);

    assert!(check(Ray::new(vec3(9_990.0, 9_990.0, 0.0), down)));
    assert!(check(Ray::new(vec3(-9_990.0, 0.0, 0.0), down)));
    check(Ray::new(vec3(10_010.0, 0.0, 0.0), down));
    check(Ray::new(vec3(0.0, -10_010.0, 0.0), down));

    assert!(hits > 0);
}
