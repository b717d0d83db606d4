use super::*;
use crate::config::OctreeConfig;
use crate::geometry::Ray;
use glam::{Mat4, Vec3};

fn cube(center: Vec3, side: f32) -> Aabb {
    let half = Vec3::splat(side / 2.0);
    Aabb::new(center - half, center + half)
}

fn root10() -> Aabb {
    Aabb::new(Vec3::splat(-10.0), Vec3::splat(10.0))
}

fn collect_ids(
    arena: &OctreeArena,
    store: &RecordStore,
    query: Aabb,
) -> Vec<i32> {
    let mut ids = Vec::new();
    arena.aabb_query(store, ROOT, query, &mut |id| ids.push(id));
    ids.sort();
    ids
}

#[test]
fn insert_remove_round_trip() {
    let config = OctreeConfig::default().with_root_box(root10()).build().unwrap();
    let mut arena = OctreeArena::new(config.root_box());
    let mut store = RecordStore::new();

    arena.insert(&mut store, &config, ROOT, cube(Vec3::splat(-2.0), 2.0), 1);
    arena.insert(&mut store, &config, ROOT, cube(Vec3::splat(3.0), 2.0), 2);

    assert_eq!(collect_ids(&arena, &store, root10()), vec![1, 2]);

    let removed = arena.remove(&mut store, ROOT, Some(cube(Vec3::splat(-2.0), 2.0)), 1);
    assert!(removed);
    assert_eq!(collect_ids(&arena, &store, root10()), vec![2]);
}

#[test]
fn split_trigger_redistributes_into_a_descendant() {
    let config = OctreeConfig::default()
        .with_root_box(root10())
        .with_max_objects(2)
        .with_max_depth(3)
        .build()
        .unwrap();
    let mut arena = OctreeArena::new(config.root_box());
    let mut store = RecordStore::new();

    arena.insert(&mut store, &config, ROOT, cube(Vec3::new(1.0, 1.0, 1.0), 1.0), 1);
    arena.insert(&mut store, &config, ROOT, cube(Vec3::new(1.5, 1.5, 1.5), 1.0), 2);
    arena.insert(&mut store, &config, ROOT, cube(Vec3::new(1.2, 1.2, 1.2), 1.0), 3);

    assert_eq!(collect_ids(&arena, &store, root10()), vec![1, 2, 3]);
    // root's own list must be empty: all three classified into the same child.
    assert_eq!(arena.nodes[ROOT].head, NIL);
    assert!(arena.nodes[ROOT].children.is_some());
}

#[test]
fn loose_straddle_keeps_object_at_root() {
    let config = OctreeConfig::default()
        .with_root_box(root10())
        .with_max_objects(1)
        .with_max_depth(2)
        .build()
        .unwrap();
    let mut arena = OctreeArena::new(config.root_box());
    let mut store = RecordStore::new();

    // straddles all three midplanes of the root box
    arena.insert(&mut store, &config, ROOT, Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0)), 1);
    // clustered away from the origin — drives the split
    arena.insert(&mut store, &config, ROOT, cube(Vec3::splat(3.0), 1.0), 2);

    assert_eq!(collect_ids(&arena, &store, root10()), vec![1, 2]);
    assert_eq!(store.read_boxed(arena.nodes[ROOT].head).id, 1);
}

#[test]
fn near_hit_ordering_sorts_closest_first() {
    let config = OctreeConfig::default().with_root_box(root10()).build().unwrap();
    let mut arena = OctreeArena::new(config.root_box());
    let mut store = RecordStore::new();

    arena.insert(&mut store, &config, ROOT, cube(Vec3::splat(2.0), 1.0), 1);
    arena.insert(&mut store, &config, ROOT, cube(Vec3::splat(5.0), 1.0), 2);

    let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0).normalize());
    let mut stack = Vec::new();
    let mut out = Vec::new();
    arena.raycast(&store, &mut stack, &ray, &mut out);

    assert_eq!(out.len(), 2);
    let hit1 = out.iter().find(|h| h.id == 1).unwrap();
    let hit2 = out.iter().find(|h| h.id == 2).unwrap();
    assert!(hit1.distance < hit2.distance);
}

#[test]
fn raycast_resets_out_before_each_call() {
    let config = OctreeConfig::default().with_root_box(root10()).build().unwrap();
    let mut arena = OctreeArena::new(config.root_box());
    let mut store = RecordStore::new();
    arena.insert(&mut store, &config, ROOT, cube(Vec3::splat(2.0), 1.0), 1);

    let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0).normalize());
    let mut stack = Vec::new();
    let mut out = vec![RayHit { id: 999, distance: 0.0 }];
    arena.raycast(&store, &mut stack, &ray, &mut out);

    assert_eq!(out.len(), 1);
    assert_eq!(out[0].id, 1);
}

#[test]
fn ray_strictly_outside_every_aabb_yields_no_hits() {
    let config = OctreeConfig::default().with_root_box(root10()).build().unwrap();
    let mut arena = OctreeArena::new(config.root_box());
    let mut store = RecordStore::new();
    arena.insert(&mut store, &config, ROOT, cube(Vec3::splat(2.0), 1.0), 1);

    let ray = Ray::new(Vec3::new(-100.0, -100.0, -100.0), Vec3::X);
    let mut stack = Vec::new();
    let mut out = Vec::new();
    arena.raycast(&store, &mut stack, &ray, &mut out);
    assert!(out.is_empty());
}

#[test]
fn remove_without_bounds_disables_pruning_but_still_finds_the_object() {
    let config = OctreeConfig::default()
        .with_root_box(root10())
        .with_max_objects(1)
        .with_max_depth(2)
        .build()
        .unwrap();
    let mut arena = OctreeArena::new(config.root_box());
    let mut store = RecordStore::new();

    arena.insert(&mut store, &config, ROOT, cube(Vec3::splat(3.0), 1.0), 1);
    arena.insert(&mut store, &config, ROOT, cube(Vec3::splat(-3.0), 1.0), 2);

    // no bounds supplied: pruning disabled, the whole tree is searched
    let removed = arena.remove(&mut store, ROOT, None, 2);
    assert!(removed);
    assert_eq!(collect_ids(&arena, &store, root10()), vec![1]);
}

#[test]
fn aabb_query_after_mutations_is_exact() {
    let config = OctreeConfig::default()
        .with_root_box(root10())
        .with_max_objects(2)
        .with_max_depth(3)
        .build()
        .unwrap();
    let mut arena = OctreeArena::new(config.root_box());
    let mut store = RecordStore::new();

    for (id, center) in [(1, 1.0), (2, 1.5), (3, 1.2), (4, -4.0)] {
        arena.insert(&mut store, &config, ROOT, cube(Vec3::splat(center), 1.0), id);
    }
    arena.remove(&mut store, ROOT, Some(cube(Vec3::splat(1.5), 1.0)), 2);

    assert_eq!(collect_ids(&arena, &store, root10()), vec![1, 3, 4]);
}

#[test]
fn frustum_containing_root_emits_everything() {
    let config = OctreeConfig::default().with_root_box(root10()).build().unwrap();
    let mut arena = OctreeArena::new(config.root_box());
    let mut store = RecordStore::new();
    arena.insert(&mut store, &config, ROOT, cube(Vec3::splat(2.0), 1.0), 1);
    arena.insert(&mut store, &config, ROOT, cube(Vec3::splat(-2.0), 1.0), 2);

    let proj = Mat4::perspective_rh(std::f32::consts::FRAC_PI_2, 1.0, 0.1, 1000.0);
    let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 100.0), Vec3::ZERO, Vec3::Y);
    let frustum = crate::geometry::Frustum::from_view_projection(&(proj * view));

    let mut ids = Vec::new();
    arena.frustum_query(&store, ROOT, &frustum, &mut |id| ids.push(id));
    ids.sort();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn frustum_disjoint_from_root_emits_nothing() {
    let config = OctreeConfig::default().with_root_box(root10()).build().unwrap();
    let mut arena = OctreeArena::new(config.root_box());
    let mut store = RecordStore::new();
    arena.insert(&mut store, &config, ROOT, cube(Vec3::splat(15.0), 1.0), 1);

    // looking toward +z with a short far plane, camera at the origin looking away from the data
    let proj = Mat4::perspective_rh(std::f32::consts::FRAC_PI_4, 1.0, 0.1, 5.0);
    let view = Mat4::look_at_rh(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0), Vec3::Y);
    let frustum = crate::geometry::Frustum::from_view_projection(&(proj * view));

    let mut ids = Vec::new();
    arena.frustum_query(&store, ROOT, &frustum, &mut |id| ids.push(id));
    assert!(ids.is_empty());
}

#[test]
fn combined_frustum_raycast_reports_nearest_hit_in_frustum() {
    let config = OctreeConfig::default().with_root_box(root10()).build().unwrap();
    let mut arena = OctreeArena::new(config.root_box());
    let mut store = RecordStore::new();
    arena.insert(&mut store, &config, ROOT, cube(Vec3::splat(2.0), 1.0), 1);
    arena.insert(&mut store, &config, ROOT, cube(Vec3::splat(-2.0), 1.0), 2);

    let proj = Mat4::perspective_rh(std::f32::consts::FRAC_PI_2, 1.0, 0.1, 1000.0);
    let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 100.0), Vec3::ZERO, Vec3::Y);
    let frustum = crate::geometry::Frustum::from_view_projection(&(proj * view));
    let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0).normalize());

    let mut stack = Vec::new();
    let mut saw_hit_for_id1 = false;
    arena.frustum_raycast(&store, &mut stack, &frustum, &ray, &mut |envelope| {
        if let Some(hit) = envelope.mouse_hit {
            if hit.id == 1 {
                saw_hit_for_id1 = true;
            }
        }
        Traversal::Continue
    });
    assert!(saw_hit_for_id1);
}

#[test]
fn visitor_can_stop_the_combined_walk_early() {
    let config = OctreeConfig::default()
        .with_root_box(root10())
        .with_max_objects(1)
        .with_max_depth(2)
        .build()
        .unwrap();
    let mut arena = OctreeArena::new(config.root_box());
    let mut store = RecordStore::new();
    for (id, center) in [(1, 2.0), (2, -2.0), (3, 4.0), (4, -4.0)] {
        arena.insert(&mut store, &config, ROOT, cube(Vec3::splat(center), 1.0), id);
    }

    let proj = Mat4::perspective_rh(std::f32::consts::FRAC_PI_2, 1.0, 0.1, 1000.0);
    let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 100.0), Vec3::ZERO, Vec3::Y);
    let frustum = crate::geometry::Frustum::from_view_projection(&(proj * view));
    let ray = Ray::new(Vec3::ZERO, Vec3::Z);

    let mut stack = Vec::new();
    let mut visits = 0;
    arena.frustum_raycast(&store, &mut stack, &frustum, &ray, &mut |_envelope| {
        visits += 1;
        Traversal::Stop
    });
    assert_eq!(visits, 1);
}

#[test]
fn clear_empties_the_tree_back_to_a_single_leaf() {
    let config = OctreeConfig::default()
        .with_root_box(root10())
        .with_max_objects(1)
        .with_max_depth(2)
        .build()
        .unwrap();
    let mut arena = OctreeArena::new(config.root_box());
    let mut store = RecordStore::new();
    arena.insert(&mut store, &config, ROOT, cube(Vec3::splat(2.0), 1.0), 1);
    arena.insert(&mut store, &config, ROOT, cube(Vec3::splat(-2.0), 1.0), 2);
    assert!(arena.nodes.len() > 1);

    arena.clear();
    assert_eq!(arena.nodes.len(), 1);
    assert_eq!(arena.nodes[ROOT].head, NIL);
    assert!(arena.nodes[ROOT].children.is_none());
}

#[test]
fn classify_straddle_returns_none_and_fit_returns_octant() {
    let parent = root10();
    // fits entirely in the +x +y +z octant
    assert_eq!(OctreeArena::classify(&parent, &cube(Vec3::splat(3.0), 1.0)), Some(0b111));
    // fits entirely in the -x -y -z octant
    assert_eq!(OctreeArena::classify(&parent, &cube(Vec3::splat(-3.0), 1.0)), Some(0b000));
    // straddles the x midplane
    assert_eq!(OctreeArena::classify(&parent, &Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0))), None);
}
