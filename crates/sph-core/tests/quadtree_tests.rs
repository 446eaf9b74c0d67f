use glam::Vec3;
use sph_core::bounds::Aabb;
use sph_core::quadtree::Quadtree;
use std::collections::HashSet;

fn domain() -> Aabb {
    Aabb::new(Vec3::new(-1.0, -1.0, 0.0), Vec3::new(1.0, 1.0, 1.0))
}

/// Deterministic spiral of positions spread over the domain.
fn spiral(count: usize) -> Vec<Vec3> {
    (0..count)
        .map(|i| {
            let t = i as f32 / count as f32;
            let angle = t * std::f32::consts::TAU * 10.0;
            let r = t * 0.9;
            Vec3::new(angle.cos() * r, angle.sin() * r, 1.0)
        })
        .collect()
}

#[test]
fn test_query_matches_brute_force() {
    let positions = spiral(200);
    let mut tree = Quadtree::new(domain(), 8, 16);
    for (i, &p) in positions.iter().enumerate() {
        assert!(tree.insert(i as u32, p), "in-domain insert must succeed");
    }

    let ranges = [
        Aabb::new(Vec3::new(-0.3, -0.3, 0.0), Vec3::new(0.3, 0.3, 1.0)),
        Aabb::new(Vec3::new(0.0, -1.0, 0.0), Vec3::new(1.0, 0.0, 1.0)),
        Aabb::centered(Vec3::new(0.1, -0.2, 1.0), 0.15),
        Aabb::centered(Vec3::new(0.9, 0.9, 1.0), 0.05),
    ];

    for range in &ranges {
        let mut found = tree.query_range(range);
        let mut expected: Vec<u32> = positions
            .iter()
            .enumerate()
            .filter(|(_, &p)| range.contains(p))
            .map(|(i, _)| i as u32)
            .collect();
        found.sort_unstable();
        expected.sort_unstable();
        assert_eq!(found, expected, "query must match a brute-force scan");
    }
}

#[test]
fn test_query_no_duplicates() {
    let positions = spiral(300);
    let mut tree = Quadtree::new(domain(), 8, 16);
    for (i, &p) in positions.iter().enumerate() {
        tree.insert(i as u32, p);
    }

    let found = tree.query_range(tree.boundary());
    let unique: HashSet<u32> = found.iter().copied().collect();
    assert_eq!(found.len(), unique.len(), "no index may appear twice");
    assert_eq!(found.len(), positions.len(), "whole-domain query finds all");
}

#[test]
fn test_query_order_deterministic() {
    let positions = spiral(150);
    let mut tree = Quadtree::new(domain(), 8, 16);
    for (i, &p) in positions.iter().enumerate() {
        tree.insert(i as u32, p);
    }

    let range = Aabb::centered(Vec3::new(0.0, 0.0, 1.0), 0.5);
    let first = tree.query_range(&range);
    let second = tree.query_range(&range);
    assert_eq!(first, second, "same tree state must give same order");
}

#[test]
fn test_insert_outside_boundary_rejected() {
    let mut tree = Quadtree::new(domain(), 8, 16);
    assert!(!tree.insert(0, Vec3::new(2.0, 0.0, 1.0)));
    assert!(!tree.insert(1, Vec3::new(0.0, -1.5, 1.0)));
    assert_eq!(tree.len(), 0, "rejected inserts must not be stored");
}

#[test]
fn test_clear_keeps_boundary() {
    let mut tree = Quadtree::new(domain(), 2, 16);
    for (i, &p) in spiral(20).iter().enumerate() {
        tree.insert(i as u32, p);
    }
    assert!(!tree.is_leaf(), "20 entries at capacity 2 must split");

    tree.clear();
    assert!(tree.is_empty());
    assert!(tree.is_leaf(), "clear drops children");
    assert_eq!(*tree.boundary(), domain(), "root boundary survives clear");
    assert!(tree.insert(0, Vec3::new(0.0, 0.0, 1.0)), "usable after clear");
}

#[test]
fn test_leaf_splits_into_tiling_children() {
    let mut tree = Quadtree::new(domain(), 4, 16);
    for (i, &p) in spiral(16).iter().enumerate() {
        tree.insert(i as u32, p);
    }

    assert!(!tree.is_leaf());
    assert_eq!(tree.children().len(), 4, "a split produces exactly 4 children");

    let parent = tree.boundary();
    let parent_area =
        (parent.max.x - parent.min.x) * (parent.max.y - parent.min.y);
    let mut child_area = 0.0;
    for child in tree.children() {
        let b = child.boundary();
        assert!(b.min.x >= parent.min.x && b.max.x <= parent.max.x);
        assert!(b.min.y >= parent.min.y && b.max.y <= parent.max.y);
        child_area += (b.max.x - b.min.x) * (b.max.y - b.min.y);
    }
    assert!(
        (child_area - parent_area).abs() < parent_area * 1e-6,
        "children must exactly tile the parent"
    );
    assert_eq!(tree.len(), 16, "split must not lose entries");
}

#[test]
fn test_coincident_particles_depth_capped() {
    // All entries at one point would recurse forever without the depth cap;
    // instead the deepest leaf grows past its capacity.
    let mut tree = Quadtree::new(domain(), 4, 8);
    let p = Vec3::new(0.1, 0.1, 1.0);
    for i in 0..100 {
        assert!(tree.insert(i, p));
    }
    assert_eq!(tree.len(), 100);

    let found = tree.query_range(&Aabb::centered(p, 0.01));
    assert_eq!(found.len(), 100, "all coincident entries must be found");
}

#[test]
fn test_empty_tree_query() {
    let tree = Quadtree::new(domain(), 8, 16);
    assert!(tree.query_range(tree.boundary()).is_empty());
}
