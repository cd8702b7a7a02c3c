//! Integration tests for the documented insertion and search scenarios.

use place_int_test::test_util::{create_test_context, run_test, sorted, verify_integrity};
use place_rtree::{
    farthest_pair, DataEntry, Interval, RTreeConfig, Rectangle, SharedRTree, SpatialError,
};

fn rect(lat: (f64, f64), lon: (f64, f64)) -> Rectangle {
    Rectangle::new(Interval::new(lat.0, lat.1), Interval::new(lon.0, lon.1))
}

#[test]
fn test_single_entry_with_one_slot() {
    run_test(
        || create_test_context(1),
        |ctx| {
            let tree = ctx.tree();
            tree.insert(DataEntry::new(1, 1.0, 1.0))?;

            assert_eq!(tree.search(&rect((0.0, 2.0), (0.0, 2.0)))?, vec![1]);
            assert_eq!(tree.search(&Rectangle::point(1.0, 1.0))?, vec![1]);
            assert!(tree.search(&Rectangle::point(2.0, 2.0))?.is_empty());
            Ok(())
        },
        verify_integrity,
    )
}

#[test]
fn test_overflow_then_area_search() {
    run_test(
        || create_test_context(2),
        |ctx| {
            let tree = ctx.tree();
            tree.insert_all(vec![
                DataEntry::new(1, 1.0, 1.0),
                DataEntry::new(2, 1.0, 2.0),
                DataEntry::new(3, 2.0, 3.0),
            ])?;

            let ids = tree.search(&rect((1.0, 2.0), (2.0, 3.0)))?;
            assert_eq!(sorted(ids), vec![2, 3]);

            // The root split once
            assert_eq!(tree.stats().tree_height, 2);
            assert_eq!(tree.stats().root_children, 2);
            Ok(())
        },
        verify_integrity,
    )
}

#[test]
fn test_farthest_pair_seeds() {
    let rects: Vec<Rectangle> = [(0.0, 1.0), (1.0, 0.0), (1.0, 2.0), (1.0, 50.0), (100.0, 0.0)]
        .iter()
        .map(|(lat, lon)| Rectangle::point(*lat, *lon))
        .collect();
    let baseline = Rectangle::bounding(rects.iter()).spans();

    assert_eq!(farthest_pair(&rects, &baseline), (0, Some(4)));
}

#[test]
fn test_root_split_separates_seeds() {
    run_test(
        || create_test_context(4),
        |ctx| {
            let tree = ctx.tree();
            let coords = [(0.0, 1.0), (1.0, 0.0), (1.0, 2.0), (1.0, 50.0), (100.0, 0.0)];
            for (i, (lat, lon)) in coords.iter().enumerate() {
                tree.insert(DataEntry::new(i as u64 + 1, *lat, *lon))?;
            }

            tree.with_tree(|t| -> Result<(), SpatialError> {
                let root = t.node(t.root()).expect("root exists");
                assert_eq!(root.len(), 2);

                // The first seed stays in the old root, the second moves out
                let kept = root.children()[0];
                let moved = root.children()[1];
                assert_eq!(t.search_from(kept, &Rectangle::point(0.0, 1.0))?, vec![1]);
                assert_eq!(t.search_from(moved, &Rectangle::point(100.0, 0.0))?, vec![5]);
                assert!(t.search_from(moved, &Rectangle::point(0.0, 1.0))?.is_empty());
                Ok(())
            })
        },
        verify_integrity,
    )
}

#[test]
fn test_leaf_level_search_returns_first_cover() {
    run_test(
        || create_test_context(4),
        |ctx| {
            let tree = ctx.tree();
            tree.insert_all((1..=3).map(|i| DataEntry::new(i, i as f64, i as f64)))?;

            // Every point is inside the query, but a leaf-level branch yields one match
            assert_eq!(tree.search(&rect((0.0, 5.0), (0.0, 5.0)))?, vec![1]);
            assert_eq!(tree.search(&rect((1.5, 5.0), (1.5, 5.0)))?, vec![2]);
            Ok(())
        },
        verify_integrity,
    )
}

#[test]
fn test_invalid_input_leaves_tree_unchanged() {
    run_test(
        || create_test_context(2),
        |ctx| {
            let tree = ctx.tree();
            tree.insert(DataEntry::new(1, 1.0, 1.0))?;
            let before = tree.stats();

            let err = tree.insert(DataEntry::new(2, f64::INFINITY, 0.0)).unwrap_err();
            assert!(matches!(err, SpatialError::InvalidArgument(_)));
            assert!(tree.insert(DataEntry::new(3, 0.0, f64::NAN)).is_err());
            assert!(tree.search(&rect((f64::NAN, 1.0), (0.0, 1.0))).is_err());

            assert_eq!(tree.stats(), before);
            assert_eq!(tree.len(), 1);
            Ok(())
        },
        verify_integrity,
    )
}

#[test]
fn test_zero_capacity_rejected() {
    let result = SharedRTree::new(RTreeConfig::new().with_max_entries(0));
    assert!(matches!(result, Err(SpatialError::InvalidArgument(_))));
    assert!(create_test_context(0).is_err());
}

#[test]
fn test_context_keeps_config() {
    let ctx = create_test_context(7).expect("valid config");
    assert_eq!(ctx.config().max_entries(), 7);
    assert_eq!(ctx.tree().with_tree(|t| t.config().max_entries()), 7);
}
