//! Structural invariants checked over larger, randomized insertion sequences.

use place_int_test::test_util::{
    assert_valid, create_test_context, grid_points, random_points, random_query, run_test,
    verify_integrity,
};
use place_rtree::{DataEntry, Interval, RTree, RTreeConfig, Rectangle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn contains_point(query: &Rectangle, entry: &DataEntry) -> bool {
    query.intervals[0].lower <= entry.lat
        && entry.lat <= query.intervals[0].upper
        && query.intervals[1].lower <= entry.lon
        && entry.lon <= query.intervals[1].upper
}

#[test]
fn test_random_inserts_across_capacities() {
    for (max_entries, count) in [(1usize, 60usize), (2, 300), (3, 300), (5, 300), (16, 1000)] {
        let mut tree = RTree::new(RTreeConfig::new().with_max_entries(max_entries))
            .expect("valid config");
        let entries = random_points(max_entries as u64, count);

        for entry in &entries {
            tree.insert(*entry).expect("finite coordinates");
        }

        assert_valid(&tree.check_integrity());
        assert_eq!(tree.len(), count as u64);
        assert_eq!(tree.stats().total_entries, count as u64);

        for entry in &entries {
            let ids = tree.search(&entry.rectangle()).expect("valid query");
            assert_eq!(ids, vec![entry.id], "max_entries = {}", max_entries);
        }
    }
}

#[test]
fn test_search_results_lie_inside_query() {
    run_test(
        || create_test_context(4),
        |ctx| {
            let tree = ctx.tree();
            let entries = random_points(11, 500);
            tree.insert_all(entries.iter().copied())?;

            let mut rng = StdRng::seed_from_u64(12);
            for _ in 0..200 {
                let query = random_query(&mut rng, 60.0);
                let ids = tree.search(&query)?;

                let unique: HashSet<_> = ids.iter().collect();
                assert_eq!(unique.len(), ids.len(), "duplicate ids for {}", query);
                for id in &ids {
                    assert!(contains_point(&query, &entries[*id as usize]));
                }
            }
            Ok(())
        },
        verify_integrity,
    )
}

#[test]
fn test_whole_world_query_finds_something() {
    run_test(
        || create_test_context(8),
        |ctx| {
            let tree = ctx.tree();
            assert!(tree.search(&Rectangle::MAX)?.is_empty());

            tree.insert_all(random_points(3, 250))?;
            let world = Rectangle::new(Interval::new(-90.0, 90.0), Interval::new(-180.0, 180.0));
            assert!(!tree.search(&world)?.is_empty());
            Ok(())
        },
        verify_integrity,
    )
}

#[test]
fn test_grid_points_find_themselves() {
    run_test(
        || create_test_context(4),
        |ctx| {
            let tree = ctx.tree();
            let entries = grid_points(20, 20);
            tree.insert_all(entries.iter().copied())?;

            for entry in &entries {
                assert_eq!(tree.search(&entry.rectangle())?, vec![entry.id]);
            }
            assert!(tree.search(&Rectangle::point(0.5, 0.5))?.is_empty());
            assert!(tree.search(&Rectangle::point(25.0, 3.0))?.is_empty());

            let root = tree.with_tree(|t| *t.node(t.root()).expect("root exists").rectangle());
            assert_eq!(
                root,
                Rectangle::new(Interval::new(0.0, 19.0), Interval::new(0.0, 19.0))
            );
            Ok(())
        },
        verify_integrity,
    )
}

#[test]
fn test_height_grows_with_entries() {
    let mut tree = RTree::new(RTreeConfig::new().with_max_entries(3)).expect("valid config");
    let mut last_height = tree.height();
    assert_eq!(last_height, 0);

    for entry in grid_points(10, 10) {
        tree.insert(entry).expect("finite coordinates");
        let height = tree.height();
        assert!(height >= last_height);
        assert!(height <= last_height + 1);
        last_height = height;
    }
    assert!(last_height >= 3);
}
