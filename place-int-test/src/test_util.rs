use place_rtree::{
    DataEntry, DataId, IntegrityReport, Interval, RTreeConfig, Rectangle, SharedRTree,
    SpatialResult,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::panic::{self, AssertUnwindSafe};

/// Runs a test between a setup and a teardown step.
///
/// The teardown runs even when the test body fails or panics, so integrity
/// checks placed there see the tree the test left behind.
pub fn run_test<B, T, A>(before: B, test: T, after: A)
where
    B: Fn() -> SpatialResult<TestContext>,
    T: Fn(TestContext) -> SpatialResult<()>,
    A: Fn(TestContext) -> SpatialResult<()>,
{
    let ctx = match before() {
        Ok(ctx) => ctx,
        Err(e) => panic!("Before run failed: {:?}", e),
    };

    let result = panic::catch_unwind(AssertUnwindSafe(|| test(ctx.clone())));
    let after_result = after(ctx);

    match result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => panic!("Test failed: {:?}", e),
        Err(panic_err) => panic::resume_unwind(panic_err),
    }

    if let Err(e) = after_result {
        panic!("After run failed: {:?}", e);
    }
}

#[derive(Clone, Debug)]
pub struct TestContext {
    config: RTreeConfig,
    tree: SharedRTree,
}

impl TestContext {
    pub fn new(config: RTreeConfig) -> SpatialResult<Self> {
        Ok(Self {
            config,
            tree: SharedRTree::new(config)?,
        })
    }

    pub fn config(&self) -> &RTreeConfig {
        &self.config
    }

    pub fn tree(&self) -> SharedRTree {
        self.tree.clone()
    }
}

pub fn create_test_context(max_entries: usize) -> SpatialResult<TestContext> {
    TestContext::new(RTreeConfig::new().with_max_entries(max_entries))
}

/// Teardown that fails the test when the tree is left in a broken state.
pub fn verify_integrity(ctx: TestContext) -> SpatialResult<()> {
    assert_valid(&ctx.tree().check_integrity());
    Ok(())
}

pub fn assert_valid(report: &IntegrityReport) {
    assert!(
        report.is_valid,
        "integrity check failed after {} nodes: {:?}",
        report.nodes_checked, report.errors
    );
}

/// Points on a `width` x `height` grid with unit spacing, ids in row order.
pub fn grid_points(width: u32, height: u32) -> Vec<DataEntry> {
    (0..height)
        .flat_map(|row| (0..width).map(move |col| (row, col)))
        .enumerate()
        .map(|(id, (row, col))| DataEntry::new(id as DataId, row as f64, col as f64))
        .collect()
}

/// `count` points spread over the latitude/longitude ranges, reproducible per seed.
pub fn random_points(seed: u64, count: usize) -> Vec<DataEntry> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|id| {
            DataEntry::new(
                id as DataId,
                rng.random_range(-90.0..90.0),
                rng.random_range(-180.0..180.0),
            )
        })
        .collect()
}

/// A query rectangle around a random center with sides up to `max_side`.
pub fn random_query(rng: &mut StdRng, max_side: f64) -> Rectangle {
    let lat = rng.random_range(-90.0..90.0);
    let lon = rng.random_range(-180.0..180.0);
    let half_lat = rng.random_range(0.0..max_side) / 2.0;
    let half_lon = rng.random_range(0.0..max_side) / 2.0;
    Rectangle::new(
        Interval::new(lat - half_lat, lat + half_lat),
        Interval::new(lon - half_lon, lon + half_lon),
    )
}

pub fn sorted(mut ids: Vec<DataId>) -> Vec<DataId> {
    ids.sort_unstable();
    ids
}
