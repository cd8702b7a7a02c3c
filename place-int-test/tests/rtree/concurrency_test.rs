//! Concurrent access through the shared handle.

use place_int_test::test_util::{create_test_context, run_test, sorted, verify_integrity};
use place_rtree::{DataEntry, Rectangle};
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn test_multi_threaded_insert() {
    run_test(
        || create_test_context(4),
        |ctx| {
            let num_threads = 5u64;
            let inserts_per_thread = 40u64;
            let barrier = Arc::new(Barrier::new(num_threads as usize));

            let handles: Vec<_> = (0..num_threads)
                .map(|thread_id| {
                    let tree = ctx.tree();
                    let barrier = Arc::clone(&barrier);
                    thread::spawn(move || {
                        barrier.wait();
                        for i in 0..inserts_per_thread {
                            let id = thread_id * inserts_per_thread + i;
                            let entry = DataEntry::new(id, thread_id as f64, i as f64);
                            tree.insert(entry).expect("finite coordinates");
                        }
                    })
                })
                .collect();

            for handle in handles {
                handle.join().expect("writer thread panicked");
            }

            let tree = ctx.tree();
            assert_eq!(tree.len(), num_threads * inserts_per_thread);
            for thread_id in 0..num_threads {
                for i in 0..inserts_per_thread {
                    let ids = tree.search(&Rectangle::point(thread_id as f64, i as f64))?;
                    assert_eq!(ids, vec![thread_id * inserts_per_thread + i]);
                }
            }
            Ok(())
        },
        verify_integrity,
    )
}

#[test]
fn test_readers_during_batch_insert() {
    run_test(
        || create_test_context(8),
        |ctx| {
            let writer = {
                let tree = ctx.tree();
                thread::spawn(move || {
                    for batch in 0..10u64 {
                        let entries = (0..50u64)
                            .map(|i| DataEntry::new(batch * 50 + i, batch as f64, i as f64));
                        tree.insert_all(entries).expect("finite coordinates");
                    }
                })
            };

            let readers: Vec<_> = (0..3)
                .map(|_| {
                    let tree = ctx.tree();
                    thread::spawn(move || {
                        for _ in 0..100 {
                            // A batch is applied under one lock, so its first and
                            // last entries appear together
                            let len = tree.len();
                            assert_eq!(len % 50, 0);
                            let report = tree.check_integrity();
                            assert!(report.is_valid, "{:?}", report.errors);
                        }
                    })
                })
                .collect();

            writer.join().expect("writer thread panicked");
            for reader in readers {
                reader.join().expect("reader thread panicked");
            }

            let tree = ctx.tree();
            assert_eq!(tree.len(), 500);
            assert_eq!(sorted(tree.search(&Rectangle::point(9.0, 49.0))?), vec![499]);
            Ok(())
        },
        verify_integrity,
    )
}
