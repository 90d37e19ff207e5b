use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use stats_alloc::{Region, StatsAlloc, INSTRUMENTED_SYSTEM};
use std::alloc::System;

#[global_allocator]
static GLOBAL: &StatsAlloc<System> = &INSTRUMENTED_SYSTEM;

#[test]
fn sampling_allocations_do_not_grow_with_sample_count() {
    // The walk builds one weighted sampler per page up front; each step afterwards should
    // be allocation-free, so 100x more samples must not mean more allocations.
    //
    // Counting allocations rather than RSS keeps this portable across OSes/CI.

    // A ring with a chord and one dangling page.
    let n = 50usize;
    let graph = linkrank::LinkGraph::from_links((0..n).map(|i| {
        let links = if i == n - 1 {
            Vec::new()
        } else {
            vec![format!("{:03}", i + 1), format!("{:03}", (i * 7) % n)]
        };
        (format!("{i:03}"), links)
    }));

    let mut rng = ChaCha8Rng::seed_from_u64(123);
    let r_small = Region::new(&GLOBAL);
    let small = linkrank::sample_scores(&graph, 0.85, 1_000, &mut rng).unwrap();
    let s_small = r_small.change();

    let mut rng = ChaCha8Rng::seed_from_u64(123);
    let r_large = Region::new(&GLOBAL);
    let large = linkrank::sample_scores(&graph, 0.85, 100_000, &mut rng).unwrap();
    let s_large = r_large.change();

    assert_eq!(small.len(), n);
    assert_eq!(large.len(), n);

    let a_small = s_small.allocations;
    let a_large = s_large.allocations;
    assert!(
        a_large <= a_small + 4,
        "sampling allocations grew with sample count (1k={a_small}, 100k={a_large})"
    );
}
