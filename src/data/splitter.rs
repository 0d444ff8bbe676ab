// ============================================================
// Layer 4 - Train/Test Splitter
// ============================================================
// Shuffles samples with a seeded RNG and splits them in two.
// Used twice in the pipeline:
//   - ingestion:      80/20 train/test split of the records
//   - model building: 80/20 fit/evaluation split of the
//                     vectorized training table
//
// Split sizes:
//   n_test  = ceil(n * test_fraction)
//   n_train = n - n_test
//
// The permutation comes from StdRng seeded with a fixed u64,
// so the same input and seed always give the same split.
// The first n_test permuted samples form the test part, the
// remainder the train part, both kept in permuted order.
//
// Reference: rand crate documentation (SeedableRng, SliceRandom)

use anyhow::{bail, Result};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Deterministically shuffle `samples` and split into (train, test).
///
/// # Arguments
/// * `samples`       - All available samples (consumed by this function)
/// * `test_fraction` - Proportion held out, e.g. 0.2 = 20%
/// * `seed`          - RNG seed; same seed, same split
pub fn split_train_test<T>(
    samples:       Vec<T>,
    test_fraction: f64,
    seed:          u64,
) -> Result<(Vec<T>, Vec<T>)> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        bail!("test fraction must be in (0, 1), got {}", test_fraction);
    }

    let total  = samples.len();
    let n_test = ((total as f64) * test_fraction).ceil() as usize;
    let n_test = n_test.min(total);

    let mut order: Vec<usize> = (0..total).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    order.shuffle(&mut rng);

    // Each slot is taken exactly once because `order` is a permutation
    let mut slots: Vec<Option<T>> = samples.into_iter().map(Some).collect();
    let test: Vec<T>  = order[..n_test].iter().filter_map(|&i| slots[i].take()).collect();
    let train: Vec<T> = order[n_test..].iter().filter_map(|&i| slots[i].take()).collect();

    tracing::debug!(
        "Split {} samples: {} train, {} test (seed {})",
        total,
        train.len(),
        test.len(),
        seed
    );

    Ok((train, test))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_correct_split_sizes() {
        let items: Vec<usize> = (0..100).collect();
        let (train, test)     = split_train_test(items, 0.2, 42).unwrap();
        assert_eq!(train.len(), 80);
        assert_eq!(test.len(),  20);
    }

    #[test]
    fn test_test_size_rounds_up() {
        // 0.2 * 11 = 2.2 → 3 test samples
        let items: Vec<usize> = (0..11).collect();
        let (train, test)     = split_train_test(items, 0.2, 42).unwrap();
        assert_eq!(test.len(),  3);
        assert_eq!(train.len(), 8);
    }

    #[test]
    fn test_disjoint_and_complete() {
        let items: Vec<usize> = (0..57).collect();
        let (train, test)     = split_train_test(items, 0.2, 7).unwrap();

        let train_set: HashSet<_> = train.iter().copied().collect();
        let test_set:  HashSet<_> = test.iter().copied().collect();
        assert!(train_set.is_disjoint(&test_set));

        let mut all: Vec<usize> = train.into_iter().chain(test).collect();
        all.sort_unstable();
        assert_eq!(all, (0..57).collect::<Vec<_>>());
    }

    #[test]
    fn test_same_seed_same_split() {
        let a = split_train_test((0..40).collect::<Vec<u32>>(), 0.2, 42).unwrap();
        let b = split_train_test((0..40).collect::<Vec<u32>>(), 0.2, 42).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_dataset() {
        let items: Vec<usize> = Vec::new();
        let (train, test)     = split_train_test(items, 0.2, 42).unwrap();
        assert!(train.is_empty());
        assert!(test.is_empty());
    }

    #[test]
    fn test_bad_fraction_rejected() {
        assert!(split_train_test(vec![1, 2, 3], 0.0, 42).is_err());
        assert!(split_train_test(vec![1, 2, 3], 1.0, 42).is_err());
    }
}
