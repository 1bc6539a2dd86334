//! Stratified train/test splitting

use crate::error::{LocatorError, Result};
use polars::prelude::*;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;
use tracing::debug;

/// Row indices of the two partitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainTestSplit {
    pub train_indices: Vec<usize>,
    pub test_indices: Vec<usize>,
}

/// Split rows into train and test partitions, preserving label proportions.
///
/// The test partition holds `ceil(test_size * n)` rows. Classes are visited
/// in sorted order with a single seeded RNG, so the same labels and seed
/// always give the same partitions.
pub fn train_test_split(labels: &[String], test_size: f64, random_state: u64) -> Result<TrainTestSplit> {
    let n_samples = labels.len();
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(LocatorError::InvalidParameter {
            name: "test_size".to_string(),
            value: test_size.to_string(),
            reason: "must be in (0, 1)".to_string(),
        });
    }

    // Tolerance keeps e.g. 0.2 * 70 from rounding up to 15
    let n_test = (test_size * n_samples as f64 - 1e-9).ceil() as usize;
    let n_train = n_samples.saturating_sub(n_test);
    if n_test == 0 || n_train == 0 {
        return Err(LocatorError::SplitError(format!(
            "with n_samples={} and test_size={}, the resulting train set would be empty",
            n_samples, test_size
        )));
    }

    let mut class_indices: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (idx, label) in labels.iter().enumerate() {
        class_indices.entry(label.as_str()).or_default().push(idx);
    }

    if let Some((label, members)) = class_indices.iter().min_by_key(|(_, m)| m.len()) {
        if members.len() < 2 {
            return Err(LocatorError::SplitError(format!(
                "the least populated class '{}' has only {} member, which is too few; \
                 every class needs at least 2 members",
                label,
                members.len()
            )));
        }
    }

    let n_classes = class_indices.len();
    if n_test < n_classes {
        return Err(LocatorError::SplitError(format!(
            "test size {} should be greater or equal to the number of classes {}",
            n_test, n_classes
        )));
    }
    if n_train < n_classes {
        return Err(LocatorError::SplitError(format!(
            "train size {} should be greater or equal to the number of classes {}",
            n_train, n_classes
        )));
    }

    let class_sizes: Vec<usize> = class_indices.values().map(Vec::len).collect();
    let test_counts = allocate(&class_sizes, n_test);

    let mut rng = ChaCha8Rng::seed_from_u64(random_state);
    let mut train_indices = Vec::with_capacity(n_train);
    let mut test_indices = Vec::with_capacity(n_test);

    for (members, &k) in class_indices.values().zip(&test_counts) {
        let mut members = members.clone();
        members.shuffle(&mut rng);
        test_indices.extend_from_slice(&members[..k]);
        train_indices.extend_from_slice(&members[k..]);
    }

    train_indices.shuffle(&mut rng);
    test_indices.shuffle(&mut rng);

    debug!(
        train = train_indices.len(),
        test = test_indices.len(),
        classes = n_classes,
        "Stratified split"
    );

    Ok(TrainTestSplit {
        train_indices,
        test_indices,
    })
}

/// Distribute `total` draws across classes proportionally to their sizes,
/// using floors plus largest remainders (earlier classes win ties).
fn allocate(class_sizes: &[usize], total: usize) -> Vec<usize> {
    let n: usize = class_sizes.iter().sum();
    let exact: Vec<f64> = class_sizes
        .iter()
        .map(|&size| total as f64 * size as f64 / n as f64)
        .collect();

    let mut counts: Vec<usize> = exact.iter().map(|e| e.floor() as usize).collect();
    let mut remaining = total - counts.iter().sum::<usize>();

    let mut order: Vec<usize> = (0..class_sizes.len()).collect();
    order.sort_by(|&a, &b| {
        let frac_a = exact[a] - exact[a].floor();
        let frac_b = exact[b] - exact[b].floor();
        frac_b.partial_cmp(&frac_a).unwrap_or(std::cmp::Ordering::Equal)
    });

    for idx in order {
        if remaining == 0 {
            break;
        }
        if counts[idx] < class_sizes[idx] {
            counts[idx] += 1;
            remaining -= 1;
        }
    }

    counts
}

/// Gather the listed rows of `df`, in the given order
pub fn take_rows(df: &DataFrame, indices: &[usize]) -> Result<DataFrame> {
    let idx = IdxCa::from_vec(
        "idx".into(),
        indices.iter().map(|&i| i as IdxSize).collect(),
    );
    Ok(df.take(&idx)?)
}

/// Gather the listed labels, in the given order
pub fn take_labels(labels: &[String], indices: &[usize]) -> Vec<String> {
    indices.iter().map(|&i| labels[i].clone()).collect()
}
