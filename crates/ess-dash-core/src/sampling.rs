//! ---
//! ems_section: "01-core-functionality"
//! ems_subsection: "module"
//! ems_type: "source"
//! ems_scope: "code"
//! ems_description: "Deterministic stride sampling for reduced-fidelity displays."
//! ems_version: "v0.0.0-prealpha"
//! ems_owner: "tbd"
//! ---
//! Deterministic stride sampling.
//!
//! `sample(items, k)` picks index `floor(i * n / k)` for `i` in `0..k`, where `n` is the
//! collection length. With the reference pack of 420 batteries this is stride 7 for the
//! 60-cell preview strip and stride 4.2 for the 100-cell minimap.
//!
//! Sampling is a display approximation. A faulted battery shows up only if its position lands
//! on a sampled index, so the number of alert cells in a sample can be lower (or, for other
//! fault layouts, proportionally higher) than the true count. Anything that reports how many
//! batteries are in alert must scan the full pack, as [`crate::summarize`] does.

use ess_dash_model::Battery;

/// Cells in the per-ESS preview strip on summary cards.
pub const PREVIEW_SAMPLES: usize = 60;
/// Cells per ESS tile in the minimap.
pub const MINIMAP_SAMPLES: usize = 100;

/// Indices selected for a `k`-sample of a collection of `len` items.
///
/// Indices are non-decreasing and always `< len`. They are strictly increasing while
/// `k <= len`; larger `k` repeats indices.
pub fn sample_indices(len: usize, k: usize) -> Vec<usize> {
    if len == 0 {
        return Vec::new();
    }
    (0..k).map(|i| i * len / k).collect()
}

/// Borrow a `k`-element stride sample of `items`, preserving order.
pub fn sample<T>(items: &[T], k: usize) -> Vec<&T> {
    sample_indices(items.len(), k)
        .into_iter()
        .map(|index| &items[index])
        .collect()
}

/// Alert cells a `k`-sample would display. Not the true alert count.
pub fn sampled_alert_count(batteries: &[Battery], k: usize) -> usize {
    sample(batteries, k)
        .into_iter()
        .filter(|battery| battery.is_alert())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_uses_stride_seven() {
        let indices = sample_indices(420, PREVIEW_SAMPLES);
        assert_eq!(indices.len(), 60);
        assert_eq!(&indices[..4], &[0, 7, 14, 21]);
        assert_eq!(indices[59], 413);
    }

    #[test]
    fn minimap_uses_fractional_stride() {
        let indices = sample_indices(420, MINIMAP_SAMPLES);
        assert_eq!(indices.len(), 100);
        assert_eq!(&indices[..6], &[0, 4, 8, 12, 16, 21]);
        assert_eq!(indices[99], 415);
        assert!(indices.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn full_sample_is_identity() {
        let items: Vec<usize> = (0..420).collect();
        let sampled: Vec<usize> = sample(&items, 420).into_iter().copied().collect();
        assert_eq!(sampled, items);
    }

    #[test]
    fn single_sample_is_first_item() {
        let items = ["a", "b", "c"];
        assert_eq!(sample(&items, 1), vec![&"a"]);
    }

    #[test]
    fn degenerate_inputs_are_empty() {
        assert!(sample_indices(0, 60).is_empty());
        assert!(sample_indices(420, 0).is_empty());
        let empty: [u8; 0] = [];
        assert!(sample(&empty, 5).is_empty());
    }

    #[test]
    fn oversampling_repeats_but_stays_in_bounds() {
        let indices = sample_indices(3, 5);
        assert_eq!(indices, vec![0, 0, 1, 1, 2]);
    }
}
