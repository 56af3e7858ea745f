//! Median-cut color quantization.
//!
//! [`quantize`] reduces a population of opaque colors to at most
//! `max_colors` representatives. The population is a multiset: a color
//! covering half the image weighs half the count when buckets are split at
//! their count median.
//!
//! # Example
//!
//! ```
//! use bead_convert::quantize::quantize;
//! use bead_convert::Rgb;
//!
//! let red = Rgb::new(255, 0, 0);
//! let blue = Rgb::new(0, 0, 255);
//!
//! assert_eq!(quantize(&[red, red, blue, blue], 2), vec![red, blue]);
//! ```

mod median_cut;

use std::collections::HashSet;

use crate::color::Rgb;

pub use median_cut::MAX_SPLIT_ITERATIONS;

/// Reduce `colors` to a palette of at most `max_colors` unique colors.
///
/// Deterministic: the same input always yields the same palette in the
/// same order. An empty input yields an empty palette; any `max_colors`
/// below 1 is treated as 1.
pub fn quantize(colors: &[Rgb], max_colors: usize) -> Vec<Rgb> {
    let buckets = median_cut::median_cut(colors.to_vec(), max_colors);

    let mut seen = HashSet::new();
    buckets
        .iter()
        .map(|bucket| bucket.mean())
        .filter(|color| seen.insert(*color))
        .collect()
}

/// Number of distinct colors in a population.
pub fn distinct_colors(colors: &[Rgb]) -> usize {
    colors.iter().collect::<HashSet<_>>().len()
}
