//! Error diffusion kernel definition.

/// An error diffusion kernel.
///
/// Each entry is a `(dx, dy, weight)` offset to a neighbor that has not
/// been visited yet in raster order. A neighbor receives
/// `error * weight / divisor`.
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    /// (dx, dy, weight) entries; `dy` is never negative.
    pub entries: &'static [(i32, i32, u8)],

    /// Total divisor for normalizing weights.
    pub divisor: u8,
}

impl Kernel {
    /// Fraction of the error a neighbor at `weight` receives.
    #[inline]
    pub fn share(&self, weight: u8) -> f32 {
        f32::from(weight) / f32::from(self.divisor)
    }
}

/// Floyd-Steinberg kernel.
///
/// Distributes 100% of the error to 4 neighbors.
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[
        (1, 0, 7),  // right
        (-1, 1, 3), // bottom-left
        (0, 1, 5),  // bottom
        (1, 1, 1),  // bottom-right
    ],
    divisor: 16,
};
