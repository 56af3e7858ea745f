use crate::color::{Channel, Rgb};

/// Hard cap on split rounds, independent of the requested color count.
pub const MAX_SPLIT_ITERATIONS: usize = 20;

/// A non-empty multiset of colors with cached per-channel extents.
#[derive(Debug, Clone)]
pub(crate) struct ColorBucket {
    colors: Vec<Rgb>,
    min: [u8; 3],
    max: [u8; 3],
}

impl ColorBucket {
    pub(crate) fn new(colors: Vec<Rgb>) -> Self {
        debug_assert!(!colors.is_empty(), "buckets are never empty");

        let mut min = [u8::MAX; 3];
        let mut max = [u8::MIN; 3];
        for color in &colors {
            for channel in Channel::ALL {
                let i = channel.index();
                let v = color.channel(channel);
                min[i] = min[i].min(v);
                max[i] = max[i].max(v);
            }
        }

        Self { colors, min, max }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.colors.len()
    }

    /// Channel with the largest `max - min`, and that range.
    ///
    /// Equal ranges resolve in R > G > B order.
    pub(crate) fn widest_channel(&self) -> (Channel, u8) {
        let mut best = (Channel::Red, 0);
        for channel in Channel::ALL {
            let i = channel.index();
            let range = self.max[i] - self.min[i];
            if range > best.1 {
                best = (channel, range);
            }
        }
        best
    }

    /// Split at the count median along `channel`.
    ///
    /// Colors are stably sorted by descending channel value; the first half
    /// gets `ceil(n/2)` of them. Neither half is ever empty.
    pub(crate) fn split(mut self, channel: Channel) -> (ColorBucket, ColorBucket) {
        self.colors
            .sort_by(|a, b| b.channel(channel).cmp(&a.channel(channel)));

        let mid = self.colors.len().div_ceil(2);
        let mut right = self.colors.split_off(mid);
        let mut left = self.colors;

        if right.is_empty() {
            if let Some(color) = left.pop() {
                right.push(color);
            }
        } else if left.is_empty() {
            if let Some(color) = right.pop() {
                left.push(color);
            }
        }

        (ColorBucket::new(left), ColorBucket::new(right))
    }

    /// Componentwise mean, rounded to the nearest integer.
    pub(crate) fn mean(&self) -> Rgb {
        let n = self.colors.len() as f64;
        let mut sums = [0u64; 3];
        for color in &self.colors {
            sums[0] += u64::from(color.r);
            sums[1] += u64::from(color.g);
            sums[2] += u64::from(color.b);
        }
        Rgb::from_f32(sums.map(|s| (s as f64 / n) as f32))
    }
}

/// Median-cut partition of `colors` into at most `max_colors` buckets.
///
/// Each round splits the bucket whose widest channel range is largest
/// (lowest index on ties). Stops when the bucket count reaches
/// `max_colors`, when no bucket with two or more members has any spread
/// left, or after [`MAX_SPLIT_ITERATIONS`] rounds.
pub(crate) fn median_cut(colors: Vec<Rgb>, max_colors: usize) -> Vec<ColorBucket> {
    if colors.is_empty() {
        return Vec::new();
    }

    let mut buckets = vec![ColorBucket::new(colors)];
    let max_colors = max_colors.max(1);

    for _ in 0..MAX_SPLIT_ITERATIONS {
        if buckets.len() >= max_colors {
            break;
        }

        let mut target: Option<(usize, Channel, u8)> = None;
        for (i, bucket) in buckets.iter().enumerate() {
            if bucket.len() < 2 {
                continue;
            }
            let (channel, range) = bucket.widest_channel();
            if target.map_or(true, |(_, _, best)| range > best) {
                target = Some((i, channel, range));
            }
        }

        let Some((index, channel, range)) = target else {
            break;
        };
        if range == 0 {
            break;
        }

        let bucket = buckets.remove(index);
        let (left, right) = bucket.split(channel);
        buckets.insert(index, right);
        buckets.insert(index, left);
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widest_channel_prefers_red_on_tie() {
        let bucket = ColorBucket::new(vec![Rgb::new(0, 0, 0), Rgb::new(10, 10, 10)]);
        assert_eq!(bucket.widest_channel(), (Channel::Red, 10));

        let bucket = ColorBucket::new(vec![Rgb::new(0, 0, 0), Rgb::new(0, 10, 10)]);
        assert_eq!(bucket.widest_channel(), (Channel::Green, 10));
    }

    #[test]
    fn test_split_sizes_are_ceil_and_floor() {
        let colors: Vec<Rgb> = (0..5).map(|i| Rgb::new(i * 10, 0, 0)).collect();
        let (left, right) = ColorBucket::new(colors).split(Channel::Red);

        assert_eq!(left.len(), 3);
        assert_eq!(right.len(), 2);
        // Descending order: the brightest reds stay in the first bucket.
        assert_eq!(left.mean(), Rgb::new(30, 0, 0));
        assert_eq!(right.mean(), Rgb::new(5, 0, 0));
    }

    #[test]
    fn test_split_identical_colors_never_empty() {
        let bucket = ColorBucket::new(vec![Rgb::new(7, 7, 7); 2]);
        let (left, right) = bucket.split(Channel::Red);
        assert_eq!((left.len(), right.len()), (1, 1));
    }

    #[test]
    fn test_mean_rounds_to_nearest() {
        let bucket = ColorBucket::new(vec![Rgb::new(0, 0, 0), Rgb::new(1, 3, 255)]);
        assert_eq!(bucket.mean(), Rgb::new(1, 2, 128));
    }

    #[test]
    fn test_median_cut_stops_on_uniform_input() {
        let buckets = median_cut(vec![Rgb::new(5, 5, 5); 10], 6);
        assert_eq!(buckets.len(), 1);
    }

    #[test]
    fn test_median_cut_respects_max_colors() {
        let colors: Vec<Rgb> = (0..=255u8).map(|v| Rgb::new(v, 255 - v, v / 2)).collect();
        for max in 1..=12 {
            let buckets = median_cut(colors.clone(), max);
            assert_eq!(buckets.len(), max);
            assert!(buckets.iter().all(|b| b.len() >= 1));
        }
    }

    #[test]
    fn test_median_cut_iteration_ceiling() {
        let colors: Vec<Rgb> = (0..=255u8).map(|v| Rgb::new(v, 0, 0)).collect();
        let buckets = median_cut(colors, 200);
        assert_eq!(buckets.len(), MAX_SPLIT_ITERATIONS + 1);
    }
}
