//! Scalar helpers

/// Linearly remap `x` from `[from_low, from_high]` onto `[to_low, to_high]`.
///
/// Values outside the source range extrapolate; nothing is clamped. The
/// source range must not be empty (`from_low != from_high`).
#[inline]
pub fn map_range(x: f64, from_low: f64, from_high: f64, to_low: f64, to_high: f64) -> f64 {
    (x - from_low) / (from_high - from_low) * (to_high - to_low) + to_low
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_range_endpoints() {
        assert_eq!(map_range(0.0, -3.0, 3.0, 0.0, 1.0), 0.5);
        assert_eq!(map_range(-3.0, -3.0, 3.0, 0.0, 1.0), 0.0);
        assert_eq!(map_range(3.0, -3.0, 3.0, 0.0, 1.0), 1.0);
    }

    #[test]
    fn test_extrapolates_without_clamping() {
        assert_eq!(map_range(6.0, -3.0, 3.0, 0.0, 1.0), 1.5);
        assert_eq!(map_range(-9.0, -3.0, 3.0, 0.0, 1.0), -1.0);
    }

    #[test]
    fn test_reversed_target_range() {
        assert_eq!(map_range(2.0, 0.0, 4.0, 10.0, 0.0), 5.0);
    }
}
