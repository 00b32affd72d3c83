//! Utility functions for interpolation and numeric conversions.

pub mod safe_cast;

/// Linearly map `value` from `domain` onto `range`, clamping at both ends.
///
/// This is a port of the two-point `numpy.interp` call used for the servo
/// angle and servo bar mappings. `range` may be descending (the servo bar
/// maps larger distances to smaller y coordinates).
pub fn interp(value: f64, domain: (f64, f64), range: (f64, f64)) -> f64 {
    let (d0, d1) = domain;
    let (r0, r1) = range;

    if value <= d0 {
        return r0;
    }
    if value >= d1 {
        return r1;
    }

    r0 + (value - d0) / (d1 - d0) * (r1 - r0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interp_endpoints() {
        assert_eq!(interp(50.0, (50.0, 320.0), (0.0, 180.0)), 0.0);
        assert_eq!(interp(320.0, (50.0, 320.0), (0.0, 180.0)), 180.0);
    }

    #[test]
    fn test_interp_clamps_outside_domain() {
        assert_eq!(interp(0.0, (50.0, 320.0), (0.0, 180.0)), 0.0);
        assert_eq!(interp(1000.0, (50.0, 320.0), (0.0, 180.0)), 180.0);
    }

    #[test]
    fn test_interp_midpoint() {
        let angle = interp(185.0, (50.0, 320.0), (0.0, 180.0));
        assert!((angle - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_interp_descending_range() {
        // Servo bar mapping: closer pinch -> taller bar
        let bar = interp(50.0, (50.0, 320.0), (400.0, 150.0));
        assert_eq!(bar, 400.0);
        let bar = interp(320.0, (50.0, 320.0), (400.0, 150.0));
        assert_eq!(bar, 150.0);
    }
}
