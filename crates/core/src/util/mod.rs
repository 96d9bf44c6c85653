//! Scalar math helpers and general-purpose macros.
//!
//! ## Rounding
//!
//! All rounding in this crate goes through [f64::round], which rounds half
//! away from zero (`0.5 -> 1`, `-0.5 -> -1`). Hex rounding and line
//! rasterization both depend on that convention, so don't swap it for
//! banker's rounding or `round_ties_even`.

/// Small offset used to nudge hex line endpoints off of tile edges. This needs
/// to be smaller than any fractional spacing that a real sample point can
/// have, but large enough to survive float error.
pub const EPSILON: f64 = 1e-6;

/// A macro to unwrap an option to its `Some` value, and panic if `None`. This
/// is the same as [Option::unwrap], except that it accepts a format string
/// and format arguments, allowing for more flexibility in error messages.
#[macro_export]
macro_rules! unwrap {
    ($opt:expr, $fmt:expr, $($arg:tt)*) => {
        match $opt {
            Some(v) => v,
            None => panic!($fmt, $($arg)*),
        }
    };
}

/// A macro to measure the evaluation time of an expression. Wraps an
/// expression, logs how long it took, and evaluates to the value of the
/// expression.
#[macro_export]
macro_rules! timed {
    ($label:expr, $ex:expr) => {
        $crate::timed!($label, log::Level::Debug, $ex)
    };
    ($label:expr, $log_level:expr, $ex:expr) => {{
        let now = std::time::Instant::now();
        let value = $ex;
        let elapsed = now.elapsed();
        log::log!($log_level, "{} took {} ms", $label, elapsed.as_millis());
        value
    }};
}

/// Linear interpolation between `a` and `b`. `t = 0` gives `a`, `t = 1` gives
/// `b`. Written as `a*(1-t) + b*t` rather than `a + (b-a)*t` so that both
/// endpoints are hit exactly.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Calculate the number of tiles in a hexagonal map based on its radius.
/// Radius 0 means 1 tile, 1 is 7 tiles, 2 is 19, etc.
pub fn map_len(radius: u16) -> usize {
    // We'll always have 3r^2+3r+1 tiles (a reduction of a geometric sum).
    // f(0) = 1, and we add 6r tiles for every step after that, so:
    // 1, (+6) 7, (+12) 19, (+18) 37, ...
    let r = radius as usize;
    3 * r * r + 3 * r + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_map_len() {
        assert_eq!(map_len(0), 1);
        assert_eq!(map_len(1), 7);
        assert_eq!(map_len(2), 19);
        assert_eq!(map_len(3), 37);
        assert_eq!(map_len(50), 7651);
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(2.0, 6.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 6.0, 1.0), 6.0);
        assert_approx_eq!(lerp(2.0, 6.0, 0.25), 3.0);
        assert_approx_eq!(lerp(-1.0, 1.0, 0.5), 0.0);
    }

    #[test]
    fn test_rounding_is_away_from_zero() {
        assert_eq!(0.5f64.round(), 1.0);
        assert_eq!((-0.5f64).round(), -1.0);
        assert_eq!(2.5f64.round(), 3.0);
        assert_eq!((-0.4999f64).round(), 0.0);
    }
}
