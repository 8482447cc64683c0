use std::ops::RangeInclusive;

use crate::error::{FuzzyError, Result};
use crate::linspace::Linspace;

/// Default sampling resolution when a variable is declared without one.
pub const DEFAULT_STEP: f64 = 0.1;

/// Largest number of grid points a universe may hold.
pub const MAX_POINTS: usize = 1 << 20;

// Relative to the step count; absorbs float noise such as 0.3 / 0.1 == 2.9999999999999996
const STEP_TOLERANCE: f64 = 1e-9;

/// The discretized domain of a linguistic variable.
///
/// Points start at `min` and advance by `step`; the last point is the largest
/// one not exceeding `max`, so `max` itself is sampled whenever the range is a
/// whole number of steps. A universe never holds more than [`MAX_POINTS`].
#[derive(Clone, Debug, PartialEq)]
pub struct Universe {
    min: f64,
    max: f64,
    step: f64,
    points: Vec<f64>,
}

impl Universe {
    pub fn new(range: RangeInclusive<f64>, step: f64) -> Result<Self> {
        let (min, max) = range.into_inner();

        if !(min.is_finite() && max.is_finite() && step.is_finite()) || min >= max || step <= 0. {
            return Err(FuzzyError::InvalidUniverse { min, max, step });
        }

        let steps = whole_steps(max - min, step);

        if !steps.is_finite() || steps >= MAX_POINTS as f64 {
            return Err(FuzzyError::InvalidUniverse { min, max, step });
        }

        let num = (steps as usize)
            .checked_add(1)
            .ok_or(FuzzyError::InvalidUniverse { min, max, step })?;
        let end = min + step * (num - 1) as f64;
        let points = Linspace::new(min, end, num).collect();

        Ok(Self { min, max, step, points })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Clamps `x` into `[min, max]`.
    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.min, self.max)
    }
}

/// Number of whole steps that fit in `span`, tolerating rounding just below an
/// integer.
fn whole_steps(span: f64, step: f64) -> f64 {
    let ratio = span / step;

    (ratio + ratio.abs().max(1.) * STEP_TOLERANCE).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_step_includes_both_ends() {
        let universe = Universe::new(15. ..=35., 1.).unwrap();

        assert_eq!(universe.len(), 21);
        assert_eq!(universe.points()[0], 15.);
        assert_eq!(universe.points()[20], 35.);
        assert!(universe.points().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_fractional_step_survives_float_noise() {
        let universe = Universe::new(15. ..=35., 0.1).unwrap();

        assert_eq!(universe.len(), 201);
        assert!((universe.points()[200] - 35.).abs() < 1e-9);
    }

    #[test]
    fn test_uneven_range_stops_before_max() {
        let universe = Universe::new(0. ..=1., 0.3).unwrap();

        assert_eq!(universe.len(), 4);
        assert!(universe.points()[3] <= 1.);
    }

    #[test]
    fn test_invalid_universes() {
        for (range, step) in [(5. ..=5., 1.), (5. ..=1., 1.), (0. ..=1., 0.), (0. ..=1., -1.), (0. ..=f64::NAN, 1.)] {
            assert!(matches!(Universe::new(range, step), Err(FuzzyError::InvalidUniverse { .. })));
        }
    }

    #[test]
    fn test_oversized_universes_are_rejected() {
        for (range, step) in [
            (0. ..=f64::MAX, f64::MIN_POSITIVE),
            (-f64::MAX..=f64::MAX, 1.),
            (0. ..=100., 1e-9),
            (0. ..=MAX_POINTS as f64, 1.),
        ] {
            assert!(matches!(Universe::new(range, step), Err(FuzzyError::InvalidUniverse { .. })));
        }

        assert_eq!(Universe::new(0. ..=(MAX_POINTS - 1) as f64, 1.).unwrap().len(), MAX_POINTS);
    }

    #[test]
    fn test_step_tolerance_scales_with_count() {
        // one ulp below 1e8, further from the integer than any absolute epsilon would allow
        let span = f64::from_bits(1e8_f64.to_bits() - 1);

        assert_eq!(whole_steps(span, 1.), 1e8);
        assert_eq!(whole_steps(0.3, 0.1), 3.);
        assert_eq!(whole_steps(1., 0.3), 3.);
        assert_eq!(whole_steps(0.5, 1.), 0.);
    }

    #[test]
    fn test_clamp() {
        let universe = Universe::new(0. ..=20., 1.).unwrap();

        assert_eq!(universe.clamp(-3.), 0.);
        assert_eq!(universe.clamp(25.), 20.);
        assert_eq!(universe.clamp(7.5), 7.5);
    }
}
