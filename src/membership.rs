use crate::error::{FuzzyError, Result};

/// A triangular membership function `(a, b, c)` with `a <= b <= c`.
///
/// Membership rises linearly from 0 at `a` to 1 at `b` and falls back to 0 at
/// `c`. `a == b` gives a left shoulder and `b == c` a right shoulder; when all
/// three coincide the set is a spike that is 1 only at that point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    a: f64,
    b: f64,
    c: f64,
}

impl Triangle {
    pub fn new(a: f64, b: f64, c: f64) -> Result<Self> {
        if !(a.is_finite() && b.is_finite() && c.is_finite()) || a > b || b > c {
            return Err(FuzzyError::InvalidShape { a, b, c });
        }

        Ok(Self { a, b, c })
    }

    pub fn points(&self) -> (f64, f64, f64) {
        (self.a, self.b, self.c)
    }

    /// Degree of membership of `x`. Defined for every float; anything outside
    /// `[a, c]`, NaN included, is 0.
    pub fn membership(&self, x: f64) -> f64 {
        let Self { a, b, c } = *self;

        if x.is_nan() || x < a || x > c {
            0.
        } else if x == b {
            1.
        } else if x < b {
            // a <= x < b, so b - a > 0
            (x - a) / (b - a)
        } else {
            (c - x) / (c - b)
        }
    }

    /// Samples the membership over a grid.
    pub fn sample(&self, points: &[f64]) -> Vec<f64> {
        points.iter().map(|&x| self.membership(x)).collect()
    }
}

impl TryFrom<[f64; 3]> for Triangle {
    type Error = FuzzyError;

    fn try_from([a, b, c]: [f64; 3]) -> Result<Self> {
        Self::new(a, b, c)
    }
}

#[test]
fn test_triangle_shapes() {
    let moderate = Triangle::new(18., 25., 28.).unwrap();

    assert_eq!(moderate.membership(18.), 0.);
    assert_eq!(moderate.membership(25.), 1.);
    assert_eq!(moderate.membership(28.), 0.);
    assert_eq!(moderate.membership(21.5), 0.5);
    assert_eq!(moderate.membership(26.5), 0.5);
    assert_eq!(moderate.membership(-100.), 0.);
    assert_eq!(moderate.membership(f64::INFINITY), 0.);
    assert_eq!(moderate.membership(f64::NAN), 0.);

    let cold = Triangle::new(15., 15., 20.).unwrap();

    assert_eq!(cold.membership(15.), 1.);
    assert_eq!(cold.membership(17.5), 0.5);
    assert_eq!(cold.membership(14.9), 0.);

    let hot = Triangle::new(25., 35., 35.).unwrap();

    assert_eq!(hot.membership(35.), 1.);
    assert_eq!(hot.membership(28.), 0.3);
    assert_eq!(hot.membership(35.1), 0.);

    let spike = Triangle::new(3., 3., 3.).unwrap();

    assert_eq!(spike.membership(3.), 1.);
    assert_eq!(spike.membership(3.0000001), 0.);
    assert_eq!(spike.membership(2.9999999), 0.);
}

#[test]
fn test_invalid_shapes() {
    assert!(matches!(Triangle::new(2., 1., 3.), Err(FuzzyError::InvalidShape { .. })));
    assert!(matches!(Triangle::new(1., 3., 2.), Err(FuzzyError::InvalidShape { .. })));
    assert!(matches!(Triangle::new(f64::NAN, 1., 2.), Err(FuzzyError::InvalidShape { .. })));
    assert!(Triangle::try_from([0., 0., 30.]).is_ok());
}
