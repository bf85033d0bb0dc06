//! Fuzzy interest functions applied to detector statistics.

use crate::util::{SweepMatchError, SweepMatchResult};

/// Scalar transfer function mapping a statistic to an interest value.
pub trait FuzzyFunction {
    /// Evaluates the function at `x`.
    fn apply(&self, x: f64) -> f64;
}

impl<F> FuzzyFunction for F
where
    F: Fn(f64) -> f64,
{
    fn apply(&self, x: f64) -> f64 {
        self(x)
    }
}

/// Piecewise-linear function through ascending `(x, y)` knots.
///
/// Inputs left of the first knot map to its `y`; inputs right of the last knot
/// map to the last `y`.
#[derive(Clone, Debug, PartialEq)]
pub struct PiecewiseLinear {
    knots: Vec<(f64, f64)>,
}

impl PiecewiseLinear {
    /// Creates a function from knots sorted by strictly increasing `x`.
    pub fn new(knots: Vec<(f64, f64)>) -> SweepMatchResult<Self> {
        if knots.is_empty() {
            return Err(SweepMatchError::InvalidFuzzyFunction {
                reason: "at least one knot is required",
            });
        }
        if knots.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
            return Err(SweepMatchError::InvalidFuzzyFunction {
                reason: "knots must be finite",
            });
        }
        if knots.windows(2).any(|w| w[1].0 <= w[0].0) {
            return Err(SweepMatchError::InvalidFuzzyFunction {
                reason: "knot x values must be strictly increasing",
            });
        }
        Ok(Self { knots })
    }

    /// Returns the knots.
    pub fn knots(&self) -> &[(f64, f64)] {
        &self.knots
    }
}

impl FuzzyFunction for PiecewiseLinear {
    fn apply(&self, x: f64) -> f64 {
        let (x0, y0) = self.knots[0];
        if x <= x0 {
            return y0;
        }
        for pair in self.knots.windows(2) {
            let (xa, ya) = pair[0];
            let (xb, yb) = pair[1];
            if x <= xb {
                let t = (x - xa) / (xb - xa);
                return ya + t * (yb - ya);
            }
        }
        self.knots[self.knots.len() - 1].1
    }
}

#[cfg(test)]
mod tests {
    use super::{FuzzyFunction, PiecewiseLinear};

    #[test]
    fn interpolates_and_clamps() {
        let f = PiecewiseLinear::new(vec![(0.0, 0.0), (10.0, 1.0), (20.0, 1.0)]).unwrap();
        assert_eq!(f.apply(-5.0), 0.0);
        assert!((f.apply(5.0) - 0.5).abs() < 1e-12);
        assert_eq!(f.apply(15.0), 1.0);
        assert_eq!(f.apply(100.0), 1.0);
    }

    #[test]
    fn single_knot_is_constant() {
        let f = PiecewiseLinear::new(vec![(3.0, 0.25)]).unwrap();
        assert_eq!(f.apply(-1.0), 0.25);
        assert_eq!(f.apply(7.0), 0.25);
    }

    #[test]
    fn rejects_unsorted_knots() {
        assert!(PiecewiseLinear::new(vec![(1.0, 0.0), (1.0, 1.0)]).is_err());
        assert!(PiecewiseLinear::new(Vec::new()).is_err());
    }

    #[test]
    fn closures_are_fuzzy_functions() {
        let double = |x: f64| 2.0 * x;
        assert_eq!(double.apply(4.0), 8.0);
    }
}
