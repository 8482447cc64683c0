//! Rule base coverage analysis.
//!
//! An evaluation fails with [`FuzzyError::NoRuleFired`](crate::FuzzyError::NoRuleFired)
//! when no rule fires for an input tuple. [`check`] walks every point of the
//! Cartesian product of the input universes and reports the points where that
//! would happen, so gaps surface as configuration defects before deployment.

use std::fmt::Debug;
use std::hash::Hash;

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::Result;
use crate::inference::Engine;
use crate::inputs::Inputs;
use crate::variable::{Role, VariableKey};

/// An input tuple, as `(variable name, value)` pairs in declaration order.
pub type Point = Vec<(String, f64)>;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CoverageReport {
    points_checked: usize,
    gaps: Vec<Point>,
}

impl CoverageReport {
    /// True if at least one rule fires at every grid point.
    pub fn is_complete(&self) -> bool {
        self.gaps.is_empty()
    }

    pub fn points_checked(&self) -> usize {
        self.points_checked
    }

    /// Grid points where every rule has zero firing strength.
    pub fn gaps(&self) -> &[Point] {
        &self.gaps
    }
}

/// Evaluates the rule strengths of `engine` at every grid point of its input
/// universes.
pub fn check<T>(engine: &Engine<T>) -> Result<CoverageReport>
where
    T: Clone + Eq + Hash + Debug + Send + Sync,
{
    let axes: Vec<(VariableKey, &str, &[f64])> = engine
        .variables()
        .iter()
        .filter(|(_, var)| var.role() == Role::Antecedent)
        .map(|(key, var)| (key, var.name(), var.universe().points()))
        .collect();
    let points_checked: usize = axes.iter().map(|(_, _, points)| points.len()).product();

    let gaps = (0..points_checked)
        .into_par_iter()
        .map(|index| -> Result<Option<Point>> {
            let mut inputs = Inputs::new();
            let mut rest = index;

            // mixed radix decomposition, first axis varies fastest
            for (key, _, points) in &axes {
                inputs.0.insert(*key, points[rest % points.len()]);
                rest /= points.len();
            }

            let fired = engine.firing_strengths(&inputs)?.into_iter().any(|s| s > 0.);

            Ok((!fired).then(|| {
                axes.iter()
                    .map(|(key, name, _)| (name.to_string(), inputs.0[key]))
                    .collect::<Point>()
            }))
        })
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();

    if gaps.is_empty() {
        debug!(points_checked, "rule base covers the input space");
    } else {
        warn!(points_checked, gaps = gaps.len(), first = ?gaps[0], "rule base leaves inputs uncovered");
    }

    Ok(CoverageReport { points_checked, gaps })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::membership::Triangle;
    use crate::rules::Rules;
    use crate::variable::Variables;
    use crate::FuzzyError;

    fn tri(a: f64, b: f64, c: f64) -> Triangle {
        Triangle::new(a, b, c).unwrap()
    }

    #[test]
    fn test_gap_is_found_and_reachable() {
        let mut vars = Variables::<&str>::new();
        let x = vars
            .add_antecedent("x", 0. ..=4., [("low", tri(0., 0., 2.)), ("high", tri(2., 4., 4.))], Some(1.))
            .unwrap();
        let y = vars
            .add_antecedent("y", 0. ..=1., [("off", tri(0., 0., 1.)), ("on", tri(0., 1., 1.))], Some(1.))
            .unwrap();
        let out = vars
            .add_consequent("out", 0. ..=1., [("some", tri(0., 1., 1.))], Some(0.5))
            .unwrap();
        let mut rules = Rules::new();

        // x == 2 belongs to neither term
        rules.add(x.is("low").or(x.is("high")), out.is("some"));

        let engine = Engine::new(vars, rules).unwrap();
        let report = check(&engine).unwrap();

        assert_eq!(report.points_checked(), 10);
        assert!(!report.is_complete());
        assert_eq!(
            report.gaps(),
            &[
                vec![("x".to_owned(), 2.), ("y".to_owned(), 0.)],
                vec![("x".to_owned(), 2.), ("y".to_owned(), 1.)],
            ]
        );

        let err = engine.eval(&Inputs::new().with(x, 2.).with(y, 0.)).unwrap_err();

        assert!(matches!(err, FuzzyError::NoRuleFired(_)));
    }

    #[test]
    fn test_complete_rule_base() {
        let mut vars = Variables::<&str>::new();
        let x = vars
            .add_antecedent("x", 0. ..=4., [("low", tri(0., 0., 3.)), ("high", tri(1., 4., 4.))], Some(0.5))
            .unwrap();
        let out = vars
            .add_consequent("out", 0. ..=1., [("some", tri(0., 1., 1.))], None)
            .unwrap();
        let mut rules = Rules::new();

        rules.add(x.is("low"), out.is("some"));
        rules.add(x.is("high"), out.is("some"));

        let report = check(&Engine::new(vars, rules).unwrap()).unwrap();

        assert!(report.is_complete());
        assert_eq!(report.points_checked(), 9);
    }
}
