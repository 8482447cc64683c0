use num::Float;
use serde::{Deserialize, Serialize};

use crate::math::interp;

#[derive(Clone, Copy, Debug)]
enum Norm {
    Min,
    Prod,
    BoundedProd,
    DrasticProd,
    Max,
    ProbOr,
    BoundedSum,
    DrasticSum,
}

impl Norm {
    fn apply<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Min => F::min(u, v),
            Self::Prod => u * v,
            Self::BoundedProd => F::max(F::zero(), u + v - F::one()),
            Self::DrasticProd => {
                if u == F::one() {
                    v
                } else if v == F::one() {
                    u
                } else {
                    F::zero()
                }
            },
            Self::Max => F::max(u, v),
            Self::ProbOr => u + v - u * v,
            Self::BoundedSum => F::min(F::one(), u + v),
            Self::DrasticSum => {
                if v == F::zero() {
                    u
                } else if u == F::zero() {
                    v
                } else {
                    F::one()
                }
            },
        }
    }
}

/// And operator method for combining the compositions of propositions
/// in a fuzzy rule premise.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AndOp {
    #[default]
    Min,
    Prod,
    BoundedProd,
    DrasticProd,
}

impl AndOp {
    pub fn apply<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Min => Norm::Min.apply(u, v),
            Self::Prod => Norm::Prod.apply(u, v),
            Self::BoundedProd => Norm::BoundedProd.apply(u, v),
            Self::DrasticProd => Norm::DrasticProd.apply(u, v),
        }
    }
}

/// Or operator method for combining the compositions of propositions
/// in a fuzzy rule premise.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrOp {
    #[default]
    Max,
    ProbOr,
    BoundedSum,
    DrasticSum,
}

impl OrOp {
    pub fn apply<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Max => Norm::Max.apply(u, v),
            Self::ProbOr => Norm::ProbOr.apply(u, v),
            Self::BoundedSum => Norm::BoundedSum.apply(u, v),
            Self::DrasticSum => Norm::DrasticSum.apply(u, v),
        }
    }
}

/// Implication operator method for shaping a rule's consequence by its
/// firing strength.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImplicationOp {
    /// Mamdani: clip the consequence at the firing strength
    #[default]
    Min,
    /// Larsen: scale the consequence by the firing strength
    Prod,
}

impl ImplicationOp {
    pub fn call<F: Float>(self, strength: F, consequence: &[F]) -> impl Iterator<Item = F> + '_ {
        let norm = match self {
            Self::Min => Norm::Min,
            Self::Prod => Norm::Prod,
        };

        consequence.iter().map(move |&v| norm.apply(strength, v))
    }
}

/// Method for aggregating the consequences of the fuzzy rules
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductionLink {
    #[default]
    Max,
    ProbOr,
    BoundedSum,
}

impl ProductionLink {
    /// Folds `implied` into `aggregate` point by point.
    pub fn accumulate<F: Float>(self, aggregate: &mut [F], implied: impl IntoIterator<Item = F>) {
        let norm = match self {
            Self::Max => Norm::Max,
            Self::ProbOr => Norm::ProbOr,
            Self::BoundedSum => Norm::BoundedSum,
        };

        for (acc, v) in aggregate.iter_mut().zip(implied) {
            *acc = norm.apply(*acc, v);
        }
    }
}

/// Method for defuzzifcating the resulting membership function.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DefuzzificationOp {
    /// Center of gravity over the sampled points
    #[default]
    Centroid,
    /// Bisector of area
    Bisector,
    /// Mean of the values for which the membership function is maximum
    MeanOfMaximum,
    /// Smallest value for which the membership function is maximum
    SmallestOfMaximum,
    /// Largest value for which the membership function is maximum
    LargestOfMaximum,
}

impl DefuzzificationOp {
    /// Reduces a sampled membership function to a crisp value. Returns `None`
    /// when the membership is zero everywhere.
    pub fn call<F: Float>(self, universe: &[F], membership: &[F]) -> Option<F> {
        debug_assert_eq!(universe.len(), membership.len());

        let maximum = membership.iter().copied().fold(F::zero(), F::max);

        if maximum <= F::zero() {
            return None;
        }

        match self {
            Self::Centroid => {
                let (num, den) = universe
                    .iter()
                    .zip(membership)
                    .fold((F::zero(), F::zero()), |(num, den), (&u, &m)| (num + u * m, den + m));

                Some(num / den)
            },
            Self::Bisector => Some(bisector(universe, membership)),
            Self::MeanOfMaximum => {
                let (len, sum) = at_maximum(universe, membership, maximum)
                    .fold((F::zero(), F::zero()), |(len, sum), u| (len + F::one(), sum + u));

                Some(sum / len)
            },
            Self::SmallestOfMaximum => at_maximum(universe, membership, maximum).reduce(F::min),
            Self::LargestOfMaximum => at_maximum(universe, membership, maximum).reduce(F::max),
        }
    }
}

fn at_maximum<'a, F: Float>(universe: &'a [F], membership: &'a [F], maximum: F) -> impl Iterator<Item = F> + 'a {
    universe
        .iter()
        .zip(membership)
        .filter_map(move |(&u, &m)| if m == maximum { Some(u) } else { None })
}

// Requires at least one strictly positive membership value
fn bisector<F: Float>(universe: &[F], membership: &[F]) -> F {
    let two = F::one() + F::one();

    if universe.len() == 1 {
        return universe[0];
    }

    let areas: Vec<F> = universe
        .windows(2)
        .zip(membership.windows(2))
        .map(|(u, m)| (m[0] + m[1]) * (u[1] - u[0]) / two)
        .collect();
    let target = areas.iter().copied().fold(F::zero(), |acc, a| acc + a) / two;
    let mut cum_area = F::zero();

    for (i, area) in areas.iter().copied().enumerate() {
        if cum_area + area >= target {
            let coords = [(cum_area, universe[i]), (cum_area + area, universe[i + 1])];

            return interp(Some(target), &coords)[0];
        }

        cum_area = cum_area + area;
    }

    universe[universe.len() - 1]
}

/// The operator set an [`Engine`](crate::Engine) evaluates with.
///
/// The default is classic Mamdani inference: min for AND, max for OR, min
/// implication, max aggregation and centroid defuzzification.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct InferenceOps {
    pub and: AndOp,
    pub or: OrOp,
    pub implication: ImplicationOp,
    pub aggregation: ProductionLink,
    pub defuzzification: DefuzzificationOp,
}
