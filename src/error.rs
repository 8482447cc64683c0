use std::path::PathBuf;

use thiserror::Error;

use crate::variable::Role;

pub type Result<T, E = FuzzyError> = std::result::Result<T, E>;

/// Everything that can go wrong while building or evaluating a fuzzy system.
///
/// Construction failures (shapes, universes, names, references) are programming
/// errors and are reported eagerly by [`Engine::new`](crate::Engine::new).
/// [`FuzzyError::NoRuleFired`] is the only failure a validated engine can
/// produce for a well-formed input tuple.
#[derive(Debug, Error)]
pub enum FuzzyError {
    #[error("invalid triangular shape ({a}, {b}, {c}): expected finite a <= b <= c")]
    InvalidShape { a: f64, b: f64, c: f64 },

    #[error(
        "invalid universe [{min}, {max}] with step {step}: expected finite min < max, step > 0 and at most {max_points} points",
        max_points = crate::universe::MAX_POINTS
    )]
    InvalidUniverse { min: f64, max: f64, step: f64 },

    #[error("variable `{0}` is already defined")]
    DuplicateName(String),

    #[error("variable `{0}` is unknown or has no terms")]
    UnknownVariable(String),

    #[error("term `{term}` is not defined on variable `{variable}`")]
    UndefinedSet { variable: String, term: String },

    #[error("rule {rule} references a variable that is not part of this system")]
    UnknownReference { rule: usize },

    #[error("rule {rule} uses {role:?} variable `{variable}` on the wrong side")]
    RoleMismatch { rule: usize, variable: String, role: Role },

    #[error("rule {rule} must have exactly one `variable is term` consequence")]
    InvalidConsequence { rule: usize },

    #[error("rule {rule} has an empty `and` or `or` list")]
    EmptyExpression { rule: usize },

    #[error("the rule base is empty")]
    EmptyRuleBase,

    #[error("no input value supplied for `{0}`")]
    MissingInput(String),

    #[error("input value for `{0}` is not a finite number")]
    NonFiniteInput(String),

    #[error("no rule fired for output `{0}`; the aggregate membership is zero everywhere")]
    NoRuleFired(String),

    #[error("failed to parse fuzzy system description: {0}")]
    Config(#[from] toml::de::Error),

    #[error("failed to read {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),
}
