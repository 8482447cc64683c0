//! Mamdani fuzzy inference, plus the room cooling controller built on it.
//!
//! A system is declared as a set of [`Variables`] (inputs and outputs, each
//! with a [`Universe`] and triangular fuzzy sets) and [`Rules`] written with
//! the `variable.is(term).and(..).or(..)` builder. [`Engine::new`] validates
//! the whole definition once; [`Engine::eval`] is then a pure function from
//! crisp inputs to crisp outputs and can be called concurrently.
//!
//! ```
//! use fuzzy_cooling::{CoolingController, CoolingInputs, Recommendation};
//!
//! let controller = CoolingController::new()?;
//! let report = controller.compute(CoolingInputs { temperature: 28., humidity: 65., occupancy: 5. })?;
//!
//! assert_eq!(report.recommendation, Recommendation::High);
//! # Ok::<(), fuzzy_cooling::FuzzyError>(())
//! ```

mod config;
mod cooling;
pub mod coverage;
mod dsl;
mod error;
mod inference;
mod inputs;
mod linspace;
mod math;
mod membership;
mod ops;
mod outputs;
mod rules;
mod terms;
mod universe;
mod variable;

pub use config::{ExprConfig, RuleConfig, SystemConfig, TermRef, VariableConfig};
pub use cooling::{Cooling, CoolingController, CoolingInputs, CoolingReport, CoolingTerm, Humidity, Occupancy, Recommendation, Temperature};
pub use dsl::Expr;
pub use error::{FuzzyError, Result};
pub use inference::Engine;
pub use inputs::Inputs;
pub use membership::Triangle;
pub use ops::{AndOp, DefuzzificationOp, ImplicationOp, InferenceOps, OrOp, ProductionLink};
pub use outputs::Outputs;
pub use rules::{Rule, Rules};
pub use terms::{Key, Terms};
pub use universe::{Universe, DEFAULT_STEP, MAX_POINTS};
pub use variable::{LinguisticVariable, Role, Variable, VariableKey, Variables};
