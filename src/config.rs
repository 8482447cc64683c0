//! Declarative fuzzy system descriptions.
//!
//! A whole system (operators, variables with their terms, rules) can be
//! written in TOML and turned into an [`Engine<String>`]:
//!
//! ```toml
//! [inference]
//! and = "min"
//! or = "max"
//! implication = "min"
//! aggregation = "max"
//! defuzzification = "centroid"
//!
//! [[variables]]
//! name = "temperature"
//! role = "antecedent"
//! min = 15.0
//! max = 35.0
//! step = 1.0
//! terms = { cold = [15.0, 15.0, 20.0], hot = [25.0, 35.0, 35.0] }
//!
//! [[variables]]
//! name = "cooling"
//! role = "consequent"
//! min = 0.0
//! max = 100.0
//! step = 1.0
//! terms = { low = [0.0, 0.0, 30.0], high = [50.0, 100.0, 100.0] }
//!
//! [[rules]]
//! if = { variable = "temperature", term = "cold" }
//! then = { variable = "cooling", term = "low" }
//!
//! [[rules]]
//! if = { or = [{ variable = "temperature", term = "hot" }, { variable = "temperature", term = "cold" }] }
//! then = { variable = "cooling", term = "high" }
//! ```
//!
//! Every section except `[inference]` is required; missing operators fall
//! back to the Mamdani defaults.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dsl::Expr;
use crate::error::{FuzzyError, Result};
use crate::inference::Engine;
use crate::membership::Triangle;
use crate::ops::InferenceOps;
use crate::rules::Rules;
use crate::variable::{Role, Variables};

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct SystemConfig {
    #[serde(default)]
    pub inference: InferenceOps,
    pub variables: Vec<VariableConfig>,
    pub rules: Vec<RuleConfig>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct VariableConfig {
    pub name: String,
    pub role: Role,
    pub min: f64,
    pub max: f64,
    /// Sampling resolution, 0.1 when omitted
    pub step: Option<f64>,
    /// Term name to triangle `[a, b, c]`
    pub terms: BTreeMap<String, [f64; 3]>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct RuleConfig {
    #[serde(rename = "if")]
    pub premise: ExprConfig,
    #[serde(rename = "then")]
    pub consequence: TermRef,
}

/// `variable is term`
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct TermRef {
    pub variable: String,
    pub term: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExprConfig {
    Is(TermRef),
    And { and: Vec<ExprConfig> },
    Or { or: Vec<ExprConfig> },
}

impl SystemConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| FuzzyError::Io(path.to_path_buf(), e))?;

        debug!(path = %path.display(), "loading fuzzy system description");

        Self::from_toml_str(&content)
    }

    /// Validates the description and builds an engine whose terms are the
    /// term names.
    pub fn build(&self) -> Result<Engine<String>> {
        let mut vars = Variables::new();

        for var in &self.variables {
            let terms = var
                .terms
                .iter()
                .map(|(name, points)| Triangle::try_from(*points).map(|shape| (name.clone(), shape)))
                .collect::<Result<Vec<_>>>()?;

            vars.add(var.name.clone(), var.role, var.min..=var.max, terms, var.step)?;
        }

        let mut rules = Rules::with_capacity(self.rules.len());

        for (i, rule) in self.rules.iter().enumerate() {
            rules.add(rule.premise.to_expr(&vars, i)?, rule.consequence.to_expr(&vars, i)?);
        }

        Engine::with_ops(vars, rules, self.inference)
    }
}

impl TermRef {
    fn to_expr(&self, vars: &Variables<String>, rule: usize) -> Result<Expr<String>> {
        let key = vars
            .key_of(&self.variable)
            .ok_or(FuzzyError::UnknownReference { rule })?;

        Ok(Expr::Is(key, self.term.clone()))
    }
}

impl ExprConfig {
    fn to_expr(&self, vars: &Variables<String>, rule: usize) -> Result<Expr<String>> {
        let (operands, join): (_, fn(Expr<String>, Expr<String>) -> Expr<String>) = match self {
            ExprConfig::Is(term) => return term.to_expr(vars, rule),
            ExprConfig::And { and } => (and, Expr::and),
            ExprConfig::Or { or } => (or, Expr::or),
        };

        operands
            .iter()
            .map(|operand| operand.to_expr(vars, rule))
            .reduce(|lhs, rhs| Ok(join(lhs?, rhs?)))
            .ok_or(FuzzyError::EmptyExpression { rule })?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = r#"
        [[variables]]
        name = "x"
        role = "antecedent"
        min = 0.0
        max = 10.0
        step = 1.0
        terms = { low = [0.0, 0.0, 5.0], high = [5.0, 10.0, 10.0] }

        [[variables]]
        name = "y"
        role = "consequent"
        min = 0.0
        max = 10.0
        terms = { small = [0.0, 0.0, 10.0] }

        [[rules]]
        if = { or = [{ variable = "x", term = "low" }, { variable = "x", term = "high" }] }
        then = { variable = "y", term = "small" }
    "#;

    #[test]
    fn test_parse_and_build() {
        let config = SystemConfig::from_toml_str(SMALL).unwrap();

        assert_eq!(config.inference, InferenceOps::default());
        assert_eq!(config.variables[1].step, None);
        assert!(matches!(&config.rules[0].premise, ExprConfig::Or { or } if or.len() == 2));

        let engine = config.build().unwrap();

        assert_eq!(engine.rules().len(), 1);
        assert_eq!(engine.variables().len(), 2);
        assert!(engine.evaluate_named([("x", 3.)]).unwrap()["y"] > 0.);
    }

    #[test]
    fn test_operator_selection() {
        let content = format!("[inference]\nand = \"prod\"\ndefuzzification = \"mean_of_maximum\"\n{SMALL}");
        let config = SystemConfig::from_toml_str(&content).unwrap();

        assert_eq!(config.inference.and, crate::ops::AndOp::Prod);
        assert_eq!(config.inference.or, crate::ops::OrOp::Max);
        assert_eq!(config.inference.defuzzification, crate::ops::DefuzzificationOp::MeanOfMaximum);
    }

    #[test]
    fn test_bad_references_and_shapes() {
        let unknown = SMALL.replace(r#"{ variable = "x", term = "high" }"#, r#"{ variable = "z", term = "high" }"#);

        assert!(matches!(
            SystemConfig::from_toml_str(&unknown).unwrap().build(),
            Err(FuzzyError::UnknownReference { rule: 0 })
        ));

        let undefined = SMALL.replace(r#"term = "small" }"#, r#"term = "large" }"#);

        assert!(matches!(
            SystemConfig::from_toml_str(&undefined).unwrap().build(),
            Err(FuzzyError::UndefinedSet { variable, term }) if variable == "y" && term == "\"large\""
        ));

        let bad_shape = SMALL.replace("[5.0, 10.0, 10.0]", "[10.0, 5.0, 10.0]");

        assert!(matches!(
            SystemConfig::from_toml_str(&bad_shape).unwrap().build(),
            Err(FuzzyError::InvalidShape { .. })
        ));

        let empty_or = SMALL.replace(
            r#"{ or = [{ variable = "x", term = "low" }, { variable = "x", term = "high" }] }"#,
            "{ or = [] }",
        );

        assert!(matches!(
            SystemConfig::from_toml_str(&empty_or).unwrap().build(),
            Err(FuzzyError::EmptyExpression { rule: 0 })
        ));
    }

    #[test]
    fn test_oversized_universe() {
        let huge = SMALL.replacen("max = 10.0\n        step = 1.0", "max = 1e308\n        step = 1e-300", 1);

        assert!(huge.contains("step = 1e-300"));
        assert!(matches!(
            SystemConfig::from_toml_str(&huge).unwrap().build(),
            Err(FuzzyError::InvalidUniverse { .. })
        ));
    }

    #[test]
    fn test_syntax_error() {
        assert!(matches!(SystemConfig::from_toml_str("[[variables]"), Err(FuzzyError::Config(_))));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            SystemConfig::load_from_file("/nonexistent/fuzzy.toml"),
            Err(FuzzyError::Io(..))
        ));
    }
}
