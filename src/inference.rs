use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use rayon::prelude::*;
use slotmap::SecondaryMap;
use tracing::{debug, trace, warn};

use crate::dsl::Expr;
use crate::error::{FuzzyError, Result};
use crate::inputs::Inputs;
use crate::ops::InferenceOps;
use crate::outputs::Outputs;
use crate::rules::Rules;
use crate::variable::{Role, VariableKey, Variables};

/// A validated Mamdani fuzzy inference system.
///
/// Variables and rules are checked once in [`Engine::new`] and never change
/// afterwards, so one engine can be shared by reference between any number of
/// concurrent evaluations. Every evaluation works on its own buffers.
pub struct Engine<T> {
    ops: InferenceOps,
    variables: Variables<T>,
    rules: Rules<T>,
    // (output variable, term) of each rule, in rule order
    consequences: Vec<(VariableKey, T)>,
}

impl<T: Clone + Eq + Hash + Debug> Engine<T> {
    /// Builds an engine with the default Mamdani operators.
    ///
    /// Rules must be written with handles returned by `variables`. A key taken
    /// from a different [`Variables`] is only caught as
    /// [`FuzzyError::UnknownReference`] when its slot is vacant here; if the
    /// slot is live, the proposition binds to whichever variable occupies it.
    pub fn new(variables: Variables<T>, rules: Rules<T>) -> Result<Self> {
        Self::with_ops(variables, rules, InferenceOps::default())
    }

    pub fn with_ops(variables: Variables<T>, rules: Rules<T>, ops: InferenceOps) -> Result<Self> {
        if rules.is_empty() {
            return Err(FuzzyError::EmptyRuleBase);
        }

        if let Some((_, var)) = variables.iter().find(|(_, var)| var.terms.is_empty()) {
            return Err(FuzzyError::UnknownVariable(var.name().to_owned()));
        }

        let mut consequences = Vec::with_capacity(rules.len());

        for (i, rule) in rules.iter().enumerate() {
            for (var_key, term) in rule.premise().propositions() {
                check_reference(&variables, i, var_key, term, Role::Antecedent)?;
            }

            let Expr::Is(var_key, term) = rule.consequence() else {
                return Err(FuzzyError::InvalidConsequence { rule: i });
            };

            check_reference(&variables, i, *var_key, term, Role::Consequent)?;
            consequences.push((*var_key, term.clone()));
        }

        debug!(
            variables = variables.len(),
            rules = rules.len(),
            ?ops,
            "built fuzzy inference engine"
        );

        Ok(Self {
            ops,
            variables,
            rules,
            consequences,
        })
    }

    pub fn variables(&self) -> &Variables<T> {
        &self.variables
    }

    pub fn rules(&self) -> &Rules<T> {
        &self.rules
    }

    pub fn ops(&self) -> InferenceOps {
        self.ops
    }

    pub fn eval(&self, inputs: &Inputs) -> Result<Outputs<T>> {
        let memberships = self.fuzzify(inputs)?;
        let firing_strengths = self.rule_strengths(&memberships)?;
        let aggregates = self.aggregate(&firing_strengths);
        let mut crisp = SecondaryMap::with_capacity(aggregates.len());

        for (var_key, aggregate) in &aggregates {
            let var = &self.variables.0[var_key];

            match self.ops.defuzzification.call(var.universe().points(), aggregate) {
                Some(value) => {
                    crisp.insert(var_key, value);
                },
                None => {
                    warn!(output = var.name(), ?firing_strengths, "no rule fired");
                    return Err(FuzzyError::NoRuleFired(var.name().to_owned()));
                },
            }
        }

        debug!(outputs = crisp.len(), "evaluated fuzzy system");

        Ok(Outputs {
            crisp,
            aggregates,
            memberships,
            firing_strengths,
        })
    }

    /// Evaluates with inputs and outputs keyed by variable name.
    pub fn evaluate_named<'n>(&self, inputs: impl IntoIterator<Item = (&'n str, f64)>) -> Result<HashMap<String, f64>> {
        let inputs = self.named_inputs(inputs)?;
        let outputs = self.eval(&inputs)?;

        Ok(outputs
            .crisp
            .iter()
            .map(|(key, value)| (self.variables.0[key].name().to_owned(), *value))
            .collect())
    }

    /// Builds [`Inputs`] from `(name, value)` pairs, rejecting names that are
    /// not input variables.
    pub fn named_inputs<'n>(&self, values: impl IntoIterator<Item = (&'n str, f64)>) -> Result<Inputs> {
        let mut inputs = Inputs::new();

        for (name, value) in values {
            match self.variables.key_of(name) {
                Some(key) if self.variables.0[key].role() == Role::Antecedent => {
                    inputs.0.insert(key, value);
                },
                _ => return Err(FuzzyError::UnknownVariable(name.to_owned())),
            }
        }

        Ok(inputs)
    }

    /// Evaluates independent input tuples in parallel.
    pub fn evaluate_batch(&self, batch: &[Inputs]) -> Vec<Result<Outputs<T>>>
    where
        T: Send + Sync,
    {
        batch.par_iter().map(|inputs| self.eval(inputs)).collect()
    }

    /// Firing strength of every rule without aggregating or defuzzifying.
    pub fn firing_strengths(&self, inputs: &Inputs) -> Result<Vec<f64>> {
        let memberships = self.fuzzify(inputs)?;

        self.rule_strengths(&memberships)
    }

    fn fuzzify(&self, inputs: &Inputs) -> Result<SecondaryMap<VariableKey, HashMap<T, f64>>> {
        let mut memberships = SecondaryMap::new();

        for (key, var) in self.variables.iter() {
            if var.role() != Role::Antecedent {
                continue;
            }

            let value = *inputs
                .0
                .get(&key)
                .ok_or_else(|| FuzzyError::MissingInput(var.name().to_owned()))?;

            if !value.is_finite() {
                return Err(FuzzyError::NonFiniteInput(var.name().to_owned()));
            }

            memberships.insert(key, var.membership_vector(value)?);
        }

        Ok(memberships)
    }

    fn rule_strengths(&self, memberships: &SecondaryMap<VariableKey, HashMap<T, f64>>) -> Result<Vec<f64>> {
        self.rules
            .iter()
            .enumerate()
            .map(|(i, rule)| {
                let strength = rule.strength(memberships, self.ops.and, self.ops.or)?;

                trace!(rule = i, strength, "rule evaluated");

                Ok(strength)
            })
            .collect()
    }

    fn aggregate(&self, firing_strengths: &[f64]) -> SecondaryMap<VariableKey, Vec<f64>> {
        let mut aggregates = SecondaryMap::new();

        for (key, var) in self.variables.iter() {
            if var.role() == Role::Consequent {
                aggregates.insert(key, vec![0.; var.universe().len()]);
            }
        }

        for ((var_key, term), &strength) in self.consequences.iter().zip(firing_strengths) {
            if strength <= 0. {
                continue;
            }

            let samples = &self.variables.0[*var_key].terms[term].samples;

            if let Some(aggregate) = aggregates.get_mut(*var_key) {
                self.ops
                    .aggregation
                    .accumulate(aggregate, self.ops.implication.call(strength, samples));
            }
        }

        aggregates
    }
}

fn check_reference<T: Eq + Hash + Debug>(
    variables: &Variables<T>,
    rule: usize,
    var_key: VariableKey,
    term: &T,
    role: Role,
) -> Result<()> {
    let var = variables
        .variable(var_key)
        .ok_or(FuzzyError::UnknownReference { rule })?;

    if var.role() != role {
        return Err(FuzzyError::RoleMismatch {
            rule,
            variable: var.name().to_owned(),
            role: var.role(),
        });
    }

    if var.term(term).is_none() {
        return Err(FuzzyError::UndefinedSet {
            variable: var.name().to_owned(),
            term: format!("{term:?}"),
        });
    }

    Ok(())
}
