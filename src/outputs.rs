use std::collections::HashMap;

use slotmap::SecondaryMap;

use crate::variable::{Variable, VariableKey};

/// Everything one evaluation produced.
#[derive(Debug)]
pub struct Outputs<T> {
    pub(crate) crisp: SecondaryMap<VariableKey, f64>,
    pub(crate) aggregates: SecondaryMap<VariableKey, Vec<f64>>,
    pub(crate) memberships: SecondaryMap<VariableKey, HashMap<T, f64>>,
    pub(crate) firing_strengths: Vec<f64>,
}

impl<T> Outputs<T> {
    /// The defuzzified value of an output variable.
    pub fn get_crisp<I>(&self, var: Variable<I>) -> Option<f64> {
        self.crisp.get(var.0).copied()
    }

    /// The aggregated output membership, sampled over the variable's universe.
    pub fn get_aggregate<I>(&self, var: Variable<I>) -> Option<&[f64]> {
        self.aggregates.get(var.0).map(Vec::as_slice)
    }

    /// The degree of the crisp input in each term of an input variable.
    pub fn get_memberships<I>(&self, var: Variable<I>) -> Option<&HashMap<T, f64>> {
        self.memberships.get(var.0)
    }

    /// Firing strength of each rule, in the order the rules were added.
    pub fn firing_strengths(&self) -> &[f64] {
        &self.firing_strengths
    }
}
