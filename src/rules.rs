use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use slotmap::SecondaryMap;

use crate::dsl::Expr;
use crate::error::Result;
use crate::ops::{AndOp, OrOp};
use crate::variable::VariableKey;

pub struct Rules<T>(pub(crate) Vec<Rule<T>>);

impl<T> Default for Rules<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Rules<T> {
    pub fn new() -> Self {
        Rules(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Rules(Vec::with_capacity(capacity))
    }

    /// Appends `if premise then consequence`. The consequence must be a single
    /// `variable.is(term)` on an output variable; the engine checks this when
    /// it is built.
    pub fn add(&mut self, premise: Expr<T>, consequence: Expr<T>) {
        self.0.push(Rule { premise, consequence });
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule<T>> + '_ {
        self.0.iter()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Rule<T> {
    premise: Expr<T>,
    consequence: Expr<T>,
}

impl<T> Rule<T> {
    pub fn premise(&self) -> &Expr<T> {
        &self.premise
    }

    pub fn consequence(&self) -> &Expr<T> {
        &self.consequence
    }

    /// The firing strength of this rule for the fuzzified inputs.
    pub fn strength(
        &self,
        memberships: &SecondaryMap<VariableKey, HashMap<T, f64>>,
        and_op: AndOp,
        or_op: OrOp,
    ) -> Result<f64>
    where
        T: Eq + Hash + Debug,
    {
        self.premise.strength(memberships, and_op, or_op)
    }
}
