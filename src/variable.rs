use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};

use crate::error::{FuzzyError, Result};
use crate::membership::Triangle;
use crate::universe::{Universe, DEFAULT_STEP};

new_key_type! {
    /// A variable key
    pub struct VariableKey;
}

/// Which side of a rule a variable may appear on.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Antecedent,
    Consequent,
}

/// A typed handle to a variable whose terms are `I`.
pub struct Variable<I>(pub(crate) VariableKey, PhantomData<I>);

impl<I> Variable<I> {
    pub(crate) fn from_key(key: VariableKey) -> Self {
        Variable(key, PhantomData)
    }

    pub fn key(self) -> VariableKey {
        self.0
    }
}

impl<I> Clone for Variable<I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I> Copy for Variable<I> {}

impl<I> fmt::Debug for Variable<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Variable").field(&self.0).finish()
    }
}

pub(crate) struct Term {
    pub(crate) shape: Triangle,
    // shape sampled over the owning variable's universe
    pub(crate) samples: Vec<f64>,
}

/// A named input or output dimension: a universe plus its fuzzy sets.
pub struct LinguisticVariable<T> {
    name: String,
    role: Role,
    universe: Universe,
    pub(crate) terms: HashMap<T, Term>,
}

impl<T: Eq + Hash> LinguisticVariable<T> {
    fn new(name: String, role: Role, universe: Universe) -> Self {
        Self {
            name,
            role,
            universe,
            terms: HashMap::new(),
        }
    }

    fn insert_term(&mut self, term: T, shape: Triangle) -> Option<Triangle> {
        let samples = shape.sample(self.universe.points());

        self.terms.insert(term, Term { shape, samples }).map(|old| old.shape)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn term(&self, term: &T) -> Option<Triangle> {
        self.terms.get(term).map(|t| t.shape)
    }

    pub fn terms(&self) -> impl Iterator<Item = (&T, Triangle)> + '_ {
        self.terms.iter().map(|(k, t)| (k, t.shape))
    }

    /// The shape of `term` sampled over this variable's universe.
    pub fn term_samples(&self, term: &T) -> Option<&[f64]> {
        self.terms.get(term).map(|t| &*t.samples)
    }

    /// The degree to which `x` belongs to each of this variable's terms.
    pub fn membership_vector(&self, x: f64) -> Result<HashMap<T, f64>>
    where
        T: Clone,
    {
        if self.terms.is_empty() {
            return Err(FuzzyError::UnknownVariable(self.name.clone()));
        }

        Ok(self
            .terms
            .iter()
            .map(|(term, t)| (term.clone(), t.shape.membership(x)))
            .collect())
    }
}

/// The set of linguistic variables of one fuzzy system.
pub struct Variables<T>(pub(crate) SlotMap<VariableKey, LinguisticVariable<T>>);

impl<T: Eq + Hash> Default for Variables<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash> Variables<T> {
    pub fn new() -> Self {
        Self(SlotMap::with_key())
    }

    /// Declares an input variable. If the step value is not provided, it
    /// defaults to 0.1
    pub fn add_antecedent<I: Into<T>>(
        &mut self,
        name: impl Into<String>,
        universe_range: RangeInclusive<f64>,
        terms: impl IntoIterator<Item = (I, Triangle)>,
        step: Option<f64>,
    ) -> Result<Variable<I>> {
        self.add(name.into(), Role::Antecedent, universe_range, terms, step)
    }

    /// Declares an output variable. If the step value is not provided, it
    /// defaults to 0.1
    pub fn add_consequent<I: Into<T>>(
        &mut self,
        name: impl Into<String>,
        universe_range: RangeInclusive<f64>,
        terms: impl IntoIterator<Item = (I, Triangle)>,
        step: Option<f64>,
    ) -> Result<Variable<I>> {
        self.add(name.into(), Role::Consequent, universe_range, terms, step)
    }

    pub(crate) fn add<I: Into<T>>(
        &mut self,
        name: String,
        role: Role,
        universe_range: RangeInclusive<f64>,
        terms: impl IntoIterator<Item = (I, Triangle)>,
        step: Option<f64>,
    ) -> Result<Variable<I>> {
        if self.key_of(&name).is_some() {
            return Err(FuzzyError::DuplicateName(name));
        }

        let universe = Universe::new(universe_range, step.unwrap_or(DEFAULT_STEP))?;
        let mut var = LinguisticVariable::new(name, role, universe);

        for (term, shape) in terms {
            var.insert_term(term.into(), shape);
        }

        Ok(Variable::from_key(self.0.insert(var)))
    }

    /// Registers (or replaces) a fuzzy set on an existing variable, returning
    /// the shape it replaced.
    pub fn insert_term<I: Into<T>>(&mut self, var: Variable<I>, term: I, shape: Triangle) -> Result<Option<Triangle>> {
        let var = self
            .0
            .get_mut(var.0)
            .ok_or_else(|| FuzzyError::UnknownVariable(format!("{:?}", var.0)))?;

        Ok(var.insert_term(term.into(), shape))
    }

    pub fn key_of(&self, name: &str) -> Option<VariableKey> {
        self.0.iter().find(|(_, v)| v.name == name).map(|(key, _)| key)
    }

    /// Looks a variable up by name, trusting the caller about its term type.
    pub fn get<I>(&self, name: &str) -> Option<Variable<I>> {
        self.key_of(name).map(Variable::from_key)
    }

    pub fn variable(&self, key: VariableKey) -> Option<&LinguisticVariable<T>> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (VariableKey, &LinguisticVariable<T>)> + '_ {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
