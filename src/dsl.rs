use std::collections::HashMap;
use std::hash::Hash;

use slotmap::SecondaryMap;

use crate::error::{FuzzyError, Result};
use crate::ops::{AndOp, OrOp};
use crate::variable::{Variable, VariableKey};

/// A rule premise: `variable is term` propositions joined with AND / OR.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr<T> {
    Is(VariableKey, T),
    And(Box<Expr<T>>, Box<Expr<T>>),
    Or(Box<Expr<T>>, Box<Expr<T>>),
}

impl<T> Expr<T> {
    pub fn or(self, rhs: Expr<T>) -> Self {
        Expr::Or(Box::new(self), Box::new(rhs))
    }

    pub fn and(self, rhs: Expr<T>) -> Self {
        Expr::And(Box::new(self), Box::new(rhs))
    }

    pub fn and2(self, rhs: Expr<T>, rhs2: Expr<T>) -> Self {
        self.and(rhs).and(rhs2)
    }

    pub fn or2(self, rhs: Expr<T>, rhs2: Expr<T>) -> Self {
        self.or(rhs).or(rhs2)
    }

    /// Every `variable is term` leaf, left to right.
    pub fn propositions(&self) -> Vec<(VariableKey, &T)> {
        let mut props = Vec::new();

        fn parse<'p, T>(expr: &'p Expr<T>, out: &mut Vec<(VariableKey, &'p T)>) {
            match expr {
                Expr::Is(var_key, term) => out.push((*var_key, term)),
                Expr::And(lhs, rhs) | Expr::Or(lhs, rhs) => {
                    parse(lhs, out);
                    parse(rhs, out);
                },
            }
        }

        parse(self, &mut props);

        props
    }

    /// The truth value of this premise given the fuzzified inputs.
    pub fn strength(
        &self,
        memberships: &SecondaryMap<VariableKey, HashMap<T, f64>>,
        and_op: AndOp,
        or_op: OrOp,
    ) -> Result<f64>
    where
        T: Eq + Hash + std::fmt::Debug,
    {
        match self {
            Expr::Is(var_key, term) => memberships
                .get(*var_key)
                .and_then(|degrees| degrees.get(term))
                .copied()
                .ok_or_else(|| FuzzyError::UndefinedSet {
                    variable: format!("{var_key:?}"),
                    term: format!("{term:?}"),
                }),
            Expr::And(lhs, rhs) => Ok(and_op.apply(
                lhs.strength(memberships, and_op, or_op)?,
                rhs.strength(memberships, and_op, or_op)?,
            )),
            Expr::Or(lhs, rhs) => Ok(or_op.apply(
                lhs.strength(memberships, and_op, or_op)?,
                rhs.strength(memberships, and_op, or_op)?,
            )),
        }
    }
}

impl<I> Variable<I> {
    pub fn is<T>(self, rhs: I) -> Expr<T>
    where
        I: Into<T>,
    {
        Expr::Is(self.0, rhs.into())
    }
}
