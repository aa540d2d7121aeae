// SPDX-License-Identifier: MPL-2.0

//! A single point of a product space: one concrete value per variable.

use std::collections::BTreeMap;

use crate::symbolic::SetElement;
use crate::variable::Variable;

/// The value a single variable takes at a point: a real number for
/// `Continuous`/`Integer` variables, a symbolic element for `Symbolic` ones.
#[derive(Debug, Clone, PartialEq)]
pub enum PointValue {
    Real(f64),
    Symbol(SetElement),
}

impl PointValue {
    pub fn as_real(&self) -> Option<f64> {
        match self {
            PointValue::Real(v) => Some(*v),
            PointValue::Symbol(_) => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&SetElement> {
        match self {
            PointValue::Symbol(s) => Some(s),
            PointValue::Real(_) => None,
        }
    }
}

/// A complete assignment of one value to every variable of interest.
pub type Point = BTreeMap<Variable, PointValue>;
