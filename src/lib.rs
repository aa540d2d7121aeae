// SPDX-License-Identifier: MPL-2.0

//! A computable algebra of events drawn from a product sigma-algebra.
//!
//! The crate is organized in layers, each reusing the generic reductions in
//! [`algebra`] for its own atom type:
//!
//! - [`interval`]: intervals of the real line ([`interval::SimpleInterval`],
//!   [`interval::Interval`]).
//! - [`symbolic`]: finite sets over a named universe ([`symbolic::SetElement`],
//!   [`symbolic::Set`]).
//! - [`variable`]: the catalog of named dimensions ([`variable::Variable`])
//!   a product event is built from.
//! - [`product`]: events over the product of several variables'
//!   one-dimensional algebras ([`product::SimpleEvent`], [`product::Event`]),
//!   with a complement that stays linear in the number of variables instead
//!   of enumerating the whole product space.
//!
//! Every composite type (`Interval`, `Set`, `Event`) supports `union_with`,
//! `intersection_with`, `difference_with`, `complement`, `contains`, and a
//! tagged JSON serialization via [`json::ToJson`]/[`json::FromJson`]; the
//! bitwise operators `| & - !` are overloaded on shared references to the
//! same effect.

pub mod algebra;
pub mod bound;
pub mod error;
pub mod interval;
pub mod json;
pub mod product;
pub mod symbolic;
pub mod variable;

pub use error::{Error, Result};
pub use interval::{Interval, SimpleInterval};
pub use json::{FromJson, ToJson};
pub use product::{AtomValue, Event, Point, PointValue, SimpleEvent};
pub use symbolic::{Set, SetElement, Universe};
pub use variable::{DomainPolicy, Variable, VariableKind};
