// SPDX-License-Identifier: MPL-2.0

//! The product layer (C5): events drawn from a product sigma-algebra over a
//! catalog of [`crate::variable::Variable`]s.
//!
//! [`SimpleEvent`] is the atom (a partial assignment of one [`AtomValue`] per
//! constrained variable; an absent variable means "unconstrained" rather than
//! the whole domain being expanded out) and [`Event`] is the disjoint union of
//! `SimpleEvent`s, built on the exact same generic reductions in
//! [`crate::algebra`] that back [`crate::interval::Interval`] and
//! [`crate::symbolic::Set`]. Treating "unconstrained" as the absence of a map
//! entry, rather than materializing every element of a variable's domain, is
//! what keeps [`SimpleEvent::complement`] linear in the number of variables
//! instead of exponential.

mod event;
mod point;
mod simple_event;

pub use event::Event;
pub use point::{Point, PointValue};
pub use simple_event::{AtomValue, SimpleEvent};
