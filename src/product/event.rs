// SPDX-License-Identifier: MPL-2.0

//! [`Event`]: a disjoint union of [`SimpleEvent`]s, the top-level value of
//! the product algebra.

use std::fmt;

use serde_json::json;

use crate::algebra::{self, SimpleSet};
use crate::error::{Error, Result};
use crate::json::{envelope, expect_kind, FromJson, ToJson};
use crate::product::point::Point;
use crate::product::simple_event::SimpleEvent;

/// A sorted, pairwise disjoint union of [`SimpleEvent`]s.
///
/// The derived equality is exact because it compares already-canonical
/// `simples` vectors, and every `SimpleEvent` in them was normalized through
/// [`crate::product::simple_event::SimpleEvent::new`]'s fill-and-align step
/// (explicit full-domain entries are stripped at construction, not compared
/// away here): two `Event`s built from semantically identical `SimpleEvent`s
/// always carry byte-identical maps, whether or not either side spelled out
/// a variable's full domain explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Event {
    simples: Vec<SimpleEvent>,
}

impl Event {
    pub fn new(simples: impl IntoIterator<Item = SimpleEvent>) -> Self {
        Self {
            simples: algebra::canonicalize(simples.into_iter().collect()),
        }
    }

    pub fn empty() -> Self {
        Self { simples: Vec::new() }
    }

    /// The entire product space: no constraint on any variable.
    pub fn universal() -> Self {
        Self::new([SimpleEvent::universal()])
    }

    pub fn simples(&self) -> &[SimpleEvent] {
        &self.simples
    }

    pub fn is_empty(&self) -> bool {
        self.simples.is_empty()
    }

    pub fn contains_point(&self, point: &Point) -> bool {
        self.locate(point).is_some()
    }

    /// Like [`Event::contains_point`], but also returns the index of the
    /// containing simple, for callers that need to dispatch on which disjoint
    /// piece a point fell into rather than just whether it's contained.
    pub fn locate(&self, point: &Point) -> Option<usize> {
        self.simples.iter().position(|simple| simple.contains(point))
    }

    pub fn contains(&self, other: &Self) -> bool {
        self.intersection_with(other) == *other
    }

    pub fn is_disjoint(&self, other: &Self) -> bool {
        algebra::is_disjoint_from(&self.simples, &other.simples)
    }

    pub fn union_with(&self, other: &Self) -> Self {
        Self {
            simples: algebra::union(&self.simples, &other.simples),
        }
    }

    pub fn intersection_with(&self, other: &Self) -> Self {
        Self {
            simples: algebra::intersection(&self.simples, &other.simples),
        }
    }

    pub fn difference_with(&self, other: &Self) -> Self {
        Self {
            simples: algebra::difference(&self.simples, &other.simples),
        }
    }

    /// The complement within the full product space. Each `SimpleEvent`'s
    /// complement is already the linear n-term expansion (§4.5.3); this just
    /// folds those expansions together the same way every other composite's
    /// complement does, via [`algebra::complement_with_ambient`].
    pub fn complement(&self) -> Self {
        let ambient = [SimpleEvent::universal()];
        Self {
            simples: algebra::complement_with_ambient(&self.simples, &ambient),
        }
    }
}

impl ToJson for Event {
    fn to_json(&self) -> serde_json::Value {
        envelope(
            "event",
            json!({
                "simples": self.simples.iter().map(ToJson::to_json).collect::<Vec<_>>(),
            }),
        )
    }
}

impl FromJson for Event {
    fn from_json(value: &serde_json::Value) -> Result<Self> {
        let data = expect_kind(value, "event")?;
        let simples = data
            .get("simples")
            .and_then(|v| v.as_array())
            .ok_or_else(|| Error::Json {
                message: "missing \"simples\" array".to_string(),
            })?
            .iter()
            .map(SimpleEvent::from_json)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(simples))
    }
}

impl std::ops::BitOr for &Event {
    type Output = Event;
    fn bitor(self, rhs: Self) -> Event {
        self.union_with(rhs)
    }
}

impl std::ops::BitAnd for &Event {
    type Output = Event;
    fn bitand(self, rhs: Self) -> Event {
        self.intersection_with(rhs)
    }
}

impl std::ops::Sub for &Event {
    type Output = Event;
    fn sub(self, rhs: Self) -> Event {
        self.difference_with(rhs)
    }
}

impl std::ops::Not for &Event {
    type Output = Event;
    fn not(self) -> Event {
        self.complement()
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.simples.is_empty() {
            return write!(f, "∅");
        }
        let pieces: Vec<String> = self.simples.iter().map(SimpleEvent::to_string).collect();
        write!(f, "{}", pieces.join(" ∨ "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::Interval;
    use crate::product::simple_event::AtomValue;
    use crate::product::point::PointValue;
    use crate::variable::Variable;

    fn x() -> Variable {
        Variable::continuous("x")
    }

    fn y() -> Variable {
        Variable::continuous("y")
    }

    fn box_event(x_range: (f64, f64), y_range: (f64, f64)) -> SimpleEvent {
        SimpleEvent::new([
            (x(), AtomValue::Interval(Interval::closed(x_range.0, x_range.1))),
            (y(), AtomValue::Interval(Interval::closed(y_range.0, y_range.1))),
        ])
        .unwrap()
    }

    #[test]
    fn complement_of_box_excludes_the_box() {
        let e = Event::new([box_event((0.0, 1.0), (0.0, 1.0))]);
        let complement = e.complement();
        let inside: Point = [(x(), PointValue::Real(0.5)), (y(), PointValue::Real(0.5))]
            .into_iter()
            .collect();
        let outside: Point = [(x(), PointValue::Real(5.0)), (y(), PointValue::Real(5.0))]
            .into_iter()
            .collect();
        assert!(!complement.contains_point(&inside));
        assert!(complement.contains_point(&outside));
    }

    #[test]
    fn double_complement_is_identity() {
        let e = Event::new([box_event((0.0, 1.0), (2.0, 3.0))]);
        assert_eq!(e.complement().complement(), e);
    }

    #[test]
    fn union_then_intersection_recovers_original() {
        let a = Event::new([box_event((0.0, 1.0), (0.0, 1.0))]);
        let b = Event::new([box_event((2.0, 3.0), (2.0, 3.0))]);
        let union = a.union_with(&b);
        assert_eq!(union.intersection_with(&a), a);
        assert_eq!(union.intersection_with(&b), b);
    }

    #[test]
    fn difference_removes_overlap() {
        let a = Event::new([box_event((0.0, 2.0), (0.0, 2.0))]);
        let b = Event::new([box_event((1.0, 3.0), (1.0, 3.0))]);
        let diff = a.difference_with(&b);
        let overlapping: Point = [(x(), PointValue::Real(1.5)), (y(), PointValue::Real(1.5))]
            .into_iter()
            .collect();
        let remaining: Point = [(x(), PointValue::Real(0.2)), (y(), PointValue::Real(0.2))]
            .into_iter()
            .collect();
        assert!(!diff.contains_point(&overlapping));
        assert!(diff.contains_point(&remaining));
    }

    #[test]
    fn json_round_trip() {
        let e = Event::new([box_event((0.0, 1.0), (2.0, 3.0))]);
        let doc = e.to_json();
        assert_eq!(Event::from_json(&doc).unwrap(), e);
    }

    #[test]
    fn universal_complement_is_empty() {
        assert_eq!(Event::universal().complement(), Event::empty());
    }

    #[test]
    fn locate_reports_the_containing_simple() {
        let a = Event::new([box_event((0.0, 1.0), (0.0, 1.0)), box_event((5.0, 6.0), (5.0, 6.0))]);
        let first: Point = [(x(), PointValue::Real(0.5)), (y(), PointValue::Real(0.5))]
            .into_iter()
            .collect();
        let second: Point = [(x(), PointValue::Real(5.5)), (y(), PointValue::Real(5.5))]
            .into_iter()
            .collect();
        let outside: Point = [(x(), PointValue::Real(9.0)), (y(), PointValue::Real(9.0))]
            .into_iter()
            .collect();
        assert_eq!(a.locate(&first), Some(0));
        assert_eq!(a.locate(&second), Some(1));
        assert_eq!(a.locate(&outside), None);
    }

    #[test]
    fn explicit_full_domain_variable_compares_equal_to_implicit() {
        let explicit = Event::new([SimpleEvent::new([
            (x(), AtomValue::Interval(Interval::closed(0.0, 1.0))),
            (y(), AtomValue::Interval(Interval::reals())),
        ])
        .unwrap()]);
        let implicit =
            Event::new([SimpleEvent::new([(x(), AtomValue::Interval(Interval::closed(0.0, 1.0)))]).unwrap()]);
        assert_eq!(explicit, implicit);
    }
}
