// SPDX-License-Identifier: MPL-2.0

//! Intervals over the real line (C2): the `SimpleInterval` atom and the
//! `Interval` composite built on top of the generic algebra in
//! [`crate::algebra`].

use std::cmp::Ordering;
use std::fmt;

use serde_json::json;

use crate::algebra::{self, SimpleSet};
use crate::bound::{BoundKind, Endpoint};
use crate::error::{Error, Result};
use crate::json::{envelope, expect_kind, field_str, FromJson, ToJson};

/// A single `(lower, upper)` interval atom, open/closed/unbounded on either
/// side. Degenerate or empty requests normalize to the canonical empty
/// sentinel rather than failing; see [`SimpleInterval::checked`] for the
/// strict variant that reports [`Error::DegenerateInterval`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimpleInterval {
    lower: Endpoint,
    upper: Endpoint,
}

impl SimpleInterval {
    fn from_endpoints(lower: Endpoint, upper: Endpoint) -> Self {
        let candidate = Self { lower, upper };
        if candidate.is_degenerate_empty() {
            Self::empty()
        } else {
            candidate
        }
    }

    fn is_degenerate_empty(&self) -> bool {
        match (self.lower.value(), self.upper.value()) {
            (Some(l), Some(u)) => {
                l > u
                    || (l == u
                        && !(self.lower.kind() == BoundKind::Closed
                            && self.upper.kind() == BoundKind::Closed))
            }
            _ => false,
        }
    }

    /// Constructs `(lower, upper)`, failing with [`Error::DegenerateInterval`]
    /// instead of silently normalizing when `lower > upper`. Exactly equal
    /// bounds with at least one side open (the only other degenerate shape)
    /// are still accepted as the canonical empty interval, since that is not
    /// an ordering violation.
    pub fn checked(lower: Endpoint, upper: Endpoint) -> Result<Self> {
        if let (Some(l), Some(u)) = (lower.value(), upper.value()) {
            if l > u {
                return Err(Error::DegenerateInterval {
                    lower: lower.to_string(),
                    upper: upper.to_string(),
                });
            }
        }
        Ok(Self::from_endpoints(lower, upper))
    }

    pub fn open(lower: f64, upper: f64) -> Self {
        Self::from_endpoints(Endpoint::open(lower), Endpoint::open(upper))
    }

    pub fn closed(lower: f64, upper: f64) -> Self {
        Self::from_endpoints(Endpoint::closed(lower), Endpoint::closed(upper))
    }

    pub fn open_closed(lower: f64, upper: f64) -> Self {
        Self::from_endpoints(Endpoint::open(lower), Endpoint::closed(upper))
    }

    pub fn closed_open(lower: f64, upper: f64) -> Self {
        Self::from_endpoints(Endpoint::closed(lower), Endpoint::open(upper))
    }

    pub fn singleton(value: f64) -> Self {
        Self::from_endpoints(Endpoint::closed(value), Endpoint::closed(value))
    }

    pub fn reals() -> Self {
        Self::from_endpoints(Endpoint::NegInfinity, Endpoint::PosInfinity)
    }

    /// The canonical empty-interval sentinel.
    pub fn empty() -> Self {
        Self {
            lower: Endpoint::open(0.0),
            upper: Endpoint::open(0.0),
        }
    }

    /// `(value, +inf)`.
    pub fn above_open(value: f64) -> Self {
        Self::from_endpoints(Endpoint::open(value), Endpoint::PosInfinity)
    }

    /// `[value, +inf)`.
    pub fn above_closed(value: f64) -> Self {
        Self::from_endpoints(Endpoint::closed(value), Endpoint::PosInfinity)
    }

    /// `(-inf, value)`.
    pub fn below_open(value: f64) -> Self {
        Self::from_endpoints(Endpoint::NegInfinity, Endpoint::open(value))
    }

    /// `(-inf, value]`.
    pub fn below_closed(value: f64) -> Self {
        Self::from_endpoints(Endpoint::NegInfinity, Endpoint::closed(value))
    }

    pub fn lower(&self) -> Endpoint {
        self.lower
    }

    pub fn upper(&self) -> Endpoint {
        self.upper
    }

    fn adjacent_or_overlapping(&self, other: &Self) -> bool {
        match (self.upper.value(), other.lower.value()) {
            (None, _) | (_, None) => true,
            (Some(u), Some(l)) => {
                u > l
                    || (u == l
                        && (self.upper.kind() == BoundKind::Closed
                            || other.lower.kind() == BoundKind::Closed))
            }
        }
    }
}

fn tighter_lower(a: Endpoint, b: Endpoint) -> Endpoint {
    if a.cmp_as_lower(&b) == Ordering::Less {
        b
    } else {
        a
    }
}

fn tighter_upper(a: Endpoint, b: Endpoint) -> Endpoint {
    if a.cmp_as_upper(&b) == Ordering::Greater {
        b
    } else {
        a
    }
}

fn widen_lower(a: Endpoint, b: Endpoint) -> Endpoint {
    if a.cmp_as_lower(&b) == Ordering::Greater {
        b
    } else {
        a
    }
}

fn widen_upper(a: Endpoint, b: Endpoint) -> Endpoint {
    if a.cmp_as_upper(&b) == Ordering::Less {
        b
    } else {
        a
    }
}

impl PartialOrd for SimpleInterval {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimpleInterval {
    fn cmp(&self, other: &Self) -> Ordering {
        self.lower
            .cmp_as_lower(&other.lower)
            .then_with(|| self.upper.cmp_as_upper(&other.upper))
    }
}

impl SimpleSet for SimpleInterval {
    type Point = f64;

    fn intersection_with(&self, other: &Self) -> Self {
        Self::from_endpoints(
            tighter_lower(self.lower, other.lower),
            tighter_upper(self.upper, other.upper),
        )
    }

    fn complement(&self) -> Vec<Self> {
        if self.is_empty() {
            return vec![Self::reals()];
        }
        let mut pieces = Vec::with_capacity(2);
        if !matches!(self.lower, Endpoint::NegInfinity) {
            let piece = Self::from_endpoints(Endpoint::NegInfinity, self.lower.flip_kind());
            if !piece.is_empty() {
                pieces.push(piece);
            }
        }
        if !matches!(self.upper, Endpoint::PosInfinity) {
            let piece = Self::from_endpoints(self.upper.flip_kind(), Endpoint::PosInfinity);
            if !piece.is_empty() {
                pieces.push(piece);
            }
        }
        pieces
    }

    fn is_empty(&self) -> bool {
        self.is_degenerate_empty()
    }

    fn contains(&self, point: &f64) -> bool {
        let x = *point;
        let lower_ok = match self.lower {
            Endpoint::NegInfinity => true,
            Endpoint::PosInfinity => false,
            Endpoint::Finite(v, BoundKind::Closed) => x >= v.into_inner(),
            Endpoint::Finite(v, BoundKind::Open) => x > v.into_inner(),
        };
        let upper_ok = match self.upper {
            Endpoint::PosInfinity => true,
            Endpoint::NegInfinity => false,
            Endpoint::Finite(v, BoundKind::Closed) => x <= v.into_inner(),
            Endpoint::Finite(v, BoundKind::Open) => x < v.into_inner(),
        };
        lower_ok && upper_ok
    }

    fn try_merge(&self, other: &Self) -> Option<Self> {
        if self.is_empty() {
            return Some(*other);
        }
        if other.is_empty() {
            return Some(*self);
        }
        if !self.adjacent_or_overlapping(other) {
            return None;
        }
        Some(Self::from_endpoints(
            widen_lower(self.lower, other.lower),
            widen_upper(self.upper, other.upper),
        ))
    }
}

impl fmt::Display for SimpleInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "∅");
        }
        let left = if self.lower.kind() == BoundKind::Closed { '[' } else { '(' };
        let right = if self.upper.kind() == BoundKind::Closed { ']' } else { ')' };
        write!(f, "{left}{}, {}{right}", self.lower, self.upper)
    }
}

impl ToJson for SimpleInterval {
    fn to_json(&self) -> serde_json::Value {
        let lower_kind = if self.lower.kind() == BoundKind::Closed { "closed" } else { "open" };
        let upper_kind = if self.upper.kind() == BoundKind::Closed { "closed" } else { "open" };
        envelope(
            "simple_interval",
            json!({
                "lower": self.lower.value(),
                "upper": self.upper.value(),
                "lower_bound": lower_kind,
                "upper_bound": upper_kind,
            }),
        )
    }
}

fn endpoint_from_json(value: Option<f64>, kind: &str, is_lower: bool) -> Result<Endpoint> {
    match value {
        None if is_lower => Ok(Endpoint::NegInfinity),
        None => Ok(Endpoint::PosInfinity),
        Some(v) => {
            let kind = match kind {
                "closed" => BoundKind::Closed,
                "open" => BoundKind::Open,
                other => {
                    return Err(Error::Json {
                        message: format!("unknown bound kind \"{other}\""),
                    })
                }
            };
            Ok(Endpoint::finite(v, kind))
        }
    }
}

impl FromJson for SimpleInterval {
    fn from_json(value: &serde_json::Value) -> Result<Self> {
        let data = expect_kind(value, "simple_interval")?;
        let lower = data.get("lower").and_then(|v| v.as_f64());
        let upper = data.get("upper").and_then(|v| v.as_f64());
        let lower_bound = field_str(data, "lower_bound")?;
        let upper_bound = field_str(data, "upper_bound")?;
        let lower = endpoint_from_json(lower, lower_bound, true)?;
        let upper = endpoint_from_json(upper, upper_bound, false)?;
        Ok(Self::from_endpoints(lower, upper))
    }
}

/// A sorted, pairwise disjoint, simplified union of [`SimpleInterval`]s.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval {
    simples: Vec<SimpleInterval>,
}

impl Interval {
    /// Builds the canonical form of an arbitrary (possibly overlapping)
    /// collection of simple intervals.
    pub fn new(simples: impl IntoIterator<Item = SimpleInterval>) -> Self {
        Self {
            simples: algebra::canonicalize(simples.into_iter().collect()),
        }
    }

    pub fn empty() -> Self {
        Self { simples: Vec::new() }
    }

    pub fn reals() -> Self {
        Self::new([SimpleInterval::reals()])
    }

    pub fn open(lower: f64, upper: f64) -> Self {
        Self::new([SimpleInterval::open(lower, upper)])
    }

    pub fn closed(lower: f64, upper: f64) -> Self {
        Self::new([SimpleInterval::closed(lower, upper)])
    }

    pub fn open_closed(lower: f64, upper: f64) -> Self {
        Self::new([SimpleInterval::open_closed(lower, upper)])
    }

    pub fn closed_open(lower: f64, upper: f64) -> Self {
        Self::new([SimpleInterval::closed_open(lower, upper)])
    }

    pub fn singleton(value: f64) -> Self {
        Self::new([SimpleInterval::singleton(value)])
    }

    pub fn above_open(value: f64) -> Self {
        Self::new([SimpleInterval::above_open(value)])
    }

    pub fn above_closed(value: f64) -> Self {
        Self::new([SimpleInterval::above_closed(value)])
    }

    pub fn below_open(value: f64) -> Self {
        Self::new([SimpleInterval::below_open(value)])
    }

    pub fn below_closed(value: f64) -> Self {
        Self::new([SimpleInterval::below_closed(value)])
    }

    /// The constituent simples, sorted and simplified.
    pub fn simples(&self) -> &[SimpleInterval] {
        &self.simples
    }

    pub fn is_empty(&self) -> bool {
        self.simples.is_empty()
    }

    pub fn is_disjoint(&self, other: &Self) -> bool {
        algebra::is_disjoint_from(&self.simples, &other.simples)
    }

    pub fn contains_point(&self, point: f64) -> bool {
        algebra::contains_point(&self.simples, &point)
    }

    pub fn contains(&self, other: &Self) -> bool {
        self.intersection_with(other) == *other
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

    pub fn complement(&self) -> Self {
        Self {
            simples: algebra::complement_with_ambient(&self.simples, &[SimpleInterval::reals()]),
        }
    }
}

impl ToJson for Interval {
    fn to_json(&self) -> serde_json::Value {
        envelope(
            "interval",
            json!({
                "simples": self.simples.iter().map(ToJson::to_json).collect::<Vec<_>>(),
            }),
        )
    }
}

impl FromJson for Interval {
    fn from_json(value: &serde_json::Value) -> Result<Self> {
        let data = expect_kind(value, "interval")?;
        let simples = data
            .get("simples")
            .and_then(|v| v.as_array())
            .ok_or_else(|| Error::Json {
                message: "missing \"simples\" array".to_string(),
            })?;
        let simples = simples
            .iter()
            .map(SimpleInterval::from_json)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(simples))
    }
}

impl std::ops::BitOr for &Interval {
    type Output = Interval;
    fn bitor(self, rhs: Self) -> Interval {
        self.union_with(rhs)
    }
}

impl std::ops::BitAnd for &Interval {
    type Output = Interval;
    fn bitand(self, rhs: Self) -> Interval {
        self.intersection_with(rhs)
    }
}

impl std::ops::Sub for &Interval {
    type Output = Interval;
    fn sub(self, rhs: Self) -> Interval {
        self.difference_with(rhs)
    }
}

impl std::ops::Not for &Interval {
    type Output = Interval;
    fn not(self) -> Interval {
        self.complement()
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.simples.is_empty() {
            return write!(f, "∅");
        }
        let pieces: Vec<String> = self.simples.iter().map(SimpleInterval::to_string).collect();
        write!(f, "{}", pieces.join(" ∪ "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s1_interval_union() {
        let a = Interval::closed(0.0, 1.0);
        let b = Interval::open(0.5, 2.0);
        assert_eq!(a.union_with(&b), Interval::closed_open(0.0, 2.0));
    }

    #[test]
    fn s2_interval_complement() {
        let a = Interval::closed(0.0, 1.0);
        let expected = Interval::new([
            SimpleInterval::below_open(0.0),
            SimpleInterval::above_open(1.0),
        ]);
        assert_eq!(a.complement(), expected);
    }

    #[test]
    fn s3_interval_simplify_merges_on_shared_closed_endpoint() {
        let a = Interval::closed(0.0, 1.0);
        let b = Interval::open(1.0, 2.0);
        let merged = a.union_with(&b);
        assert_eq!(merged, Interval::closed_open(0.0, 2.0));
        assert_eq!(merged.simples().len(), 1);
    }

    #[test]
    fn does_not_merge_when_both_sides_open_at_shared_point() {
        let a = Interval::open(0.0, 1.0);
        let b = Interval::open(1.0, 2.0);
        let union = a.union_with(&b);
        assert_eq!(union.simples().len(), 2);
        assert!(!union.contains_point(1.0));
    }

    #[test]
    fn singleton_is_not_empty() {
        let s = SimpleInterval::singleton(3.0);
        assert!(!s.is_empty());
        assert!(s.contains(&3.0));
    }

    #[test]
    fn degenerate_construction_yields_canonical_empty() {
        let i = SimpleInterval::closed(2.0, 1.0);
        assert!(i.is_empty());
        assert_eq!(i, SimpleInterval::empty());
    }

    #[test]
    fn checked_rejects_inverted_bounds() {
        assert!(SimpleInterval::checked(Endpoint::closed(2.0), Endpoint::closed(1.0)).is_err());
        assert!(SimpleInterval::checked(Endpoint::closed(1.0), Endpoint::closed(1.0)).is_ok());
    }

    #[test]
    fn double_complement_is_identity() {
        let a = Interval::open_closed(-1.0, 4.0);
        assert_eq!(a.complement().complement(), a);
    }

    #[test]
    fn de_morgan_union() {
        let a = Interval::closed(0.0, 2.0);
        let b = Interval::closed(5.0, 7.0);
        let lhs = a.union_with(&b).complement();
        let rhs = a.complement().intersection_with(&b.complement());
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn json_round_trip() {
        let a = Interval::new([
            SimpleInterval::closed(0.0, 1.0),
            SimpleInterval::open(2.0, 3.0),
        ]);
        let doc = a.to_json();
        assert_eq!(Interval::from_json(&doc).unwrap(), a);
    }

    #[test]
    fn reals_complement_is_empty() {
        assert_eq!(Interval::reals().complement(), Interval::empty());
    }

    #[test]
    fn containment_monotonicity() {
        let a = Interval::closed(1.0, 2.0);
        let b = Interval::closed(0.0, 3.0);
        assert!(b.contains(&a));
        assert_eq!(a.intersection_with(&b), a);
        assert_eq!(a.union_with(&b), b);
    }
}
