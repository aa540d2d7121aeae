// SPDX-License-Identifier: MPL-2.0

//! Endpoint and boundary types shared by the interval algebra.
//!
//! An interval endpoint is either unbounded (`-infinity`/`+infinity`) or a finite
//! real number together with a [`BoundKind`] saying whether the endpoint itself
//! belongs to the interval. Folding both facts into one [`Endpoint`] value lets
//! the intersection/complement/ordering logic in [`crate::interval`] be expressed
//! as a single comparison law instead of a nest of `match` arms over `Option<f64>`.

use ordered_float::OrderedFloat;
use std::cmp::Ordering;
use std::fmt;

/// Whether an endpoint includes or excludes the boundary value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundKind {
    /// The boundary value itself is part of the interval.
    Closed,
    /// The boundary value itself is excluded from the interval.
    Open,
}

impl BoundKind {
    /// Flips `Closed` to `Open` and vice versa.
    pub fn flip(self) -> Self {
        match self {
            BoundKind::Closed => BoundKind::Open,
            BoundKind::Open => BoundKind::Closed,
        }
    }

    /// The tighter of two bound kinds at a shared value: `Open` wins, since it
    /// excludes strictly more points.
    pub fn tighter(self, other: Self) -> Self {
        match (self, other) {
            (BoundKind::Open, _) | (_, BoundKind::Open) => BoundKind::Open,
            (BoundKind::Closed, BoundKind::Closed) => BoundKind::Closed,
        }
    }
}

/// A single endpoint of an interval: `-infinity`, `+infinity`, or a finite value
/// with a [`BoundKind`].
///
/// Unbounded endpoints always carry [`BoundKind::Open`] per the data model: an
/// unbounded side never "includes" a point at infinity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Endpoint {
    NegInfinity,
    Finite(OrderedFloat<f64>, BoundKind),
    PosInfinity,
}

impl Endpoint {
    pub fn finite(value: f64, kind: BoundKind) -> Self {
        Endpoint::Finite(OrderedFloat(value), kind)
    }

    pub fn closed(value: f64) -> Self {
        Self::finite(value, BoundKind::Closed)
    }

    pub fn open(value: f64) -> Self {
        Self::finite(value, BoundKind::Open)
    }

    pub fn is_infinite(self) -> bool {
        matches!(self, Endpoint::NegInfinity | Endpoint::PosInfinity)
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Endpoint::Finite(v, _) => Some(v.into_inner()),
            _ => None,
        }
    }

    pub fn kind(self) -> BoundKind {
        match self {
            Endpoint::Finite(_, kind) => kind,
            // Unbounded endpoints never include the point at infinity.
            Endpoint::NegInfinity | Endpoint::PosInfinity => BoundKind::Open,
        }
    }

    /// Flips the bound kind of a finite endpoint; unbounded endpoints are
    /// returned unchanged since they have no boundary to flip.
    pub fn flip_kind(self) -> Self {
        match self {
            Endpoint::Finite(v, kind) => Endpoint::Finite(v, kind.flip()),
            other => other,
        }
    }

    /// Total order used when this endpoint plays the role of a *lower* bound:
    /// at equal values, `Closed` sorts before `Open` (a closed lower bound
    /// admits strictly more points, so it represents the "wider" interval).
    fn lower_rank(self) -> (LowerKey, u8) {
        match self {
            Endpoint::NegInfinity => (LowerKey::NegInfinity, 0),
            Endpoint::Finite(v, BoundKind::Closed) => (LowerKey::Value(v), 0),
            Endpoint::Finite(v, BoundKind::Open) => (LowerKey::Value(v), 1),
            Endpoint::PosInfinity => (LowerKey::PosInfinity, 0),
        }
    }

    /// Total order used when this endpoint plays the role of an *upper* bound:
    /// at equal values, `Open` sorts before `Closed`.
    fn upper_rank(self) -> (UpperKey, u8) {
        match self {
            Endpoint::NegInfinity => (UpperKey::NegInfinity, 0),
            Endpoint::Finite(v, BoundKind::Open) => (UpperKey::Value(v), 0),
            Endpoint::Finite(v, BoundKind::Closed) => (UpperKey::Value(v), 1),
            Endpoint::PosInfinity => (UpperKey::PosInfinity, 0),
        }
    }

    pub fn cmp_as_lower(&self, other: &Self) -> Ordering {
        self.lower_rank().cmp(&other.lower_rank())
    }

    pub fn cmp_as_upper(&self, other: &Self) -> Ordering {
        self.upper_rank().cmp(&other.upper_rank())
    }

    /// Compares a lower bound (`self`) against an upper bound (`other`) of a
    /// *different* interval, to decide whether the two could possibly overlap
    /// or touch. `self <= other` in the usual sense, tie-broken so that two
    /// exclusive bounds meeting at the same point do not overlap.
    pub fn lower_le_upper(&self, other: &Self) -> bool {
        match (self.value(), other.value()) {
            (None, _) | (_, None) => true,
            (Some(l), Some(u)) => {
                l < u || (l == u && self.kind() == BoundKind::Closed && other.kind() == BoundKind::Closed)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum LowerKey {
    NegInfinity,
    Value(OrderedFloat<f64>),
    PosInfinity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum UpperKey {
    NegInfinity,
    Value(OrderedFloat<f64>),
    PosInfinity,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::NegInfinity => write!(f, "-inf"),
            Endpoint::PosInfinity => write!(f, "+inf"),
            Endpoint::Finite(v, _) => write!(f, "{v}"),
        }
    }
}
