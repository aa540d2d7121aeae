// SPDX-License-Identifier: MPL-2.0

//! Symbolic sets (C3): finite sets drawn from a fixed, named universe.
//!
//! A universe is an ordered list of element names shared by every
//! `SetElement` built against it; two elements only compare or combine when
//! their universes agree, which is checked explicitly since there is no
//! type-level way to tie a `SetElement` to "its" universe.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use serde_json::json;

use crate::algebra::{self, SimpleSet};
use crate::error::{Error, Result};
use crate::json::{envelope, expect_kind, FromJson, ToJson};

/// The ordered, named domain a [`SetElement`]/[`Set`] is drawn from.
///
/// Cheaply clonable: every element and composite sharing a universe holds an
/// `Arc` to the same backing vector, so equality of universes is a pointer
/// comparison fast-pathed before falling back to a content comparison (two
/// universes built independently with the same members are still "the same"
/// universe for algebra purposes).
#[derive(Debug, Clone)]
pub struct Universe {
    members: Arc<Vec<String>>,
}

impl Universe {
    pub fn new(members: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            members: Arc::new(members.into_iter().map(Into::into).collect()),
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[String] {
        &self.members
    }

    fn index_of(&self, name: &str) -> Result<usize> {
        self.members
            .iter()
            .position(|m| m == name)
            .ok_or_else(|| Error::UniverseMismatch {
                reason: format!("\"{name}\" is not a member of this universe"),
            })
    }

    fn compatible_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.members, &other.members) || self.members == other.members
    }

    fn require_compatible(&self, other: &Self) -> Result<()> {
        if self.compatible_with(other) {
            Ok(())
        } else {
            Err(Error::UniverseMismatch {
                reason: "symbolic values drawn from different universes".to_string(),
            })
        }
    }
}

impl PartialEq for Universe {
    fn eq(&self, other: &Self) -> bool {
        self.compatible_with(other)
    }
}

impl Eq for Universe {}

/// A single named element of a [`Universe`].
#[derive(Debug, Clone)]
pub struct SetElement {
    universe: Universe,
    index: usize,
}

impl SetElement {
    pub fn new(universe: Universe, name: &str) -> Result<Self> {
        let index = universe.index_of(name)?;
        Ok(Self { universe, index })
    }

    pub fn name(&self) -> &str {
        &self.universe.members()[self.index]
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }
}

impl PartialEq for SetElement {
    fn eq(&self, other: &Self) -> bool {
        // Index only, matching `Ord`/`Hash` below: two elements with the same
        // index are the same element even if their universes happen to be
        // incompatible, the same way `Variable` compares by name alone.
        self.index == other.index
    }
}

impl Eq for SetElement {}

impl PartialOrd for SetElement {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SetElement {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index.cmp(&other.index)
    }
}

impl std::hash::Hash for SetElement {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl SimpleSet for SetElement {
    type Point = SetElement;

    fn intersection_with(&self, other: &Self) -> Self {
        // Callers only ever compare elements already known to share a
        // universe (enforced by `Set`'s constructors); a mismatched pair
        // simply never intersects.
        if self == other {
            self.clone()
        } else {
            Self {
                universe: self.universe.clone(),
                index: usize::MAX,
            }
        }
    }

    fn complement(&self) -> Vec<Self> {
        (0..self.universe.len())
            .filter(|&i| i != self.index)
            .map(|i| Self {
                universe: self.universe.clone(),
                index: i,
            })
            .collect()
    }

    fn is_empty(&self) -> bool {
        self.index >= self.universe.len()
    }

    fn contains(&self, point: &SetElement) -> bool {
        self == point
    }

    fn try_merge(&self, other: &Self) -> Option<Self> {
        // Only duplicates of the same element "merge"; distinct elements stay
        // distinct atoms, since a `Set` represents multi-element membership
        // as multiple atoms rather than a range.
        if self == other {
            Some(self.clone())
        } else {
            None
        }
    }
}

impl fmt::Display for SetElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "∅")
        } else {
            write!(f, "{}", self.name())
        }
    }
}

impl ToJson for SetElement {
    fn to_json(&self) -> serde_json::Value {
        envelope(
            "set_element",
            json!({
                "universe": self.universe.members().to_vec(),
                "index": self.index,
            }),
        )
    }
}

impl FromJson for SetElement {
    fn from_json(value: &serde_json::Value) -> Result<Self> {
        let data = expect_kind(value, "set_element")?;
        let members = data
            .get("universe")
            .and_then(|v| v.as_array())
            .ok_or_else(|| Error::Json {
                message: "missing \"universe\" array".to_string(),
            })?
            .iter()
            .map(|v| {
                v.as_str().map(str::to_string).ok_or_else(|| Error::Json {
                    message: "universe member is not a string".to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let index = data
            .get("index")
            .and_then(|v| v.as_u64())
            .ok_or_else(|| Error::Json {
                message: "missing or non-numeric \"index\"".to_string(),
            })? as usize;
        Ok(Self {
            universe: Universe::new(members),
            index,
        })
    }
}

/// A finite union of distinct [`SetElement`]s from the same universe, kept
/// sorted by index with no duplicates.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Set {
    elements: Vec<SetElement>,
}

impl Set {
    pub fn new(elements: impl IntoIterator<Item = SetElement>) -> Result<Self> {
        let elements: Vec<_> = elements.into_iter().collect();
        for pair in elements.windows(2) {
            pair[0].universe.require_compatible(&pair[1].universe)?;
        }
        Ok(Self {
            elements: algebra::canonicalize(elements),
        })
    }

    pub fn empty() -> Self {
        Self { elements: Vec::new() }
    }

    /// The entire universe as a `Set`.
    pub fn universe(universe: Universe) -> Self {
        let elements = (0..universe.len())
            .map(|i| SetElement {
                universe: universe.clone(),
                index: i,
            })
            .collect();
        Self { elements }
    }

    pub fn elements(&self) -> &[SetElement] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn contains_point(&self, element: &SetElement) -> bool {
        algebra::contains_point(&self.elements, element)
    }

    /// Whether `other` is a subset of `self`.
    pub fn contains(&self, other: &Self) -> Result<bool> {
        Ok(self.intersection_with(other)? == *other)
    }

    pub fn is_disjoint(&self, other: &Self) -> Result<bool> {
        Ok(self.intersection_with(other)?.is_empty())
    }

    fn ambient_universe(&self) -> Result<Universe> {
        self.elements
            .first()
            .map(|e| e.universe.clone())
            .ok_or(Error::EmptyUniverse)
    }

    pub fn union_with(&self, other: &Self) -> Result<Self> {
        self.require_compatible(other)?;
        Ok(Self {
            elements: algebra::union(&self.elements, &other.elements),
        })
    }

    pub fn intersection_with(&self, other: &Self) -> Result<Self> {
        self.require_compatible(other)?;
        Ok(Self {
            elements: algebra::intersection(&self.elements, &other.elements),
        })
    }

    pub fn difference_with(&self, other: &Self) -> Result<Self> {
        self.require_compatible(other)?;
        Ok(Self {
            elements: algebra::difference(&self.elements, &other.elements),
        })
    }

    /// The complement within this set's own universe. Fails with
    /// [`Error::EmptyUniverse`] if this set is itself empty, since an empty
    /// `Set` carries no universe to complement against; use
    /// [`Set::universe`] to complement the empty set against an explicit one.
    pub fn complement(&self) -> Result<Self> {
        let universe = self.ambient_universe()?;
        let full = Self::universe(universe);
        Ok(Self {
            elements: algebra::complement_with_ambient(&self.elements, &full.elements),
        })
    }

    fn require_compatible(&self, other: &Self) -> Result<()> {
        match (self.elements.first(), other.elements.first()) {
            (Some(a), Some(b)) => a.universe.require_compatible(&b.universe),
            _ => Ok(()),
        }
    }
}

impl ToJson for Set {
    fn to_json(&self) -> serde_json::Value {
        envelope(
            "set",
            json!({
                "elements": self.elements.iter().map(ToJson::to_json).collect::<Vec<_>>(),
            }),
        )
    }
}

impl FromJson for Set {
    fn from_json(value: &serde_json::Value) -> Result<Self> {
        let data = expect_kind(value, "set")?;
        let elements = data
            .get("elements")
            .and_then(|v| v.as_array())
            .ok_or_else(|| Error::Json {
                message: "missing \"elements\" array".to_string(),
            })?
            .iter()
            .map(SetElement::from_json)
            .collect::<Result<Vec<_>>>()?;
        Self::new(elements)
    }
}

impl fmt::Display for Set {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.elements.is_empty() {
            return write!(f, "{{}}");
        }
        let names: Vec<&str> = self.elements.iter().map(SetElement::name).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn universe() -> Universe {
        Universe::new(["red", "green", "blue"])
    }

    fn element(u: &Universe, name: &str) -> SetElement {
        SetElement::new(u.clone(), name).unwrap()
    }

    #[test]
    fn union_and_intersection() {
        let u = universe();
        let red = Set::new([element(&u, "red")]).unwrap();
        let green = Set::new([element(&u, "green")]).unwrap();
        let both = red.union_with(&green).unwrap();
        assert_eq!(both.elements().len(), 2);
        assert!(both.intersection_with(&red).unwrap() == red);
    }

    #[test]
    fn complement_is_remaining_universe() {
        let u = universe();
        let red = Set::new([element(&u, "red")]).unwrap();
        let complement = red.complement().unwrap();
        assert_eq!(complement.elements().len(), 2);
        assert!(!complement.contains_point(&element(&u, "red")));
    }

    #[test]
    fn is_disjoint_matches_empty_intersection() {
        let u = universe();
        let red = Set::new([element(&u, "red")]).unwrap();
        let green = Set::new([element(&u, "green")]).unwrap();
        assert!(red.is_disjoint(&green).unwrap());
        assert!(!red.is_disjoint(&red).unwrap());
    }

    #[test]
    fn mismatched_universes_error() {
        let u1 = Universe::new(["a", "b"]);
        let u2 = Universe::new(["a", "b", "c"]);
        let s1 = Set::new([SetElement::new(u1, "a").unwrap()]).unwrap();
        let s2 = Set::new([SetElement::new(u2, "a").unwrap()]).unwrap();
        assert!(s1.union_with(&s2).is_err());
    }

    #[test]
    fn json_round_trip() {
        let u = universe();
        let s = Set::new([element(&u, "red"), element(&u, "blue")]).unwrap();
        let doc = s.to_json();
        assert_eq!(Set::from_json(&doc).unwrap(), s);
    }

    #[test]
    fn double_complement_is_identity() {
        let u = universe();
        let s = Set::new([element(&u, "green")]).unwrap();
        assert_eq!(s.complement().unwrap().complement().unwrap(), s);
    }
}
