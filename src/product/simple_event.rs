// SPDX-License-Identifier: MPL-2.0

//! [`SimpleEvent`]: a single atom of the product algebra, a partial map from
//! variable to the single atom it is constrained to. A variable missing from
//! the map is unconstrained ("fill"): semantically equivalent to it ranging
//! over its entire domain, but represented without materializing that domain.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::json;

use crate::algebra::SimpleSet;
use crate::error::{Error, Result};
use crate::interval::Interval;
use crate::json::{envelope, expect_kind, FromJson, ToJson};
use crate::product::point::{Point, PointValue};
use crate::symbolic::{Set, Universe};
use crate::variable::{DomainPolicy, Variable, VariableKind};

/// The value a [`SimpleEvent`] assigns to a single constrained variable: a
/// composite [`Interval`] or a composite [`Set`], never a bare atom. Keeping
/// the composite here (rather than a single [`crate::interval::SimpleInterval`]
/// or [`crate::symbolic::SetElement`]) is what keeps [`SimpleEvent::complement`]
/// to exactly one term per constrained variable: a composite is already closed
/// under complement, so a multi-piece per-variable complement never has to
/// explode into several `SimpleEvent`s.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AtomValue {
    Interval(Interval),
    Symbolic(Set),
}

impl AtomValue {
    fn is_empty(&self) -> bool {
        match self {
            AtomValue::Interval(i) => i.is_empty(),
            AtomValue::Symbolic(s) => s.is_empty(),
        }
    }

    /// Intersects two atoms assigned to the *same* variable. The two
    /// variants are expected to always agree for a given variable, since
    /// every `SimpleEvent` that mentions it is built against the same
    /// catalog entry.
    fn intersection_with(&self, other: &Self) -> Self {
        match (self, other) {
            (AtomValue::Interval(a), AtomValue::Interval(b)) => {
                AtomValue::Interval(a.intersection_with(b))
            }
            (AtomValue::Symbolic(a), AtomValue::Symbolic(b)) => AtomValue::Symbolic(
                a.intersection_with(b)
                    .expect("a variable's assignments always share a universe"),
            ),
            _ => unreachable!("a variable's assignments never change kind across events"),
        }
    }

    /// The complement of this atom within `variable`'s declared domain: a
    /// single composite value, not a piece-by-piece expansion.
    fn complement(&self, variable: &Variable) -> Self {
        match self {
            AtomValue::Interval(i) => AtomValue::Interval(i.complement()),
            AtomValue::Symbolic(s) => {
                let universe = variable
                    .universe()
                    .expect("a Symbolic atom's variable always carries a universe");
                AtomValue::Symbolic(
                    universe
                        .difference_with(s)
                        .expect("a variable's assignments always share a universe"),
                )
            }
        }
    }

    /// Merges two atoms assigned to the same variable. Since both variants
    /// are already composites closed under union, two atoms of the same kind
    /// always merge into their union; there is no "not adjacent" case the way
    /// there is for a single interval or set element.
    fn try_merge(&self, other: &Self) -> Option<Self> {
        match (self, other) {
            (AtomValue::Interval(a), AtomValue::Interval(b)) => {
                Some(AtomValue::Interval(a.union_with(b)))
            }
            (AtomValue::Symbolic(a), AtomValue::Symbolic(b)) => Some(AtomValue::Symbolic(
                a.union_with(b)
                    .expect("a variable's assignments always share a universe"),
            )),
            _ => None,
        }
    }

    fn contains(&self, value: &PointValue) -> bool {
        match (self, value) {
            (AtomValue::Interval(i), PointValue::Real(v)) => i.contains_point(*v),
            (AtomValue::Symbolic(s), PointValue::Symbol(e)) => s.contains_point(e),
            _ => false,
        }
    }

    fn kind(&self) -> VariableKind {
        match self {
            AtomValue::Interval(_) => VariableKind::Continuous,
            AtomValue::Symbolic(_) => VariableKind::Symbolic,
        }
    }

    fn to_json(&self) -> serde_json::Value {
        match self {
            AtomValue::Interval(i) => i.to_json(),
            AtomValue::Symbolic(s) => s.to_json(),
        }
    }

    fn from_json(expected: VariableKind, value: &serde_json::Value) -> Result<Self> {
        match expected {
            VariableKind::Symbolic => Set::from_json(value).map(AtomValue::Symbolic),
            VariableKind::Continuous | VariableKind::Integer => {
                Interval::from_json(value).map(AtomValue::Interval)
            }
        }
    }
}

/// A single atom of the product algebra: an assignment of one [`AtomValue`]
/// to each of zero or more variables. Variables absent from the map are
/// unconstrained.
///
/// Every construction path normalizes away entries that assign a variable its
/// entire declared domain (see [`SimpleEvent::from_map`]), so two
/// `SimpleEvent`s that are semantically identical but differ only in an
/// explicit vs. implicit full-domain variable always produce the same
/// `BTreeMap` and compare equal under the derived [`PartialEq`]/[`Ord`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SimpleEvent {
    assignments: BTreeMap<Variable, AtomValue>,
}

impl SimpleEvent {
    /// Builds a `SimpleEvent` from explicit `(variable, value)` pairs,
    /// checking each value against its variable's declared kind and domain
    /// under [`DomainPolicy::Strict`]. Use [`SimpleEvent::with_policy`] for
    /// [`DomainPolicy::Clip`].
    pub fn new(assignments: impl IntoIterator<Item = (Variable, AtomValue)>) -> Result<Self> {
        Self::with_policy(assignments, DomainPolicy::Strict)
    }

    /// Builds a `SimpleEvent`, applying `policy` to any assignment that
    /// escapes its variable's declared domain. Only `Symbolic` variables
    /// carry a declared domain (their `universe`); `Integer`/`Continuous`
    /// assignments are never clipped or rejected on domain grounds.
    pub fn with_policy(
        assignments: impl IntoIterator<Item = (Variable, AtomValue)>,
        policy: DomainPolicy,
    ) -> Result<Self> {
        let mut map = BTreeMap::new();
        for (variable, value) in assignments {
            variable.expect_kind(value.kind())?;
            let value = Self::check_domain(&variable, value, policy)?;
            map.insert(variable, value);
        }
        Ok(Self::from_map(map))
    }

    /// Checks `value` against `variable`'s declared domain, applying
    /// `policy` if it escapes. A universe mismatch between `value` and the
    /// variable's own universe is always [`Error::DomainEscape`], regardless
    /// of policy: `Clip` cannot narrow across incompatible universes.
    fn check_domain(variable: &Variable, value: AtomValue, policy: DomainPolicy) -> Result<AtomValue> {
        let (domain, assigned) = match (variable.universe(), &value) {
            (Some(domain), AtomValue::Symbolic(assigned)) => (domain, assigned),
            _ => return Ok(value),
        };
        match domain.contains(assigned) {
            Ok(true) => Ok(value),
            Ok(false) => match policy {
                DomainPolicy::Strict => Err(Error::DomainEscape {
                    variable: variable.name().to_string(),
                }),
                DomainPolicy::Clip => {
                    let clipped = domain
                        .intersection_with(assigned)
                        .expect("universe compatibility already checked above");
                    tracing::debug!(
                        variable = variable.name(),
                        "clipping assignment into declared domain"
                    );
                    Ok(AtomValue::Symbolic(clipped))
                }
            },
            Err(_) => Err(Error::DomainEscape {
                variable: variable.name().to_string(),
            }),
        }
    }

    /// Whether `value` assigns `variable` its entire declared domain, making
    /// the entry redundant with "absent = unconstrained".
    fn is_full_domain(variable: &Variable, value: &AtomValue) -> bool {
        match (variable.universe(), value) {
            (Some(domain), AtomValue::Symbolic(s)) => s == domain,
            (None, AtomValue::Interval(i)) => *i == Interval::reals(),
            _ => false,
        }
    }

    /// The shared normalizing constructor every internal builder funnels
    /// through: drops any entry that assigns a variable its full domain, so
    /// "unconstrained" always means "absent from the map," never "present
    /// and equal to the whole domain."
    fn from_map(map: BTreeMap<Variable, AtomValue>) -> Self {
        let assignments = map
            .into_iter()
            .filter(|(variable, value)| !Self::is_full_domain(variable, value))
            .collect();
        Self { assignments }
    }

    /// The unconstrained event: every variable ranges over its full domain.
    /// The identity for intersection and the universal ambient for complement.
    pub fn universal() -> Self {
        Self {
            assignments: BTreeMap::new(),
        }
    }

    pub fn get(&self, variable: &Variable) -> Option<&AtomValue> {
        self.assignments.get(variable)
    }

    pub fn assignments(&self) -> &BTreeMap<Variable, AtomValue> {
        &self.assignments
    }
}

impl SimpleSet for SimpleEvent {
    type Point = Point;

    fn intersection_with(&self, other: &Self) -> Self {
        let mut result = BTreeMap::new();
        let keys = self.assignments.keys().chain(other.assignments.keys());
        for key in keys {
            if result.contains_key(key) {
                continue;
            }
            let value = match (self.assignments.get(key), other.assignments.get(key)) {
                (Some(a), Some(b)) => a.intersection_with(b),
                (Some(a), None) => a.clone(),
                (None, Some(b)) => b.clone(),
                (None, None) => unreachable!("key came from one of the two maps"),
            };
            result.insert(key.clone(), value);
        }
        Self::from_map(result)
    }

    /// The n-term identity: exactly one term per constrained variable. Term
    /// `i` keeps the earlier variables' atoms as-is, replaces variable `i`'s
    /// atom with its (possibly multi-piece, but single-composite-value)
    /// complement, and drops every later variable back to unconstrained.
    /// This produces exactly as many terms as there are constrained
    /// variables: linear in the variable count, never exponential in any
    /// variable's domain size.
    fn complement(&self) -> Vec<Self> {
        if self.assignments.is_empty() {
            return Vec::new();
        }
        let keys: Vec<Variable> = self.assignments.keys().cloned().collect();
        let mut terms = Vec::with_capacity(keys.len());
        for (i, key) in keys.iter().enumerate() {
            let atom = &self.assignments[key];
            let mut assignments = BTreeMap::new();
            for earlier in &keys[..i] {
                assignments.insert(earlier.clone(), self.assignments[earlier].clone());
            }
            assignments.insert(key.clone(), atom.complement(key));
            terms.push(Self::from_map(assignments));
        }
        terms
    }

    fn is_empty(&self) -> bool {
        self.assignments.values().any(AtomValue::is_empty)
    }

    fn contains(&self, point: &Point) -> bool {
        self.assignments.iter().all(|(variable, atom)| {
            point
                .get(variable)
                .map(|value| atom.contains(value))
                .unwrap_or(false)
        })
    }

    fn try_merge(&self, other: &Self) -> Option<Self> {
        let mut differing: Option<&Variable> = None;
        let mut merged_atom = None;
        let keys: std::collections::BTreeSet<&Variable> =
            self.assignments.keys().chain(other.assignments.keys()).collect();
        for key in keys {
            match (self.assignments.get(key), other.assignments.get(key)) {
                (Some(a), Some(b)) if a == b => continue,
                (Some(a), Some(b)) => {
                    if differing.is_some() {
                        return None;
                    }
                    merged_atom = Some(a.try_merge(b)?);
                    differing = Some(key);
                }
                (None, None) => unreachable!("key came from one of the two maps"),
                _ => return None,
            }
        }
        match differing {
            None => Some(self.clone()),
            Some(key) => {
                let mut assignments = self.assignments.clone();
                assignments.insert(key.clone(), merged_atom.expect("set when differing is Some"));
                Some(Self::from_map(assignments))
            }
        }
    }
}

impl fmt::Display for SimpleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.assignments.is_empty() {
            return write!(f, "<universal>");
        }
        let pieces: Vec<String> = self
            .assignments
            .iter()
            .map(|(variable, atom)| match atom {
                AtomValue::Interval(i) => format!("{variable} ∈ {i}"),
                AtomValue::Symbolic(s) => format!("{variable} = {s}"),
            })
            .collect();
        write!(f, "{}", pieces.join(" ∧ "))
    }
}

impl ToJson for SimpleEvent {
    fn to_json(&self) -> serde_json::Value {
        let entries: Vec<serde_json::Value> = self
            .assignments
            .iter()
            .map(|(variable, atom)| {
                let universe = match variable {
                    Variable::Symbolic { universe, .. } => {
                        serde_json::Value::from(universe.elements().iter().map(|e| e.name().to_string()).collect::<Vec<_>>())
                    }
                    _ => serde_json::Value::Null,
                };
                json!({
                    "variable": variable.name(),
                    "kind": format!("{:?}", variable.kind()),
                    "universe": universe,
                    "value": atom.to_json(),
                })
            })
            .collect();
        envelope("simple_event", json!({ "assignments": entries }))
    }
}

impl FromJson for SimpleEvent {
    fn from_json(value: &serde_json::Value) -> Result<Self> {
        let data = expect_kind(value, "simple_event")?;
        let entries = data
            .get("assignments")
            .and_then(|v| v.as_array())
            .ok_or_else(|| Error::Json {
                message: "missing \"assignments\" array".to_string(),
            })?;
        let mut assignments = BTreeMap::new();
        for entry in entries {
            let name = entry
                .get("variable")
                .and_then(|v| v.as_str())
                .ok_or_else(|| Error::Json {
                    message: "missing variable name".to_string(),
                })?;
            let kind_str = entry
                .get("kind")
                .and_then(|v| v.as_str())
                .ok_or_else(|| Error::Json {
                    message: "missing variable kind".to_string(),
                })?;
            let kind = match kind_str {
                "Symbolic" => VariableKind::Symbolic,
                "Integer" => VariableKind::Integer,
                "Continuous" => VariableKind::Continuous,
                other => {
                    return Err(Error::Json {
                        message: format!("unknown variable kind \"{other}\""),
                    })
                }
            };
            let variable = match kind {
                VariableKind::Symbolic => {
                    let members = entry
                        .get("universe")
                        .and_then(|v| v.as_array())
                        .ok_or_else(|| Error::Json {
                            message: "symbolic variable missing \"universe\"".to_string(),
                        })?
                        .iter()
                        .map(|v| {
                            v.as_str().map(str::to_string).ok_or_else(|| Error::Json {
                                message: "universe member is not a string".to_string(),
                            })
                        })
                        .collect::<Result<Vec<_>>>()?;
                    Variable::symbolic(name, Set::universe(Universe::new(members)))
                }
                VariableKind::Integer => Variable::integer(name),
                VariableKind::Continuous => Variable::continuous(name),
            };
            let raw_value = entry.get("value").ok_or_else(|| Error::Json {
                message: "missing \"value\"".to_string(),
            })?;
            let atom = AtomValue::from_json(kind, raw_value)?;
            assignments.insert(variable, atom);
        }
        Ok(Self::from_map(assignments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Variable {
        Variable::continuous("x")
    }

    fn y() -> Variable {
        Variable::continuous("y")
    }

    fn colors() -> Universe {
        Universe::new(["red", "green", "blue"])
    }

    #[test]
    fn universal_is_identity_for_intersection() {
        let a = SimpleEvent::new([(x(), AtomValue::Interval(Interval::closed(0.0, 1.0)))]).unwrap();
        let u = SimpleEvent::universal();
        assert_eq!(a.intersection_with(&u), a);
    }

    #[test]
    fn fill_and_align_intersection() {
        let a = SimpleEvent::new([(x(), AtomValue::Interval(Interval::closed(0.0, 1.0)))]).unwrap();
        let b = SimpleEvent::new([(y(), AtomValue::Interval(Interval::closed(2.0, 3.0)))]).unwrap();
        let combined = a.intersection_with(&b);
        assert_eq!(combined.get(&x()), a.get(&x()));
        assert_eq!(combined.get(&y()), b.get(&y()));
    }

    #[test]
    fn complement_of_single_variable_box_is_one_term() {
        let a = SimpleEvent::new([(x(), AtomValue::Interval(Interval::closed(0.0, 1.0)))]).unwrap();
        let terms = a.complement();
        assert_eq!(terms.len(), 1);
        assert!(!terms[0].contains(&[(x(), PointValue::Real(0.5))].into_iter().collect()));
        assert!(terms[0].contains(&[(x(), PointValue::Real(5.0))].into_iter().collect()));
    }

    #[test]
    fn complement_leaves_later_variables_unconstrained() {
        let a = SimpleEvent::new([
            (x(), AtomValue::Interval(Interval::closed(0.0, 1.0))),
            (y(), AtomValue::Interval(Interval::closed(0.0, 1.0))),
        ])
        .unwrap();
        let terms = a.complement();
        assert_eq!(terms.len(), 2);
        // The term complementing x keeps y unconstrained.
        let x_term = terms
            .iter()
            .find(|t| t.get(&x()).is_some() && t.get(&y()).is_none())
            .expect("expected a term that complements x and leaves y unconstrained");
        assert!(!x_term.contains(
            &[(x(), PointValue::Real(0.5)), (y(), PointValue::Real(100.0))]
                .into_iter()
                .collect()
        ));
        assert!(x_term.contains(
            &[(x(), PointValue::Real(5.0)), (y(), PointValue::Real(100.0))]
                .into_iter()
                .collect()
        ));
    }

    #[test]
    fn from_map_drops_explicit_full_domain_entries() {
        let explicit =
            SimpleEvent::new([(x(), AtomValue::Interval(Interval::reals()))]).unwrap();
        assert_eq!(explicit, SimpleEvent::universal());
        assert!(explicit.get(&x()).is_none());
    }

    #[test]
    fn strict_policy_rejects_domain_escape() {
        let universe = colors();
        let palette = Set::new([crate::symbolic::SetElement::new(universe.clone(), "red").unwrap()]).unwrap();
        let v = Variable::symbolic("color", palette);
        let blue = Set::new([crate::symbolic::SetElement::new(universe, "blue").unwrap()]).unwrap();
        let err = SimpleEvent::new([(v, AtomValue::Symbolic(blue))]).unwrap_err();
        assert!(matches!(err, Error::DomainEscape { .. }));
    }

    #[test]
    fn clip_policy_narrows_to_declared_domain() {
        let universe = colors();
        let palette = Set::new([crate::symbolic::SetElement::new(universe.clone(), "red").unwrap()]).unwrap();
        let v = Variable::symbolic("color", palette.clone());
        let both = Set::new([
            crate::symbolic::SetElement::new(universe.clone(), "red").unwrap(),
            crate::symbolic::SetElement::new(universe, "blue").unwrap(),
        ])
        .unwrap();
        let clipped =
            SimpleEvent::with_policy([(v.clone(), AtomValue::Symbolic(both))], DomainPolicy::Clip)
                .unwrap();
        assert_eq!(clipped.get(&v), Some(&AtomValue::Symbolic(palette)));
    }

    #[test]
    fn json_round_trip() {
        let a = SimpleEvent::new([(x(), AtomValue::Interval(Interval::closed(0.0, 1.0)))]).unwrap();
        let doc = a.to_json();
        assert_eq!(SimpleEvent::from_json(&doc).unwrap(), a);
    }
}
