// SPDX-License-Identifier: MPL-2.0

//! The generic, atom-parametric set algebra.
//!
//! This module defines the [`SimpleSet`] contract (an atom of some one-dimensional
//! algebra) and the free functions that turn an arbitrary, possibly-overlapping
//! collection of atoms into the canonical form used throughout the crate: sorted,
//! pairwise disjoint, and simplified (no two adjacent atoms could be merged into
//! one without changing the represented point set).
//!
//! Concrete algebras ([`crate::interval`], [`crate::symbolic`]) implement
//! [`SimpleSet`] once for their atom type and get `union`, `intersection`,
//! `difference`, and `complement_with_ambient` for free. The product layer
//! ([`crate::product`]) reuses the very same functions, instantiated with
//! `SimpleEvent` as the "atom", which is what keeps the multivariate complement
//! linear instead of exponential (see [`crate::product::event`]).

use std::fmt::Debug;

use itertools::Itertools;

/// An atom of a one-dimensional set algebra: a single interval, a single
/// symbolic element, or (at the product layer) a single Cartesian product.
///
/// Implementors only need to supply the handful of primitives below; the
/// disjointification, simplification, and the four composite-level reductions
/// are derived generically from them.
pub trait SimpleSet: Clone + Debug + Eq + Ord {
    /// The type of a single point that may or may not be contained in this atom.
    type Point;

    /// The set-theoretic intersection of two atoms. May be the empty atom.
    fn intersection_with(&self, other: &Self) -> Self;

    /// The complement of this atom in its ambient space, as a small disjoint
    /// collection of atoms (for intervals: up to two; for symbolic elements:
    /// one per remaining universe member).
    fn complement(&self) -> Vec<Self>
    where
        Self: Sized;

    /// Whether this atom represents the empty set.
    fn is_empty(&self) -> bool;

    /// Whether this atom contains the given point.
    fn contains(&self, point: &Self::Point) -> bool;

    /// If `self` and `other` are adjacent (touching, non-overlapping, and
    /// `self <= other` in the atom ordering) and their union is again a single
    /// atom, returns that merged atom. Returns `None` otherwise.
    ///
    /// Callers only invoke this on atoms already sorted by [`Ord`], so
    /// implementations may assume `self <= other`.
    fn try_merge(&self, other: &Self) -> Option<Self>
    where
        Self: Sized;

    /// The set-theoretic difference `self - other`, as a disjoint collection.
    ///
    /// The default implementation is the generic reduction from the design:
    /// intersect `self` with each piece of `other`'s complement.
    fn difference_with(&self, other: &Self) -> Vec<Self>
    where
        Self: Sized,
    {
        other
            .complement()
            .iter()
            .map(|piece| self.intersection_with(piece))
            .filter(|piece| !piece.is_empty())
            .collect()
    }
}

/// Sorts and merges adjacent atoms. Does not assume the input is disjoint;
/// callers that already ran [`make_disjoint`] get a no-op merge pass, callers
/// building directly from already-disjoint parts (e.g. `intersection`) use this
/// alone.
pub fn simplify<S: SimpleSet>(mut atoms: Vec<S>) -> Vec<S> {
    atoms.retain(|atom| !atom.is_empty());
    atoms.sort();
    let mut merged: Vec<S> = Vec::with_capacity(atoms.len());
    for atom in atoms {
        let absorbed = match merged.last() {
            Some(last) => last.try_merge(&atom),
            None => None,
        };
        match absorbed {
            Some(combined) => {
                *merged.last_mut().expect("checked above") = combined;
            }
            None => merged.push(atom),
        }
    }
    merged
}

/// Splits a (possibly overlapping) collection of atoms into the part that is
/// already disjoint (`A`) and the pairwise overlaps that still need resolving
/// (`B`), per the `split` procedure in the design: `A_i` is `atoms[i]` minus
/// the union of every other atom in the collection, and `B` collects the
/// pairwise intersections with strictly later atoms only, so that no overlap
/// is counted twice.
fn split<S: SimpleSet>(atoms: &[S]) -> (Vec<S>, Vec<S>) {
    let mut exclusive = Vec::new();
    for (i, atom) in atoms.iter().enumerate() {
        let mut remainder = vec![atom.clone()];
        for (j, other) in atoms.iter().enumerate() {
            if i == j {
                continue;
            }
            remainder = remainder
                .iter()
                .flat_map(|piece| piece.difference_with(other))
                .collect();
            if remainder.is_empty() {
                break;
            }
        }
        exclusive.extend(remainder.into_iter().filter(|piece| !piece.is_empty()));
    }

    let overlaps = atoms
        .iter()
        .tuple_combinations()
        .map(|(a, b)| a.intersection_with(b))
        .filter(|overlap| !overlap.is_empty())
        .collect();

    (exclusive, overlaps)
}

/// Turns an arbitrary, possibly-overlapping collection of atoms into a
/// pairwise disjoint collection with the same union.
///
/// Repeatedly applies [`split`] to the overlap remainder; each pass strictly
/// reduces the multiplicity of coverage, so the loop is bounded by `n - 1`
/// passes for `n` input atoms. A debug-only pass counter guards against a
/// non-terminating atom implementation (e.g. a buggy `difference_with`).
pub fn make_disjoint<S: SimpleSet>(atoms: Vec<S>) -> Vec<S> {
    let mut disjoint = Vec::new();
    let mut pending: Vec<S> = atoms.into_iter().filter(|a| !a.is_empty()).collect();
    let max_passes = pending.len().max(1) + 1;
    let mut passes = 0;
    while !pending.is_empty() {
        passes += 1;
        assert!(
            passes <= max_passes,
            "make_disjoint failed to converge after {max_passes} passes; \
             this indicates a non-terminating SimpleSet::difference_with/intersection_with"
        );
        let (exclusive, overlaps) = split(&pending);
        disjoint.extend(exclusive);
        pending = overlaps;
    }
    tracing::trace!(passes, "make_disjoint converged");
    disjoint
}

/// The canonical form used for every constructed composite: disjointify, then
/// sort and simplify.
pub fn canonicalize<S: SimpleSet>(atoms: Vec<S>) -> Vec<S> {
    simplify(make_disjoint(atoms))
}

/// Union of two already-canonical atom collections.
pub fn union<S: SimpleSet>(a: &[S], b: &[S]) -> Vec<S> {
    let mut combined = Vec::with_capacity(a.len() + b.len());
    combined.extend_from_slice(a);
    combined.extend_from_slice(b);
    canonicalize(combined)
}

/// Intersection of two already-canonical atom collections.
///
/// Since `a` and `b` are each internally disjoint, the pairwise intersections
/// of their atoms are automatically disjoint from one another: no
/// disjointification pass is needed, only a simplify to merge any atoms that
/// end up adjacent.
pub fn intersection<S: SimpleSet>(a: &[S], b: &[S]) -> Vec<S> {
    let mut pieces = Vec::new();
    for x in a {
        for y in b {
            let piece = x.intersection_with(y);
            if !piece.is_empty() {
                pieces.push(piece);
            }
        }
    }
    simplify(pieces)
}

/// Difference `a - b` of two already-canonical atom collections: subtract
/// every atom of `b` from every atom of `a` in turn, then reassemble.
pub fn difference<S: SimpleSet>(a: &[S], b: &[S]) -> Vec<S> {
    let mut result = Vec::new();
    for x in a {
        let mut remainder = vec![x.clone()];
        for y in b {
            remainder = remainder
                .iter()
                .flat_map(|piece| piece.difference_with(y))
                .filter(|piece| !piece.is_empty())
                .collect();
            if remainder.is_empty() {
                break;
            }
        }
        result.extend(remainder);
    }
    simplify(result)
}

/// Complement of an already-canonical atom collection, within the given
/// `ambient` collection (the full domain, e.g. all of `ℝ` or an entire finite
/// universe). Implements the intersect-all-simple-complements reduction from
/// the design: starting from the ambient space, repeatedly cut away each
/// atom's complement.
pub fn complement_with_ambient<S: SimpleSet>(atoms: &[S], ambient: &[S]) -> Vec<S> {
    let mut acc = ambient.to_vec();
    for atom in atoms {
        acc = intersection(&acc, &atom.complement());
    }
    simplify(acc)
}

/// Whether a collection of atoms contains the given point.
pub fn contains_point<S: SimpleSet>(atoms: &[S], point: &S::Point) -> bool {
    atoms.iter().any(|atom| atom.contains(point))
}

/// Whether two already-canonical atom collections are disjoint from each other.
pub fn is_disjoint_from<S: SimpleSet>(a: &[S], b: &[S]) -> bool {
    a.iter()
        .all(|x| b.iter().all(|y| x.intersection_with(y).is_empty()))
}
