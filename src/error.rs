// SPDX-License-Identifier: MPL-2.0

//! The crate's error taxonomy.
//!
//! Most of the algebra is total: empty intersections, empty complements, and
//! duplicate simples in a union all succeed and produce a canonical empty
//! value. The handful of conditions below are the only ones that can fail, and
//! they only arise at construction time (assigning a value of the wrong kind
//! to a variable, combining symbolic sets from different universes, and so on).

use crate::variable::VariableKind;

/// Errors raised while constructing or combining values of this crate's
/// algebras.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A [`crate::product::SimpleEvent`] assigned a value of the wrong kind to
    /// a variable (e.g. an `Interval` to a `Symbolic` variable).
    #[error("variable `{variable}` expects a {expected:?} domain, got a {actual:?} value")]
    TypeMismatch {
        variable: String,
        expected: VariableKind,
        actual: VariableKind,
    },

    /// Two symbolic sets were combined, or a symbolic set was complemented,
    /// against inconsistent (or absent) universes.
    #[error("universe mismatch: {reason}")]
    UniverseMismatch { reason: String },

    /// A [`crate::product::SimpleEvent`] assigned a value that escapes its
    /// variable's declared domain. Construct with
    /// [`crate::variable::DomainPolicy::Clip`] to silently narrow instead.
    #[error("value assigned to variable `{variable}` is not a subset of its domain")]
    DomainEscape { variable: String },

    /// A `SimpleInterval` was asked to represent `lower > upper` through a
    /// constructor that opts out of the silent-empty normalization.
    #[error("degenerate interval: lower bound {lower} is greater than upper bound {upper}")]
    DegenerateInterval { lower: String, upper: String },

    /// The complement of a composite was requested without an ambient
    /// universe to complement against (e.g. a symbolic set with no universe).
    #[error("cannot compute a complement without an ambient universe")]
    EmptyUniverse,

    /// A `from_json` document did not match the shape `to_json` produces.
    /// Not part of the distilled error taxonomy in the specification; added
    /// because the serialization contract (§6) is part of the core surface
    /// and its failure mode needs a typed error like everything else here.
    #[error("malformed JSON document: {message}")]
    Json { message: String },
}

/// Convenience alias used throughout the crate's fallible constructors.
pub type Result<T> = std::result::Result<T, Error>;
