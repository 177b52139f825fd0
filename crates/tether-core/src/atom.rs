//! The host's native value representation.
//!
//! Attribute traffic and messages arrive from the host as short lists of
//! [`Atom`]s: a small tagged union holding an integer, a float, or a
//! symbol. The accessors mirror the host's own coercion rules: numeric
//! atoms coerce freely between integer and float reads, symbols do not
//! coerce to numbers and numbers do not coerce to symbols.

use crate::error::AtomError;

/// One host-native value.
#[derive(Debug, Clone, PartialEq)]
pub enum Atom {
    /// Integer atom.
    Int(i64),
    /// Floating-point atom.
    Float(f64),
    /// Symbol atom (interned string in the host; a plain string here).
    Symbol(String),
}

impl Atom {
    /// Symbol constructor taking anything string-like.
    pub fn symbol(s: impl Into<String>) -> Self {
        Self::Symbol(s.into())
    }

    /// Read this atom as a float, coercing an integer if necessary.
    pub fn coerce_float(&self) -> Result<f64, AtomError> {
        match self {
            Self::Float(v) => Ok(*v),
            Self::Int(v) => Ok(*v as f64),
            Self::Symbol(_) => Err(AtomError::WrongType {
                found: "symbol",
                wanted: "float",
            }),
        }
    }

    /// Read this atom as an integer, truncating a float if necessary.
    pub fn coerce_int(&self) -> Result<i64, AtomError> {
        match self {
            Self::Int(v) => Ok(*v),
            Self::Float(v) => Ok(*v as i64),
            Self::Symbol(_) => Err(AtomError::WrongType {
                found: "symbol",
                wanted: "int",
            }),
        }
    }

    /// Read this atom as a symbol. Numbers never coerce to symbols.
    pub fn as_symbol(&self) -> Result<&str, AtomError> {
        match self {
            Self::Symbol(s) => Ok(s),
            Self::Int(_) => Err(AtomError::WrongType {
                found: "int",
                wanted: "symbol",
            }),
            Self::Float(_) => Err(AtomError::WrongType {
                found: "float",
                wanted: "symbol",
            }),
        }
    }

    /// Human-readable type tag, used in error reports.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Symbol(_) => "symbol",
        }
    }
}

/// Read the first atom of a host value list, or fail with
/// [`AtomError::Missing`].
///
/// Scalar attribute setters take exactly one value; surplus atoms are
/// ignored, matching the host convention.
pub fn first(atoms: &[Atom]) -> Result<&Atom, AtomError> {
    atoms.first().ok_or(AtomError::Missing)
}
