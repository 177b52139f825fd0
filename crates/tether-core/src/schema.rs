//! Parameter schema: the static, ordered description of a client type's
//! configurable controls.
//!
//! A [`ParamSchema`] is built once per client *type* at registration time
//! and shared by every instance. The position of a [`ParamSpec`] in the
//! declaration list is its ordinal, the stable key that binds a host
//! attribute to the client's parameter slot. Schemas are immutable after
//! construction; the only failure mode is a build-time name collision.

use crate::error::SchemaError;
use crate::types::Ordinal;

/// The closed set of parameter kinds a client may declare.
///
/// Scalar kinds (`Float`, `Int`, `Enum`) are bridged to host attributes;
/// `Buffer` and the array kinds are schema-expressible but have no host
/// bridging - batch clients take their buffers through messages instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// Continuous floating-point scalar.
    Float,
    /// Integral scalar.
    Int,
    /// Bounded integral choice with named variants.
    Enum,
    /// Named external buffer reference.
    Buffer,
    /// Array of floats.
    FloatArray,
    /// Array of integers.
    IntArray,
    /// Array of named buffer references.
    BufferArray,
}

impl ParamKind {
    /// True for the kinds the accessor bridge can carry to host attributes.
    pub fn is_scalar(self) -> bool {
        matches!(self, Self::Float | Self::Int | Self::Enum)
    }
}

/// A client parameter's current (or default) value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Value of a `Float` parameter.
    Float(f64),
    /// Value of an `Int` or `Enum` parameter.
    Int(i64),
    /// Value of a `Buffer` parameter: the buffer's name. Not bridged.
    Symbol(String),
}

impl ParamValue {
    /// Read as float; an Int value widens.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            Self::Symbol(_) => None,
        }
    }

    /// Read as integer; a Float value truncates.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Float(v) => Some(*v as i64),
            Self::Symbol(_) => None,
        }
    }
}

/// One entry in a client type's parameter declaration list.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    /// Declared parameter name. Matched case-insensitively at the host
    /// boundary; registered lowercased.
    pub name: &'static str,
    /// Parameter kind; never changes after registration.
    pub kind: ParamKind,
    /// Default value a fresh client instance starts with.
    pub default: ParamValue,
    /// Variant labels for `Enum` kind; empty for every other kind.
    pub variants: &'static [&'static str],
}

impl ParamSpec {
    /// Declare a continuous float parameter.
    pub const fn float(name: &'static str, default: f64) -> Self {
        Self {
            name,
            kind: ParamKind::Float,
            default: ParamValue::Float(default),
            variants: &[],
        }
    }

    /// Declare an integral parameter.
    pub const fn int(name: &'static str, default: i64) -> Self {
        Self {
            name,
            kind: ParamKind::Int,
            default: ParamValue::Int(default),
            variants: &[],
        }
    }

    /// Declare an enumerated parameter with named variants.
    ///
    /// `variants` is metadata for hosts and UIs; values are stored as the
    /// variant index. Coercion into the variant range is NOT enforced at
    /// the host boundary (see the accessor bridge documentation).
    pub const fn enumeration(
        name: &'static str,
        default: i64,
        variants: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            kind: ParamKind::Enum,
            default: ParamValue::Int(default),
            variants,
        }
    }

    /// Declare a named-buffer parameter. Schema-expressible, not bridged.
    pub const fn buffer(name: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Buffer,
            default: ParamValue::Symbol(String::new()),
            variants: &[],
        }
    }
}

/// Ordered, immutable sequence of parameter descriptors for one client type.
#[derive(Debug, Clone)]
pub struct ParamSchema {
    specs: Vec<ParamSpec>,
}

impl ParamSchema {
    /// Build a schema from a declaration list.
    ///
    /// Fails if two names collide after case-folding. This is a
    /// configuration error in the client type, not a runtime condition,
    /// so registration should propagate it fatally.
    pub fn build(specs: Vec<ParamSpec>) -> Result<Self, SchemaError> {
        for (i, spec) in specs.iter().enumerate() {
            let folded = spec.name.to_lowercase();
            for earlier in &specs[..i] {
                if earlier.name.to_lowercase() == folded {
                    return Err(SchemaError::NameCollision(folded));
                }
            }
        }
        Ok(Self { specs })
    }

    /// An empty schema, for clients with no configurable controls.
    pub fn empty() -> Self {
        Self { specs: Vec::new() }
    }

    /// Number of declared parameters.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// True if no parameters are declared.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Descriptor at `ordinal`, if in range.
    pub fn get(&self, ordinal: Ordinal) -> Option<&ParamSpec> {
        self.specs.get(ordinal)
    }

    /// Iterate descriptors in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ParamSpec> {
        self.specs.iter()
    }

    /// Find the ordinal of a parameter by case-insensitive name.
    pub fn ordinal_of(&self, name: &str) -> Option<Ordinal> {
        self.specs
            .iter()
            .position(|s| s.name.eq_ignore_ascii_case(name))
    }
}
