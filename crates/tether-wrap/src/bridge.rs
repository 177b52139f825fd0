//! The accessor bridge: typed translation between host attribute traffic
//! and client parameter slots.
//!
//! At registration time every scalar parameter in a client's schema is
//! compiled into an [`Attribute`]: the lowercased host-visible name, the
//! schema ordinal, and an [`Accessor`] function pair selected by parameter
//! kind. At message time the bridge is pure table lookup - no per-call
//! branching on kind, no allocation beyond the returned value list.
//!
//! Non-scalar kinds (`Buffer` and the array kinds) have no accessor and
//! fail registration with [`ConfigError::UnsupportedKind`]; batch clients
//! take their buffers through the `process` message instead.

use tether_core::{
    atom, Atom, AtomError, Client, ConfigError, ParamKind, ParamSchema, ParamValue,
};

/// Attribute set/get failures, reported on the host error channel.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AttrError {
    /// No attribute with this name on the object's class.
    #[error("unknown attribute '{0}'")]
    Unknown(String),
    /// The supplied value list failed to decode.
    #[error("attribute '{name}': {source}")]
    Value {
        /// Attribute name as supplied by the host.
        name: String,
        /// Underlying decode failure.
        source: AtomError,
    },
}

/// Decode/encode function pair for one scalar parameter kind.
#[derive(Debug, Clone, Copy)]
pub struct Accessor {
    /// Host value list -> typed parameter value.
    pub decode: fn(&[Atom]) -> Result<ParamValue, AtomError>,
    /// Typed parameter value -> host atom.
    pub encode: fn(&ParamValue) -> Atom,
}

fn decode_float(atoms: &[Atom]) -> Result<ParamValue, AtomError> {
    Ok(ParamValue::Float(atom::first(atoms)?.coerce_float()?))
}

// Enum parameters share the integer decoder: the value is stored as the
// variant index and is NOT clamped to the declared variant range. Hosts
// sending an out-of-range index get exactly what they asked for.
fn decode_int(atoms: &[Atom]) -> Result<ParamValue, AtomError> {
    Ok(ParamValue::Int(atom::first(atoms)?.coerce_int()?))
}

fn encode_float(value: &ParamValue) -> Atom {
    Atom::Float(value.as_float().unwrap_or(0.0))
}

fn encode_int(value: &ParamValue) -> Atom {
    Atom::Int(value.as_int().unwrap_or(0))
}

/// Accessor pair for a parameter kind, `None` for unbridgeable kinds.
pub fn accessor_for(kind: ParamKind) -> Option<Accessor> {
    match kind {
        ParamKind::Float => Some(Accessor {
            decode: decode_float,
            encode: encode_float,
        }),
        ParamKind::Int | ParamKind::Enum => Some(Accessor {
            decode: decode_int,
            encode: encode_int,
        }),
        ParamKind::Buffer | ParamKind::FloatArray | ParamKind::IntArray | ParamKind::BufferArray => {
            None
        }
    }
}

/// One host-visible attribute: name, ordinal binding, and typed accessor.
#[derive(Debug)]
pub struct Attribute {
    /// Host-visible name, lowercased at registration.
    pub name: String,
    /// Schema ordinal this attribute binds to.
    pub ordinal: usize,
    /// Kind-selected accessor pair.
    pub accessor: Accessor,
}

/// The compiled attribute table of one registered client type.
///
/// Built once at registration, shared by all instances through the class
/// registry. Lookup is case-insensitive.
#[derive(Debug)]
pub struct AttributeSet {
    attrs: Vec<Attribute>,
}

impl AttributeSet {
    /// Compile a schema into an attribute table.
    ///
    /// Every declared parameter must be bridgeable; a `Buffer` or array
    /// kind aborts registration.
    pub fn build(schema: &ParamSchema) -> Result<Self, ConfigError> {
        let mut attrs = Vec::with_capacity(schema.len());
        for (ordinal, spec) in schema.iter().enumerate() {
            let accessor = accessor_for(spec.kind).ok_or_else(|| ConfigError::UnsupportedKind {
                name: spec.name.to_string(),
                kind: spec.kind,
            })?;
            attrs.push(Attribute {
                name: spec.name.to_lowercase(),
                ordinal,
                accessor,
            });
        }
        Ok(Self { attrs })
    }

    /// Number of host-visible attributes.
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    /// True if the class exposes no attributes.
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Case-insensitive attribute lookup.
    pub fn find(&self, name: &str) -> Option<&Attribute> {
        self.attrs.iter().find(|a| a.name.eq_ignore_ascii_case(name))
    }

    /// Iterate attributes in ordinal order.
    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.attrs.iter()
    }

    /// Decode a host value list and store it into the named parameter.
    ///
    /// Takes effect immediately; the next process invocation observes the
    /// new value.
    pub fn set(&self, client: &impl Client, name: &str, atoms: &[Atom]) -> Result<(), AttrError> {
        let attr = self
            .find(name)
            .ok_or_else(|| AttrError::Unknown(name.to_string()))?;
        let value = (attr.accessor.decode)(atoms).map_err(|source| AttrError::Value {
            name: attr.name.clone(),
            source,
        })?;
        client.set_param(attr.ordinal, &value);
        Ok(())
    }

    /// Read the named parameter back as a host value list.
    pub fn get(&self, client: &impl Client, name: &str) -> Result<Vec<Atom>, AttrError> {
        let attr = self
            .find(name)
            .ok_or_else(|| AttrError::Unknown(name.to_string()))?;
        match client.get_param(attr.ordinal) {
            Some(value) => Ok(vec![(attr.accessor.encode)(&value)]),
            None => Ok(Vec::new()),
        }
    }
}
