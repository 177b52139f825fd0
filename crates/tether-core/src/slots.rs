//! Lock-free per-instance parameter storage.
//!
//! [`ParamSlots`] holds one slot per schema ordinal. Parameter values may
//! be written from the host's message thread while the audio thread reads
//! them mid-block, so each scalar slot is an `AtomicU64` carrying the
//! value's bit pattern with relaxed ordering: individual reads and writes
//! are torn-free, whole-schema snapshots are not promised.
//!
//! Writes are immediate: a store is visible to the next process invocation
//! with no staging or buffering.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::ConfigError;
use crate::schema::{ParamKind, ParamSchema, ParamValue};
use crate::types::Ordinal;

/// Atomic scalar parameter storage, index space 1:1 with the schema.
#[derive(Debug)]
pub struct ParamSlots {
    bits: Vec<AtomicU64>,
    kinds: Vec<ParamKind>,
}

impl ParamSlots {
    /// Allocate slots for `schema`, initialized to the declared defaults.
    ///
    /// Fails with [`ConfigError::UnsupportedKind`] if the schema declares
    /// a non-scalar kind; clients with buffer or array parameters must own
    /// that storage themselves, outside the atomic slot space.
    pub fn new(schema: &ParamSchema) -> Result<Self, ConfigError> {
        let mut bits = Vec::with_capacity(schema.len());
        let mut kinds = Vec::with_capacity(schema.len());
        for spec in schema.iter() {
            if !spec.kind.is_scalar() {
                return Err(ConfigError::UnsupportedKind {
                    name: spec.name.to_string(),
                    kind: spec.kind,
                });
            }
            bits.push(AtomicU64::new(encode(spec.kind, &spec.default)));
            kinds.push(spec.kind);
        }
        Ok(Self { bits, kinds })
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// True if the schema declared no parameters.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Store a value. Out-of-range ordinals are ignored; a mismatched
    /// value variant is converted through the slot's kind (Float truncates
    /// into Int slots, Int widens into Float slots).
    pub fn set(&self, ordinal: Ordinal, value: &ParamValue) {
        let (Some(slot), Some(kind)) = (self.bits.get(ordinal), self.kinds.get(ordinal)) else {
            return;
        };
        self.store_converted(slot, *kind, value);
    }

    /// Load the current value at `ordinal`.
    pub fn get(&self, ordinal: Ordinal) -> Option<ParamValue> {
        let slot = self.bits.get(ordinal)?;
        let kind = self.kinds.get(ordinal)?;
        let raw = slot.load(Ordering::Relaxed);
        Some(match kind {
            ParamKind::Float => ParamValue::Float(f64::from_bits(raw)),
            _ => ParamValue::Int(raw as i64),
        })
    }

    /// Convenience float read for hot paths; Int slots widen.
    pub fn get_float(&self, ordinal: Ordinal) -> f64 {
        self.get(ordinal).and_then(|v| v.as_float()).unwrap_or(0.0)
    }

    /// Convenience integer read for hot paths; Float slots truncate.
    pub fn get_int(&self, ordinal: Ordinal) -> i64 {
        self.get(ordinal).and_then(|v| v.as_int()).unwrap_or(0)
    }

    fn store_converted(&self, slot: &AtomicU64, kind: ParamKind, value: &ParamValue) {
        let bits = match kind {
            ParamKind::Float => value.as_float().map(f64::to_bits),
            _ => value.as_int().map(|v| v as u64),
        };
        // A Symbol value has no scalar representation; drop it rather
        // than poison the slot.
        if let Some(bits) = bits {
            slot.store(bits, Ordering::Relaxed);
        }
    }
}

fn encode(kind: ParamKind, value: &ParamValue) -> u64 {
    match kind {
        ParamKind::Float => value.as_float().unwrap_or(0.0).to_bits(),
        _ => value.as_int().unwrap_or(0) as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ParamSpec;

    fn schema() -> ParamSchema {
        ParamSchema::build(vec![
            ParamSpec::float("gain", 0.5),
            ParamSpec::int("frames", 64),
            ParamSpec::enumeration("mode", 1, &["a", "b", "c"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_defaults_populate_slots() {
        let slots = ParamSlots::new(&schema()).unwrap();
        assert_eq!(slots.get(0), Some(ParamValue::Float(0.5)));
        assert_eq!(slots.get(1), Some(ParamValue::Int(64)));
        assert_eq!(slots.get(2), Some(ParamValue::Int(1)));
        assert_eq!(slots.get(3), None);
    }

    #[test]
    fn test_set_then_get_round_trips() {
        let slots = ParamSlots::new(&schema()).unwrap();
        slots.set(0, &ParamValue::Float(-3.25));
        slots.set(1, &ParamValue::Int(128));
        assert_eq!(slots.get_float(0), -3.25);
        assert_eq!(slots.get_int(1), 128);
    }

    #[test]
    fn test_cross_kind_writes_convert_through_slot_kind() {
        let slots = ParamSlots::new(&schema()).unwrap();
        slots.set(0, &ParamValue::Int(2));
        assert_eq!(slots.get(0), Some(ParamValue::Float(2.0)));
        slots.set(1, &ParamValue::Float(9.9));
        assert_eq!(slots.get(1), Some(ParamValue::Int(9)));
    }

    #[test]
    fn test_negative_int_bits_survive() {
        let slots = ParamSlots::new(&schema()).unwrap();
        slots.set(1, &ParamValue::Int(-7));
        assert_eq!(slots.get_int(1), -7);
    }

    #[test]
    fn test_buffer_kind_schema_is_rejected() {
        let schema = ParamSchema::build(vec![ParamSpec::buffer("source")]).unwrap();
        let err = ParamSlots::new(&schema).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedKind { .. }));
    }
}
