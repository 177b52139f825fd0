//! Common types used throughout the Tether framework.

/// Maximum number of audio channels a client may declare per direction.
///
/// Block views use fixed-size stack storage sized by this bound so that
/// no heap allocation happens on the audio path.
pub const MAX_CHANNELS: usize = 32;

/// Position of a parameter within its client type's declaration order.
///
/// Ordinals are dense (`0..schema.len()`) and stable for the life of the
/// type; they are the binding key between a host attribute and the client's
/// parameter slot.
pub type Ordinal = usize;
