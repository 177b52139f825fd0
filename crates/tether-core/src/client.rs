//! Core client trait definitions.
//!
//! A *client* is one stateful processing object with a uniform surface:
//! a static parameter schema, ordinal-keyed parameter access, and channel/
//! buffer arity queries. Execution capability is expressed through two
//! subtraits:
//!
//! - **[`StreamingClient`]**: synchronous per-block signal processing at
//!   audio-engine rate.
//! - **[`BatchClient`]**: whole-buffer, host-triggered, non-real-time
//!   processing.
//!
//! A client type implements one or both; a type implementing neither
//! cannot be registered (the wrapper rejects it at build time). All three
//! traits are object-safe so the host glue can hold attribute plumbing as
//! `&dyn Client`.
//!
//! # Thread Safety
//!
//! Parameter access takes `&self` and must be lock-free: the host's
//! message thread writes attributes while the audio thread is mid-block.
//! [`ParamSlots`](crate::slots::ParamSlots) provides compliant storage.

use crate::block::BlockView;
use crate::buffers::{InputBuffer, OutputBuffer};
use crate::error::ProcessError;
use crate::schema::{ParamSchema, ParamValue};
use crate::types::Ordinal;

/// Uniform surface every processing client exposes.
///
/// # Example
///
/// ```ignore
/// use once_cell::sync::Lazy;
/// use tether_core::{Client, ParamSchema, ParamSlots, ParamSpec, ParamValue};
///
/// static SCHEMA: Lazy<ParamSchema> = Lazy::new(|| {
///     ParamSchema::build(vec![ParamSpec::float("gain", 1.0)]).unwrap()
/// });
///
/// struct Gain { params: ParamSlots }
///
/// impl Default for Gain {
///     fn default() -> Self {
///         Self { params: ParamSlots::new(&SCHEMA).unwrap() }
///     }
/// }
///
/// impl Client for Gain {
///     fn schema(&self) -> &'static ParamSchema { &SCHEMA }
///     fn set_param(&self, ordinal: usize, value: &ParamValue) {
///         self.params.set(ordinal, value);
///     }
///     fn get_param(&self, ordinal: usize) -> Option<ParamValue> {
///         self.params.get(ordinal)
///     }
///     fn audio_channels_in(&self) -> usize { 2 }
///     fn audio_channels_out(&self) -> usize { 2 }
/// }
/// ```
pub trait Client: Send + Default + 'static {
    /// The type's parameter schema, built once and shared by all
    /// instances.
    fn schema(&self) -> &'static ParamSchema;

    /// Write a parameter slot. Immediate and lock-free; visible to the
    /// next process invocation.
    fn set_param(&self, ordinal: Ordinal, value: &ParamValue);

    /// Read a parameter slot. Lock-free.
    fn get_param(&self, ordinal: Ordinal) -> Option<ParamValue>;

    /// Streaming input channel count. Zero for batch-only clients.
    fn audio_channels_in(&self) -> usize {
        0
    }

    /// Streaming output channel count. Zero for batch-only clients.
    fn audio_channels_out(&self) -> usize {
        0
    }

    /// Batch input buffer arity. Zero for streaming-only clients.
    fn audio_buffers_in(&self) -> usize {
        0
    }

    /// Batch output buffer arity. Zero for streaming-only clients.
    fn audio_buffers_out(&self) -> usize {
        0
    }
}

/// Clients able to do synchronous per-block signal processing.
pub trait StreamingClient: Client {
    /// Called from the Configure phase whenever the audio engine
    /// (re)starts or block size / sample rate changes. Recompute any
    /// rate-dependent state here; the default does nothing.
    fn configure(&mut self, sample_rate: f64, max_block_len: usize) {
        let _ = (sample_rate, max_block_len);
    }

    /// Process one block through the bound channel views.
    ///
    /// Runs on the audio thread: bounded time proportional to the block
    /// length, no allocation, no locks, no syscalls. Unconnected inputs
    /// read as empty slices; every output view is bound.
    fn process_block(&mut self, block: &mut BlockView<'_>);
}

/// Clients able to do buffer-oriented non-real-time processing.
pub trait BatchClient: Client {
    /// Transform whole buffers, synchronously.
    ///
    /// `inputs` and `outputs` arrive in the client's declared slot order
    /// with lengths equal to `audio_buffers_in()` / `audio_buffers_out()`.
    /// May run for an arbitrary duration; it executes on the host's
    /// message thread.
    fn process_buffers(
        &mut self,
        inputs: &[InputBuffer<'_>],
        outputs: &mut [OutputBuffer<'_>],
    ) -> Result<(), ProcessError>;
}
