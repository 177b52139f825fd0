//! # Tether
//!
//! A framework for binding stateful processing clients to host object
//! systems that speak attributes, messages, and block-based audio.
//!
//! ## Architecture
//!
//! ```text
//! Your Client (implements Client + StreamingClient / BatchClient)
//!        ↓
//! WrapperObject<C> (attribute, configure/perform, message dispatch)
//!        ↓
//! Host object system (via HostContext + BufferStore)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tether::prelude::*;
//!
//! static SCHEMA: Lazy<ParamSchema> = Lazy::new(|| {
//!     ParamSchema::build(vec![ParamSpec::float("gain", 1.0)]).unwrap()
//! });
//!
//! struct Gain { params: ParamSlots }
//!
//! impl Client for Gain {
//!     fn schema(&self) -> &'static ParamSchema { &SCHEMA }
//!     fn set_param(&self, ord: usize, v: &ParamValue) { self.params.set(ord, v); }
//!     fn get_param(&self, ord: usize) -> Option<ParamValue> { self.params.get(ord) }
//!     fn audio_channels_in(&self) -> usize { 2 }
//!     fn audio_channels_out(&self) -> usize { 2 }
//! }
//!
//! impl StreamingClient for Gain {
//!     fn process_block(&mut self, block: &mut BlockView<'_>) {
//!         let gain = self.params.get_float(0);
//!         for (inp, out) in block.zip_channels() {
//!             for (o, i) in out.iter_mut().zip(inp.iter()) { *o = *i * gain; }
//!         }
//!     }
//! }
//!
//! let obj = WrapperObject::create(
//!     "gain~",
//!     Adapters::none().streaming(),
//!     Arc::new(LogHost),
//!     &[],
//! )?;
//! ```

// Re-export sub-crates
pub use tether_core as core;
pub use tether_wrap as wrap;

/// Prelude module for convenient imports.
///
/// Import everything you need to wrap a client:
/// ```rust,ignore
/// use tether::prelude::*;
/// ```
pub mod prelude {
    // Core traits and types
    pub use tether_core::{
        // Host value representation
        Atom,
        // Traits
        BatchClient, Client, StreamingClient,
        // Streaming types
        BlockView,
        // Batch types
        BufferRead, BufferShape, BufferStore, BufferWrite, InputBuffer, OutputBuffer,
        // Parameter types
        ParamKind, ParamSchema, ParamSlots, ParamSpec, ParamValue,
        // Error types
        AtomError, BatchError, ConfigError, ProcessError, ResolveError, SchemaError, StreamError,
        // Limits
        Ordinal, MAX_CHANNELS,
    };

    // Host glue
    pub use tether_wrap::{
        register_class, Adapters, AttributeSet, CapabilityFlags, ClassInfo, HostContext, LogHost,
        MemoryBufferStore, WrapperError, WrapperObject,
    };
}
