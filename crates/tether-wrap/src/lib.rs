//! # tether-wrap
//!
//! Host-facing dispatch glue for Tether clients.
//!
//! `tether-core` defines what a client *is*; this crate binds one to a
//! host object system. The pieces, host-inward:
//!
//! - [`HostContext`] - the services an embedding host provides (error
//!   channel, signal output registration)
//! - [`register_class`] / [`ClassInfo`] - once-per-type registration,
//!   compiling the parameter schema into an attribute table
//! - [`AttributeSet`] - typed attribute set/get against a live client
//! - [`Adapters`] - explicit capability composition (streaming, batch,
//!   or both)
//! - [`WrapperObject`] - one host object owning one client instance,
//!   routing attributes, audio configure/perform, and symbolic messages
//! - [`MemoryBufferStore`] - in-memory reference `BufferStore` for tests
//!   and headless embeddings

pub mod batch;
pub mod bridge;
pub mod capability;
pub mod host;
pub mod registry;
pub mod store;
pub mod streaming;
pub mod wrapper;

#[cfg(test)]
pub(crate) mod testutil;

pub use batch::BatchAdapter;
pub use bridge::{accessor_for, Accessor, AttrError, Attribute, AttributeSet};
pub use capability::{Adapters, CapabilityFlags};
pub use host::{HostContext, LogHost};
pub use registry::{lookup, register_class, ClassInfo};
pub use store::MemoryBufferStore;
pub use streaming::StreamingAdapter;
pub use wrapper::{Lifecycle, WrapperError, WrapperObject};
