//! # tether-core
//!
//! Core abstractions for the Tether client-wrapping framework.
//!
//! This crate defines the host-agnostic surface shared by every wrapped
//! processing client: the parameter schema, lock-free parameter slots, the
//! host atom representation, per-block channel views for streaming
//! execution, and the named-buffer interfaces for batch execution. The
//! host-facing glue lives in `tether-wrap`.
//!
//! ## Main Traits
//!
//! - [`Client`] - uniform client surface (schema, parameters, arity)
//! - [`StreamingClient`] - per-block signal processing capability
//! - [`BatchClient`] - whole-buffer non-real-time capability
//! - [`BufferStore`] - the host's named-buffer storage, interfaces only
//!
//! ## Types
//!
//! - [`ParamSchema`] / [`ParamSpec`] / [`ParamKind`] - static parameter
//!   description, ordinal-keyed
//! - [`ParamSlots`] - atomic per-instance parameter storage
//! - [`Atom`] - the host's tagged value union
//! - [`BlockView`] - transient per-callback channel views
//! - [`InputBuffer`] / [`OutputBuffer`] - ordered batch descriptors

pub mod atom;
pub mod block;
pub mod buffers;
pub mod client;
pub mod error;
pub mod schema;
pub mod slots;
pub mod types;

// Re-exports for convenience
pub use atom::Atom;
pub use block::BlockView;
pub use buffers::{BufferRead, BufferShape, BufferStore, BufferWrite, InputBuffer, OutputBuffer};
pub use client::{BatchClient, Client, StreamingClient};
pub use error::{
    AtomError, BatchError, ConfigError, ProcessError, ResolveError, SchemaError, StreamError,
};
pub use schema::{ParamKind, ParamSchema, ParamSpec, ParamValue};
pub use slots::ParamSlots;
pub use types::{Ordinal, MAX_CHANNELS};
