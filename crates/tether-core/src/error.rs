//! Error types for the Tether framework.
//!
//! Each layer has its own taxonomy:
//!
//! - [`SchemaError`] - parameter schema construction failures
//! - [`ConfigError`] - client type registration/construction failures
//! - [`AtomError`] - host atom decoding failures
//! - [`StreamError`] - streaming adapter misuse guards
//! - [`ResolveError`] - named-buffer resolution failures
//! - [`ProcessError`] - batch client processing failures
//! - [`BatchError`] - batch message handling failures
//!
//! Configuration errors (`SchemaError`, `ConfigError`) are programmer
//! errors surfaced at registration time and never reached at runtime.
//! Runtime errors are local to one call: they are reported on the host
//! error channel and leave the object usable for subsequent calls.

use crate::schema::ParamKind;

/// Errors building a [`ParamSchema`](crate::schema::ParamSchema).
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SchemaError {
    /// Two parameter names collide after case-folding.
    #[error("parameter name collision after case-folding: '{0}'")]
    NameCollision(String),
}

/// Errors registering or constructing a wrapped client type.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A parameter kind has no host bridging (Buffer and array kinds).
    #[error("parameter '{name}' has kind {kind:?}, which cannot be bridged to a host attribute")]
    UnsupportedKind {
        /// Declared parameter name.
        name: String,
        /// The unbridgeable kind.
        kind: ParamKind,
    },
    /// A client type was registered with neither capability attached.
    #[error("client type '{0}' declares neither streaming nor batch capability")]
    NoCapability(String),
    /// A client declares more channels than [`MAX_CHANNELS`](crate::types::MAX_CHANNELS).
    #[error("client declares {declared} {direction} channels, limit is {limit}")]
    TooManyChannels {
        /// "input" or "output".
        direction: &'static str,
        /// Channel count the client reported.
        declared: usize,
        /// The MAX_CHANNELS bound.
        limit: usize,
    },
}

/// Errors decoding a host atom into a typed parameter value.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AtomError {
    /// The host supplied no atoms where one was required.
    #[error("expected a value, got none")]
    Missing,
    /// The atom cannot coerce to the required representation.
    #[error("cannot coerce {found} to {wanted}")]
    WrongType {
        /// Human-readable tag of the supplied atom.
        found: &'static str,
        /// Representation the parameter kind required.
        wanted: &'static str,
    },
}

/// Streaming adapter misuse guards.
///
/// These fail fast instead of letting a perform call index past
/// configure-time array bounds.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StreamError {
    /// Perform was called before any Configure.
    #[error("perform called before configure")]
    NotConfigured,
    /// Perform-time channel counts disagree with configure-time counts.
    #[error("channel count mismatch: configured {configured}, host supplied {supplied} ({direction})")]
    ChannelMismatch {
        /// "input" or "output".
        direction: &'static str,
        /// Count recorded at configure time.
        configured: usize,
        /// Count the host passed to perform.
        supplied: usize,
    },
    /// The host connection map does not cover every declared channel.
    #[error("connection map has {supplied} entries, client declares {expected} channels")]
    BadConnectionMap {
        /// Entries supplied by the host.
        supplied: usize,
        /// Declared input + output channel count.
        expected: usize,
    },
    /// A host block slice is shorter than the stated block length.
    #[error("channel {channel} holds {len} samples, block length is {block_len}")]
    ShortBlock {
        /// Offending channel index (inputs first, then outputs).
        channel: usize,
        /// Samples actually supplied.
        len: usize,
        /// Block length stated by the host.
        block_len: usize,
    },
}

/// Failures resolving a named buffer through a
/// [`BufferStore`](crate::buffers::BufferStore).
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ResolveError {
    /// No buffer is registered under the given name.
    #[error("no buffer named '{0}'")]
    NotFound(String),
    /// The buffer exists but is held by another accessor.
    #[error("buffer '{0}' is in use")]
    InUse(String),
    /// The buffer exists but its shape is unusable for the request.
    #[error("buffer '{name}' unsuitable: {reason}")]
    Unsuitable {
        /// Buffer name as supplied in the message.
        name: String,
        /// Store-specific explanation.
        reason: String,
    },
}

/// Failure reported by a batch client's buffer transform.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("{0}")]
pub struct ProcessError(pub String);

impl ProcessError {
    /// Create a process error from any displayable message.
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Errors handling a batch `process` message.
///
/// All variants abort the call before (or instead of) invoking the client,
/// except [`Process`](BatchError::Process) which wraps a client-side
/// failure. None of them poison the wrapper object.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BatchError {
    /// Token count does not match the client's declared buffer arity.
    #[error("wrong number of buffers: expected {expected}, got {got}")]
    Arity {
        /// `audio_buffers_in + audio_buffers_out`.
        expected: usize,
        /// Tokens the host message carried.
        got: usize,
    },
    /// A token was not a buffer-name symbol.
    #[error("buffer argument {position} is not a symbol")]
    BadToken {
        /// Zero-based position within the message token list.
        position: usize,
    },
    /// A buffer name failed to resolve.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    /// The client's buffer transform reported a failure.
    #[error(transparent)]
    Process(#[from] ProcessError),
}
