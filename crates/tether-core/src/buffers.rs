//! Batch-mode buffer interfaces.
//!
//! Batch processing operates on whole named buffers owned by the host's
//! buffer storage, an external collaborator reached through the
//! [`BufferStore`] trait. Resolution yields transient handles - boxed
//! [`BufferRead`]/[`BufferWrite`] trait objects - valid only for the
//! duration of one batch call and never persisted.

use crate::error::{ProcessError, ResolveError};

/// Shape of an addressable buffer: frame count, channel count, and the
/// sample rate its contents were captured at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BufferShape {
    /// Frames (samples per channel).
    pub frames: usize,
    /// Channel count.
    pub channels: usize,
    /// Sample rate in Hz.
    pub sample_rate: f64,
}

/// Read access to one resolved buffer.
pub trait BufferRead {
    /// Current shape of the buffer.
    fn shape(&self) -> BufferShape;

    /// Samples of one channel. Panics in debug on out-of-range channels;
    /// callers index within `shape().channels`.
    fn channel(&self, channel: usize) -> &[f64];
}

impl std::fmt::Debug for dyn BufferRead + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BufferRead")
            .field("shape", &self.shape())
            .finish_non_exhaustive()
    }
}

/// Write access to one resolved buffer.
pub trait BufferWrite: BufferRead {
    /// Mutable samples of one channel.
    fn channel_mut(&mut self, channel: usize) -> &mut [f64];

    /// Reshape the buffer in place, zero-filling fresh storage. Batch
    /// clients use this to size their outputs before writing.
    fn resize(&mut self, frames: usize, channels: usize, sample_rate: f64);
}

impl std::fmt::Debug for dyn BufferWrite + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BufferWrite")
            .field("shape", &self.shape())
            .finish_non_exhaustive()
    }
}

/// Ordered input descriptor handed to a batch client.
///
/// Position within the descriptor list corresponds 1:1 to the client's
/// declared input buffer slots.
pub struct InputBuffer<'a> {
    /// Resolved read handle.
    pub handle: Box<dyn BufferRead + 'a>,
    /// First frame the client should read. Defaults to 0 (whole buffer).
    pub start_frame: usize,
    /// Frames to read; `None` means through the end.
    pub num_frames: Option<usize>,
}

impl<'a> InputBuffer<'a> {
    /// Wrap a handle covering the whole buffer.
    pub fn whole(handle: Box<dyn BufferRead + 'a>) -> Self {
        Self {
            handle,
            start_frame: 0,
            num_frames: None,
        }
    }

    /// Frames this descriptor spans after range clamping.
    pub fn frames(&self) -> usize {
        let total = self.handle.shape().frames;
        let start = self.start_frame.min(total);
        let avail = total - start;
        self.num_frames.map_or(avail, |n| n.min(avail))
    }
}

/// Ordered output descriptor handed to a batch client.
pub struct OutputBuffer<'a> {
    /// Resolved write handle.
    pub handle: Box<dyn BufferWrite + 'a>,
}

impl<'a> OutputBuffer<'a> {
    /// Wrap a write handle.
    pub fn new(handle: Box<dyn BufferWrite + 'a>) -> Self {
        Self { handle }
    }
}

/// The host's named-buffer storage, interfaces only.
///
/// Acquisition is per-call: handles borrow from the store and must be
/// dropped before the batch call returns. Implementations decide their own
/// sharing discipline; the in-memory reference store refuses conflicting
/// acquisition with [`ResolveError::InUse`] rather than blocking the
/// message thread.
pub trait BufferStore {
    /// Resolve a name to a read handle.
    fn acquire_read(&self, name: &str) -> Result<Box<dyn BufferRead + '_>, ResolveError>;

    /// Resolve a name to a write handle.
    fn acquire_write(&self, name: &str) -> Result<Box<dyn BufferWrite + '_>, ResolveError>;
}

/// Convenience: fail a batch transform with a message.
pub fn process_err<T>(msg: impl Into<String>) -> Result<T, ProcessError> {
    Err(ProcessError::new(msg))
}
