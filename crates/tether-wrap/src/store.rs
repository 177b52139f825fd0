//! In-memory reference implementation of the host buffer store.
//!
//! Real embeddings back [`BufferStore`] with the host's own named-buffer
//! registry; [`MemoryBufferStore`] stands in for it in tests and headless
//! use. Samples are held channel-major in one flat allocation per buffer.
//!
//! Sharing discipline: any number of concurrent read handles, or exactly
//! one write handle. A conflicting acquisition fails immediately with
//! [`ResolveError::InUse`] rather than blocking the message thread.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tether_core::{BufferRead, BufferShape, BufferStore, BufferWrite, ResolveError};

#[derive(Debug)]
struct Stored {
    frames: usize,
    channels: usize,
    sample_rate: f64,
    // channel-major: data[ch * frames .. (ch + 1) * frames]
    data: Vec<f64>,
}

impl Stored {
    fn shape(&self) -> BufferShape {
        BufferShape {
            frames: self.frames,
            channels: self.channels,
            sample_rate: self.sample_rate,
        }
    }

    fn channel(&self, channel: usize) -> &[f64] {
        &self.data[channel * self.frames..(channel + 1) * self.frames]
    }

    fn channel_mut(&mut self, channel: usize) -> &mut [f64] {
        &mut self.data[channel * self.frames..(channel + 1) * self.frames]
    }
}

/// Named buffers held in process memory.
#[derive(Debug, Default)]
pub struct MemoryBufferStore {
    buffers: HashMap<String, RwLock<Stored>>,
}

impl MemoryBufferStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create (or replace) a zero-filled buffer of the given shape.
    pub fn declare(&mut self, name: &str, channels: usize, frames: usize, sample_rate: f64) {
        self.buffers.insert(
            name.to_string(),
            RwLock::new(Stored {
                frames,
                channels,
                sample_rate,
                data: vec![0.0; frames * channels],
            }),
        );
    }

    /// Create (or replace) a buffer from channel data. Channels shorter
    /// than the longest are zero-padded to a rectangular shape.
    pub fn load(&mut self, name: &str, channels: &[Vec<f64>], sample_rate: f64) {
        let frames = channels.iter().map(Vec::len).max().unwrap_or(0);
        let mut data = vec![0.0; frames * channels.len()];
        for (ch, samples) in channels.iter().enumerate() {
            data[ch * frames..ch * frames + samples.len()].copy_from_slice(samples);
        }
        self.buffers.insert(
            name.to_string(),
            RwLock::new(Stored {
                frames,
                channels: channels.len(),
                sample_rate,
                data,
            }),
        );
    }

    /// Copy a buffer's contents out, channel by channel. `None` if the
    /// name is unknown or the buffer is write-locked.
    pub fn snapshot(&self, name: &str) -> Option<Vec<Vec<f64>>> {
        let stored = self.buffers.get(name)?.try_read().ok()?;
        Some(
            (0..stored.channels)
                .map(|ch| stored.channel(ch).to_vec())
                .collect(),
        )
    }
}

struct ReadHandle<'a> {
    guard: RwLockReadGuard<'a, Stored>,
}

impl BufferRead for ReadHandle<'_> {
    fn shape(&self) -> BufferShape {
        self.guard.shape()
    }

    fn channel(&self, channel: usize) -> &[f64] {
        self.guard.channel(channel)
    }
}

struct WriteHandle<'a> {
    guard: RwLockWriteGuard<'a, Stored>,
}

impl BufferRead for WriteHandle<'_> {
    fn shape(&self) -> BufferShape {
        self.guard.shape()
    }

    fn channel(&self, channel: usize) -> &[f64] {
        self.guard.channel(channel)
    }
}

impl BufferWrite for WriteHandle<'_> {
    fn channel_mut(&mut self, channel: usize) -> &mut [f64] {
        self.guard.channel_mut(channel)
    }

    fn resize(&mut self, frames: usize, channels: usize, sample_rate: f64) {
        self.guard.frames = frames;
        self.guard.channels = channels;
        self.guard.sample_rate = sample_rate;
        // contents are not preserved across a reshape
        self.guard.data = vec![0.0; frames * channels];
    }
}

impl BufferStore for MemoryBufferStore {
    fn acquire_read(&self, name: &str) -> Result<Box<dyn BufferRead + '_>, ResolveError> {
        let cell = self
            .buffers
            .get(name)
            .ok_or_else(|| ResolveError::NotFound(name.to_string()))?;
        // a poisoned lock also reports as busy
        let guard = cell
            .try_read()
            .map_err(|_| ResolveError::InUse(name.to_string()))?;
        Ok(Box::new(ReadHandle { guard }))
    }

    fn acquire_write(&self, name: &str) -> Result<Box<dyn BufferWrite + '_>, ResolveError> {
        let cell = self
            .buffers
            .get(name)
            .ok_or_else(|| ResolveError::NotFound(name.to_string()))?;
        let guard = cell
            .try_write()
            .map_err(|_| ResolveError::InUse(name.to_string()))?;
        Ok(Box::new(WriteHandle { guard }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_name_fails_resolution() {
        let store = MemoryBufferStore::new();
        let err = store.acquire_read("ghost").unwrap_err();
        assert_eq!(err, ResolveError::NotFound("ghost".into()));
    }

    #[test]
    fn test_concurrent_reads_are_allowed() {
        let mut store = MemoryBufferStore::new();
        store.declare("buf", 1, 16, 48_000.0);
        let a = store.acquire_read("buf").unwrap();
        let b = store.acquire_read("buf").unwrap();
        assert_eq!(a.shape().frames, 16);
        assert_eq!(b.shape().frames, 16);
    }

    #[test]
    fn test_write_conflicts_fail_fast() {
        let mut store = MemoryBufferStore::new();
        store.declare("buf", 1, 16, 48_000.0);
        let w = store.acquire_write("buf").unwrap();
        assert_eq!(
            store.acquire_read("buf").unwrap_err(),
            ResolveError::InUse("buf".into())
        );
        assert_eq!(
            store.acquire_write("buf").unwrap_err(),
            ResolveError::InUse("buf".into())
        );
        drop(w);
        assert!(store.acquire_write("buf").is_ok());
    }

    #[test]
    fn test_resize_reshapes_and_zero_fills() {
        let mut store = MemoryBufferStore::new();
        store.load("buf", &[vec![1.0, 2.0]], 44_100.0);
        {
            let mut w = store.acquire_write("buf").unwrap();
            w.resize(3, 2, 96_000.0);
            w.channel_mut(1)[2] = 7.0;
        }
        let shape_ok = {
            let r = store.acquire_read("buf").unwrap();
            r.shape()
                == BufferShape {
                    frames: 3,
                    channels: 2,
                    sample_rate: 96_000.0,
                }
        };
        assert!(shape_ok);
        assert_eq!(
            store.snapshot("buf").unwrap(),
            vec![vec![0.0, 0.0, 0.0], vec![0.0, 0.0, 7.0]]
        );
    }

    #[test]
    fn test_ragged_load_is_zero_padded() {
        let mut store = MemoryBufferStore::new();
        store.load("buf", &[vec![1.0, 2.0, 3.0], vec![4.0]], 48_000.0);
        assert_eq!(
            store.snapshot("buf").unwrap(),
            vec![vec![1.0, 2.0, 3.0], vec![4.0, 0.0, 0.0]]
        );
    }
}
