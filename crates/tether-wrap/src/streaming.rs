//! Streaming execution: the configure/perform pair.
//!
//! [`StreamingAdapter`] carries the state established in the Configure
//! phase - per-channel connection flags, sample rate, maximum block length
//! - and applies it on every Perform call. Configure runs on the host's
//! message thread when the audio engine (re)starts; Perform runs on the
//! audio thread once per block. The host serializes the two against each
//! other, which is what lets both take `&mut`.
//!
//! Configure is idempotent: every call replaces the connection flags and
//! rate state wholesale, so a reconfigure never inherits stale flags from
//! an earlier channel layout.

use tether_core::{BlockView, StreamError, StreamingClient};

/// Per-object streaming state, owned by the wrapper.
#[derive(Debug, Default)]
pub struct StreamingAdapter {
    in_connected: Vec<bool>,
    out_connected: Vec<bool>,
    sample_rate: f64,
    max_block_len: usize,
    configured: bool,
}

impl StreamingAdapter {
    /// Fresh, unconfigured state. Perform fails until the first
    /// [`configure`](Self::configure).
    pub fn new() -> Self {
        Self::default()
    }

    /// True once a configure call has succeeded.
    pub fn is_configured(&self) -> bool {
        self.configured
    }

    /// Sample rate recorded by the last configure.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Maximum block length recorded by the last configure.
    pub fn max_block_len(&self) -> usize {
        self.max_block_len
    }

    /// Whether an input channel was connected at the last configure.
    pub fn input_connected(&self, channel: usize) -> bool {
        self.in_connected.get(channel).copied().unwrap_or(false)
    }

    /// Whether an output channel was connected at the last configure.
    pub fn output_connected(&self, channel: usize) -> bool {
        self.out_connected.get(channel).copied().unwrap_or(false)
    }

    /// Latch the host's connection map and rate parameters, then give the
    /// client its chance to recompute rate-dependent state.
    ///
    /// `connections` lists inputs first, then outputs, and must cover
    /// every channel the client declares.
    pub fn configure<C: StreamingClient>(
        &mut self,
        client: &mut C,
        connections: &[bool],
        sample_rate: f64,
        max_block_len: usize,
    ) -> Result<(), StreamError> {
        let ins = client.audio_channels_in();
        let outs = client.audio_channels_out();
        if connections.len() != ins + outs {
            return Err(StreamError::BadConnectionMap {
                supplied: connections.len(),
                expected: ins + outs,
            });
        }

        self.in_connected.clear();
        self.in_connected.extend_from_slice(&connections[..ins]);
        self.out_connected.clear();
        self.out_connected.extend_from_slice(&connections[ins..]);
        self.sample_rate = sample_rate;
        self.max_block_len = max_block_len;

        client.configure(sample_rate, max_block_len);
        self.configured = true;
        Ok(())
    }

    /// Run one block through the client.
    ///
    /// Inputs whose connection flag is unset are left unbound and read as
    /// silence on the client side. Outputs are bound unconditionally,
    /// connected or not: every output block gets written on every call.
    ///
    /// Audio-thread code: the guards here are branch-and-return only, and
    /// the channel view is assembled on the stack.
    pub fn perform<C: StreamingClient>(
        &mut self,
        client: &mut C,
        inputs: &[&[f64]],
        outputs: &mut [&mut [f64]],
        block_len: usize,
    ) -> Result<(), StreamError> {
        if !self.configured {
            return Err(StreamError::NotConfigured);
        }
        if inputs.len() != self.in_connected.len() {
            return Err(StreamError::ChannelMismatch {
                direction: "input",
                configured: self.in_connected.len(),
                supplied: inputs.len(),
            });
        }
        if outputs.len() != self.out_connected.len() {
            return Err(StreamError::ChannelMismatch {
                direction: "output",
                configured: self.out_connected.len(),
                supplied: outputs.len(),
            });
        }
        for (ch, slice) in inputs.iter().enumerate() {
            if slice.len() < block_len {
                return Err(StreamError::ShortBlock {
                    channel: ch,
                    len: slice.len(),
                    block_len,
                });
            }
        }
        for (ch, slice) in outputs.iter().enumerate() {
            if slice.len() < block_len {
                return Err(StreamError::ShortBlock {
                    channel: inputs.len() + ch,
                    len: slice.len(),
                    block_len,
                });
            }
        }

        let gated = inputs
            .iter()
            .zip(self.in_connected.iter())
            .map(|(slice, connected)| connected.then_some(*slice));
        let mut view = BlockView::new(gated, outputs.iter_mut().map(|s| &mut **s), block_len);
        client.process_block(&mut view);
        Ok(())
    }
}
