//! Per-callback channel views for streaming execution.
//!
//! A [`BlockView`] is rebuilt by the streaming adapter on every audio
//! callback from the host-supplied block pointers. It never owns sample
//! memory and never survives the callback that created it.
//!
//! # Binding rules
//!
//! Input channels are bound only when their connection flag was set at
//! configure time; an unbound input reads as an empty slice. Output
//! channels are always bound, regardless of connection bookkeeping.
//!
//! # Real-Time Safety
//!
//! Storage is fixed-size stack arrays bounded by
//! [`MAX_CHANNELS`](crate::types::MAX_CHANNELS); constructing and using a
//! view performs no heap allocation.

use crate::types::MAX_CHANNELS;

/// Transient view over one block's input and output channels.
///
/// The `'a` lifetime ties the view to the host's block storage; views are
/// only valid within a single perform call.
pub struct BlockView<'a> {
    inputs: [Option<&'a [f64]>; MAX_CHANNELS],
    outputs: [Option<&'a mut [f64]>; MAX_CHANNELS],
    num_inputs: usize,
    num_outputs: usize,
    block_len: usize,
}

impl<'a> BlockView<'a> {
    /// Assemble a view from pre-gated channel slices.
    ///
    /// `inputs` yields `None` for channels left unbound (not connected);
    /// `outputs` must yield a slice for every output channel. Channels
    /// beyond [`MAX_CHANNELS`] are silently ignored.
    pub fn new(
        inputs: impl IntoIterator<Item = Option<&'a [f64]>>,
        outputs: impl IntoIterator<Item = &'a mut [f64]>,
        block_len: usize,
    ) -> Self {
        let mut input_arr: [Option<&'a [f64]>; MAX_CHANNELS] = [None; MAX_CHANNELS];
        let mut num_inputs = 0;
        for (i, slot) in inputs.into_iter().take(MAX_CHANNELS).enumerate() {
            input_arr[i] = slot;
            num_inputs = i + 1;
        }

        // [None; N] needs Copy, which &mut is not
        let mut output_arr: [Option<&'a mut [f64]>; MAX_CHANNELS] =
            std::array::from_fn(|_| None);
        let mut num_outputs = 0;
        for (i, slice) in outputs.into_iter().take(MAX_CHANNELS).enumerate() {
            output_arr[i] = Some(slice);
            num_outputs = i + 1;
        }

        Self {
            inputs: input_arr,
            outputs: output_arr,
            num_inputs,
            num_outputs,
            block_len,
        }
    }

    /// Samples per channel in this block.
    #[inline]
    pub fn block_len(&self) -> usize {
        self.block_len
    }

    /// Number of input channel slots (bound or not).
    #[inline]
    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    /// Number of output channels.
    #[inline]
    pub fn num_outputs(&self) -> usize {
        self.num_outputs
    }

    /// Whether an input channel was bound this block.
    #[inline]
    pub fn is_input_bound(&self, channel: usize) -> bool {
        self.inputs.get(channel).is_some_and(|s| s.is_some())
    }

    /// Read an input channel. Unbound or out-of-range channels read as an
    /// empty slice.
    #[inline]
    pub fn input(&self, channel: usize) -> &[f64] {
        self.inputs
            .get(channel)
            .and_then(|opt| opt.as_ref())
            .map(|ch| &ch[..self.block_len])
            .unwrap_or(&[])
    }

    /// Mutable access to an output channel.
    ///
    /// Returns `None` if the channel doesn't exist.
    #[inline]
    pub fn output(&mut self, channel: usize) -> Option<&mut [f64]> {
        let n = self.block_len;
        self.outputs
            .get_mut(channel)
            .and_then(|opt| opt.as_mut())
            .map(|ch| &mut ch[..n])
    }

    /// Clear every output channel to silence.
    pub fn clear_outputs(&mut self) {
        let n = self.block_len;
        for opt in self.outputs[..self.num_outputs].iter_mut() {
            if let Some(ch) = opt.as_mut() {
                ch[..n].fill(0.0);
            }
        }
    }

    /// Iterate paired (input, output) channels for in-place-style
    /// processing. Unbound inputs pair as empty slices.
    pub fn zip_channels(&mut self) -> impl Iterator<Item = (&[f64], &mut [f64])> + use<'_, 'a> {
        let n = self.block_len;
        let pairs = self.num_inputs.min(self.num_outputs);
        self.inputs[..pairs]
            .iter()
            .zip(self.outputs[..pairs].iter_mut())
            .filter_map(move |(i_opt, o_opt)| {
                let out = o_opt.as_mut()?;
                let inp = i_opt.as_ref().map(|ch| &ch[..n]).unwrap_or(&[]);
                Some((inp, &mut out[..n]))
            })
    }
}
