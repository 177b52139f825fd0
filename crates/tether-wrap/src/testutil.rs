//! Shared fixtures for the crate's unit tests.

use std::sync::Mutex;

use once_cell::sync::Lazy;
use tether_core::{
    BatchClient, BlockView, Client, InputBuffer, OutputBuffer, ParamSchema, ParamSlots, ParamSpec,
    ParamValue, ProcessError, StreamingClient,
};

use crate::host::HostContext;

static PROBE_SCHEMA: Lazy<ParamSchema> = Lazy::new(|| {
    ParamSchema::build(vec![
        ParamSpec::float("gain", 1.0),
        ParamSpec::enumeration("mode", 0, &["linear", "squared"]),
    ])
    .expect("probe schema")
});

/// What one perform call looked like from the client's side.
pub(crate) struct BlockRecord {
    pub bound_inputs: Vec<bool>,
    pub block_len: usize,
}

/// Dual-capability client that records every call it receives.
///
/// Streaming: 2-in/2-out, multiplies each input by `gain`. Batch:
/// 1-in/1-out, copies the input buffer into the output buffer.
pub(crate) struct ProbeClient {
    pub params: ParamSlots,
    pub configured: Vec<(f64, usize)>,
    pub performed: Vec<BlockRecord>,
    pub batch_calls: usize,
    pub fail_batch: bool,
}

impl Default for ProbeClient {
    fn default() -> Self {
        Self {
            params: ParamSlots::new(&PROBE_SCHEMA).expect("scalar schema"),
            configured: Vec::new(),
            performed: Vec::new(),
            batch_calls: 0,
            fail_batch: false,
        }
    }
}

impl Client for ProbeClient {
    fn schema(&self) -> &'static ParamSchema {
        &PROBE_SCHEMA
    }

    fn set_param(&self, ordinal: usize, value: &ParamValue) {
        self.params.set(ordinal, value);
    }

    fn get_param(&self, ordinal: usize) -> Option<ParamValue> {
        self.params.get(ordinal)
    }

    fn audio_channels_in(&self) -> usize {
        2
    }

    fn audio_channels_out(&self) -> usize {
        2
    }

    fn audio_buffers_in(&self) -> usize {
        1
    }

    fn audio_buffers_out(&self) -> usize {
        1
    }
}

impl StreamingClient for ProbeClient {
    fn configure(&mut self, sample_rate: f64, max_block_len: usize) {
        self.configured.push((sample_rate, max_block_len));
    }

    fn process_block(&mut self, block: &mut BlockView<'_>) {
        let gain = self.params.get_float(0);
        self.performed.push(BlockRecord {
            bound_inputs: (0..block.num_inputs())
                .map(|ch| block.is_input_bound(ch))
                .collect(),
            block_len: block.block_len(),
        });
        for (inp, out) in block.zip_channels() {
            if inp.is_empty() {
                out.fill(0.0);
            } else {
                for (o, i) in out.iter_mut().zip(inp.iter()) {
                    *o = *i * gain;
                }
            }
        }
    }
}

impl BatchClient for ProbeClient {
    fn process_buffers(
        &mut self,
        inputs: &[InputBuffer<'_>],
        outputs: &mut [OutputBuffer<'_>],
    ) -> Result<(), ProcessError> {
        self.batch_calls += 1;
        if self.fail_batch {
            return Err(ProcessError::new("probe told to fail"));
        }
        let shape = inputs[0].handle.shape();
        let out = &mut outputs[0].handle;
        out.resize(shape.frames, shape.channels, shape.sample_rate);
        for ch in 0..shape.channels {
            out.channel_mut(ch).copy_from_slice(inputs[0].handle.channel(ch));
        }
        Ok(())
    }
}

static QUIET_SCHEMA: Lazy<ParamSchema> = Lazy::new(ParamSchema::empty);

/// Parameterless streaming client used where a second distinct type is
/// needed (the registry keys on `TypeId`).
#[derive(Default)]
pub(crate) struct QuietClient;

impl Client for QuietClient {
    fn schema(&self) -> &'static ParamSchema {
        &QUIET_SCHEMA
    }

    fn set_param(&self, _ordinal: usize, _value: &ParamValue) {}

    fn get_param(&self, _ordinal: usize) -> Option<ParamValue> {
        None
    }

    fn audio_channels_in(&self) -> usize {
        1
    }

    fn audio_channels_out(&self) -> usize {
        1
    }
}

impl StreamingClient for QuietClient {
    fn process_block(&mut self, block: &mut BlockView<'_>) {
        block.clear_outputs();
    }
}

/// Host context that captures reports instead of logging them.
#[derive(Default)]
pub(crate) struct MockHost {
    pub errors: Mutex<Vec<String>>,
    pub signal_outputs: Mutex<Vec<usize>>,
}

impl MockHost {
    pub fn error_count(&self) -> usize {
        self.errors.lock().expect("mock host lock").len()
    }

    pub fn last_error(&self) -> Option<String> {
        self.errors.lock().expect("mock host lock").last().cloned()
    }
}

impl HostContext for MockHost {
    fn report_error(&self, object: &str, message: &str) {
        self.errors
            .lock()
            .expect("mock host lock")
            .push(format!("{object}: {message}"));
    }

    fn register_signal_outputs(&self, count: usize) {
        self.signal_outputs
            .lock()
            .expect("mock host lock")
            .push(count);
    }
}
