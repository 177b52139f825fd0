//! Tether Gain - example streaming client.
//!
//! This client shows the streaming half of the framework:
//! 1. Declare a parameter schema once per type, ordinals in declaration
//!    order
//! 2. Store parameter state in atomic slots so host attribute writes land
//!    mid-block without locks
//! 3. Implement `StreamingClient` and process per-block channel views
//! 4. Wrap the client in a `WrapperObject` with the streaming adapter
//!    attached

use std::sync::Arc;

use once_cell::sync::Lazy;
use tether::prelude::*;

// =============================================================================
// Parameters
// =============================================================================

/// Ordinal of the `gain` attribute.
pub const P_GAIN: usize = 0;
/// Ordinal of the `mode` attribute.
pub const P_MODE: usize = 1;

/// Variant index for plain linear gain.
pub const MODE_LINEAR: i64 = 0;
/// Variant index for squared gain (a crude "drive" curve).
pub const MODE_SQUARED: i64 = 1;

static SCHEMA: Lazy<ParamSchema> = Lazy::new(|| {
    ParamSchema::build(vec![
        ParamSpec::float("gain", 1.0),
        ParamSpec::enumeration("mode", MODE_LINEAR, &["linear", "squared"]),
    ])
    .expect("gain schema is collision-free")
});

// =============================================================================
// Client
// =============================================================================

/// Stereo gain: every connected input channel is scaled into the matching
/// output channel. Disconnected inputs produce silence.
pub struct GainClient {
    params: ParamSlots,
}

impl Default for GainClient {
    fn default() -> Self {
        Self {
            params: ParamSlots::new(&SCHEMA).expect("gain schema is all-scalar"),
        }
    }
}

impl GainClient {
    /// Effective linear multiplier for the current block, folding the
    /// mode curve in.
    fn effective_gain(&self) -> f64 {
        let gain = self.params.get_float(P_GAIN);
        match self.params.get_int(P_MODE) {
            MODE_SQUARED => gain * gain,
            _ => gain,
        }
    }
}

impl Client for GainClient {
    fn schema(&self) -> &'static ParamSchema {
        &SCHEMA
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
}

impl StreamingClient for GainClient {
    fn process_block(&mut self, block: &mut BlockView<'_>) {
        let gain = self.effective_gain();
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

// =============================================================================
// Host object
// =============================================================================

/// Build a `gain~` wrapper object against the given host.
pub fn create_object(
    host: Arc<dyn HostContext>,
) -> Result<WrapperObject<GainClient>, ConfigError> {
    WrapperObject::create("gain~", Adapters::none().streaming(), host, &[])
}
