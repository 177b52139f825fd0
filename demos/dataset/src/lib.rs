//! Tether Segment - example batch client.
//!
//! This client shows the batch half of the framework:
//! 1. Take whole named buffers through the `process` message instead of a
//!    signal chain
//! 2. Read range parameters from atomic slots at process time
//! 3. Resize the output buffer before writing it
//! 4. Fail with `ProcessError` on bad ranges; the wrapper reports it and
//!    the object stays usable
//!
//! `segment~` copies a frame range out of a source buffer into a freshly
//! shaped destination buffer:
//!
//! ```text
//! process <source> <dest>
//! ```

use std::sync::Arc;

use once_cell::sync::Lazy;
use tether::prelude::*;

// =============================================================================
// Parameters
// =============================================================================

/// Ordinal of the `startframe` attribute.
pub const P_START: usize = 0;
/// Ordinal of the `numframes` attribute. Negative means "through the end".
pub const P_FRAMES: usize = 1;

static SCHEMA: Lazy<ParamSchema> = Lazy::new(|| {
    ParamSchema::build(vec![
        ParamSpec::int("startframe", 0),
        ParamSpec::int("numframes", -1),
    ])
    .expect("segment schema is collision-free")
});

// =============================================================================
// Client
// =============================================================================

/// Frame-range extraction: one source buffer in, one destination buffer
/// out. The destination is reshaped to exactly the extracted range.
pub struct SegmentClient {
    params: ParamSlots,
}

impl Default for SegmentClient {
    fn default() -> Self {
        Self {
            params: ParamSlots::new(&SCHEMA).expect("segment schema is all-scalar"),
        }
    }
}

impl Client for SegmentClient {
    fn schema(&self) -> &'static ParamSchema {
        &SCHEMA
    }

    fn set_param(&self, ordinal: usize, value: &ParamValue) {
        self.params.set(ordinal, value);
    }

    fn get_param(&self, ordinal: usize) -> Option<ParamValue> {
        self.params.get(ordinal)
    }

    fn audio_buffers_in(&self) -> usize {
        1
    }

    fn audio_buffers_out(&self) -> usize {
        1
    }
}

impl BatchClient for SegmentClient {
    fn process_buffers(
        &mut self,
        inputs: &[InputBuffer<'_>],
        outputs: &mut [OutputBuffer<'_>],
    ) -> Result<(), ProcessError> {
        let source = &inputs[0];
        let shape = source.handle.shape();

        let start = self.params.get_int(P_START);
        if start < 0 {
            return Err(ProcessError::new("startframe must not be negative"));
        }
        let start = start as usize;
        if start >= shape.frames {
            return Err(ProcessError::new(format!(
                "startframe {start} is past the end of a {}-frame buffer",
                shape.frames
            )));
        }

        let requested = self.params.get_int(P_FRAMES);
        let available = shape.frames - start;
        let frames = if requested < 0 {
            available
        } else {
            (requested as usize).min(available)
        };

        let dest = &mut outputs[0].handle;
        dest.resize(frames, shape.channels, shape.sample_rate);
        for ch in 0..shape.channels {
            dest.channel_mut(ch)
                .copy_from_slice(&source.handle.channel(ch)[start..start + frames]);
        }
        Ok(())
    }
}

// =============================================================================
// Host object
// =============================================================================

/// Build a `segment~` wrapper object against the given host.
pub fn create_object(
    host: Arc<dyn HostContext>,
) -> Result<WrapperObject<SegmentClient>, ConfigError> {
    WrapperObject::create("segment~", Adapters::none().batch(), host, &[])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> MemoryBufferStore {
        let mut store = MemoryBufferStore::new();
        store.load(
            "src",
            &[
                vec![1.0, 2.0, 3.0, 4.0, 5.0],
                vec![10.0, 20.0, 30.0, 40.0, 50.0],
            ],
            44_100.0,
        );
        store.declare("dst", 1, 1, 48_000.0);
        store
    }

    fn process(obj: &mut WrapperObject<SegmentClient>, store: &MemoryBufferStore) {
        obj.handle_message(
            "process",
            &[Atom::symbol("src"), Atom::symbol("dst")],
            store,
        )
        .unwrap();
    }

    #[test]
    fn test_default_extracts_whole_buffer() {
        let mut obj = create_object(Arc::new(LogHost)).unwrap();
        let store = store();
        process(&mut obj, &store);
        assert_eq!(
            store.snapshot("dst").unwrap(),
            vec![
                vec![1.0, 2.0, 3.0, 4.0, 5.0],
                vec![10.0, 20.0, 30.0, 40.0, 50.0],
            ]
        );
    }

    #[test]
    fn test_range_is_clamped_to_source_length() {
        let mut obj = create_object(Arc::new(LogHost)).unwrap();
        let store = store();
        obj.attribute_set("startframe", &[Atom::Int(3)]).unwrap();
        obj.attribute_set("numframes", &[Atom::Int(100)]).unwrap();
        process(&mut obj, &store);
        assert_eq!(
            store.snapshot("dst").unwrap(),
            vec![vec![4.0, 5.0], vec![40.0, 50.0]]
        );
    }

    #[test]
    fn test_destination_inherits_source_rate() {
        let mut obj = create_object(Arc::new(LogHost)).unwrap();
        let store = store();
        process(&mut obj, &store);
        let dst = store.acquire_read("dst").unwrap();
        assert_eq!(dst.shape().sample_rate, 44_100.0);
        assert_eq!(dst.shape().channels, 2);
    }

    #[test]
    fn test_start_past_end_fails_without_touching_dest() {
        let mut obj = create_object(Arc::new(LogHost)).unwrap();
        let store = store();
        obj.attribute_set("startframe", &[Atom::Int(5)]).unwrap();
        let err = obj
            .handle_message(
                "process",
                &[Atom::symbol("src"), Atom::symbol("dst")],
                &store,
            )
            .unwrap_err();
        assert!(matches!(err, WrapperError::Batch(BatchError::Process(_))));
        // destination keeps its declared shape
        assert_eq!(store.snapshot("dst").unwrap(), vec![vec![0.0]]);
    }

    #[test]
    fn test_missing_source_skips_processing() {
        let mut obj = create_object(Arc::new(LogHost)).unwrap();
        let store = store();
        let err = obj
            .handle_message(
                "process",
                &[Atom::symbol("ghost"), Atom::symbol("dst")],
                &store,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            WrapperError::Batch(BatchError::Resolve(ResolveError::NotFound(_)))
        ));
    }
}
