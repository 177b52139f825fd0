//! The wrapper object: one host object bound to one client instance.
//!
//! [`WrapperObject`] owns the client, the streaming state, and the
//! dispatch hooks, and translates every host entry point - attribute
//! traffic, the audio configure/perform pair, and symbolic messages -
//! into the client's typed surface.
//!
//! # Threading
//!
//! Attribute access takes `&self` and is safe against a concurrent
//! perform; that is the point of the atomic parameter slots. The `&mut
//! self` entry points (configure, perform, message handling) rely on the
//! host's own serialization: hosts never overlap an object's audio
//! callback with its configure or message handling, and the embedding
//! shim upholds that contract when it hands out `&mut` access.
//!
//! # Error reporting
//!
//! Message-thread failures are pushed onto the host error channel *and*
//! returned, so embeddings can forward the host code where one exists.
//! Perform failures are returned silently - there is no error path on the
//! audio thread - and leave the output blocks untouched.

use std::sync::Arc;

use tether_core::{Atom, BufferStore, Client, ConfigError, MAX_CHANNELS};

use crate::bridge::AttrError;
use crate::capability::Adapters;
use crate::host::HostContext;
use crate::registry::{register_class, ClassInfo};
use crate::streaming::StreamingAdapter;

/// Where an object is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Built, not yet part of a running signal chain.
    Constructed,
    /// At least one audio configure has succeeded.
    Active,
}

/// Failures crossing the wrapper's host boundary.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WrapperError {
    /// Audio entry point on an object with no streaming adapter.
    #[error("object has no signal processing capability")]
    NoStreaming,
    /// `process` message on an object with no batch adapter.
    #[error("object has no buffer processing capability")]
    NoBatch,
    /// Message selector the wrapper does not route.
    #[error("doesn't understand message '{0}'")]
    UnknownMessage(String),
    /// Attribute set/get failure.
    #[error(transparent)]
    Attr(#[from] AttrError),
    /// Streaming guard failure.
    #[error(transparent)]
    Stream(#[from] tether_core::StreamError),
    /// Batch handling failure.
    #[error(transparent)]
    Batch(#[from] tether_core::BatchError),
}

/// One host object wrapping one client instance.
pub struct WrapperObject<C: Client> {
    client: C,
    class: Arc<ClassInfo>,
    adapters: Adapters<C>,
    stream_state: StreamingAdapter,
    host: Arc<dyn HostContext>,
    lifecycle: Lifecycle,
}

impl<C: Client> std::fmt::Debug for WrapperObject<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WrapperObject")
            .field("class", &self.class.class_name)
            .field("lifecycle", &self.lifecycle)
            .finish_non_exhaustive()
    }
}

impl<C: Client> WrapperObject<C> {
    /// Build an object of an already-registered class.
    ///
    /// The client starts from `Default` with its schema defaults in
    /// place. `args` is the host's construction argument list; it is
    /// carried for interface parity but not interpreted - the core uses
    /// nothing beyond routing.
    pub fn new(
        class: Arc<ClassInfo>,
        adapters: Adapters<C>,
        host: Arc<dyn HostContext>,
        args: &[Atom],
    ) -> Result<Self, ConfigError> {
        let _ = args;
        if adapters.flags().is_empty() {
            return Err(ConfigError::NoCapability(class.class_name.to_string()));
        }

        let client = C::default();
        if adapters.flags().streaming {
            check_channels("input", client.audio_channels_in())?;
            check_channels("output", client.audio_channels_out())?;
            host.register_signal_outputs(client.audio_channels_out());
        }

        Ok(Self {
            client,
            class,
            adapters,
            stream_state: StreamingAdapter::new(),
            host,
            lifecycle: Lifecycle::Constructed,
        })
    }

    /// Register the class (first instance only) and build an object in
    /// one step.
    pub fn create(
        class_name: &'static str,
        adapters: Adapters<C>,
        host: Arc<dyn HostContext>,
        args: &[Atom],
    ) -> Result<Self, ConfigError> {
        let class = register_class::<C>(class_name, adapters.flags())?;
        Self::new(class, adapters, host, args)
    }

    /// The wrapped client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// The shared class registration.
    pub fn class(&self) -> &Arc<ClassInfo> {
        &self.class
    }

    /// Current lifecycle stage.
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Set an attribute from a host value list. Case-insensitive; takes
    /// effect immediately, mid-block included.
    pub fn attribute_set(&self, name: &str, atoms: &[Atom]) -> Result<(), WrapperError> {
        self.class
            .attributes
            .set(&self.client, name, atoms)
            .map_err(|e| self.fail(e.into()))
    }

    /// Read an attribute back as a host value list.
    pub fn attribute_get(&self, name: &str) -> Result<Vec<Atom>, WrapperError> {
        self.class
            .attributes
            .get(&self.client, name)
            .map_err(|e| self.fail(e.into()))
    }

    /// Audio engine (re)start: latch the connection map and rate state.
    ///
    /// `connections` lists inputs first, then outputs. Safe to call any
    /// number of times; each call replaces the previous state wholesale.
    pub fn configure_audio(
        &mut self,
        connections: &[bool],
        sample_rate: f64,
        max_block_len: usize,
    ) -> Result<(), WrapperError> {
        let Some(hooks) = self.adapters.stream.as_ref() else {
            return Err(self.fail(WrapperError::NoStreaming));
        };
        let configure = hooks.configure;
        configure(
            &mut self.stream_state,
            &mut self.client,
            connections,
            sample_rate,
            max_block_len,
        )
        .map_err(|e| {
            let e = WrapperError::from(e);
            self.report(&e);
            e
        })?;
        self.lifecycle = Lifecycle::Active;
        Ok(())
    }

    /// Audio callback: run one block. No host reporting on failure.
    pub fn process_block(
        &mut self,
        inputs: &[&[f64]],
        outputs: &mut [&mut [f64]],
        block_len: usize,
    ) -> Result<(), WrapperError> {
        let Some(hooks) = self.adapters.stream.as_ref() else {
            return Err(WrapperError::NoStreaming);
        };
        let perform = hooks.perform;
        perform(
            &mut self.stream_state,
            &mut self.client,
            inputs,
            outputs,
            block_len,
        )?;
        Ok(())
    }

    /// Route a symbolic host message.
    ///
    /// `process <in-buffers...> <out-buffers...>` triggers the batch
    /// path, synchronously on the calling (message) thread. Anything else
    /// is reported as not understood.
    pub fn handle_message(
        &mut self,
        selector: &str,
        atoms: &[Atom],
        store: &dyn BufferStore,
    ) -> Result<(), WrapperError> {
        match selector {
            "process" => {
                let Some(run) = self.adapters.batch else {
                    return Err(self.fail(WrapperError::NoBatch));
                };
                run(&mut self.client, store, atoms).map_err(|e| {
                    let e = WrapperError::from(e);
                    self.report(&e);
                    e
                })
            }
            other => Err(self.fail(WrapperError::UnknownMessage(other.to_string()))),
        }
    }

    fn report(&self, err: &WrapperError) {
        self.host.report_error(self.class.class_name, &err.to_string());
    }

    fn fail(&self, err: WrapperError) -> WrapperError {
        self.report(&err);
        err
    }
}

fn check_channels(direction: &'static str, declared: usize) -> Result<(), ConfigError> {
    if declared > MAX_CHANNELS {
        return Err(ConfigError::TooManyChannels {
            direction,
            declared,
            limit: MAX_CHANNELS,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::AttributeSet;
    use crate::capability::CapabilityFlags;
    use crate::store::MemoryBufferStore;
    use crate::testutil::{MockHost, ProbeClient};

    fn probe_class() -> Arc<ClassInfo> {
        let probe = ProbeClient::default();
        Arc::new(ClassInfo {
            class_name: "probe~",
            attributes: AttributeSet::build(probe.schema()).unwrap(),
            capabilities: CapabilityFlags {
                streaming: true,
                batch: true,
            },
        })
    }

    fn dual_object(host: Arc<MockHost>) -> WrapperObject<ProbeClient> {
        WrapperObject::new(
            probe_class(),
            Adapters::none().streaming().batch(),
            host,
            &[],
        )
        .unwrap()
    }

    #[test]
    fn test_construction_requires_a_capability() {
        let host = Arc::new(MockHost::default());
        let err = WrapperObject::<ProbeClient>::new(probe_class(), Adapters::none(), host, &[])
            .unwrap_err();
        assert_eq!(err, ConfigError::NoCapability("probe~".into()));
    }

    #[test]
    fn test_streaming_construction_registers_signal_outputs() {
        let host = Arc::new(MockHost::default());
        let obj = dual_object(host.clone());
        assert_eq!(*host.signal_outputs.lock().unwrap(), vec![2]);
        assert_eq!(obj.lifecycle(), Lifecycle::Constructed);
    }

    #[test]
    fn test_attribute_round_trip_through_object() {
        let host = Arc::new(MockHost::default());
        let obj = dual_object(host.clone());
        obj.attribute_set("Gain", &[Atom::Float(0.5)]).unwrap();
        assert_eq!(
            obj.attribute_get("gain").unwrap(),
            vec![Atom::Float(0.5)]
        );
        assert_eq!(host.error_count(), 0);
    }

    #[test]
    fn test_unknown_attribute_hits_error_channel() {
        let host = Arc::new(MockHost::default());
        let obj = dual_object(host.clone());
        assert!(obj.attribute_set("nope", &[Atom::Int(1)]).is_err());
        assert_eq!(host.error_count(), 1);
        assert!(host.last_error().unwrap().contains("unknown attribute"));
    }

    #[test]
    fn test_full_streaming_scenario() {
        let host = Arc::new(MockHost::default());
        let mut obj = dual_object(host.clone());

        // 2-in/2-out, second input disconnected
        obj.configure_audio(&[true, false, true, true], 48_000.0, 64)
            .unwrap();
        assert_eq!(obj.lifecycle(), Lifecycle::Active);

        obj.attribute_set("gain", &[Atom::Float(2.0)]).unwrap();

        let a = [1.0; 64];
        let b = [5.0; 64];
        let mut o0 = [0.0; 64];
        let mut o1 = [9.0; 64];
        obj.process_block(&[&a[..], &b[..]], &mut [&mut o0[..], &mut o1[..]], 64)
            .unwrap();

        assert_eq!(o0, [2.0; 64]);
        // disconnected input reads as silence regardless of the host block
        assert_eq!(o1, [0.0; 64]);
        assert_eq!(host.error_count(), 0);
    }

    #[test]
    fn test_perform_failure_skips_error_channel() {
        let host = Arc::new(MockHost::default());
        let mut obj = dual_object(host.clone());
        let err = obj.process_block(&[], &mut [], 64).unwrap_err();
        assert_eq!(
            err,
            WrapperError::Stream(tether_core::StreamError::NotConfigured)
        );
        assert_eq!(host.error_count(), 0);
    }

    #[test]
    fn test_process_message_runs_batch_path() {
        let host = Arc::new(MockHost::default());
        let mut obj = dual_object(host.clone());
        let mut store = MemoryBufferStore::new();
        store.load("src", &[vec![1.0, 2.0]], 48_000.0);
        store.declare("dst", 1, 1, 48_000.0);

        obj.handle_message(
            "process",
            &[Atom::symbol("src"), Atom::symbol("dst")],
            &store,
        )
        .unwrap();
        assert_eq!(store.snapshot("dst").unwrap(), vec![vec![1.0, 2.0]]);
    }

    #[test]
    fn test_batch_failure_is_reported_and_object_survives() {
        let host = Arc::new(MockHost::default());
        let mut obj = dual_object(host.clone());
        let store = MemoryBufferStore::new();

        let err = obj
            .handle_message("process", &[Atom::symbol("x"), Atom::symbol("y")], &store)
            .unwrap_err();
        assert!(matches!(err, WrapperError::Batch(_)));
        assert_eq!(host.error_count(), 1);

        // the object is still usable afterwards
        obj.attribute_set("gain", &[Atom::Float(3.0)]).unwrap();
        assert_eq!(
            obj.attribute_get("gain").unwrap(),
            vec![Atom::Float(3.0)]
        );
    }

    #[test]
    fn test_streaming_only_object_rejects_process_message() {
        let host = Arc::new(MockHost::default());
        let mut obj = WrapperObject::<ProbeClient>::new(
            probe_class(),
            Adapters::none().streaming(),
            host.clone(),
            &[],
        )
        .unwrap();
        let store = MemoryBufferStore::new();
        let err = obj
            .handle_message("process", &[], &store)
            .unwrap_err();
        assert_eq!(err, WrapperError::NoBatch);
        assert_eq!(host.error_count(), 1);
    }

    #[test]
    fn test_unroutable_selector_is_reported() {
        let host = Arc::new(MockHost::default());
        let mut obj = dual_object(host.clone());
        let store = MemoryBufferStore::new();
        let err = obj.handle_message("blame", &[], &store).unwrap_err();
        assert_eq!(err, WrapperError::UnknownMessage("blame".into()));
        assert!(host.last_error().unwrap().contains("blame"));
    }
}
