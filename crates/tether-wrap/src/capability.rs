//! Capability composition.
//!
//! A client type gains an execution model by having the matching adapter
//! attached explicitly at registration - there is no inference from the
//! type itself. [`Adapters`] is the composition point: each builder method
//! is only callable when the client implements the corresponding trait,
//! and monomorphizes that trait's entry points into plain function
//! pointers the wrapper can dispatch through without further bounds.

use tether_core::{Atom, BatchClient, BatchError, BufferStore, Client, StreamError, StreamingClient};

use crate::batch::BatchAdapter;
use crate::streaming::StreamingAdapter;

/// What a registered class can do. Stored in the class registry and
/// checked once at construction: a class with neither flag set cannot be
/// instantiated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CapabilityFlags {
    /// Class participates in the configure/perform signal chain.
    pub streaming: bool,
    /// Class answers the `process` message.
    pub batch: bool,
}

impl CapabilityFlags {
    /// True when neither execution model is attached.
    pub fn is_empty(self) -> bool {
        !self.streaming && !self.batch
    }
}

pub(crate) struct StreamingHooks<C> {
    pub configure: fn(&mut StreamingAdapter, &mut C, &[bool], f64, usize) -> Result<(), StreamError>,
    pub perform:
        fn(&mut StreamingAdapter, &mut C, &[&[f64]], &mut [&mut [f64]], usize) -> Result<(), StreamError>,
}

pub(crate) type BatchHook<C> = fn(&mut C, &dyn BufferStore, &[Atom]) -> Result<(), BatchError>;

/// The adapters attached to a client type.
pub struct Adapters<C> {
    pub(crate) stream: Option<StreamingHooks<C>>,
    pub(crate) batch: Option<BatchHook<C>>,
}

impl<C: Client> Adapters<C> {
    /// No capability attached. A wrapper built from this fails
    /// construction; attach at least one adapter.
    pub fn none() -> Self {
        Self {
            stream: None,
            batch: None,
        }
    }

    /// Attach the streaming adapter.
    pub fn streaming(mut self) -> Self
    where
        C: StreamingClient,
    {
        self.stream = Some(StreamingHooks {
            configure: StreamingAdapter::configure::<C>,
            perform: StreamingAdapter::perform::<C>,
        });
        self
    }

    /// Attach the batch adapter.
    pub fn batch(mut self) -> Self
    where
        C: BatchClient,
    {
        self.batch = Some(BatchAdapter::run::<C>);
        self
    }

    /// Flags matching the attached adapters.
    pub fn flags(&self) -> CapabilityFlags {
        CapabilityFlags {
            streaming: self.stream.is_some(),
            batch: self.batch.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::ProbeClient;

    #[test]
    fn test_flags_follow_attached_adapters() {
        assert!(Adapters::<ProbeClient>::none().flags().is_empty());
        let flags = Adapters::<ProbeClient>::none().streaming().flags();
        assert!(flags.streaming && !flags.batch);
        let flags = Adapters::<ProbeClient>::none().streaming().batch().flags();
        assert!(flags.streaming && flags.batch);
    }
}
