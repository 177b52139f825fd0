//! Batch execution: the `process` message path.
//!
//! A `process` message names one host buffer per declared client slot,
//! inputs first, then outputs. [`BatchAdapter::run`] validates the token
//! list, resolves every name through the store, and only then invokes the
//! client - a resolution failure anywhere aborts the call before the
//! client runs, so no output buffer is touched.
//!
//! The whole call is synchronous on the host's message thread and may run
//! for an arbitrary duration.

use tether_core::{Atom, BatchClient, BatchError, BufferStore, InputBuffer, OutputBuffer};

/// Stateless batch dispatcher.
pub struct BatchAdapter;

impl BatchAdapter {
    /// Handle one `process` message.
    ///
    /// Checks run in order: token count against the client's declared
    /// arity, then token types, then name resolution (inputs before
    /// outputs, declaration order). Resolved handles live exactly as long
    /// as this call.
    pub fn run<C: BatchClient>(
        client: &mut C,
        store: &dyn BufferStore,
        tokens: &[Atom],
    ) -> Result<(), BatchError> {
        let ins = client.audio_buffers_in();
        let outs = client.audio_buffers_out();
        if tokens.len() != ins + outs {
            return Err(BatchError::Arity {
                expected: ins + outs,
                got: tokens.len(),
            });
        }

        let mut names = Vec::with_capacity(tokens.len());
        for (position, token) in tokens.iter().enumerate() {
            let name = token
                .as_symbol()
                .map_err(|_| BatchError::BadToken { position })?;
            names.push(name);
        }

        let mut inputs = Vec::with_capacity(ins);
        for name in &names[..ins] {
            inputs.push(InputBuffer::whole(store.acquire_read(name)?));
        }
        let mut outputs = Vec::with_capacity(outs);
        for name in &names[ins..] {
            outputs.push(OutputBuffer::new(store.acquire_write(name)?));
        }

        client.process_buffers(&inputs, &mut outputs)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryBufferStore;
    use crate::testutil::ProbeClient;
    use tether_core::ResolveError;

    fn store_with_src() -> MemoryBufferStore {
        let mut store = MemoryBufferStore::new();
        store.load(
            "src",
            &[vec![1.0, 2.0, 3.0, 4.0], vec![5.0, 6.0, 7.0, 8.0]],
            48_000.0,
        );
        store.declare("dst", 1, 1, 48_000.0);
        store
    }

    fn msg(tokens: &[&str]) -> Vec<Atom> {
        tokens.iter().map(|t| Atom::symbol(*t)).collect()
    }

    #[test]
    fn test_process_copies_input_to_output() {
        let store = store_with_src();
        let mut client = ProbeClient::default();
        BatchAdapter::run(&mut client, &store, &msg(&["src", "dst"])).unwrap();
        assert_eq!(client.batch_calls, 1);
        assert_eq!(
            store.snapshot("dst").unwrap(),
            vec![vec![1.0, 2.0, 3.0, 4.0], vec![5.0, 6.0, 7.0, 8.0]]
        );
    }

    #[test]
    fn test_wrong_token_count_is_rejected() {
        let store = store_with_src();
        let mut client = ProbeClient::default();
        let err = BatchAdapter::run(&mut client, &store, &msg(&["src"])).unwrap_err();
        assert_eq!(err, BatchError::Arity { expected: 2, got: 1 });
        assert_eq!(client.batch_calls, 0);
    }

    #[test]
    fn test_numeric_token_is_rejected_with_position() {
        let store = store_with_src();
        let mut client = ProbeClient::default();
        let err = BatchAdapter::run(
            &mut client,
            &store,
            &[Atom::symbol("src"), Atom::Int(7)],
        )
        .unwrap_err();
        assert_eq!(err, BatchError::BadToken { position: 1 });
        assert_eq!(client.batch_calls, 0);
    }

    #[test]
    fn test_unresolved_name_skips_client() {
        let store = store_with_src();
        let mut client = ProbeClient::default();
        let err = BatchAdapter::run(&mut client, &store, &msg(&["missing", "dst"])).unwrap_err();
        assert_eq!(
            err,
            BatchError::Resolve(ResolveError::NotFound("missing".into()))
        );
        assert_eq!(client.batch_calls, 0);
    }

    #[test]
    fn test_client_failure_propagates() {
        let store = store_with_src();
        let mut client = ProbeClient {
            fail_batch: true,
            ..Default::default()
        };
        let err = BatchAdapter::run(&mut client, &store, &msg(&["src", "dst"])).unwrap_err();
        assert!(matches!(err, BatchError::Process(_)));
        assert_eq!(client.batch_calls, 1);
    }

    #[test]
    fn test_busy_output_reports_in_use() {
        let store = store_with_src();
        let held = store.acquire_write("dst").unwrap();
        let mut client = ProbeClient::default();
        let err = BatchAdapter::run(&mut client, &store, &msg(&["src", "dst"])).unwrap_err();
        assert_eq!(err, BatchError::Resolve(ResolveError::InUse("dst".into())));
        assert_eq!(client.batch_calls, 0);
        drop(held);
    }
}
