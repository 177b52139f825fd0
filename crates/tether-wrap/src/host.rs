//! The wrapper's outward-facing host surface.
//!
//! Everything the dispatch core needs from its embedding host fits behind
//! [`HostContext`]: an error channel scoped to one object, and signal
//! output registration for streaming classes. Production embeddings
//! implement this against the real host ABI; [`LogHost`] routes reports to
//! the `log` facade for tests and headless use.

/// Services the embedding host provides to a wrapper object.
pub trait HostContext: Send + Sync {
    /// Report a runtime error on the object's error channel.
    ///
    /// Runtime errors are informational: the object stays usable and the
    /// host decides how to surface the text.
    fn report_error(&self, object: &str, message: &str);

    /// Announce how many signal outputs a streaming object exposes, called
    /// once during construction. Batch-only objects never call this.
    fn register_signal_outputs(&self, count: usize) {
        let _ = count;
    }
}

/// Host context backed by the `log` facade.
pub struct LogHost;

impl HostContext for LogHost {
    fn report_error(&self, object: &str, message: &str) {
        log::error!("{object}: {message}");
    }

    fn register_signal_outputs(&self, count: usize) {
        log::debug!("registering {count} signal outputs");
    }
}
