//! Background blob writer
//!
//! Mutations must not wait on disk. The store hands each serialized snapshot
//! to a dedicated thread which writes them in submission order, so the last
//! blob on disk is always the latest snapshot. Failed writes are logged and
//! dropped.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use tracing::{debug, error, warn};

use super::kv::KeyValueStore;

enum Request {
    Write { key: String, blob: String },
    Flush(Sender<()>),
}

/// Handle to the writer thread
///
/// Dropping the handle closes the queue and waits for pending writes.
pub struct BlobWriter {
    sender: Option<Sender<Request>>,
    handle: Option<JoinHandle<()>>,
}

impl BlobWriter {
    /// Start a writer thread that owns `store`
    ///
    /// If the thread cannot be started the writer is inert: submissions are
    /// logged and discarded, leaving the session in-memory only.
    pub fn spawn<S: KeyValueStore + 'static>(store: S) -> Self {
        let (sender, receiver) = mpsc::channel();

        let spawned = thread::Builder::new()
            .name("expense-writer".to_string())
            .spawn(move || run(store, receiver));

        match spawned {
            Ok(handle) => Self {
                sender: Some(sender),
                handle: Some(handle),
            },
            Err(e) => {
                error!(error = %e, "Failed to start writer thread; changes will not be saved");
                Self {
                    sender: None,
                    handle: None,
                }
            }
        }
    }

    /// Queue `blob` to replace the value under `key`
    pub fn submit(&self, key: &str, blob: String) {
        let request = Request::Write {
            key: key.to_string(),
            blob,
        };
        match &self.sender {
            Some(sender) if sender.send(request).is_ok() => {}
            _ => warn!(key, "Writer is not running; change kept in memory only"),
        }
    }

    /// Block until every write submitted so far has been attempted
    pub fn flush(&self) {
        let Some(sender) = &self.sender else {
            return;
        };

        let (ack, done) = mpsc::channel();
        if sender.send(Request::Flush(ack)).is_ok() {
            let _ = done.recv();
        }
    }
}

impl Drop for BlobWriter {
    fn drop(&mut self) {
        // Closing the channel ends the thread's loop once the queue drains
        self.sender.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("Writer thread panicked");
            }
        }
    }
}

fn run<S: KeyValueStore>(mut store: S, requests: Receiver<Request>) {
    for request in requests {
        match request {
            Request::Write { key, blob } => match store.set_item(&key, &blob) {
                Ok(()) => debug!(key = %key, bytes = blob.len(), "Saved blob"),
                Err(e) => error!(key = %key, error = %e, "Failed to save expenses"),
            },
            Request::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::kv::MemoryKeyValueStore;

    #[test]
    fn test_writes_apply_in_order() {
        let store = MemoryKeyValueStore::new();
        let writer = BlobWriter::spawn(store.clone());

        for i in 0..50 {
            writer.submit("k", i.to_string());
        }
        writer.flush();

        assert_eq!(store.item("k").as_deref(), Some("49"));
        assert_eq!(store.write_count(), 50);
    }

    #[test]
    fn test_drop_drains_queue() {
        let store = MemoryKeyValueStore::new();
        {
            let writer = BlobWriter::spawn(store.clone());
            writer.submit("k", "last".to_string());
        }
        assert_eq!(store.item("k").as_deref(), Some("last"));
    }

    #[test]
    fn test_failed_write_is_absorbed() {
        let store = MemoryKeyValueStore::with_item("k", "before");
        store.set_fail_writes(true);
        let writer = BlobWriter::spawn(store.clone());

        writer.submit("k", "lost".to_string());
        writer.flush();
        assert_eq!(store.item("k").as_deref(), Some("before"));

        store.set_fail_writes(false);
        writer.submit("k", "after".to_string());
        writer.flush();
        assert_eq!(store.item("k").as_deref(), Some("after"));
    }
}
