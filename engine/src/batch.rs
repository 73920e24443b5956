//! Batch header verification on the rayon pool.
//!
//! Headers are verified a chunk at a time, each chunk in parallel; results
//! are sent in input order. Every header takes its parent from the batch
//! prefix before it, so a batch may be a run of consecutive new headers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;

use hotstuff_types::Header;
use rayon::prelude::*;
use tracing::debug;

use crate::{EngineError, HotStuffEngine};

/// Stops a running batch. Results already sent stay in the channel; no
/// further results are produced once the worker observes the flag.
#[derive(Clone, Debug, Default)]
pub struct AbortHandle {
    aborted: Arc<AtomicBool>,
}

impl AbortHandle {
    pub fn abort(&self) {
        self.aborted.store(true, Ordering::Release);
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::Acquire)
    }
}

impl HotStuffEngine {
    /// Verify `headers` in the background. `seals[i]` selects the quorum seal
    /// check for header `i`; missing entries mean `false`.
    ///
    /// The result channel holds one slot per header, so the worker never
    /// blocks on a consumer that stopped reading.
    pub fn verify_headers(
        self: &Arc<Self>,
        headers: Vec<Header>,
        seals: Vec<bool>,
    ) -> (AbortHandle, Receiver<Result<(), EngineError>>) {
        let (results, receiver) = mpsc::sync_channel(headers.len().max(1));
        let abort = AbortHandle::default();
        let flag = abort.clone();
        let engine = Arc::clone(self);

        rayon::spawn(move || {
            let chunk_size = rayon::current_num_threads().max(1);
            let total = headers.len();
            let mut start = 0;

            while start < total {
                if flag.is_aborted() {
                    debug!(verified = start, total, "batch verification aborted");
                    return;
                }
                let end = (start + chunk_size).min(total);
                let chunk: Vec<Option<Result<(), EngineError>>> = (start..end)
                    .into_par_iter()
                    .map(|i| {
                        if flag.is_aborted() {
                            return None;
                        }
                        let seal = seals.get(i).copied().unwrap_or(false);
                        Some(engine.check_header(&headers[i], &headers[..i], seal))
                    })
                    .collect();

                for result in chunk {
                    let Some(result) = result else { return };
                    if flag.is_aborted() || results.send(result).is_err() {
                        return;
                    }
                }
                start = end;
            }
        });

        (abort, receiver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abort_is_shared_between_clones() {
        let handle = AbortHandle::default();
        let worker_side = handle.clone();
        assert!(!worker_side.is_aborted());
        handle.abort();
        assert!(worker_side.is_aborted());
    }
}
