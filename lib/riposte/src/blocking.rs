//! Shared runtime backing the blocking send path.
//!
//! The runtime is built on first use and kept for the life of the process so
//! pooled connections survive between blocking calls.

use std::future::Future;
use std::sync::OnceLock;

use tokio::runtime::{Builder, Runtime};

use riposte_core::{Error, Result};

static RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Run a riposte future to completion on the shared blocking runtime.
///
/// Must not be called from within an asynchronous context; tokio's own
/// `block_on` guard panics there.
pub(crate) fn block_on<T>(future: impl Future<Output = Result<T>>) -> Result<T> {
    if RUNTIME.get().is_none() {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("riposte-blocking")
            .enable_all()
            .build()
            .map_err(|e| Error::runtime(e.to_string()))?;
        // A racing thread may have won initialization; the extra runtime is
        // simply dropped.
        let _ = RUNTIME.set(runtime);
    }

    let runtime = RUNTIME
        .get()
        .ok_or_else(|| Error::runtime("blocking runtime unavailable"))?;
    runtime.block_on(future)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_on_runs_future_to_completion() {
        let value = block_on(async { Ok(21 * 2) }).expect("block_on");
        assert_eq!(value, 42);
    }

    #[test]
    fn block_on_reuses_the_runtime() {
        let first = block_on(async { Ok(1) }).expect("first");
        let second = block_on(async { Ok(2) }).expect("second");
        assert_eq!(first + second, 3);
    }
}
