//! Tokio Runtime Bridge
//!
//! The dashboard state lives on a plain thread; remote requests run on a
//! tokio runtime and report back over a channel.
//!
//! ## Pattern
//!
//! ```text
//! Dashboard (owner thread)
//!       │ request issued
//!       ▼
//! spawn_named(handle, "records", async { ... })
//!       │
//!       ▼
//! tokio worker awaits the response
//!       │
//!       ▼
//! ServiceEvent sent back to the Dashboard
//! ```

use std::future::Future;
use std::sync::OnceLock;

use tokio::runtime::{Builder, Handle, Runtime};

use crate::error::{Error, Result};

/// Global tokio runtime instance
static TOKIO_RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Get or initialize the global tokio runtime
pub fn shared_runtime() -> Result<&'static Runtime> {
    if let Some(runtime) = TOKIO_RUNTIME.get() {
        return Ok(runtime);
    }

    let runtime = Builder::new_multi_thread()
        .enable_all()
        .thread_name("sales-dashboard-io")
        .build()
        .map_err(|e| Error::Runtime {
            message: format!("Failed to create tokio runtime: {e}"),
        })?;

    // If another thread won the race its runtime is kept and ours dropped
    let _ = TOKIO_RUNTIME.set(runtime);
    TOKIO_RUNTIME.get().ok_or_else(|| Error::Runtime {
        message: "Tokio runtime unavailable".to_string(),
    })
}

/// Get a handle to the global tokio runtime
pub fn runtime_handle() -> Result<Handle> {
    Ok(shared_runtime()?.handle().clone())
}

/// Spawn a detached task with a name (for debugging)
pub fn spawn_named<F>(handle: &Handle, name: &'static str, future: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    tracing::trace!("Spawning tokio task: {}", name);
    handle.spawn(async move {
        future.await;
        tracing::trace!("Tokio task completed: {}", name);
    });
}
