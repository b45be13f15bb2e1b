//! Bridge from host memory-pressure events to the cache monitor.
//!
//! The host environment delivers pressure as zero-argument events on a
//! channel at unpredictable times. The listener forwards each event to
//! the monitor — one clear pass per event — and exits when the sender
//! side is dropped at process teardown.

use std::sync::Arc;

use gallery_cache::MemoryPressureMonitor;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Spawn a task forwarding pressure events to the monitor.
///
/// Each received `()` triggers exactly one synchronous clear pass over
/// the monitor's registered caches. The task ends when `events` closes.
pub fn spawn_pressure_listener(
    monitor: Arc<MemoryPressureMonitor>,
    mut events: mpsc::Receiver<()>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while events.recv().await.is_some() {
            monitor.on_memory_pressure();
        }
        tracing::debug!("pressure event channel closed");
    })
}
