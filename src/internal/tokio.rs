use std::future::Future;

use tokio::task::JoinHandle;
use tracing::Instrument;

/// Spawns a task whose events are recorded under a span carrying the task's name.
pub fn spawn_named<F, T>(name: &'static str, future: F) -> JoinHandle<T>
where
    F: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(future.instrument(tracing::debug_span!("task", name)))
}
