//! Fault containment: panics and background-task failures.

use std::future::Future;
use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::config::TaskFailurePolicy;
use crate::lifecycle::shutdown::{Shutdown, ShutdownReason};

/// Treat an uncaught panic as a termination signal.
///
/// The hook chains to the previous one so the default backtrace output is
/// kept. Panics inside request handlers are caught by the runtime and do not
/// reach this hook; anything that does reach it means an invariant broke
/// somewhere the runtime cannot contain, so the process drains and exits.
pub fn install_panic_hook(shutdown: Arc<Shutdown>) {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        previous(info);
        tracing::error!(panic = %info, "Uncaught panic");
        shutdown.begin(ShutdownReason::Fault);
    }));
}

/// Spawn a background task whose failure is handled by policy.
///
/// An `Err` result is always logged with its originating task name. Under
/// [`TaskFailurePolicy::Log`] the process keeps running, matching the view
/// that background failures may come from non-critical work; under
/// [`TaskFailurePolicy::Shutdown`] the failure drains the process.
pub fn supervise<F, E>(
    name: &'static str,
    policy: TaskFailurePolicy,
    shutdown: Arc<Shutdown>,
    task: F,
) -> JoinHandle<()>
where
    F: Future<Output = Result<(), E>> + Send + 'static,
    E: std::fmt::Display + Send + 'static,
{
    tokio::spawn(async move {
        match task.await {
            Ok(()) => {
                tracing::debug!(task = name, "Background task finished");
            }
            Err(error) => {
                tracing::error!(task = name, error = %error, "Background task failed");
                if policy == TaskFailurePolicy::Shutdown {
                    shutdown.begin(ShutdownReason::Fault);
                }
            }
        }
    })
}
