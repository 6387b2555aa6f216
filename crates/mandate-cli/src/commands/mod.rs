//! CLI command implementations.

use tokio::task::JoinHandle;
use tracing::warn;

pub mod check;
pub mod compare;
pub mod config;
pub mod dashboard;
pub mod portfolio;
pub mod rules;

pub use check::CheckArgs;
pub use compare::CompareArgs;
pub use config::ConfigArgs;
pub use dashboard::DashboardArgs;
pub use portfolio::PortfolioArgs;
pub use rules::RulesArgs;

/// Waits for a progress watcher to finish once its sender is dropped.
///
/// Returns `false` when the watcher panicked or was cancelled.
pub(crate) async fn join_watcher(task: JoinHandle<()>) -> bool {
    match task.await {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "Progress watcher stopped abnormally");
            false
        }
    }
}
