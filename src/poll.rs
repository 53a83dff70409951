//! Bounded polling primitive shared by the completion and garbage-collection
//! phases.

use std::future::Future;
use std::time::{Duration, Instant};

/// How a bounded poll ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// The condition reported done before the deadline.
    Satisfied,
    /// The deadline elapsed with the condition still unmet.
    DeadlineExceeded,
}

/// Drive `tick` on a fixed cadence until it returns true or `timeout` elapses.
///
/// The first tick runs immediately and a satisfied tick returns without
/// sleeping.  The deadline is only checked between ticks, so total runtime is
/// bounded by `timeout` plus one interval and one tick.
pub async fn poll_until<F, Fut>(timeout: Duration, interval: Duration, mut tick: F) -> PollOutcome
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let start = Instant::now();
    loop {
        if tick().await {
            return PollOutcome::Satisfied;
        }
        if start.elapsed() >= timeout {
            return PollOutcome::DeadlineExceeded;
        }
        tokio::time::sleep(interval).await;
    }
}
