//! Bounded wait for a submitted TrainingJob to reach a terminal state.

use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::cluster::ClusterOps;
use crate::crd::training_job::{JobState, TrainingJob};
use crate::poll::{poll_until, PollOutcome};

/// Terminal classification of a completion poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    Succeeded,
    Failed,
    /// The deadline elapsed while the job was still non-terminal.
    TimedOut,
}

impl std::fmt::Display for CompletionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Succeeded => "Succeeded",
            Self::Failed => "Failed",
            Self::TimedOut => "TimedOut",
        };
        write!(f, "{s}")
    }
}

/// Poll the TrainingJob `name` until its state is terminal or `timeout`
/// elapses.
///
/// Fetch errors are logged and retried on the next tick; only the deadline
/// bounds how long the poller keeps trying.  Returns the last successfully
/// fetched resource (`None` when every fetch failed) together with the
/// terminal classification.  The poller never sleeps after observing a
/// terminal state.
pub async fn wait_for_completion(
    ops: &dyn ClusterOps,
    namespace: &str,
    name: &str,
    timeout: Duration,
    interval: Duration,
) -> (Option<TrainingJob>, CompletionOutcome) {
    let observed: Mutex<Option<TrainingJob>> = Mutex::new(None);
    let observed_ref = &observed;

    let outcome = poll_until(timeout, interval, move || async move {
        match ops.get_training_job(namespace, name).await {
            Ok(job) => {
                let state = job.status.as_ref().and_then(|s| s.state);
                *observed_ref.lock().await = Some(job);
                match state {
                    Some(s) if s.is_terminal() => true,
                    _ => {
                        info!(job = %name, state = ?state, "waiting for TrainingJob to finish");
                        false
                    }
                }
            }
            Err(err) => {
                warn!(job = %name, error = %err, "failed to get TrainingJob");
                false
            }
        }
    })
    .await;

    let observed = observed.into_inner();
    let outcome = match outcome {
        PollOutcome::DeadlineExceeded => CompletionOutcome::TimedOut,
        PollOutcome::Satisfied => {
            // Satisfied only happens on a terminal observation.
            match observed.as_ref().and_then(|j| j.status.as_ref()?.state) {
                Some(JobState::Succeeded) => CompletionOutcome::Succeeded,
                _ => CompletionOutcome::Failed,
            }
        }
    };
    (observed, outcome)
}
