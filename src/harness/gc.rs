//! Deletion of the parent TrainingJob and convergence of the controller's
//! garbage collection.

use std::collections::BTreeSet;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::cluster::ClusterOps;
use crate::crd::training_job::TrainingJobSpec;
use crate::error::{Error, NameList, Result};
use crate::harness::naming::expected_replicas;
use crate::poll::{poll_until, PollOutcome};

/// Delete the TrainingJob and wait for every replica Job derived from `spec`
/// under `run_id` to disappear.
///
/// The pending set only shrinks: a name is removed once its absence is
/// confirmed, and transient query errors leave it in place for the next
/// tick.  Polling stops early when the set empties; on deadline the
/// survivors are reported by name.
pub async fn verify_garbage_collection(
    ops: &dyn ClusterOps,
    namespace: &str,
    job_name: &str,
    spec: &TrainingJobSpec,
    run_id: &str,
    timeout: Duration,
    interval: Duration,
) -> Result<()> {
    ops.delete_training_job(namespace, job_name)
        .await
        .map_err(|source| Error::Delete {
            name: job_name.to_string(),
            source,
        })?;
    info!(job = %job_name, "deleted TrainingJob; waiting for replica jobs to be collected");

    let pending: BTreeSet<String> = expected_replicas(spec, run_id)
        .into_iter()
        .map(|r| r.name)
        .collect();
    if pending.is_empty() {
        return Ok(());
    }
    let pending = Mutex::new(pending);
    let pending_ref = &pending;

    let outcome = poll_until(timeout, interval, move || async move {
        // Iterate over a snapshot; removals are applied after the pass so
        // set mutation can never skip an entry.
        let snapshot: Vec<String> = pending_ref.lock().await.iter().cloned().collect();
        let mut confirmed = Vec::new();
        for name in &snapshot {
            match ops.get_replica_job(namespace, name).await {
                Ok(None) => confirmed.push(name.clone()),
                Ok(Some(_)) => info!(replica = %name, "replica job still exists"),
                Err(err) => warn!(replica = %name, error = %err, "failed to check replica job"),
            }
        }
        let mut pending = pending_ref.lock().await;
        for name in confirmed {
            pending.remove(&name);
        }
        pending.is_empty()
    })
    .await;

    match outcome {
        PollOutcome::Satisfied => {
            info!(job = %job_name, "all replica jobs garbage collected");
            Ok(())
        }
        PollOutcome::DeadlineExceeded => Err(Error::IncompleteGarbageCollection {
            name: job_name.to_string(),
            remaining: NameList(pending.into_inner().into_iter().collect()),
        }),
    }
}
