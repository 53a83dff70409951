//! Existence check for the replica Jobs the controller must have created.

use tracing::{debug, warn};

use crate::cluster::ClusterOps;
use crate::crd::training_job::TrainingJobSpec;
use crate::error::{Error, NameList, Result};
use crate::harness::naming::expected_replicas;

/// Check that every replica resource derived from `spec` under `run_id`
/// exists.
///
/// Misses are collected across the whole set so the error names every absent
/// resource, not just the first; any other API failure is fatal immediately.
pub async fn verify_replica_resources(
    ops: &dyn ClusterOps,
    namespace: &str,
    job_name: &str,
    spec: &TrainingJobSpec,
    run_id: &str,
) -> Result<()> {
    let mut missing = Vec::new();
    for expected in expected_replicas(spec, run_id) {
        match ops.get_replica_job(namespace, &expected.name).await? {
            Some(_) => debug!(job = %job_name, replica = %expected.name, "replica job exists"),
            None => {
                warn!(job = %job_name, replica = %expected.name, "replica job missing");
                missing.push(format!(
                    "{} ({} replica {})",
                    expected.name, expected.replica_type, expected.index
                ));
            }
        }
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::ResourceVerification {
            name: job_name.to_string(),
            missing: NameList(missing),
        })
    }
}
