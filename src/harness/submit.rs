//! Submission of the TrainingJob under test.

use kube::ResourceExt;
use tracing::info;

use crate::cluster::ClusterOps;
use crate::crd::training_job::TrainingJob;
use crate::error::{Error, Result};

/// Submit `job` to the cluster.  A rejection is fatal for the pass; there is
/// no retry.  Returns the accepted resource.
pub async fn submit(
    ops: &dyn ClusterOps,
    namespace: &str,
    job: &TrainingJob,
) -> Result<TrainingJob> {
    let name = job.name_any();
    let accepted = ops
        .create_training_job(namespace, job)
        .await
        .map_err(|source| Error::Submission {
            name: name.clone(),
            source,
        })?;
    info!(job = %name, %namespace, "submitted TrainingJob");
    Ok(accepted)
}
