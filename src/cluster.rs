//! The slice of the Kubernetes API the harness consumes.
//!
//! Abstracted behind a trait so scenario tests can substitute a scriptable
//! in-memory cluster; the production implementation wraps `kube::Api`.

use k8s_openapi::api::batch::v1::Job;
use kube::api::{Api, DeleteParams, PostParams};
use kube::Client;

use crate::crd::training_job::TrainingJob;

/// True when the error is a Kubernetes 404 for the requested resource.
pub fn is_not_found(err: &kube::Error) -> bool {
    matches!(err, kube::Error::Api(resp) if resp.code == 404)
}

/// Orchestration API surface used by a verification pass.
///
/// Methods return `kube::Error` directly; each phase decides which errors
/// are fatal and which are retryable.
#[async_trait::async_trait]
pub trait ClusterOps: Send + Sync {
    /// Submit a TrainingJob; returns the accepted resource.
    async fn create_training_job(
        &self,
        namespace: &str,
        job: &TrainingJob,
    ) -> Result<TrainingJob, kube::Error>;

    /// Fetch a TrainingJob by name.
    async fn get_training_job(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<TrainingJob, kube::Error>;

    /// Delete a TrainingJob by name.
    async fn delete_training_job(&self, namespace: &str, name: &str) -> Result<(), kube::Error>;

    /// Fetch the batch Job backing one replica; `Ok(None)` when it does not
    /// exist.
    async fn get_replica_job(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<Job>, kube::Error>;
}

/// Production implementation backed by a kube client.
pub struct KubeCluster {
    client: Client,
}

impl KubeCluster {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn training_jobs(&self, namespace: &str) -> Api<TrainingJob> {
        Api::namespaced(self.client.clone(), namespace)
    }

    fn jobs(&self, namespace: &str) -> Api<Job> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

#[async_trait::async_trait]
impl ClusterOps for KubeCluster {
    async fn create_training_job(
        &self,
        namespace: &str,
        job: &TrainingJob,
    ) -> Result<TrainingJob, kube::Error> {
        self.training_jobs(namespace)
            .create(&PostParams::default(), job)
            .await
    }

    async fn get_training_job(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<TrainingJob, kube::Error> {
        self.training_jobs(namespace).get(name).await
    }

    async fn delete_training_job(&self, namespace: &str, name: &str) -> Result<(), kube::Error> {
        self.training_jobs(namespace)
            .delete(name, &DeleteParams::default())
            .await
            .map(|_| ())
    }

    async fn get_replica_job(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<Job>, kube::Error> {
        match self.jobs(namespace).get(name).await {
            Ok(job) => Ok(Some(job)),
            Err(err) if is_not_found(&err) => Ok(None),
            Err(err) => Err(err),
        }
    }
}
