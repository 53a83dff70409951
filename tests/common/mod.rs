//! Shared test fixture: a scriptable in-memory stand-in for the cluster API.
//!
//! Statuses pushed with [`FakeCluster::push_status`] are consumed one per
//! successful get; the last one is sticky once the script runs out, which
//! models a controller that has stopped making progress.  Replica jobs are
//! registered with a sighting budget: how many existence checks still see
//! the job before it reads as deleted (`u32::MAX` = never collected).

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use k8s_openapi::api::batch::v1::Job;
use kube::api::ObjectMeta;
use kube::core::ErrorResponse;

use trainjob_e2e::cluster::ClusterOps;
use trainjob_e2e::crd::training_job::{
    JobState, ReplicaSpec, ReplicaType, TrainingJob, TrainingJobSpec, TrainingJobStatus,
};

#[derive(Default)]
pub struct FakeCluster {
    jobs: Mutex<HashMap<String, TrainingJob>>,
    status_script: Mutex<VecDeque<TrainingJobStatus>>,
    sticky_status: Mutex<Option<TrainingJobStatus>>,
    transient_failures: Mutex<u32>,
    replica_check_failures: Mutex<u32>,
    replica_jobs: Mutex<BTreeMap<String, u32>>,
    deleted: Mutex<Vec<String>>,
    reject_create: bool,
    reject_delete: bool,
}

impl FakeCluster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every create is rejected with a 409, as on a name collision.
    pub fn rejecting_create(mut self) -> Self {
        self.reject_create = true;
        self
    }

    /// Every delete is rejected with a 403.
    pub fn rejecting_delete(mut self) -> Self {
        self.reject_delete = true;
        self
    }

    /// Register a TrainingJob as already present, bypassing create.
    pub fn seed(&self, name: &str) {
        let job = TrainingJob::new(name, TrainingJobSpec { replica_specs: vec![] });
        self.jobs.lock().unwrap().insert(name.to_string(), job);
    }

    /// Queue the status the next successful get will report.
    pub fn push_status(&self, status: TrainingJobStatus) {
        self.status_script.lock().unwrap().push_back(status);
    }

    /// Fail the next `n` gets with a 503 (`u32::MAX` = fail every get).
    pub fn fail_next_gets(&self, n: u32) {
        *self.transient_failures.lock().unwrap() = n;
    }

    /// Fail the next `n` replica existence checks with a 503.
    pub fn fail_next_replica_checks(&self, n: u32) {
        *self.replica_check_failures.lock().unwrap() = n;
    }

    /// Register a replica Job visible for `sightings` more existence checks.
    pub fn add_replica_job(&self, name: &str, sightings: u32) {
        self.replica_jobs
            .lock()
            .unwrap()
            .insert(name.to_string(), sightings);
    }

    /// Names of TrainingJobs deleted so far, in order.
    pub fn deleted_jobs(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }

    fn next_status(&self) -> Option<TrainingJobStatus> {
        let mut script = self.status_script.lock().unwrap();
        if let Some(status) = script.pop_front() {
            *self.sticky_status.lock().unwrap() = Some(status.clone());
            Some(status)
        } else {
            self.sticky_status.lock().unwrap().clone()
        }
    }
}

#[async_trait]
impl ClusterOps for FakeCluster {
    async fn create_training_job(
        &self,
        _namespace: &str,
        job: &TrainingJob,
    ) -> Result<TrainingJob, kube::Error> {
        let name = job.metadata.name.clone().unwrap_or_default();
        if self.reject_create {
            return Err(api_error(
                409,
                "AlreadyExists",
                format!("trainingjobs.kubetrain.io \"{name}\" already exists"),
            ));
        }
        self.jobs.lock().unwrap().insert(name, job.clone());
        Ok(job.clone())
    }

    async fn get_training_job(
        &self,
        _namespace: &str,
        name: &str,
    ) -> Result<TrainingJob, kube::Error> {
        {
            let mut failures = self.transient_failures.lock().unwrap();
            if *failures > 0 {
                if *failures != u32::MAX {
                    *failures -= 1;
                }
                return Err(api_error(
                    503,
                    "ServiceUnavailable",
                    "apiserver overloaded".to_string(),
                ));
            }
        }
        let mut job = self
            .jobs
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| {
                api_error(
                    404,
                    "NotFound",
                    format!("trainingjobs.kubetrain.io \"{name}\" not found"),
                )
            })?;
        job.status = self.next_status();
        Ok(job)
    }

    async fn delete_training_job(&self, _namespace: &str, name: &str) -> Result<(), kube::Error> {
        if self.reject_delete {
            return Err(api_error(
                403,
                "Forbidden",
                format!("trainingjobs.kubetrain.io \"{name}\" is protected"),
            ));
        }
        self.jobs.lock().unwrap().remove(name);
        self.deleted.lock().unwrap().push(name.to_string());
        Ok(())
    }

    async fn get_replica_job(
        &self,
        _namespace: &str,
        name: &str,
    ) -> Result<Option<Job>, kube::Error> {
        {
            let mut failures = self.replica_check_failures.lock().unwrap();
            if *failures > 0 {
                *failures -= 1;
                return Err(api_error(
                    503,
                    "ServiceUnavailable",
                    "apiserver overloaded".to_string(),
                ));
            }
        }
        let mut replicas = self.replica_jobs.lock().unwrap();
        match replicas.get(name).copied() {
            None => Ok(None),
            Some(0) => {
                replicas.remove(name);
                Ok(None)
            }
            Some(sightings) => {
                if sightings != u32::MAX {
                    replicas.insert(name.to_string(), sightings - 1);
                }
                Ok(Some(job_stub(name)))
            }
        }
    }
}

// ── Status and spec helpers ─────────────────────────────────────────────────

pub fn running() -> TrainingJobStatus {
    status(JobState::Running, None)
}

pub fn succeeded(run_id: Option<&str>) -> TrainingJobStatus {
    status(JobState::Succeeded, run_id)
}

pub fn failed(run_id: Option<&str>) -> TrainingJobStatus {
    status(JobState::Failed, run_id)
}

pub fn status(state: JobState, run_id: Option<&str>) -> TrainingJobStatus {
    TrainingJobStatus {
        state: Some(state),
        run_id: run_id.map(String::from),
        message: None,
    }
}

/// Build a spec with one replica group per `(role, count)` entry.
pub fn spec_of(groups: &[(ReplicaType, i32)]) -> TrainingJobSpec {
    TrainingJobSpec {
        replica_specs: groups
            .iter()
            .map(|&(replica_type, replicas)| ReplicaSpec {
                replica_type,
                replicas,
                port: 2222,
                template: None,
            })
            .collect(),
    }
}

fn api_error(code: u16, reason: &str, message: String) -> kube::Error {
    kube::Error::Api(ErrorResponse {
        status: "Failure".to_string(),
        message,
        reason: reason.to_string(),
        code,
    })
}

fn job_stub(name: &str) -> Job {
    Job {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            ..Default::default()
        },
        ..Default::default()
    }
}
