//! Orchestration of verification passes and the TAP report.

use std::sync::Arc;

use kube::ResourceExt;
use tracing::{info, warn};

use crate::cluster::ClusterOps;
use crate::error::{Error, Result};
use crate::harness::completion::{wait_for_completion, CompletionOutcome};
use crate::harness::gc::verify_garbage_collection;
use crate::harness::spec_builder::{build_training_job, rand_suffix};
use crate::harness::submit::submit;
use crate::harness::verify::verify_replica_resources;
use crate::harness::HarnessConfig;

/// Runs the configured number of verification passes against a cluster.
///
/// Each pass owns a freshly named TrainingJob and shares no state with other
/// passes, so the only cross-pass coupling is the cluster itself.
pub struct TestRunner {
    ops: Arc<dyn ClusterOps>,
    config: HarnessConfig,
}

impl TestRunner {
    pub fn new(ops: Arc<dyn ClusterOps>, config: HarnessConfig) -> Self {
        Self { ops, config }
    }

    /// Run every configured pass, printing a TAP report per pass.  Returns
    /// true when all passes reported ok.
    pub async fn run(&self) -> bool {
        let mut all_ok = true;
        for pass in 1..=self.config.repeats {
            info!(pass, repeats = self.config.repeats, "starting verification pass");
            let result = self.run_once().await;
            if let Err(ref err) = result {
                warn!(pass, error = %err, "verification pass failed");
                all_ok = false;
            }
            println!("1..1");
            println!("{}", tap_report(&result));
        }
        all_ok
    }

    /// One full pass: submit a fresh TrainingJob, wait for completion, check
    /// the replica Jobs exist, then delete and wait for garbage collection.
    /// Returns the job name on success.
    pub async fn run_once(&self) -> Result<String> {
        let ops = &*self.ops;
        let ns = &self.config.namespace;

        let name = format!("e2e-trainjob-{}", rand_suffix(4));
        let job = build_training_job(&name, &self.config);
        let accepted = submit(ops, ns, &job).await?;

        let (observed, outcome) = wait_for_completion(
            ops,
            ns,
            &name,
            self.config.completion_timeout,
            self.config.poll_interval,
        )
        .await;
        let observed = observed.ok_or_else(|| Error::ResourceUnavailable(name.clone()))?;
        if outcome != CompletionOutcome::Succeeded {
            return Err(Error::JobDidNotSucceed {
                name,
                outcome,
                snapshot: pretty(&observed),
            });
        }

        let run_id = observed
            .status
            .as_ref()
            .and_then(|s| s.run_id.as_deref())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| Error::MissingRunId(name.clone()))?
            .to_string();

        verify_replica_resources(ops, ns, &name, &accepted.spec, &run_id).await?;
        verify_garbage_collection(
            ops,
            ns,
            &name,
            &accepted.spec,
            &run_id,
            self.config.gc_timeout,
            self.config.poll_interval,
        )
        .await?;

        Ok(accepted.name_any())
    }
}

/// Format the TAP result line for one pass.
pub fn tap_report(result: &Result<String>) -> String {
    match result {
        Ok(name) => format!("ok 1 - Successfully ran TrainingJob {name}"),
        Err(err) => format!("not ok 1 - Running TrainingJob failed: {err}"),
    }
}

fn pretty(job: &crate::crd::training_job::TrainingJob) -> String {
    serde_json::to_string_pretty(job).unwrap_or_else(|err| format!("<unprintable: {err}>"))
}
