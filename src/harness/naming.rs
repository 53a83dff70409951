//! Derivation of the replica resource names the controller materializes for
//! a TrainingJob.
//!
//! Both the creation check and the garbage-collection check build their
//! working set from [`expected_replicas`]; there is exactly one derivation
//! path, so the two phases can never disagree about which resources belong
//! to a run.

use crate::crd::training_job::{ReplicaType, TrainingJobSpec};

/// One replica resource the controller is expected to have created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedReplica {
    pub replica_type: ReplicaType,
    pub index: i32,
    pub name: String,
}

/// Name of the batch Job backing replica `index` of a replica group:
/// `<lowercased role>-<run id>-<index>`.
///
/// This format is the controller's contract and must match it byte for byte.
pub fn replica_resource_name(replica_type: ReplicaType, run_id: &str, index: i32) -> String {
    format!("{}-{}-{}", replica_type.as_name_component(), run_id, index)
}

/// Expand a TrainingJobSpec into every replica resource expected under
/// `run_id`: one entry per index in `[0, replicas)` per replica group.
pub fn expected_replicas(spec: &TrainingJobSpec, run_id: &str) -> Vec<ExpectedReplica> {
    let mut expected = Vec::new();
    for group in &spec.replica_specs {
        for index in 0..group.replicas {
            expected.push(ExpectedReplica {
                replica_type: group.replica_type,
                index,
                name: replica_resource_name(group.replica_type, run_id, index),
            });
        }
    }
    expected
}
