use k8s_openapi::api::core::v1::PodTemplateSpec;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ── Spec sub-types ────────────────────────────────────────────────────────────

/// Role a set of replicas plays in the distributed training topology.
///
/// The wire form is the uppercase tag; the lowercase form is the leading
/// component of every replica resource name the controller derives.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReplicaType {
    Master,
    Worker,
    Ps,
}

impl ReplicaType {
    /// Lowercase form used when naming the replica's backing resources.
    pub fn as_name_component(&self) -> &'static str {
        match self {
            Self::Master => "master",
            Self::Worker => "worker",
            Self::Ps => "ps",
        }
    }
}

impl std::fmt::Display for ReplicaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Master => "MASTER",
            Self::Worker => "WORKER",
            Self::Ps => "PS",
        };
        write!(f, "{s}")
    }
}

/// ReplicaSpec describes one homogeneous group of replicas: how many, which
/// role they play, which port they serve, and the pod template they run.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReplicaSpec {
    pub replica_type: ReplicaType,

    #[serde(default = "default_replicas")]
    pub replicas: i32,

    #[serde(default = "default_port")]
    pub port: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PodTemplateSpec>,
}

fn default_replicas() -> i32 {
    1
}

fn default_port() -> i32 {
    2222
}

// ── CRD ───────────────────────────────────────────────────────────────────────

/// TrainingJob is the Schema for the trainingjobs API.
#[derive(CustomResource, Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "kubetrain.io",
    version = "v1alpha1",
    kind = "TrainingJob",
    shortname = "tjob",
    namespaced,
    status = "TrainingJobStatus",
    printcolumn = r#"{"name": "State", "type": "string", "jsonPath": ".status.state"}"#,
    printcolumn = r#"{"name": "Run", "type": "string", "jsonPath": ".status.runId"}"#,
    printcolumn = r#"{"name": "Age", "type": "date", "jsonPath": ".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct TrainingJobSpec {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub replica_specs: Vec<ReplicaSpec>,
}

// ── Status ────────────────────────────────────────────────────────────────────

/// JobState is the lifecycle state the controller reports for a TrainingJob.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub enum JobState {
    Pending,
    Running,
    Succeeded,
    Failed,
    /// Any state this harness does not recognize; never terminal.
    #[serde(other)]
    Unknown,
}

impl JobState {
    /// States after which the controller performs no further progress.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

impl std::fmt::Display for JobState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "Pending",
            Self::Running => "Running",
            Self::Succeeded => "Succeeded",
            Self::Failed => "Failed",
            Self::Unknown => "Unknown",
        };
        write!(f, "{s}")
    }
}

/// TrainingJobStatus defines the observed state of TrainingJob.
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrainingJobStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<JobState>,

    /// Assigned by the controller when it starts reconciling; replica
    /// resource names embed it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
