//! Construction of the TrainingJob each verification pass submits.
//!
//! The workload is the GPU smoke job: a single MASTER replica whose container
//! needs the NVIDIA device nodes mounted from the host and a privileged
//! security context to open them.

use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::{
    Container, EnvVar, HostPathVolumeSource, PodSpec, PodTemplateSpec, SecurityContext, Volume,
    VolumeMount,
};
use rand::Rng;

use crate::crd::training_job::{ReplicaSpec, ReplicaType, TrainingJob, TrainingJobSpec};
use crate::harness::HarnessConfig;

/// Label applied to every job the harness submits, so test resources are
/// identifiable (and sweepable) in a shared cluster.
pub const TEST_LABEL: &str = "e2e.kubetrain.io/test";

const NVIDIA_DEVICES: [&str; 3] = ["/dev/nvidia0", "/dev/nvidiactl", "/dev/nvidia-uvm"];

/// Random lowercase-alphanumeric suffix for generated job names; repeated
/// passes must not collide on the fixed name prefix.
pub fn rand_suffix(len: usize) -> String {
    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}

/// Build the TrainingJob for one pass: one MASTER replica on port 2222
/// running the configured image.
pub fn build_training_job(name: &str, config: &HarnessConfig) -> TrainingJob {
    let mut job = TrainingJob::new(
        name,
        TrainingJobSpec {
            replica_specs: vec![ReplicaSpec {
                replica_type: ReplicaType::Master,
                replicas: 1,
                port: 2222,
                template: Some(gpu_pod_template(&config.image)),
            }],
        },
    );
    job.metadata.labels = Some(BTreeMap::from([(TEST_LABEL.to_string(), String::new())]));
    job
}

fn gpu_pod_template(image: &str) -> PodTemplateSpec {
    PodTemplateSpec {
        spec: Some(PodSpec {
            containers: vec![Container {
                name: "tensorflow".to_string(),
                image: Some(image.to_string()),
                args: Some(vec!["--gpu".to_string()]),
                env: Some(vec![env("LD_LIBRARY_PATH", "/usr/local/cuda/lib64")]),
                security_context: Some(SecurityContext {
                    privileged: Some(true),
                    ..Default::default()
                }),
                volume_mounts: Some(nvidia_volume_mounts()),
                ..Default::default()
            }],
            volumes: Some(nvidia_volumes()),
            restart_policy: Some("OnFailure".to_string()),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Host-path volumes for the NVIDIA device nodes, one per device.
fn nvidia_volumes() -> Vec<Volume> {
    NVIDIA_DEVICES
        .iter()
        .map(|path| Volume {
            name: device_volume_name(path),
            host_path: Some(HostPathVolumeSource {
                path: path.to_string(),
                ..Default::default()
            }),
            ..Default::default()
        })
        .collect()
}

/// Volume mounts matching [`nvidia_volumes`]; the device appears at the same
/// path inside the container.
fn nvidia_volume_mounts() -> Vec<VolumeMount> {
    NVIDIA_DEVICES
        .iter()
        .map(|path| VolumeMount {
            name: device_volume_name(path),
            mount_path: path.to_string(),
            ..Default::default()
        })
        .collect()
}

/// `/dev/nvidia-uvm` → `dev-nvidia-uvm`.
fn device_volume_name(path: &str) -> String {
    path.trim_start_matches('/').replace('/', "-")
}

/// Shorthand for a plain-value `EnvVar`.
fn env(name: &str, value: impl Into<String>) -> EnvVar {
    EnvVar {
        name: name.into(),
        value: Some(value.into()),
        ..Default::default()
    }
}
