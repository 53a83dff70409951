//! One verification pass: submit → poll → verify → delete-verify.

use std::time::Duration;

pub mod completion;
pub mod gc;
pub mod naming;
pub mod runner;
pub mod spec_builder;
pub mod submit;
pub mod verify;

/// Container image the submitted TrainingJob runs when none is configured.
pub const DEFAULT_IMAGE: &str = "gcr.io/cloud-ml-dev/tf_smoke_cmle:latest";

/// Immutable configuration for a harness run, built once in `main` and handed
/// to the [`runner::TestRunner`].
#[derive(Clone, Debug)]
pub struct HarnessConfig {
    /// Image run by every replica of the submitted TrainingJob.
    pub image: String,
    /// Number of independent passes to run.
    pub repeats: u32,
    /// Namespace the TrainingJob is submitted to.
    pub namespace: String,
    /// How long to wait for the job to reach a terminal state.
    pub completion_timeout: Duration,
    /// How long to wait for replica Jobs to be garbage collected after the
    /// parent is deleted.
    pub gc_timeout: Duration,
    /// Delay between status checks in both polling phases.
    pub poll_interval: Duration,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            image: DEFAULT_IMAGE.to_string(),
            repeats: 1,
            namespace: "default".to_string(),
            completion_timeout: Duration::from_secs(120),
            gc_timeout: Duration::from_secs(300),
            poll_interval: Duration::from_secs(5),
        }
    }
}
