use std::fmt;

use thiserror::Error;

use crate::harness::completion::CompletionOutcome;

/// Comma-separated list of resource names, for error messages that must
/// identify every offending resource.
#[derive(Debug)]
pub struct NameList(pub Vec<String>);

impl fmt::Display for NameList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(", "))
    }
}

#[derive(Error, Debug)]
pub enum Error {
    /// The API rejected the TrainingJob submission (name collision,
    /// validation failure).  Aborts the pass, no retry.
    #[error("failed to submit TrainingJob {name}: {source}")]
    Submission {
        name: String,
        #[source]
        source: kube::Error,
    },

    /// Every status fetch failed before the completion deadline, so there is
    /// no resource to inspect.
    #[error("failed to get TrainingJob {0}")]
    ResourceUnavailable(String),

    /// The job finished in Failed, or never reached a terminal state before
    /// the deadline.  Carries the last observed resource for diagnostics.
    #[error("TrainingJob {name} did not succeed ({outcome}); last observed:\n{snapshot}")]
    JobDidNotSucceed {
        name: String,
        outcome: CompletionOutcome,
        snapshot: String,
    },

    /// The controller accepted the job but never assigned a run id, so
    /// replica resource names cannot be derived.
    #[error("TrainingJob {0} reached a terminal state without a run id")]
    MissingRunId(String),

    /// One or more replica Jobs the controller should have created do not
    /// exist.
    #[error("TrainingJob {name} is missing replica resources: {missing}")]
    ResourceVerification { name: String, missing: NameList },

    /// Deleting the parent TrainingJob failed; garbage collection cannot be
    /// verified.
    #[error("failed to delete TrainingJob {name}: {source}")]
    Delete {
        name: String,
        #[source]
        source: kube::Error,
    },

    /// Replica Jobs survived past the garbage-collection deadline.
    #[error(
        "TrainingJob {name} replica resources still present after the deletion deadline: {remaining}"
    )]
    IncompleteGarbageCollection { name: String, remaining: NameList },

    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),
}

/// Short alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
