//! End-to-end verification harness for the TrainingJob operator.
//!
//! A pass submits a TrainingJob custom resource, waits for the operator to
//! drive it to a terminal state, checks that the batch Job backing every
//! replica was created, then deletes the TrainingJob and waits for all of
//! those replica Jobs to be garbage collected.  The binary repeats the pass
//! a configured number of times, prints a minimal TAP
//! (<https://testanything.org/>) report line per pass, and exits non-zero if
//! any pass failed, so it can run as a helm test or CI gate against a live
//! cluster.

pub mod cluster;
pub mod crd;
pub mod error;
pub mod harness;
pub mod poll;
