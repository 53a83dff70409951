//! trainjob-e2e: end-to-end verification harness for the TrainingJob
//! operator.
//!
//! Submits TrainingJobs to a live cluster and checks the operator creates,
//! completes, and garbage-collects them correctly.  Emits a TAP report line
//! per pass; exits non-zero when any pass fails.

use std::sync::Arc;

use clap::Parser;
use kube::Client;
use tracing::info;

use trainjob_e2e::cluster::KubeCluster;
use trainjob_e2e::harness::runner::TestRunner;
use trainjob_e2e::harness::{HarnessConfig, DEFAULT_IMAGE};

#[derive(Parser, Debug)]
#[command(
    name = "trainjob-e2e",
    about = "End-to-end verification harness for the TrainingJob operator"
)]
struct Args {
    /// Container image run by every replica of the submitted TrainingJob.
    #[arg(long, default_value = DEFAULT_IMAGE, env = "E2E_IMAGE")]
    image: String,

    /// Number of independent verification passes to run.
    #[arg(long, default_value_t = 1, env = "E2E_REPEATS")]
    repeats: u32,

    /// Namespace the TrainingJob is submitted to.
    #[arg(long, default_value = "default", env = "E2E_NAMESPACE")]
    namespace: String,

    /// Log format: "text" for human-readable, "json" for structured.
    #[arg(long, default_value = "text", env = "LOG_FORMAT")]
    log_format: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,kube=warn,hyper=warn,tower=warn".into());

    // Logs go to stderr; stdout carries only the TAP report.
    if args.log_format == "json" {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let client = Client::try_default().await?;

    info!(
        image = %args.image,
        repeats = args.repeats,
        ns = %args.namespace,
        "starting trainjob-e2e"
    );

    let config = HarnessConfig {
        image: args.image,
        repeats: args.repeats,
        namespace: args.namespace,
        ..Default::default()
    };
    let runner = TestRunner::new(Arc::new(KubeCluster::new(client)), config);

    if !runner.run().await {
        std::process::exit(1);
    }
    Ok(())
}
