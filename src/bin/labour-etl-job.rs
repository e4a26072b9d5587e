//! Partitioned pipeline, run as an orchestrated batch job.
//!
//! The orchestrator passes `--JOB_NAME <name>` and may append arguments of its own,
//! which are ignored.

use anyhow::Result;
use clap::Parser;
use labour_etl::logging::init_logging;
use labour_etl::pipeline::run_distributed;
use labour_etl::{EtlConfig, Job, LocalStore, Runner};
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Parser)]
#[command(name = "labour-etl-job", version, about = "Write partitioned labour-market Parquet")]
struct Args {
    /// Name under which the orchestrator tracks this run.
    #[arg(long = "JOB_NAME")]
    job_name: String,

    /// Directory holding one sub-directory per bucket for `s3://` locations.
    #[arg(long, default_value = ".")]
    bucket_root: PathBuf,

    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    passthrough: Vec<String>,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();
    if !args.passthrough.is_empty() {
        debug!(ignored = ?args.passthrough, "ignoring orchestrator arguments");
    }

    let mut job = Job::init(args.job_name);
    let store = LocalStore::new(args.bucket_root);
    run_distributed(&store, &Runner::default(), &EtlConfig::distributed(), &mut job)?;
    Ok(())
}
