use anyhow::Result;
use tracing::{info, info_span};

use crate::cli::RunArgs;
use crate::config;
use crate::pipeline;
use crate::summary::print_tables;
use crate::types::RunResult;

/// Execute the `run` subcommand: resolve the configuration and run the
/// full pipeline.
pub fn run_run(args: &RunArgs) -> Result<RunResult> {
    let resolved = config::resolve(args)?;
    let run_span = info_span!("run", output = %resolved.output_dir.display());
    let _guard = run_span.enter();
    info!(
        immigration = %resolved.immigration.display(),
        labels = %resolved.labels.display(),
        dry_run = args.dry_run,
        "starting warehouse build"
    );
    pipeline::run(&resolved, args.dry_run)
}

/// Execute the `tables` subcommand.
pub fn run_tables() -> Result<()> {
    print_tables();
    Ok(())
}
