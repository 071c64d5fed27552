use anyhow::bail;
use atcrawl_core::{action, print_success};
use colored::Colorize as _;

use super::{GlobalArgs, SubcmdResult};
use crate::{config, util};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Contest id, e.g. abc334
    #[arg()] // positional argument
    pub contest: String,

    /// Only this task (letter or task key)
    #[arg(short, long, value_parser = util::parse_task_prefix)]
    pub task: Option<char>,
}

pub async fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let cfg = config::load(global_args)?;
    let ws = util::current_workspace();

    let summary = action::verify(&ws, &args.contest, args.task, &cfg.test).await?;
    if summary.programs == 0 {
        log::warn!(
            "No source file matched any `test.command` pattern in {}",
            ws.contest_dir(&args.contest.to_lowercase()).display()
        );
        return Ok(());
    }
    if !summary.is_all_passed() {
        bail!(
            "{} of {} testcases failed, {} of {} programs did not compile",
            summary.failed_testcases.to_string().red(),
            summary.testcases,
            summary.compile_errors.to_string().red(),
            summary.programs,
        );
    }
    print_success!(
        "All {} testcases of {} programs passed",
        summary.testcases,
        summary.programs
    );
    Ok(())
}
