use atcrawl_core::{action, print_success};

use super::{GlobalArgs, SubcmdResult};
use crate::config;

#[derive(Debug, clap::Args)]
pub struct Args {}

pub fn exec(_: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let cfg = config::load(global_args)?;
    let opts = config::session_options(&cfg)?;

    if action::logout(&opts)? {
        print_success!("Successfully logged out from {}", "AtCoder");
    } else {
        log::info!("No stored session; nothing to do");
    }
    Ok(())
}
