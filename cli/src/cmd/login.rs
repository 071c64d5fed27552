use atcrawl_core::{action, print_success};

use super::{GlobalArgs, SubcmdResult};
use crate::{config, util};

#[derive(Debug, clap::Args)]
pub struct Args {}

pub async fn exec(_: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let cfg = config::load(global_args)?;
    let opts = config::session_options(&cfg)?;

    if action::login(&opts).await? {
        print_success!(
            "Successfully logged in to AtCoder (session: {})",
            util::replace_homedir_to_tilde(&opts.cookie_file).display()
        );
    } else {
        print_success!(
            "Already logged in (session: {})",
            util::replace_homedir_to_tilde(&opts.cookie_file).display()
        );
    }
    Ok(())
}
