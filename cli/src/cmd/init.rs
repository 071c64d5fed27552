use atcrawl_core::{action, client, print_success};

use super::{GlobalArgs, SubcmdResult};
use crate::{config, util};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Contest id, e.g. abc334
    #[arg()] // positional argument
    pub contest: String,
}

pub async fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let cfg = config::load(global_args)?;
    let session = client::open_session(&config::session_options(&cfg)?).await?;
    let ws = util::current_workspace();

    let catalog = action::init_contest(&session, &args.contest, &ws).await?;
    print_success!(
        "Successfully initialized {} with {} tasks (path: {})",
        catalog.contest,
        catalog.tasks.len(),
        ws.contest_dir(&catalog.contest).display()
    );
    Ok(())
}
