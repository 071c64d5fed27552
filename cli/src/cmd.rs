pub mod collect;
pub mod init;
pub mod login;
pub mod logout;
pub mod verify;

use std::path::PathBuf;

#[derive(Debug, clap::Parser)]
#[command(author, version, about, long_about = None)]
pub struct GlobalArgs {
    #[command(subcommand)]
    pub subcmd: Subcommand,

    /// Config file; defaults to `<config_dir>/atcrawl/atcrawl.toml`
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Session cookie file
    #[arg(long, global = true)]
    pub cookie_file: Option<PathBuf>,

    /// Minimum interval between two requests, in milliseconds
    #[arg(long, global = true)]
    pub interval_ms: Option<u64>,
}

#[derive(Debug, clap::Subcommand)]
pub enum Subcommand {
    Login(login::Args),
    Logout(logout::Args),
    Init(init::Args),

    #[command(alias("c"))]
    Collect(collect::Args),

    #[command(alias("v"))]
    Verify(verify::Args),
}

pub type SubcmdResult = anyhow::Result<()>;

impl GlobalArgs {
    pub async fn exec_subcmd(&self) -> SubcmdResult {
        use Subcommand::*;
        match &self.subcmd {
            Login(args) => login::exec(args, self).await,
            Logout(args) => logout::exec(args, self),
            Init(args) => init::exec(args, self).await,
            Collect(args) => collect::exec(args, self).await,
            Verify(args) => verify::exec(args, self).await,
        }
    }
}
