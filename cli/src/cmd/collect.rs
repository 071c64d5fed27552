use atcrawl_core::{action, client, print_success};
use atcrawl_webclient::SubmissionQuery;

use super::{GlobalArgs, SubcmdResult};
use crate::{config, util};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Contest id, e.g. abc334
    #[arg()] // positional argument
    pub contest: String,

    /// Only submissions to this task (letter or task key)
    #[arg(short, long, value_parser = util::parse_task_prefix)]
    pub task: Option<char>,

    /// Only submissions by this user
    #[arg(short, long)]
    pub user: Option<String>,

    /// Only submissions in this language, as labelled on the site
    #[arg(short, long)]
    pub lang: Option<String>,

    /// Only submissions with this judge status, e.g. AC
    #[arg(short, long)]
    pub status: Option<String>,

    /// Sort field, e.g. created, score, source_length, time_consumption
    #[arg(long)]
    pub order_by: Option<String>,

    /// Sort in descending order (with --order-by)
    #[arg(long, requires = "order_by")]
    pub desc: bool,

    /// Maximum number of submissions; defaults to `collect.max_submissions`
    #[arg(short = 'n', long)]
    pub max: Option<usize>,
}

impl Args {
    fn query(&self) -> SubmissionQuery {
        SubmissionQuery {
            task: self.task.map(String::from).unwrap_or_default(),
            user: self.user.clone().unwrap_or_default(),
            language: self.lang.clone().unwrap_or_default(),
            status: self.status.clone().unwrap_or_default(),
            order_by: self.order_by.clone(),
            descending: self.desc,
            ..SubmissionQuery::new()
        }
    }
}

pub async fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let cfg = config::load(global_args)?;
    let session = client::open_session(&config::session_options(&cfg)?).await?;
    let ws = util::current_workspace();
    let max = args.max.unwrap_or(cfg.collect.max_submissions);

    let catalog = action::init_contest(&session, &args.contest, &ws).await?;
    let written = action::collect_submissions(
        &session,
        &catalog,
        &args.query(),
        max,
        &ws,
        &cfg.lang_suffix_mapper(),
    )
    .await?;

    for path in &written {
        log::debug!("Wrote {}", path.display());
    }
    print_success!(
        "Successfully collected {} submissions of {}",
        written.len(),
        catalog.contest
    );
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::cmd::{GlobalArgs, Subcommand};
    use clap::Parser as _;

    fn parse(argv: &[&str]) -> Args {
        let app = GlobalArgs::try_parse_from(argv).unwrap();
        match app.subcmd {
            Subcommand::Collect(args) => args,
            other => panic!("unexpected subcommand: {:?}", other),
        }
    }

    #[test]
    fn query_from_flags() {
        let args = parse(&[
            "atcrawl", "collect", "abc334", "--task", "C", "--lang", "C++ (GCC 9.2.1)",
            "--status", "AC", "--order-by", "source_length", "-n", "5",
        ]);
        assert_eq!(args.max, Some(5));
        let q = args.query();
        assert_eq!(q.task, "c");
        assert_eq!(q.language, "C++ (GCC 9.2.1)");
        assert_eq!(q.order_by.as_deref(), Some("source_length"));
        assert!(!q.descending);
        assert_eq!(q.page, 1);
        assert_eq!(q.user, "");
    }

    #[test]
    fn desc_requires_order_by() {
        assert!(GlobalArgs::try_parse_from(["atcrawl", "collect", "abc334", "--desc"]).is_err());
    }
}
