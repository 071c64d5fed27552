pub mod error {
    #[allow(unused_imports)]
    pub(crate) use anyhow::{anyhow, bail, ensure, Context as _};
    pub use anyhow::{Error, Result};
}
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use atcrawl_webclient::{
    ContestCatalog, Fetch, LangSuffixMapper, SubmissionCollector, SubmissionQuery,
};
use colored::Colorize as _;
use error::*;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use tokio::sync::Mutex;

use crate::client::{self, SessionOptions};
use crate::config::TestConfig;
use crate::interactive::{self, SpinnerExt as _};
use crate::storage::ContestWorkspace;
use crate::style;
use crate::testing::{AsyncTestcase, FsTestcase, JudgeCode, TestOutcome, TestRunner};

/// Establishes a session, logging in when no valid one is stored.
/// Returns `false` when an already stored session was reused.
pub async fn login(opts: &SessionOptions) -> Result<bool> {
    let had_session = opts.store().exists();
    let session = client::open_session(opts).await?;
    log::debug!("Session state: {}", session.state());
    Ok(!had_session)
}

/// Deletes the stored session. Returns `false` when there was none.
pub fn logout(opts: &SessionOptions) -> Result<bool> {
    opts.store()
        .delete()
        .context("Failed to remove the stored session")
}

/// Crawls the contest catalog and writes task dirs, samples and
/// `contest.json`.
pub async fn init_contest<F>(
    fetcher: &F,
    contest: &str,
    ws: &ContestWorkspace,
) -> Result<ContestCatalog>
where
    F: Fetch + ?Sized,
{
    let catalog = ContestCatalog::build(fetcher, contest)
        .await
        .with_context(|| format!("Failed to crawl the tasks of {}", contest))?;
    ensure!(
        !catalog.tasks.is_empty(),
        "No tasks found for '{}': the contest may not exist or not have started, \
         or the task list markup has changed",
        catalog.contest,
    );

    ws.create_task_dirs(&catalog)
        .context("Failed to create task directories")?;
    let n = ws
        .save_samples(&catalog)
        .context("Failed to save samples")?;
    log::info!("Saved {} sample pairs", n);
    ws.save_catalog(&catalog)
        .context("Failed to save the contest catalog")?;
    Ok(catalog)
}

/// Collects up to `max` submissions matching `query` and writes each source
/// into its task directory. Returns the written paths.
pub async fn collect_submissions<F>(
    fetcher: &F,
    catalog: &ContestCatalog,
    query: &SubmissionQuery,
    max: usize,
    ws: &ContestWorkspace,
    mapper: &LangSuffixMapper,
) -> Result<Vec<PathBuf>>
where
    F: Fetch + ?Sized,
{
    let collector = SubmissionCollector::new(fetcher, catalog);
    let ids = collector
        .collect_ids(query, max)
        .await
        .context("Failed to collect submission ids")?;
    if ids.is_empty() {
        log::warn!("No submissions matched the query");
        return Ok(Vec::new());
    }

    let spinner = interactive::spinner(format!("Fetching {} submissions ...", ids.len()))
        .with_ticking();
    let fetched = collector.fetch_submissions(&ids).await;
    spinner.lock().await.finish_and_clear();
    let submissions = fetched.context("Failed to fetch submission details")?;

    let mut written = Vec::with_capacity(submissions.len());
    for sub in &submissions {
        log::info!(
            "Writing {} source code for task {}.",
            sub.language,
            sub.task_prefix.to_ascii_uppercase()
        );
        match ws.save_submission(catalog, sub, mapper)? {
            Some(path) => written.push(path),
            None => log::warn!("Submission {}: unknown task; not written", sub.id),
        }
    }
    Ok(written)
}

/// Counts of one `verify` run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerifySummary {
    pub programs: usize,
    pub compile_errors: usize,
    pub testcases: usize,
    pub failed_testcases: usize,
}

impl VerifySummary {
    pub fn is_all_passed(&self) -> bool {
        self.compile_errors == 0 && self.failed_testcases == 0
    }
}

/// Runs every configured-language source in each task directory against the
/// saved samples. `only_task` narrows it down to one task.
pub async fn verify(
    ws: &ContestWorkspace,
    contest: &str,
    only_task: Option<char>,
    cfg: &TestConfig,
) -> Result<VerifySummary> {
    let catalog = ws.load_catalog(contest).with_context(|| {
        format!(
            "Cannot load the catalog of '{}' (run `atcrawl init {}` first)",
            contest, contest
        )
    })?;

    let mut summary = VerifySummary::default();
    for task in &catalog.tasks {
        if only_task.map_or(false, |p| p != task.prefix) {
            continue;
        }
        let dir = ws.task_dir(task);
        let testcases = FsTestcase::enumerate(&dir)
            .with_context(|| format!("Failed to find testcases in {}", dir.display()))?;
        let programs = self::find_programs(&dir, cfg)?;
        if programs.is_empty() {
            continue;
        }
        if testcases.is_empty() {
            log::warn!("No testcases in {}; skipped", dir.display());
            continue;
        }

        for program in &programs {
            summary.programs += 1;
            println!("{}", program.display().to_string().bold());
            let results = match self::run_program(program, &testcases, cfg).await {
                Ok(results) => results,
                Err(e) => {
                    log::error!("{:#}", e);
                    summary.compile_errors += 1;
                    continue;
                }
            };
            summary.testcases += results.len();
            summary.failed_testcases += results.iter().filter(|r| r.judge != JudgeCode::AC).count();
        }
    }
    if only_task.is_some() && summary.programs == 0 {
        bail!("No program to verify for the given task");
    }
    Ok(summary)
}

/// Sources in `dir` that some test command pattern matches.
fn find_programs(dir: &Path, cfg: &TestConfig) -> Result<Vec<PathBuf>> {
    let mut found = BTreeSet::new();
    for pattern in cfg.patterns() {
        found.extend(fsutil::list_files_matching(dir, pattern)?);
    }
    Ok(found.into_iter().collect())
}

async fn run_program(
    program_file: &Path,
    testcases: &[FsTestcase],
    cfg: &TestConfig,
) -> Result<Vec<TestOutcome>> {
    let filename = program_file
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let cmd = cfg.find_test_cmd_for_filename(&filename).with_context(|| {
        format!(
            "Unconfigured test command for filename '{}' \
             (No entry matched glob in `test.command[]`)",
            filename
        )
    })?;

    let runner = TestRunner::new(cmd)
        .shell(cfg.shell.to_owned())
        .execution_time_limit(cfg.execution_time_limit())
        .program_file(program_file)?;

    if cfg.compile_before_run {
        if let Some(cmd) = &runner.get_command().compile {
            log::info!("Compiling {}", filename);
            log::info!("{}", cmd);
            runner
                .compile()
                .await
                .with_context(|| format!("Failed to compile {}", program_file.display()))?;
        }
    }

    let style = ProgressStyle::default_bar()
        .template("{spinner} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());

    let mut results = Vec::with_capacity(testcases.len());
    let mut bars = Vec::with_capacity(testcases.len());
    let progress_bar_container = MultiProgress::new();

    log::info!("Running: {}", runner.get_command().run);

    for t in testcases {
        let bar = progress_bar_container
            .add(ProgressBar::new(100))
            .with_style(style.clone())
            .with_message(format!("Testcase {} ...", t.name()));
        let bar: Arc<Mutex<ProgressBar>> = Arc::new(Mutex::new(bar));
        bars.push(bar.clone());

        tokio::spawn(async move {
            loop {
                tokio::time::sleep(Duration::from_millis(50)).await;
                let bar = bar.lock().await;
                if bar.is_finished() {
                    break;
                }
                bar.tick();
            }
        });
    }

    for (t, bar) in testcases.iter().zip(&bars) {
        let res = runner.run(t).await;
        let res = match res {
            Ok(res) => res,
            Err(e) => {
                for bar in &bars {
                    bar.lock().await.abandon();
                }
                return Err(e);
            }
        };
        bar.lock().await.finish_with_message(
            format!(
                "Testcase {} ... {} [{}ms]",
                t.name(),
                style::judge_icon(res.judge),
                res.execution_time.as_millis(),
            )
            .cyan()
            .to_string(),
        );
        results.push(res);
    }
    println!();

    results
        .iter()
        .filter(|x| x.judge != JudgeCode::AC)
        .for_each(style::print_test_result_detail);

    style::print_test_result_summary(&results);
    Ok(results)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::{Config, TestCommandConfig};
    use crate::serdable::GlobPattern;
    use rand::Rng as _;

    fn temp_root() -> PathBuf {
        let suffix: u64 = rand::thread_rng().gen();
        std::env::temp_dir().join(format!("atcrawl-action-{:016x}", suffix))
    }

    #[tokio::test]
    async fn verify_judges_saved_sources() {
        use atcrawl_webclient::{SampleCase, Task, TaskMap};
        use std::collections::BTreeMap;

        let root = temp_root();
        let ws = ContestWorkspace::new(&root);
        let url = "https://atcoder.jp/contests/abc999/tasks/abc999_a";
        let tasks: TaskMap = [Task::new("abc999", 'a', "Echo", url)].into_iter().collect();
        let mut samples = BTreeMap::new();
        samples.insert(
            'a',
            vec![SampleCase {
                ord: 1,
                input: "5\n".into(),
                output: "5\n".into(),
            }],
        );
        let catalog = ContestCatalog {
            contest: "abc999".into(),
            tasks,
            samples,
        };
        ws.create_task_dirs(&catalog).unwrap();
        ws.save_samples(&catalog).unwrap();
        ws.save_catalog(&catalog).unwrap();

        let dir = root.join("abc999/A-echo");
        fsutil::write(dir.join("1.sh"), "cat\n").unwrap();
        fsutil::write(dir.join("2.sh"), "echo 6\n").unwrap();
        fsutil::write(dir.join("3"), "no suffix; ignored\n").unwrap();

        let mut cfg = Config::builtin().unwrap().test;
        cfg.command = vec![TestCommandConfig {
            pattern: GlobPattern::parse("*.sh").unwrap(),
            compile: None,
            run: "sh '{file}'".into(),
        }];

        let summary = verify(&ws, "abc999", None, &cfg).await.unwrap();
        assert_eq!(
            summary,
            VerifySummary {
                programs: 2,
                compile_errors: 0,
                testcases: 2,
                failed_testcases: 1,
            }
        );
        assert!(!summary.is_all_passed());

        std::fs::remove_dir_all(root).unwrap();
    }

    #[tokio::test]
    async fn verify_without_catalog_fails() {
        let ws = ContestWorkspace::new(temp_root());
        let cfg = Config::builtin().unwrap().test;
        assert!(verify(&ws, "abc999", None, &cfg).await.is_err());
    }
}
