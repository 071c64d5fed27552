use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{samples::extract_samples, tasks::extract_tasks, urls, Fetch};
use crate::{error::*, model::*};

/// Tasks of one contest and the samples of each task, crawled once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContestCatalog {
    /// Lowercase contest id, e.g. "abc334".
    pub contest: String,
    pub tasks: TaskMap,
    pub samples: BTreeMap<char, Vec<SampleCase>>,
}

impl ContestCatalog {
    /// Fetches the task list, then every task page in list order.
    /// A failed fetch aborts the whole build.
    pub async fn build<F>(fetcher: &F, contest: &str) -> Result<Self>
    where
        F: Fetch + ?Sized,
    {
        let contest = contest.to_lowercase();
        log::info!("{} ({})", contest.to_uppercase(), urls::contest_url(&contest));

        let html = fetcher.fetch(&urls::tasks_url(&contest)).await?;
        let tasks = extract_tasks(&html, &contest);
        if tasks.is_empty() {
            log::warn!("No task rows found on the task list of {}", contest);
        }
        for task in &tasks {
            log::info!("{}: {}", task.prefix.to_ascii_uppercase(), task.title);
        }

        let mut samples = BTreeMap::new();
        for task in &tasks {
            log::info!(
                "Downloading and parsing samples for task {}...",
                task.prefix.to_ascii_uppercase()
            );
            let html = fetcher.fetch(&task.url).await?;
            samples.insert(task.prefix, extract_samples(&html));
        }

        Ok(Self {
            contest,
            tasks,
            samples,
        })
    }

    pub fn samples_of(&self, prefix: char) -> &[SampleCase] {
        self.samples.get(&prefix).map(Vec::as_slice).unwrap_or(&[])
    }
}
