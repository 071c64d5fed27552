use super::{
    catalog::ContestCatalog, query::SubmissionQuery, submission_detail::extract_submission_detail,
    submissions::extract_submission_ids, urls, Fetch,
};
use crate::{error::*, model::Submission};

/// Collects submissions of one contest through a [`Fetch`]er.
pub struct SubmissionCollector<'a, F: Fetch + ?Sized> {
    fetcher: &'a F,
    catalog: &'a ContestCatalog,
}

impl<'a, F: Fetch + ?Sized> SubmissionCollector<'a, F> {
    pub fn new(fetcher: &'a F, catalog: &'a ContestCatalog) -> Self {
        Self { fetcher, catalog }
    }

    pub fn contest(&self) -> &str {
        &self.catalog.contest
    }

    /// Walks the submission list from page 1 until `max` ids are gathered or
    /// a page comes back empty. Never returns more than `max` ids.
    pub async fn collect_ids(&self, query: &SubmissionQuery, max: usize) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        let mut page = 1;
        while ids.len() < max {
            log::info!("Downloading and parsing submission page {}...", page);
            let url = query.with_page(page).url(self.contest());
            let html = self.fetcher.fetch(&url).await?;
            let found = extract_submission_ids(&html);
            page += 1;
            if found.is_empty() {
                break;
            }
            ids.extend(found);
        }
        ids.truncate(max);
        log::info!("Detected {} submissions.", ids.len());
        Ok(ids)
    }

    /// Fetches the detail page of every id, in order. Submissions whose task
    /// cannot be identified or is not in the catalog are skipped.
    pub async fn fetch_submissions(&self, ids: &[String]) -> Result<Vec<Submission>> {
        let mut submissions = Vec::with_capacity(ids.len());
        for id in ids {
            let html = self
                .fetcher
                .fetch(&urls::submission_url(self.contest(), id))
                .await?;
            let detail = extract_submission_detail(&html, self.contest());
            let Some(submission) = detail.into_submission(id.as_str()) else {
                log::warn!("Submission {}: task not found on the detail page; skipped", id);
                continue;
            };
            if self.catalog.tasks.get(submission.task_prefix).is_none() {
                log::warn!(
                    "Submission {}: task {} is not in the catalog; skipped",
                    id,
                    submission.task_prefix.to_ascii_uppercase()
                );
                continue;
            }
            log::debug!(
                "Submission {}: {} for task {}",
                id,
                submission.language,
                submission.task_prefix.to_ascii_uppercase()
            );
            submissions.push(submission);
        }
        Ok(submissions)
    }
}
