mod catalog;
mod collector;
mod lang;
mod query;
mod samples;
mod session;
mod submission_detail;
mod submissions;
mod tasks;
pub mod urls;

#[cfg(test)]
mod test_util;

use ::async_trait::async_trait;

use crate::error::Result;

pub use catalog::ContestCatalog;
pub use collector::SubmissionCollector;
pub use lang::LangSuffixMapper;
pub use query::{encode_language, SubmissionQuery};
pub use samples::{extract_samples, SampleScanner};
pub use session::{AuthSession, AuthState};
pub use submission_detail::extract_submission_detail;
pub use submissions::extract_submission_ids;
pub use tasks::extract_tasks;

/// Source of page bodies. Implemented by [`AuthSession`]; crawl drivers
/// only depend on this.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// GET `url` and return the body of a successful response.
    async fn fetch(&self, url: &str) -> Result<String>;
}
