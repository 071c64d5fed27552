use serde::{Deserialize, Serialize};

/// A graded solution as shown on its detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    /// Numeric id, used verbatim as the filename stem.
    pub id: String,
    pub task_prefix: char,
    /// e.g. "C++ (GCC 9.2.1)"
    pub language: String,
    /// Entity-decoded source text.
    pub source_code: String,
}

/// Fields scraped from a submission detail page. Each is `None` when its
/// marker is missing from the markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionDetail {
    pub task_prefix: Option<char>,
    pub language: Option<String>,
    pub source_code: Option<String>,
}

impl SubmissionDetail {
    pub fn into_submission(self, id: impl Into<String>) -> Option<Submission> {
        let task_prefix = self.task_prefix?;
        Some(Submission {
            id: id.into(),
            task_prefix,
            language: self.language.unwrap_or_default(),
            source_code: self.source_code.unwrap_or_default(),
        })
    }
}
