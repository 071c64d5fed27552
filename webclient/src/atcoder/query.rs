use super::urls;

/// Filters, sort order and page of the submissions list.
///
/// Empty filter strings mean "any".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionQuery {
    /// Task prefix letter; the URL carries `<contest>_<task>`.
    pub task: String,
    pub user: String,
    pub language: String,
    /// Judge status, e.g. "AC".
    pub status: String,
    /// e.g. "created", "score", "source_length", "time_consumption"
    pub order_by: Option<String>,
    pub descending: bool,
    pub page: u32,
}

impl SubmissionQuery {
    pub fn new() -> Self {
        Self {
            page: 1,
            ..Default::default()
        }
    }

    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    pub fn task_key(&self, contest: &str) -> String {
        if self.task.is_empty() {
            String::new()
        } else {
            format!("{}_{}", contest, self.task)
        }
    }

    /// Submissions-list URL of `contest` for this query.
    ///
    /// `orderBy` and `desc` are left out entirely when no sort field is set.
    pub fn url(&self, contest: &str) -> String {
        let filters = format!(
            "f.Task={}&f.LanguageName={}&f.Status={}&f.User={}",
            self.task_key(contest),
            encode_language(&self.language),
            self.status,
            self.user,
        );
        let base = urls::submissions_url(contest);
        match &self.order_by {
            Some(field) if self.descending => format!(
                "{}?desc=true&{}&orderBy={}&page={}",
                base, filters, field, self.page
            ),
            Some(field) => format!("{}?{}&orderBy={}&page={}", base, filters, field, self.page),
            None => format!("{}?{}&page={}", base, filters, self.page),
        }
    }
}

/// Encodes a language label for `f.LanguageName`: space becomes `+`, `+` and
/// `#` are percent-encoded, anything else passes through as is.
///
/// ```
/// use atcrawl_webclient::atcoder::encode_language;
///
/// assert_eq!(encode_language("C++"), "C%2B%2B");
/// assert_eq!(encode_language("Assembly x64"), "Assembly+x64");
/// ```
pub fn encode_language(label: &str) -> String {
    let mut key = String::with_capacity(label.len());
    for c in label.chars() {
        match c {
            ' ' => key.push('+'),
            '+' | '#' => key.push_str(&format!("%{:02X}", c as u32)),
            _ => key.push(c),
        }
    }
    key
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn language_encoding() {
        assert_eq!(encode_language("C++"), "C%2B%2B");
        assert_eq!(encode_language("Assembly x64"), "Assembly+x64");
        assert_eq!(encode_language("C#"), "C%23");
        assert_eq!(encode_language("C++ 20 (gcc 12.2)"), "C%2B%2B+20+(gcc+12.2)");
        assert_eq!(encode_language(""), "");
    }

    #[test]
    fn url_without_sort_field_omits_order_and_direction() {
        let q = SubmissionQuery {
            descending: true,
            ..SubmissionQuery::new()
        };
        assert_eq!(
            q.url("abc334"),
            "https://atcoder.jp/contests/abc334/submissions\
             ?f.Task=&f.LanguageName=&f.Status=&f.User=&page=1"
        );
    }

    #[test]
    fn url_with_sort_field() {
        let q = SubmissionQuery {
            task: "c".into(),
            user: "tourist".into(),
            language: "C++".into(),
            status: "AC".into(),
            order_by: Some("source_length".into()),
            descending: false,
            page: 3,
        };
        assert_eq!(
            q.url("abc334"),
            "https://atcoder.jp/contests/abc334/submissions\
             ?f.Task=abc334_c&f.LanguageName=C%2B%2B&f.Status=AC&f.User=tourist\
             &orderBy=source_length&page=3"
        );

        let q = SubmissionQuery {
            descending: true,
            ..q
        };
        assert_eq!(
            q.with_page(1).url("abc334"),
            "https://atcoder.jp/contests/abc334/submissions\
             ?desc=true&f.Task=abc334_c&f.LanguageName=C%2B%2B&f.Status=AC&f.User=tourist\
             &orderBy=source_length&page=1"
        );
    }
}
