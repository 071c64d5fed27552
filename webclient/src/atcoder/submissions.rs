use ::lazy_regex::{lazy_regex, Lazy, Regex};

static RE_SCORE_CELL: Lazy<Regex> =
    lazy_regex!(r#"<td class="text-right submission-score" data-id="([0-9]+)">"#);

/// Extracts submission ids from one page of the submissions table, in row
/// order.
pub fn extract_submission_ids(html: &str) -> Vec<String> {
    html.split('\n')
        .filter_map(|line| RE_SCORE_CELL.captures(line))
        .map(|caps| caps[1].to_owned())
        .collect()
}
