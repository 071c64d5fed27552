use ::lazy_regex::{lazy_regex, Lazy, Regex};

use crate::model::SubmissionDetail;

static RE_TASK_CELL: Lazy<Regex> = lazy_regex!(
    r#"<td class="text-center"><a href="/contests/([^/"]+)/tasks/([^/"]+)_([a-z])">.*</a></td>"#
);
static RE_LANGUAGE_HEADER: Lazy<Regex> = lazy_regex!(r"<th>Language</th>");
static RE_CENTERED_CELL: Lazy<Regex> = lazy_regex!(r#"<td class="text-center">(.*)</td>"#);
static RE_CODE_OPEN: Lazy<Regex> =
    lazy_regex!(r#"<pre id="submission-code" data-ace-mode="[^"]*">(.*)"#);
/// Only a line that ends with `</pre>` closes the block; a `</pre>` inside a
/// source line is code.
static RE_CODE_CLOSE: Lazy<Regex> = lazy_regex!(r"^(.*)</pre>\r?$");

/// Parses a submission detail page of `contest`.
///
/// The body is entity-decoded before scanning, so the source code comes out
/// as it was submitted. A field whose marker is missing stays `None`.
pub fn extract_submission_detail(html: &str, contest: &str) -> SubmissionDetail {
    let decoded = html_escape::decode_html_entities(html);
    let lines = || decoded.split('\n');
    SubmissionDetail {
        task_prefix: lines().find_map(|line| task_prefix_of(line, contest)),
        language: scan_language(lines()),
        source_code: scan_source_code(lines()),
    }
}

fn task_prefix_of(line: &str, contest: &str) -> Option<char> {
    let caps = RE_TASK_CELL.captures(line)?;
    if &caps[1] != contest || &caps[2] != contest {
        return None;
    }
    caps[3].chars().next()
}

fn scan_language<'a>(lines: impl Iterator<Item = &'a str>) -> Option<String> {
    let mut after_header = false;
    for line in lines {
        if !after_header {
            after_header = RE_LANGUAGE_HEADER.is_match(line);
        } else if let Some(caps) = RE_CENTERED_CELL.captures(line) {
            return Some(caps[1].to_owned());
        }
    }
    None
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CodeState {
    Outside,
    Inside,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CodeAction<'a> {
    /// First fragment, trailing the opening tag.
    Begin(&'a str),
    /// `"\n" + text`
    Append(&'a str),
    Skip,
}

fn step_code(state: CodeState, line: &str) -> (CodeState, CodeAction<'_>) {
    use CodeState::*;
    match state {
        Outside => match RE_CODE_OPEN.captures(line) {
            Some(caps) => {
                let rest = caps.get(1).map_or("", |m| m.as_str());
                match RE_CODE_CLOSE.captures(rest) {
                    // `<pre ...>one-liner</pre>`
                    Some(c) => (Done, CodeAction::Begin(c.get(1).map_or("", |m| m.as_str()))),
                    None => (Inside, CodeAction::Begin(rest)),
                }
            }
            None => (Outside, CodeAction::Skip),
        },
        Inside => match RE_CODE_CLOSE.captures(line) {
            Some(caps) => (Done, CodeAction::Append(caps.get(1).map_or("", |m| m.as_str()))),
            None => (Inside, CodeAction::Append(line)),
        },
        Done => (Done, CodeAction::Skip),
    }
}

fn scan_source_code<'a>(lines: impl Iterator<Item = &'a str>) -> Option<String> {
    let mut state = CodeState::Outside;
    let mut code: Option<String> = None;
    for line in lines {
        let (next, action) = step_code(state, line);
        match action {
            CodeAction::Begin(text) => code = Some(strip_cr(text)),
            CodeAction::Append(text) => {
                if let Some(code) = code.as_mut() {
                    code.push('\n');
                    code.push_str(&strip_cr(text));
                }
            }
            CodeAction::Skip => (),
        }
        state = next;
        if state == CodeState::Done {
            break;
        }
    }
    if state == CodeState::Inside {
        log::warn!("Source code block is not closed; keeping what was read");
    }
    code
}

fn strip_cr(text: &str) -> String {
    text.replace('\r', "")
}
