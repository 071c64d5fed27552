use ::lazy_regex::{lazy_regex, Lazy, Regex};

use super::urls;
use crate::model::{Task, TaskMap};

/// `<td><a href="/contests/<contest>/tasks/<contest>_<letter>"><title></a></td>`
static RE_TASK_ROW: Lazy<Regex> =
    lazy_regex!(r#"<td><a href="(/contests/([^/"]+)/tasks/([^/"]+)_([a-z]))">(.+)</a></td>"#);

/// Parses the task list page of `contest` (lowercase) into tasks keyed by
/// prefix, in row order. Lines without a task row are ignored, so a page
/// whose markup changed yields an empty map.
pub fn extract_tasks(html: &str, contest: &str) -> TaskMap {
    html.split('\n')
        .filter_map(|line| parse_task_row(line, contest))
        .collect()
}

fn parse_task_row(line: &str, contest: &str) -> Option<Task> {
    let caps = RE_TASK_ROW.captures(line)?;
    if &caps[2] != contest || &caps[3] != contest {
        return None;
    }
    let prefix = caps[4].chars().next()?;
    let title = &caps[5];
    Some(Task::new(contest, prefix, title, urls::absolute(&caps[1])))
}

#[cfg(test)]
mod test {
    use super::*;

    const ROWS: &str = r#"<tbody>
	<tr>
		<td class="text-center no-break"><a href="/contests/abc334/tasks/abc334_a">A</a></td>
		<td><a href="/contests/abc334/tasks/abc334_a">Christmas Present</a></td>
		<td class="text-right">2 sec</td>
	</tr>
	<tr>
		<td class="text-center no-break"><a href="/contests/abc334/tasks/abc334_b">B</a></td>
		<td><a href="/contests/abc334/tasks/abc334_b">Christmas Trees</a></td>
	</tr>
</tbody>"#;

    #[test]
    fn only_title_cells_are_rows() {
        let tasks = extract_tasks(ROWS, "abc334");
        assert_eq!(tasks.prefixes().collect::<String>(), "ab");
        let a = tasks.get('a').unwrap();
        assert_eq!(a.title, "Christmas Present");
        assert_eq!(a.url, "https://atcoder.jp/contests/abc334/tasks/abc334_a");
    }

    #[test]
    fn rows_of_other_contests_are_ignored() {
        let html = r#"<td><a href="/contests/abc100/tasks/abc100_a">Happy Birthday!</a></td>"#;
        assert!(extract_tasks(html, "abc334").is_empty());
        assert_eq!(extract_tasks(html, "abc100").len(), 1);
    }

    #[test]
    fn unrecognized_markup_is_empty_not_error() {
        assert!(extract_tasks("<html><body>maintenance</body></html>", "abc334").is_empty());
        assert!(extract_tasks("", "abc334").is_empty());
    }
}
