use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Single lowercase letter, unique within a contest.
    pub prefix: char,
    pub title: String,
    pub slug: String,
    /// `<contest>/<PREFIX>-<slug>`
    pub dirname: String,
    /// Absolute URL of the task statement.
    pub url: String,
}

impl Task {
    pub fn new(
        contest: &str,
        prefix: char,
        title: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        let title = title.into();
        let slug = sanitize_title(&title);
        let dirname = format!("{}/{}-{}", contest, prefix.to_ascii_uppercase(), slug);
        Self {
            prefix,
            title,
            slug,
            dirname,
            url: url.into(),
        }
    }
}

/// Lowercases `title` and replaces every char outside `[a-z0-9.]` with `-`,
/// one for one.
///
/// ```
/// use atcrawl_webclient::sanitize_title;
///
/// assert_eq!(sanitize_title("Christmas Color Grid 1"), "christmas-color-grid-1");
/// assert_eq!(sanitize_title("A+B (v1.2)"), "a-b--v1.2-");
/// ```
pub fn sanitize_title(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '.' => c,
            _ => '-',
        })
        .collect()
}

/// Tasks keyed by prefix, in page order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskMap {
    tasks: Vec<Task>,
}

impl TaskMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Replaces an entry with the same prefix in place, otherwise appends.
    pub fn insert(&mut self, mut task: Task) -> Option<Task> {
        if let Some(t) = self.tasks.iter_mut().find(|t| t.prefix == task.prefix) {
            std::mem::swap(t, &mut task);
            Some(task)
        } else {
            self.tasks.push(task);
            None
        }
    }

    pub fn get(&self, prefix: char) -> Option<&Task> {
        self.tasks.iter().find(|t| t.prefix == prefix)
    }

    pub fn prefixes(&self) -> impl Iterator<Item = char> + '_ {
        self.tasks.iter().map(|t| t.prefix)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }
}

impl<'a> IntoIterator for &'a TaskMap {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}

impl FromIterator<Task> for TaskMap {
    fn from_iter<I: IntoIterator<Item = Task>>(iter: I) -> Self {
        let mut m = Self::new();
        for t in iter {
            m.insert(t);
        }
        m
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sanitized_title_keeps_length_and_alphabet() {
        for title in [
            "Christmas Present",
            "Reindeer and Sleigh",
            "ABC-DEF_ghi.123",
            "日本語のタイトル",
            "",
            "  spaced  ",
        ] {
            let s = sanitize_title(title);
            assert_eq!(s.chars().count(), title.to_lowercase().chars().count());
            assert!(s
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '-'));
        }
    }

    #[test]
    fn task_derives_slug_and_dirname() {
        let t = Task::new(
            "abc334",
            'c',
            "Socks 2",
            "https://atcoder.jp/contests/abc334/tasks/abc334_c",
        );
        assert_eq!(t.slug, "socks-2");
        assert_eq!(t.dirname, "abc334/C-socks-2");
    }

    #[test]
    fn task_map_preserves_insertion_order() {
        let m: TaskMap = ['b', 'a', 'c']
            .into_iter()
            .map(|p| Task::new("x", p, "T", "https://example.com"))
            .collect();
        assert_eq!(m.prefixes().collect::<String>(), "bac");
        assert_eq!(m.get('a').unwrap().dirname, "x/A-t");
        assert!(m.get('z').is_none());
    }

    #[test]
    fn task_map_insert_replaces_same_prefix() {
        let mut m = TaskMap::new();
        m.insert(Task::new("x", 'a', "Old", "u"));
        m.insert(Task::new("x", 'b', "B", "u"));
        let old = m.insert(Task::new("x", 'a', "New", "u")).unwrap();
        assert_eq!(old.title, "Old");
        assert_eq!(m.len(), 2);
        assert_eq!(m.iter().next().unwrap().title, "New");
    }
}
