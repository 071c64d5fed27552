use std::path::{Path, PathBuf};

use atcrawl_webclient::{ContestCatalog, LangSuffixMapper, SampleCase, Submission, Task};

use super::error::Result;

/// Contest directory tree under a root directory (usually the current dir):
///
/// ```text
/// <root>/<contest>/contest.json
/// <root>/<contest>/<PREFIX>-<slug>/test<N>
/// <root>/<contest>/<PREFIX>-<slug>/exp<N>
/// <root>/<contest>/<PREFIX>-<slug>/<submission id>[.<suffix>]
/// ```
#[derive(Debug, Clone)]
pub struct ContestWorkspace {
    root: PathBuf,
}

impl ContestWorkspace {
    pub const CATALOG_FILENAME: &str = "contest.json";

    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn contest_dir(&self, contest: &str) -> PathBuf {
        self.root.join(contest)
    }

    pub fn catalog_filepath(&self, contest: &str) -> PathBuf {
        self.contest_dir(contest).join(Self::CATALOG_FILENAME)
    }

    pub fn task_dir(&self, task: &Task) -> PathBuf {
        self.root.join(&task.dirname)
    }

    /// Creates one directory per task, in catalog order.
    pub fn create_task_dirs(&self, catalog: &ContestCatalog) -> Result<Vec<PathBuf>> {
        let mut dirs = Vec::with_capacity(catalog.tasks.len());
        for task in &catalog.tasks {
            log::info!(
                "Creating directory for task {}...",
                task.prefix.to_ascii_uppercase()
            );
            let dir = self.task_dir(task);
            fsutil::mkdir_all(&dir)?;
            dirs.push(dir);
        }
        Ok(dirs)
    }

    /// Writes `test<N>` and `exp<N>` of every task. Returns the number of
    /// pairs written.
    pub fn save_samples(&self, catalog: &ContestCatalog) -> Result<usize> {
        let mut count = 0;
        for task in &catalog.tasks {
            let dir = self.task_dir(task);
            for sample in catalog.samples_of(task.prefix) {
                let (infile, outfile) = SampleCase::filenames(sample.ord);
                fsutil::write_with_mkdir(dir.join(infile), &sample.input)?;
                fsutil::write_with_mkdir(dir.join(outfile), &sample.output)?;
                count += 1;
            }
        }
        Ok(count)
    }

    pub fn save_catalog(&self, catalog: &ContestCatalog) -> Result<PathBuf> {
        let path = self.catalog_filepath(&catalog.contest);
        fsutil::write_json_with_mkdir(&path, catalog)?;
        Ok(path)
    }

    pub fn load_catalog(&self, contest: &str) -> Result<ContestCatalog> {
        fsutil::read_json_with_deserialize(self.catalog_filepath(&contest.to_lowercase()))
    }

    /// Writes the source into its task directory as `<id>[.<suffix>]`,
    /// overwriting any previous copy. Returns `None` when the task is not in
    /// `catalog`.
    pub fn save_submission(
        &self,
        catalog: &ContestCatalog,
        submission: &Submission,
        mapper: &LangSuffixMapper,
    ) -> Result<Option<PathBuf>> {
        let Some(task) = catalog.tasks.get(submission.task_prefix) else {
            return Ok(None)
        };
        let filename = mapper.filename_for(&submission.id, &submission.language);
        let path = self.task_dir(task).join(filename);
        fsutil::write_with_mkdir(&path, &submission.source_code)?;
        Ok(Some(path))
    }
}

#[cfg(test)]
mod test {
    use std::collections::BTreeMap;

    use atcrawl_webclient::TaskMap;
    use rand::Rng as _;

    use super::*;

    fn temp_root() -> PathBuf {
        let suffix: u64 = rand::thread_rng().gen();
        std::env::temp_dir().join(format!("atcrawl-workspace-{:016x}", suffix))
    }

    fn catalog() -> ContestCatalog {
        let tasks: TaskMap = [('a', "Christmas Present"), ('b', "Christmas Trees")]
            .into_iter()
            .map(|(p, title)| {
                Task::new(
                    "abc334",
                    p,
                    title,
                    format!("https://atcoder.jp/contests/abc334/tasks/abc334_{}", p),
                )
            })
            .collect();
        let mut samples = BTreeMap::new();
        samples.insert(
            'a',
            vec![
                SampleCase {
                    ord: 1,
                    input: "300 100\n".into(),
                    output: "Bat\n".into(),
                },
                SampleCase {
                    ord: 2,
                    input: "334 343\n".into(),
                    output: "Glove\n".into(),
                },
            ],
        );
        samples.insert('b', vec![]);
        ContestCatalog {
            contest: "abc334".into(),
            tasks,
            samples,
        }
    }

    #[test]
    fn tree_layout() {
        let root = temp_root();
        let ws = ContestWorkspace::new(&root);
        let catalog = catalog();

        let dirs = ws.create_task_dirs(&catalog).unwrap();
        assert_eq!(
            dirs,
            [
                root.join("abc334/A-christmas-present"),
                root.join("abc334/B-christmas-trees")
            ]
        );
        assert!(dirs.iter().all(|d| d.is_dir()));

        assert_eq!(ws.save_samples(&catalog).unwrap(), 2);
        let a = &dirs[0];
        assert_eq!(fsutil::read_to_string(a.join("test2")).unwrap(), "334 343\n");
        assert_eq!(fsutil::read_to_string(a.join("exp1")).unwrap(), "Bat\n");

        let path = ws.save_catalog(&catalog).unwrap();
        assert_eq!(path, root.join("abc334/contest.json"));
        assert_eq!(ws.load_catalog("ABC334").unwrap(), catalog);

        std::fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn submission_file_naming() {
        let root = temp_root();
        let ws = ContestWorkspace::new(&root);
        let catalog = catalog();
        let mapper = LangSuffixMapper::new();

        let sub = Submission {
            id: "48826402".into(),
            task_prefix: 'a',
            language: "C++ (GCC 9.2.1)".into(),
            source_code: "int main() {}\n".into(),
        };
        let path = ws.save_submission(&catalog, &sub, &mapper).unwrap().unwrap();
        assert_eq!(path, root.join("abc334/A-christmas-present/48826402.cpp"));
        assert_eq!(fsutil::read_to_string(&path).unwrap(), "int main() {}\n");

        let unknown_lang = Submission {
            language: "Whitespace".into(),
            ..sub.clone()
        };
        let path = ws.save_submission(&catalog, &unknown_lang, &mapper).unwrap().unwrap();
        assert_eq!(path, root.join("abc334/A-christmas-present/48826402"));

        let unknown_task = Submission {
            task_prefix: 'z',
            ..sub
        };
        assert_eq!(ws.save_submission(&catalog, &unknown_task, &mapper).unwrap(), None);

        std::fs::remove_dir_all(root).unwrap();
    }
}
