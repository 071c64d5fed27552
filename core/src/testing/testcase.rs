use std::{
    io::Cursor,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use async_trait::async_trait;
use atcrawl_webclient::SampleCase;
use lazy_regex::regex_captures;
use tokio::{fs::File as TokioFile, io::AsyncRead};

#[async_trait]
pub trait AsyncTestcase<'a> {
    type Reader: AsyncRead + Unpin + Send;
    fn name(&self) -> &str;
    async fn new_input_reader(&'a self) -> anyhow::Result<Self::Reader>;
    async fn new_expected_reader(&'a self) -> anyhow::Result<Self::Reader>;
}

/// `test<N>` / `exp<N>` pair in a task directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsTestcase {
    name: String,
    input_data_path: PathBuf,
    expected_data_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnMemoryTestcase<B: AsRef<[u8]>> {
    pub name: String,
    pub input: B,
    pub expected: B,
}

impl FsTestcase {
    pub fn new(
        name: impl Into<String>,
        input: impl Into<PathBuf>,
        expected: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            input_data_path: input.into(),
            expected_data_path: expected.into(),
        }
    }

    /// Every `test<N>` in `dir` that has a matching `exp<N>`, ordered by N.
    pub fn enumerate(dir: impl AsRef<Path>) -> fsutil::Result<Vec<Self>> {
        let dir = dir.as_ref();
        let mut found: Vec<(u32, Self)> = Vec::new();
        for entry in fsutil::read_dir(dir)?.filter_map(Result::ok) {
            let Ok(ft) = entry.file_type() else {
                continue
            };
            if !ft.is_file() {
                continue;
            }
            let filename = entry.file_name().to_string_lossy().into_owned();
            let Some((_, n)) = regex_captures!(r"^test([0-9]+)$", &filename) else {
                continue
            };
            let Ok(ord) = n.parse::<u32>() else {
                continue
            };
            let (infile, expfile) = SampleCase::filenames(ord);
            let expected = dir.join(expfile);
            if !expected.is_file() {
                log::warn!("{} has no {}; skipped", infile, expected.display());
                continue;
            }
            found.push((ord, Self::new(infile, entry.path(), expected)));
        }
        found.sort_by_key(|(ord, _)| *ord);
        Ok(found.into_iter().map(|(_, t)| t).collect())
    }
}

#[async_trait]
impl<'a> AsyncTestcase<'a> for FsTestcase {
    type Reader = TokioFile;

    fn name(&self) -> &str {
        &self.name
    }

    async fn new_input_reader(&'a self) -> anyhow::Result<TokioFile> {
        TokioFile::open(&self.input_data_path)
            .await
            .with_context(|| {
                format!(
                    "Failed to read testcase {}",
                    self.input_data_path.to_string_lossy(),
                )
            })
    }

    async fn new_expected_reader(&'a self) -> anyhow::Result<TokioFile> {
        TokioFile::open(&self.expected_data_path)
            .await
            .with_context(|| {
                format!(
                    "Failed to read testcase {}",
                    self.expected_data_path.to_string_lossy(),
                )
            })
    }
}

impl<B> OnMemoryTestcase<B>
where
    B: AsRef<[u8]>,
{
    pub fn new(name: impl Into<String>, input: impl Into<B>, expected: impl Into<B>) -> Self {
        Self {
            name: name.into(),
            input: input.into(),
            expected: expected.into(),
        }
    }
}

#[async_trait]
impl<'a, B> AsyncTestcase<'a> for OnMemoryTestcase<B>
where
    B: AsRef<[u8]> + Sync,
{
    type Reader = Cursor<&'a [u8]>;

    fn name(&self) -> &str {
        &self.name
    }

    async fn new_input_reader(&'a self) -> anyhow::Result<Self::Reader> {
        Ok(Cursor::new(self.input.as_ref()))
    }

    async fn new_expected_reader(&'a self) -> anyhow::Result<Self::Reader> {
        Ok(Cursor::new(self.expected.as_ref()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn enumerate_pairs_in_numeric_order() {
        let dir = std::env::temp_dir().join(format!("atcrawl-testcase-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        for name in ["test1", "exp1", "test2", "exp2", "test10", "exp10", "test3", "main.cpp"] {
            fsutil::write_with_mkdir(dir.join(name), name).unwrap();
        }

        let cases = FsTestcase::enumerate(&dir).unwrap();
        let names: Vec<_> = cases.iter().map(|t| t.name()).collect();
        assert_eq!(names, ["test1", "test2", "test10"]);
        assert_eq!(
            cases[2],
            FsTestcase::new("test10", dir.join("test10"), dir.join("exp10"))
        );

        std::fs::remove_dir_all(dir).unwrap();
    }
}
