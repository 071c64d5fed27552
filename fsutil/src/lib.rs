use serde::{de::DeserializeOwned, Serialize};
use std::{
    fs::{self, File, ReadDir},
    io::BufReader,
    path::{Path, PathBuf},
};

pub mod error {
    use std::{io, path::PathBuf};

    pub type Result<T> = std::result::Result<T, self::Error>;

    type Msg = &'static str;

    #[derive(Debug, thiserror::Error)]
    pub enum Error {
        #[error("{0} ({1}): {2}")]
        SingleIO(Msg, PathBuf, #[source] io::Error),

        #[error("Cannot serialize to JSON (dest='{0}'): {1}")]
        SerializeToJson(PathBuf, #[source] serde_json::Error),

        #[error("Cannot deserialize from JSON (src='{0}'): {1}")]
        DeserializeFromJson(PathBuf, #[source] serde_json::Error),
    }

    impl Error {
        pub fn is_not_found(&self) -> bool {
            matches!(self, Error::SingleIO(_, _, e) if e.kind() == io::ErrorKind::NotFound)
        }
    }
}
pub use error::{Error, Result};

pub fn mkdir_all(path: impl AsRef<Path>) -> Result<()> {
    let dir = path.as_ref();
    fs::create_dir_all(dir).map_err(|e| Error::SingleIO("Cannot create dir", dir.to_owned(), e))
}

pub fn write<P, C>(filepath: P, contents: C) -> Result<()>
where
    P: AsRef<Path>,
    C: AsRef<[u8]>,
{
    fs::write(&filepath, contents)
        .map_err(|e| Error::SingleIO("Cannot write file", filepath.as_ref().to_owned(), e))
}

/// Like [`write`], creating missing parent dirs first.
pub fn write_with_mkdir<P, C>(filepath: P, contents: C) -> Result<()>
where
    P: AsRef<Path>,
    C: AsRef<[u8]>,
{
    if let Some(dir) = filepath.as_ref().parent() {
        self::mkdir_all(dir)?;
    }
    self::write(filepath, contents)
}

pub fn read_to_string(filepath: impl AsRef<Path>) -> Result<String> {
    fs::read_to_string(&filepath)
        .map_err(|e| Error::SingleIO("Cannot read file", filepath.as_ref().to_owned(), e))
}

pub fn write_json_with_mkdir<P, T>(filepath: P, data: &T) -> Result<()>
where
    P: AsRef<Path>,
    T: Serialize,
{
    let s = serde_json::to_string_pretty(data)
        .map_err(|e| Error::SerializeToJson(filepath.as_ref().to_owned(), e))?;
    write_with_mkdir(filepath, s + "\n")
}

pub fn read_json_with_deserialize<P, T>(filepath: P) -> Result<T>
where
    P: AsRef<Path>,
    T: DeserializeOwned,
{
    let filepath = filepath.as_ref();
    let f = File::open(filepath)
        .map_err(|e| Error::SingleIO("Cannot read file", filepath.to_owned(), e))?;
    serde_json::from_reader(BufReader::new(f))
        .map_err(|e| Error::DeserializeFromJson(filepath.to_owned(), e))
}

pub fn read_dir(dir: impl AsRef<Path>) -> Result<ReadDir> {
    fs::read_dir(&dir).map_err(|e| Error::SingleIO("Cannot read dir", dir.as_ref().to_owned(), e))
}

/// Regular files directly under `dir` whose name matches `pattern`, sorted
/// by path. Unreadable entries are skipped.
pub fn list_files_matching(dir: impl AsRef<Path>, pattern: &glob::Pattern) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in self::read_dir(&dir)?.filter_map(std::result::Result::ok) {
        let Ok(ft) = entry.file_type() else {
            continue
        };
        if !ft.is_file() {
            continue;
        }
        if pattern.matches(entry.file_name().to_string_lossy().as_ref()) {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod test {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("fsutil-test-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn write_with_mkdir_creates_parents() {
        let dir = temp_dir("mkdir");
        let file = dir.join("a/b/c.txt");
        write_with_mkdir(&file, "hello").unwrap();
        assert_eq!(read_to_string(&file).unwrap(), "hello");
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = temp_dir("missing");
        let err = read_to_string(dir.join("nope")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn json_roundtrip_and_listing() {
        let dir = temp_dir("json");
        write_json_with_mkdir(dir.join("v.json"), &vec![1, 2, 3]).unwrap();
        write_with_mkdir(dir.join("test1"), "").unwrap();
        write_with_mkdir(dir.join("exp1"), "").unwrap();
        mkdir_all(dir.join("test_dir")).unwrap();

        let v: Vec<i32> = read_json_with_deserialize(dir.join("v.json")).unwrap();
        assert_eq!(v, [1, 2, 3]);

        let pat = glob::Pattern::new("test*").unwrap();
        assert_eq!(list_files_matching(&dir, &pat).unwrap(), [dir.join("test1")]);
        fs::remove_dir_all(dir).unwrap();
    }
}
