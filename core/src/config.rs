use std::path::{Path, PathBuf};
use std::result::Result as StdResult;
use std::time::Duration;

use anyhow::Context as _;
use atcrawl_webclient::LangSuffixMapper;
use rust_embed::RustEmbed;
use serde::Deserialize;

use crate::serdable::GlobPattern;
use crate::testing::TestCommand;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(skip)]
    pub source_config_file: Option<PathBuf>,
    pub session: SessionConfig,
    pub collect: CollectConfig,
    #[serde(default)]
    pub lang_suffix: Vec<LangSuffixEntry>,
    pub test: TestConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionConfig {
    pub cookie_file: Option<PathBuf>,
    pub request_interval_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CollectConfig {
    pub max_submissions: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LangSuffixEntry {
    pub pattern: GlobPattern,
    pub suffix: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TestConfig {
    pub shell: PathBuf,
    pub compile_before_run: bool,
    pub execution_time_limit_ms: u64,
    pub command: Vec<TestCommandConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TestCommandConfig {
    pub pattern: GlobPattern,
    pub compile: Option<String>,
    pub run: String,
}

#[derive(RustEmbed)]
#[folder = "assets/"]
struct Asset;

impl Config {
    pub const FILENAME: &str = "atcrawl.toml";
    const APP_DIRNAME: &str = "atcrawl";
    const COOKIE_FILENAME: &str = "cookie.json";

    pub fn default_toml() -> anyhow::Result<String> {
        let file = Asset::get(Self::FILENAME)
            .with_context(|| format!("Built-in {} is missing", Self::FILENAME))?;
        let s = std::str::from_utf8(file.data.as_ref())
            .with_context(|| format!("Built-in {} is not UTF-8", Self::FILENAME))?;
        Ok(s.to_owned())
    }

    pub fn builtin() -> anyhow::Result<Self> {
        Self::from_toml(&Self::default_toml()?).context("Invalid built-in config")
    }

    pub fn from_toml(s: &str) -> StdResult<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn from_toml_file(filepath: PathBuf) -> anyhow::Result<Self> {
        let toml = fsutil::read_to_string(&filepath).context("Cannot read a file")?;
        let mut cfg = Self::from_toml(&toml)
            .with_context(|| format!("Invalid config TOML: {:?}", filepath))?;
        cfg.source_config_file = Some(filepath);
        Ok(cfg)
    }

    /// `<config_dir>/atcrawl/atcrawl.toml`
    pub fn default_filepath() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(Self::APP_DIRNAME).join(Self::FILENAME))
    }

    /// Reads `explicit` if given, otherwise the file at
    /// [`Self::default_filepath`] if it exists, otherwise the built-in
    /// defaults.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::from_toml_file(path.to_owned());
        }
        match Self::default_filepath() {
            Some(path) if path.is_file() => {
                log::debug!("Using config {}", path.display());
                Self::from_toml_file(path)
            }
            _ => {
                log::debug!("Using built-in config");
                Self::builtin()
            }
        }
    }

    pub fn cookie_filepath(&self) -> anyhow::Result<PathBuf> {
        if let Some(path) = &self.session.cookie_file {
            return Ok(path.to_owned());
        }
        let data_dir = dirs::data_dir().context("Cannot determine the user data directory")?;
        Ok(data_dir.join(Self::APP_DIRNAME).join(Self::COOKIE_FILENAME))
    }

    pub fn request_interval(&self) -> Duration {
        Duration::from_millis(self.session.request_interval_ms)
    }

    /// User rules first, then the built-in ones.
    pub fn lang_suffix_mapper(&self) -> LangSuffixMapper {
        LangSuffixMapper::with_user_rules(
            self.lang_suffix
                .iter()
                .map(|e| (e.pattern.clone().into_inner(), e.suffix.clone())),
        )
    }
}

impl TestConfig {
    pub fn execution_time_limit(&self) -> Duration {
        Duration::from_millis(self.execution_time_limit_ms)
    }

    pub fn find_test_cmd_for_filename(&self, filename: impl AsRef<str>) -> Option<TestCommand> {
        self.command
            .iter()
            .find(|entry| entry.pattern.matches(filename.as_ref()))
            .map(|entry| TestCommand {
                compile: entry.compile.to_owned(),
                run: entry.run.to_owned(),
            })
    }

    pub fn patterns(&self) -> impl Iterator<Item = &GlobPattern> {
        self.command.iter().map(|entry| &entry.pattern)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn builtin_toml_should_be_parsable() {
        let cfg = dbg!(Config::builtin()).unwrap();

        let Config {
            source_config_file,
            session,
            collect,
            lang_suffix,
            test,
        } = cfg;

        assert_eq!(source_config_file, None);
        assert_eq!(session.cookie_file, None);
        assert_eq!(session.request_interval_ms, 500);
        assert_eq!(collect.max_submissions, 20);
        assert!(lang_suffix.is_empty());

        assert_eq!(test.shell, Path::new("/bin/sh"));
        assert!(test.compile_before_run);
        assert_eq!(test.execution_time_limit(), Duration::from_millis(2000));
        assert_eq!(test.command.len(), 5);
        assert_eq!(
            test.command[3],
            TestCommandConfig {
                pattern: GlobPattern::parse("*.py").unwrap(),
                compile: None,
                run: "python3 '{file}'".to_owned(),
            }
        );
    }

    #[test]
    fn find_test_cmd_by_filename() {
        let cfg = Config::builtin().unwrap();
        let cmd = cfg.test.find_test_cmd_for_filename("48808497.cpp").unwrap();
        assert!(cmd.compile.is_some());
        assert!(cfg.test.find_test_cmd_for_filename("48808497").is_none());
        assert!(cfg.test.find_test_cmd_for_filename("test1").is_none());
    }

    #[test]
    fn user_lang_suffix_rules_come_first() {
        let toml = Config::default_toml().unwrap()
            + r#"
[[lang_suffix]]
pattern = "C++*"
suffix = "cc"
"#;
        let cfg = Config::from_toml(&toml).unwrap();
        let m = cfg.lang_suffix_mapper();
        assert_eq!(m.suffix_for("C++ (GCC 9.2.1)"), "cc");
        assert_eq!(m.suffix_for("Python (3.8.2)"), "py");
    }

    #[test]
    fn explicit_cookie_file_wins() {
        let mut cfg = Config::builtin().unwrap();
        cfg.session.cookie_file = Some("/tmp/x/cookie.json".into());
        assert_eq!(cfg.cookie_filepath().unwrap(), Path::new("/tmp/x/cookie.json"));
    }
}
