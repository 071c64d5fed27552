use std::{
    path::{Path, PathBuf},
    process::exit,
};

use atcrawl_core::storage::ContestWorkspace;

pub fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|e| {
        eprintln!("Failed to get current dir: {}", e);
        exit(1);
    })
}

pub fn current_workspace() -> ContestWorkspace {
    ContestWorkspace::new(current_dir())
}

pub fn replace_homedir_to_tilde(path: impl Into<PathBuf>) -> PathBuf {
    let path = path.into();
    let Some(home_dir) = ::dirs::home_dir() else {
        return path
    };
    path.strip_prefix(home_dir)
        .map(|path| Path::new("~").join(path))
        .unwrap_or(path)
}

/// Accepts `a`, `A` or a full task key like `abc334_a`.
pub fn parse_task_prefix(s: &str) -> Result<char, String> {
    let letter = s.rsplit('_').next().unwrap_or(s);
    let mut chars = letter.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Ok(c.to_ascii_lowercase()),
        _ => Err(format!("'{}' is not a task letter", s)),
    }
}
