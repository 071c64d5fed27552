use std::{
    convert::Infallible,
    fs::{self, File},
    io::{self, BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use ::reqwest_cookie_store::CookieStore;

use crate::error::*;

/// Cookie set persisted as JSON lines at a fixed path.
#[derive(Debug, Clone)]
pub struct SessionStore {
    filepath: PathBuf,
}

impl SessionStore {
    pub fn new(filepath: impl Into<PathBuf>) -> Self {
        Self {
            filepath: filepath.into(),
        }
    }

    pub fn filepath(&self) -> &Path {
        &self.filepath
    }

    pub fn exists(&self) -> bool {
        self.filepath.is_file()
    }

    /// Restores the cookie set. Expired cookies are dropped while loading.
    pub fn load(&self) -> Result<CookieStore> {
        let file = match File::open(&self.filepath) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(Error::CookieNotFound(self.filepath.clone()))
            }
            Err(e) => return Err(self.io_error("read", e)),
        };
        CookieStore::load_json(BufReader::new(file)).map_err(|e| Error::MalformedSessionFile {
            path: self.filepath.clone(),
            reason: e.to_string(),
        })
    }

    /// Overwrites the file with the unexpired cookies of `cookies`, creating
    /// parent dirs as needed. Session-scoped cookies (those without an
    /// expiry) are included; expired ones are left out.
    pub fn save(&self, cookies: &CookieStore) -> Result<()> {
        let live = CookieStore::from_cookies(
            cookies.iter_unexpired().cloned().map(Ok::<_, Infallible>),
            false,
        )
        .unwrap_or_else(|never| match never {});

        if let Some(dir) = self.filepath.parent() {
            fs::create_dir_all(dir).map_err(|e| Error::SessionFile {
                action: "create parent dir of",
                path: self.filepath.clone(),
                source: e,
            })?;
        }
        let file = File::create(&self.filepath).map_err(|e| self.io_error("write", e))?;
        let mut writer = BufWriter::new(file);
        live.save_incl_expired_and_nonpersistent_json(&mut writer)
            .map_err(|e| Error::MalformedSessionFile {
                path: self.filepath.clone(),
                reason: e.to_string(),
            })?;
        writer.flush().map_err(|e| self.io_error("write", e))
    }

    /// Removes the file. Returns `false` when there was nothing to remove.
    pub fn delete(&self) -> Result<bool> {
        match fs::remove_file(&self.filepath) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(self.io_error("remove", e)),
        }
    }

    fn io_error(&self, action: &'static str, source: io::Error) -> Error {
        Error::SessionFile {
            action,
            path: self.filepath.clone(),
            source,
        }
    }
}
