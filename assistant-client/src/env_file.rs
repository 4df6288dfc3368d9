//! Outcome of loading the optional `.env` file.

use std::path::PathBuf;

use tracing::{debug, warn};

#[derive(Debug)]
pub enum EnvFile {
    Loaded(PathBuf),
    Missing,
    /// Present but not loadable; the process environment is used as-is.
    Unreadable(dotenvy::Error),
}

impl From<Result<PathBuf, dotenvy::Error>> for EnvFile {
    fn from(result: Result<PathBuf, dotenvy::Error>) -> Self {
        match result {
            Ok(path) => EnvFile::Loaded(path),
            Err(e) if e.not_found() => EnvFile::Missing,
            Err(e) => EnvFile::Unreadable(e),
        }
    }
}

impl EnvFile {
    pub fn log(&self) {
        match self {
            EnvFile::Loaded(path) => debug!(path = %path.display(), "loaded environment file"),
            EnvFile::Missing => debug!("no .env file, using process environment"),
            EnvFile::Unreadable(e) => warn!(error = %e, "ignoring unreadable .env file"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_file_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let env = EnvFile::from(dotenvy::from_filename(dir.path().join("absent.env")));
        assert!(matches!(env, EnvFile::Missing));
    }

    #[test]
    fn malformed_file_is_unreadable_not_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "BACKEND API URL=http://localhost:8000\n").unwrap();

        let env = EnvFile::from(dotenvy::from_filename(&path));
        match env {
            EnvFile::Unreadable(e) => assert!(matches!(e, dotenvy::Error::LineParse(..))),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn well_formed_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "ASSISTANT_CLIENT_ENV_FILE_TEST=1\n").unwrap();

        match EnvFile::from(dotenvy::from_filename(&path)) {
            EnvFile::Loaded(p) => assert_eq!(p, path),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
