use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// An opened initialisation script.
#[derive(Debug)]
pub struct ScriptFile {
    pub path: PathBuf,
    pub file: File,
}

impl ScriptFile {
    pub fn open(path: &Path) -> io::Result<Self> {
        Ok(Self {
            path: path.to_path_buf(),
            file: File::open(path)?,
        })
    }
}

/// Resolve a leading `~` or `~/` against the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(path),
    };
    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(path),
    }
}

/// Open the first candidate that exists.
///
/// Missing files are skipped quietly; files that exist but cannot be
/// opened are logged and skipped.
pub fn find_script(search_paths: &[String]) -> Option<ScriptFile> {
    for candidate in search_paths {
        let path = expand_home(candidate);
        match ScriptFile::open(&path) {
            Ok(script) => return Some(script),
            Err(err) if err.kind() == io::ErrorKind::NotFound => continue,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "not using script");
            }
        }
    }
    None
}
