use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

#[cfg(test)]
#[path = "dumping_test.rs"]
mod dumping_test;

#[derive(Debug, thiserror::Error)]
pub enum DumpingError {
    #[error("Failed accessing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("{path} is not up to date. To update it, run: {fix_command}")]
    OutOfDate { path: PathBuf, fix_command: String },
}

/// Serializes `data` as pretty JSON, followed by a trailing newline.
pub fn serialize_to_string<T: Serialize>(data: &T) -> Result<String, serde_json::Error> {
    let mut serialized = serde_json::to_string_pretty(data)?;
    serialized.push('\n');
    Ok(serialized)
}

/// Writes `data` as pretty JSON to `file_path`, creating missing parent directories.
pub fn serialize_to_file<T: Serialize>(data: &T, file_path: &Path) -> Result<(), DumpingError> {
    let content = serialize_to_string(data)?;
    if let Some(parent) = file_path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|source| DumpingError::Io { path: parent.to_path_buf(), source })?;
    }
    fs::write(file_path, content)
        .map_err(|source| DumpingError::Io { path: file_path.to_path_buf(), source })?;
    info!("Wrote {}", file_path.display());
    Ok(())
}

/// Checks that `file_path` holds exactly the serialization of `data`.
///
/// A missing file counts as out of date. `fix_command` is reported back in the error so the caller
/// knows how to regenerate the file.
pub fn check_file_up_to_date<T: Serialize>(
    data: &T,
    file_path: &Path,
    fix_command: &str,
) -> Result<(), DumpingError> {
    let expected = serialize_to_string(data)?;
    let out_of_date =
        || DumpingError::OutOfDate { path: file_path.to_path_buf(), fix_command: fix_command.into() };

    match fs::read_to_string(file_path) {
        Ok(actual) if actual == expected => {
            debug!("{} is up to date.", file_path.display());
            Ok(())
        }
        Ok(_) => Err(out_of_date()),
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Err(out_of_date()),
        Err(source) => Err(DumpingError::Io { path: file_path.to_path_buf(), source }),
    }
}
