//! The content-based gate deciding whether a rewritten file changed.

use std::fs;
use std::io::{self, Write as _};

use camino::{Utf8Path, Utf8PathBuf};
use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::ProjectError;

const DIFF_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::diff");

/// Suffix under which the previous content is preserved next to the target.
const OLD_SUFFIX: &str = "old";

/// Outcome of comparing newly projected content against the prior file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileState {
    /// The content digest differs from the previous run, or no previous
    /// content existed.
    Changed,
    /// The content is byte-identical to what was already on disk.
    Unchanged,
}

/// Replaces `target` with `content` and reports whether the content changed.
///
/// The previous bytes are read first and retained as the diff baseline, then
/// preserved at a `.old` sibling; the new content is staged in a temporary
/// file in the target directory and atomically renamed over the target, so a
/// crash mid-write can never leave a torn file. The decision is purely
/// content-based (SHA-256 digests), never timestamp-based: repeated runs
/// with identical derived state are no-ops with respect to restarts even
/// though the file is rewritten every time.
pub fn replace_and_compare(target: &Utf8Path, content: &[u8]) -> Result<FileState, ProjectError> {
    let previous = read_optional(target)?;
    if let Some(bytes) = previous.as_deref() {
        let old_path = old_sibling(target);
        fs::write(&old_path, bytes).map_err(|source| ProjectError::PreserveOld {
            path: old_path.clone(),
            source,
        })?;
    }

    let directory = match target.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let mut staged =
        NamedTempFile::new_in(directory.as_std_path()).map_err(|source| ProjectError::Stage {
            path: target.to_owned(),
            source,
        })?;
    staged
        .write_all(content)
        .map_err(|source| ProjectError::Stage {
            path: target.to_owned(),
            source,
        })?;
    staged
        .persist(target.as_std_path())
        .map_err(|error| ProjectError::Replace {
            path: target.to_owned(),
            source: error.error,
        })?;

    let state = match previous.as_deref() {
        Some(bytes) if digest(bytes) == digest(content) => FileState::Unchanged,
        Some(_) => FileState::Changed,
        None => FileState::Changed,
    };
    debug!(target: DIFF_TARGET, file = %target, ?state, "configuration rewritten");
    Ok(state)
}

fn read_optional(path: &Utf8Path) -> Result<Option<Vec<u8>>, ProjectError> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ProjectError::ReadPrevious {
            path: path.to_owned(),
            source,
        }),
    }
}

fn old_sibling(target: &Utf8Path) -> Utf8PathBuf {
    let mut sibling = target.to_owned();
    let extension = match sibling.extension() {
        Some(extension) => format!("{extension}.{OLD_SUFFIX}"),
        None => OLD_SUFFIX.to_owned(),
    };
    sibling.set_extension(extension);
    sibling
}

fn digest(bytes: &[u8]) -> [u8; 32] {
    Sha256::digest(bytes).into()
}
