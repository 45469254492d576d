//! Decompression and archive extraction of downloaded artifacts.

use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;
use tracing::{debug, info, warn};

use crate::error::StageError;

/// Write `content` into `work_dir` according to `file_name`.
///
/// - `name.gz` is gunzipped and handled as `name`
/// - `name.tgz` is gunzipped and handled as `name.tar`
/// - `*.tar` is unpacked; every regular file extracted is returned
/// - anything else is written as `work_dir/file_name`
///
/// Archive members that would land outside `work_dir` are skipped.
pub fn unpack(work_dir: &Path, file_name: &str, content: &[u8]) -> Result<Vec<PathBuf>, StageError> {
    let (name, data) = if let Some(stem) = file_name.strip_suffix(".gz") {
        (stem.to_string(), gunzip(file_name, content)?)
    } else if let Some(stem) = file_name.strip_suffix(".tgz") {
        (format!("{stem}.tar"), gunzip(file_name, content)?)
    } else {
        (file_name.to_string(), content.to_vec())
    };

    if name.ends_with(".tar") {
        return untar(work_dir, &name, &data);
    }

    let path = work_dir.join(&name);
    std::fs::write(&path, &data).map_err(|source| StageError::Write {
        path: path.clone(),
        source,
    })?;
    info!(path = %path.display(), bytes = data.len(), "Staged file");
    Ok(vec![path])
}

fn gunzip(name: &str, content: &[u8]) -> Result<Vec<u8>, StageError> {
    let mut data = Vec::new();
    MultiGzDecoder::new(content)
        .read_to_end(&mut data)
        .map_err(|source| StageError::Gunzip {
            name: name.to_string(),
            source,
        })?;
    debug!(name, compressed = content.len(), size = data.len(), "Gunzipped");
    Ok(data)
}

fn untar(work_dir: &Path, name: &str, data: &[u8]) -> Result<Vec<PathBuf>, StageError> {
    let untar_err = |source| StageError::Untar {
        name: name.to_string(),
        source,
    };

    let mut archive = tar::Archive::new(Cursor::new(data));
    let mut files = Vec::new();

    for entry in archive.entries().map_err(untar_err)? {
        let mut entry = entry.map_err(untar_err)?;
        let member = entry.path().map_err(untar_err)?.into_owned();
        let is_file = entry.header().entry_type().is_file();

        if !entry.unpack_in(work_dir).map_err(untar_err)? {
            warn!(member = %member.display(), "Skipping archive member outside work dir");
            continue;
        }
        if is_file {
            files.push(work_dir.join(&member));
        }
    }

    if files.is_empty() {
        return Err(StageError::EmptyArchive(name.to_string()));
    }

    info!(archive = name, files = files.len(), "Unpacked archive");
    Ok(files)
}
