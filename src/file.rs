// src/file.rs

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatchOutcome {
    /// New content differed and was written.
    Written,
    /// New content equals the file; nothing touched.
    Unchanged,
    /// Dry run; `changed` tells whether a real run would write.
    DryRun { changed: bool },
}

pub fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Compare-before-write. The file is replaced wholesale via a sibling temp
/// file and a rename, never left half-written. The replacement keeps the
/// original permissions, and a symlinked document is written through to its target.
pub fn write_if_changed(path: &Path, current: &str, new: &str, dry_run: bool) -> Result<PatchOutcome> {
    let changed = current != new;
    if dry_run {
        return Ok(PatchOutcome::DryRun { changed });
    }
    if !changed {
        return Ok(PatchOutcome::Unchanged);
    }

    let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let tmp = temp_sibling(&target);
    let written = (|| {
        let mut f = fs::File::create(&tmp)?;
        f.write_all(new.as_bytes())?;
        f.sync_all()?;
        if let Ok(meta) = fs::metadata(&target) {
            fs::set_permissions(&tmp, meta.permissions())?;
        }
        fs::rename(&tmp, &target)
    })();

    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(Error::io(path, e));
    }
    Ok(PatchOutcome::Written)
}

/// `statistik.html` -> `.statistik.html.tmp` in the same directory.
fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| s!("document"));
    path.with_file_name(join!(".", &name, ".tmp"))
}
