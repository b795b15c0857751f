use std::io;
use std::path::Path;
use tracing::warn;
use walkdir::WalkDir;

/// Total size in bytes of every regular file under `path`.
///
/// A missing path is 0. Symlinks are not followed and count as 0.
/// The first I/O error met during the walk is returned.
pub fn probe(path: &Path) -> io::Result<u64> {
    let meta = match path.symlink_metadata() {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e),
    };

    if meta.is_file() {
        return Ok(meta.len());
    }
    if !meta.is_dir() {
        return Ok(0);
    }

    let mut total = 0u64;
    for entry in WalkDir::new(path).follow_links(false) {
        let entry = entry.map_err(io::Error::from)?;
        if entry.file_type().is_file() {
            total += entry.metadata().map_err(io::Error::from)?.len();
        }
    }
    Ok(total)
}

/// Like [`probe`], but an unreadable subtree counts as 0 so a scan can keep going.
pub fn size_or_zero(path: &Path) -> u64 {
    probe(path).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "could not measure size, counting as 0");
        0
    })
}
