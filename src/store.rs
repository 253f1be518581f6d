use std::{
    io::Write,
    path::{Path, PathBuf},
};

use crate::error::{Error, Result};

/// Replaces `path` with `document`.
///
/// The bytes go to a temporary sibling first which is then renamed over the
/// target, so a concurrent reader sees either the old or the new file in full.
/// On any failure the temporary file is removed and the old file is untouched.
pub fn write(path: &Path, document: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let io = |e: std::io::Error| Error::Io(path.to_owned(), e);

    let mut tmp = tempfile::Builder::new()
        .prefix(".rss-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(io)?;

    tmp.write_all(document.as_bytes()).map_err(io)?;
    tmp.as_file().sync_all().map_err(io)?;

    // mkstemp creates the file 0600
    #[cfg(unix)]
    {
        use std::{fs::Permissions, os::unix::fs::PermissionsExt};
        tmp.as_file()
            .set_permissions(Permissions::from_mode(0o644))
            .map_err(io)?;
    }

    tmp.persist(path).map_err(|e| io(e.error))?;

    tracing::info!(target: "store", "wrote {} bytes to {}", document.len(), path.display());
    Ok(())
}

/// [`write`] on the blocking pool.
pub async fn write_async(path: PathBuf, document: String) -> Result<()> {
    let target = path.clone();
    tokio::task::spawn_blocking(move || write(&path, &document))
        .await
        .map_err(|e| Error::Io(target, std::io::Error::other(e)))?
}
