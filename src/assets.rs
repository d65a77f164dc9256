use std::fs;
use std::io;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use spdlog::info;
use tar::Archive;
use walkdir::WalkDir;

use crate::directive::absolute_path;

const STYLE_ARCHIVE: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/styles.tar.gz"));
pub const STYLE_DIR: &str = "css";

/// Unpacks the bundled stylesheets into `target/css`, replacing what is there.
pub fn install_styles(target: &Path) -> io::Result<PathBuf> {
    let style_dir = target.join(STYLE_DIR);
    remove_existing(&style_dir)?;

    let tar = GzDecoder::new(STYLE_ARCHIVE);
    let mut archive = Archive::new(tar);
    archive.unpack(target)?;

    info!("Installed stylesheets in {}", style_dir.display());
    Ok(style_dir)
}

/// Copies `source` to `target/<name of source>`, replacing what is there.
pub fn copy_include(source: &Path, target: &Path) -> io::Result<PathBuf> {
    let source = absolute_path(source);
    let name = source.file_name().ok_or_else(|| io::Error::new(
        ErrorKind::InvalidInput,
        format!("Cannot include {}: it has no name", source.display()),
    ))?;

    let dest = target.join(name);
    remove_existing(&dest)?;

    for entry in WalkDir::new(&source) {
        let entry = entry.map_err(io::Error::from)?;
        let relative = entry.path().strip_prefix(&source)
            .map_err(|e| io::Error::new(ErrorKind::InvalidData, e))?;
        let dest_path = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest_path)?;
        } else {
            fs::copy(entry.path(), &dest_path)?;
        }
    }

    info!("Copied {} to {}", source.display(), dest.display());
    Ok(dest)
}

fn remove_existing(path: &Path) -> io::Result<()> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(path),
        Ok(_) => fs::remove_file(path),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}
