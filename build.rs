use std::fs::File;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use flate2::write::GzEncoder;
use flate2::Compression;

const STYLE_ARCHIVE: &str = "styles.tar.gz";

fn get_archive_name() -> PathBuf {
    let out_dir = env::var("OUT_DIR").unwrap();
    PathBuf::from(out_dir).join(STYLE_ARCHIVE)
}

fn delete_old_archive() {
    let _ = fs::remove_file(get_archive_name());
}

// Entries are stored under "css/" so unpacking into the target yields target/css
fn compress_dir(path: &Path) -> io::Result<()> {
    let tar_gz = File::create(get_archive_name())?;
    let enc = GzEncoder::new(tar_gz, Compression::default());
    let mut tar = tar::Builder::new(enc);
    tar.append_dir_all("css", path)?;
    tar.into_inner()?.finish()?;
    Ok(())
}

fn compress_styles() {
    let current_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let css_dir = PathBuf::from(&current_dir).join("res").join("css");
    delete_old_archive();
    compress_dir(&css_dir).unwrap()
}

fn main() {
    println!("cargo:rerun-if-changed=res");
    compress_styles();
}
