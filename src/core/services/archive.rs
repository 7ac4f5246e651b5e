//! Zip archiving of a checkout
//!
//! Packs a directory tree into a temporary `.zip` file. The archive is owned
//! by an [`Archive`] guard and removed from disk when the guard drops.

use std::fs::{self, File};
use std::io::{self, Seek, Write};
use std::path::Path;

use anyhow::Context;
use tempfile::NamedTempFile;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// A packed zip archive on local disk
#[derive(Debug)]
pub struct Archive {
    file: NamedTempFile,
    name: String,
    entries: usize,
}

impl Archive {
    /// Pack `source` into a new temporary archive
    ///
    /// The archive is created under `parent` when given, otherwise in the
    /// system temp directory, and named `archive-<epoch-millis>-<random>.zip`.
    pub fn pack(source: &Path, parent: Option<&Path>) -> anyhow::Result<Self> {
        let prefix = format!("archive-{}-", chrono::Utc::now().timestamp_millis());
        let mut builder = tempfile::Builder::new();
        builder.prefix(&prefix).suffix(".zip");

        let mut file = match parent {
            Some(parent) => {
                fs::create_dir_all(parent)?;
                builder.tempfile_in(parent)?
            },
            None => builder.tempfile()?,
        };

        let name = file
            .path()
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .context("archive path has no file name")?;

        let entries = zip_directory(source, file.as_file_mut())
            .with_context(|| format!("failed to zip {}", source.display()))?;

        log::info!("zipped directory {} ({entries} entries)", file.path().display());

        Ok(Self {
            file,
            name,
            entries,
        })
    }

    /// File name of the archive, used as the upload name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path of the archive on disk
    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Number of entries (files and directories) written
    #[must_use]
    pub const fn entries(&self) -> usize {
        self.entries
    }

    /// Open a fresh read handle positioned at the start of the archive
    pub fn reopen(&self) -> io::Result<File> {
        self.file.reopen()
    }
}

/// Write every file and directory below `source` into a zip stream
///
/// Entry names are relative to `source` and use `/` separators. Entries are
/// written in sorted order so the same tree always produces the same listing.
/// Symbolic links are skipped.
///
/// Returns the number of entries written.
pub fn zip_directory<W: Write + Seek>(source: &Path, writer: W) -> anyhow::Result<usize> {
    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut entries = 0;

    for entry in WalkDir::new(source).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        let relative = entry.path().strip_prefix(source)?;
        let name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        let file_type = entry.file_type();
        if file_type.is_dir() {
            zip.add_directory(name, options)?;
        } else if file_type.is_file() {
            zip.start_file(name, options)?;
            let mut file = File::open(entry.path())
                .with_context(|| format!("failed to open {}", entry.path().display()))?;
            io::copy(&mut file, &mut zip)?;
        } else {
            log::debug!("skipping non-regular file {}", entry.path().display());
            continue;
        }
        entries += 1;
    }

    zip.finish()?;
    Ok(entries)
}
