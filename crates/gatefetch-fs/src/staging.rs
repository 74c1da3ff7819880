use std::fs::File;
use std::path::{Path, PathBuf};

use tempfile::TempPath;

use crate::{Error, Result};

/// A hidden temporary file beside its destination.
///
/// The file lives in the destination's directory so that [`Staging::commit`]
/// is a same-filesystem rename. Dropping an uncommitted `Staging` deletes the
/// temporary file and any parent directories it had to create, leaving the
/// destination untouched.
#[derive(Debug)]
pub struct Staging {
    temp:        TempPath,
    destination: PathBuf,
    created:     CreatedDirs,
}

/// Directories created for a staging file, deepest first.
///
/// Removed on drop unless kept; a directory that is no longer empty stops
/// the walk.
#[derive(Debug, Default)]
struct CreatedDirs(Vec<PathBuf>);

impl CreatedDirs {
    fn create(dir: &Path) -> Result<Self> {
        let missing = dir
            .ancestors()
            .take_while(|d| !d.as_os_str().is_empty() && !d.exists())
            .map(Path::to_path_buf)
            .collect();

        std::fs::create_dir_all(dir).map_err(|e| Error::Create {
            path:   dir.to_path_buf(),
            source: e,
        })?;

        Ok(Self(missing))
    }

    fn keep(mut self) { self.0.clear(); }
}

impl Drop for CreatedDirs {
    fn drop(&mut self) {
        for dir in &self.0 {
            if std::fs::remove_dir(dir).is_err() {
                break;
            }
        }
    }
}

impl Staging {
    /// Create the staging file, returning its writable handle.
    ///
    /// Missing parent directories of `destination` are created.
    pub fn new(destination: impl AsRef<Path>) -> Result<(File, Self)> {
        let destination = destination.as_ref().to_path_buf();
        let file_name = destination
            .file_name()
            .ok_or_else(|| Error::NoFileName(destination.clone()))?
            .to_string_lossy()
            .into_owned();

        let parent = match destination.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let created = CreatedDirs::create(&parent)?;

        let prefix = format!(".{file_name}.");
        let (file, temp) = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(".part")
            .tempfile_in(&parent)
            .map_err(|e| Error::Create {
                path:   destination.clone(),
                source: e,
            })?
            .into_parts();

        Ok((
            file,
            Self {
                temp,
                destination,
                created,
            },
        ))
    }

    pub fn path(&self) -> &Path { &self.temp }

    pub fn destination(&self) -> &Path { &self.destination }

    /// Rename the staging file over the destination, replacing any existing file.
    pub fn commit(self) -> Result<PathBuf> {
        let Self {
            temp,
            destination,
            created,
        } = self;

        if let Err(e) = temp.persist(&destination) {
            // The returned temp path must go before its directories do.
            drop(e.path);
            drop(created);
            return Err(Error::Commit {
                path:   destination,
                source: e.error,
            });
        }

        created.keep();
        Ok(destination)
    }
}
