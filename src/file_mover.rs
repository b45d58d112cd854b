/// Filesystem primitives used by the sorter: destination creation and moves.
///
/// Moves never overwrite. A name that is already taken at the destination is
/// reported as a [`MoveOutcome::NameCollision`] instead of being replaced, and
/// every other failure is handed back with its underlying error.
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Result of moving a single file into a directory.
#[derive(Debug)]
pub enum MoveOutcome {
    /// The file now lives at this path.
    Moved(PathBuf),
    /// Something already exists at this path; the source was left in place.
    NameCollision(PathBuf),
    /// The move failed for any other reason; the source was left in place.
    Failed {
        destination: PathBuf,
        error: io::Error,
    },
}

/// Moves files into directories and creates those directories on demand.
pub struct FileMover;

impl FileMover {
    /// Makes sure `dir` exists, creating missing parents as well.
    ///
    /// Returns `Ok(true)` when the directory was created by this call and
    /// `Ok(false)` when it was already there.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use filesorter::file_mover::FileMover;
    /// use std::path::Path;
    ///
    /// if FileMover::ensure_dir(Path::new("/tmp/downloads/Images")).unwrap() {
    ///     println!("created");
    /// }
    /// ```
    pub fn ensure_dir(dir: &Path) -> io::Result<bool> {
        if dir.is_dir() {
            return Ok(false);
        }
        fs::create_dir_all(dir)?;
        Ok(true)
    }

    /// Moves `file` into `dir`, keeping its file name.
    ///
    /// The destination is checked with `symlink_metadata` first so that a
    /// dangling symlink also counts as a taken name. A rename that reports
    /// `AlreadyExists` is mapped to a collision as well.
    pub fn move_into(file: &Path, dir: &Path) -> MoveOutcome {
        let Some(file_name) = file.file_name() else {
            return MoveOutcome::Failed {
                destination: dir.to_path_buf(),
                error: io::Error::new(io::ErrorKind::InvalidInput, "file has no name component"),
            };
        };
        let destination = dir.join(file_name);

        if fs::symlink_metadata(&destination).is_ok() {
            return MoveOutcome::NameCollision(destination);
        }

        match fs::rename(file, &destination) {
            Ok(()) => MoveOutcome::Moved(destination),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                MoveOutcome::NameCollision(destination)
            }
            Err(error) => MoveOutcome::Failed { destination, error },
        }
    }
}
