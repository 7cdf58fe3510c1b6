//! Process singleton guard.
//!
//! An advisory exclusive lock on a well-known file, taken without blocking:
//! a second instance fails fast instead of waiting.

use std::{
    fs::{self, File, OpenOptions, TryLockError},
    io::Write,
    path::{Path, PathBuf},
};

use crate::error::StartupError;

/// Holds the lock until dropped.
#[derive(Debug)]
pub struct InstanceLock {
    file: File,
    path: PathBuf,
}

impl InstanceLock {
    /// Takes the lock on `path`, creating the file and its parents. The
    /// holder's pid is written into the file for operators.
    pub fn acquire(path: &Path) -> Result<Self, StartupError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        match file.try_lock() {
            Ok(()) => {}
            Err(TryLockError::WouldBlock) => {
                return Err(StartupError::LockHeld(path.to_path_buf()));
            }
            Err(TryLockError::Error(err)) => return Err(err.into()),
        }

        // Only the holder rewrites the file.
        file.set_len(0)?;
        writeln!(file, "{}", std::process::id())?;
        file.sync_all()?;

        tracing::info!("instance lock acquired at {}", path.display());
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for InstanceLock {
    fn drop(&mut self) {
        if let Err(err) = self.file.unlock() {
            tracing::debug!("instance lock release failed: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_fails_fast() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("ledger.lock");

        let first = InstanceLock::acquire(&path).unwrap();
        assert_eq!(first.path(), path.as_path());
        let pid = fs::read_to_string(&path).unwrap();
        assert_eq!(pid.trim(), std::process::id().to_string());

        match InstanceLock::acquire(&path) {
            Err(StartupError::LockHeld(held)) => assert_eq!(held, path),
            other => panic!("expected LockHeld, got {other:?}"),
        }
    }

    #[test]
    fn lock_is_released_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.lock");

        drop(InstanceLock::acquire(&path).unwrap());
        assert!(InstanceLock::acquire(&path).is_ok());
    }
}
