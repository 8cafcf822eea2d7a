//! Atomic state file I/O.
//!
//! Format: a single JSON object
//! ```text
//! { "pid": 4242, "host": "127.0.0.1", "port": 5555, "started_at": "2024-03-01T09:30:00Z" }
//! ```

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;
use waqt_core::{ManagedProcessState, WaqtPaths};

/// Reads and writes the single UI server state record of a data directory.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    /// Store backed by an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store backed by `<data_dir>/waqt_server.json`.
    pub fn for_paths(paths: &WaqtPaths) -> Self {
        Self::new(paths.state_file())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the record.
    ///
    /// Returns `None` if the file is absent, unreadable, or not a valid record.
    pub fn read(&self) -> Option<ManagedProcessState> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                debug!("Cannot read state file {}: {}", self.path.display(), e);
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(state) => Some(state),
            Err(e) => {
                debug!("Ignoring malformed state file {}: {}", self.path.display(), e);
                None
            }
        }
    }

    /// Write the record atomically using temp file + rename.
    ///
    /// # Atomicity
    /// 1. Write to `waqt_server.json.<pid>.tmp` in the same directory
    /// 2. Rename to `waqt_server.json` (atomic on Unix; replace-existing on Windows)
    ///
    /// A concurrent reader sees either the previous record or the new one,
    /// never a partial file. The temp file is removed if any step fails.
    pub fn write(&self, state: &ManagedProcessState) -> io::Result<()> {
        let dir = self
            .path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)?;

        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "state path has no file name"))?
            .to_string_lossy();
        let temp_path = dir.join(format!("{}.{}.tmp", file_name, std::process::id()));

        let result = write_then_rename(&temp_path, &self.path, state);
        if result.is_err() {
            let _ = fs::remove_file(&temp_path);
        }
        result
    }

    /// Delete the record (idempotent - no error if missing).
    pub fn delete(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

fn write_then_rename(temp_path: &Path, final_path: &Path, state: &ManagedProcessState) -> io::Result<()> {
    let content = serde_json::to_vec_pretty(state)?;

    let mut file = File::create(temp_path)?;
    file.write_all(&content)?;
    file.sync_all()?;
    drop(file);

    fs::rename(temp_path, final_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;

    fn store_in(dir: &tempfile::TempDir) -> StateStore {
        StateStore::new(dir.path().join("waqt_server.json"))
    }

    #[test]
    fn roundtrip_state() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let state = ManagedProcessState::new(98765, "127.0.0.1", 5555);

        store.write(&state).expect("write failed");
        assert!(store.path().exists());
        assert_eq!(store.read(), Some(state));

        store.delete().expect("delete failed");
        assert!(!store.path().exists());

        // Second delete should be idempotent
        store.delete().expect("second delete failed");
    }

    #[test]
    fn read_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(store_in(&dir).read(), None);
    }

    #[test]
    fn read_corrupt_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        fs::write(store.path(), "{\"pid\": 12, \"host\": ").unwrap();
        assert_eq!(store.read(), None);

        fs::write(store.path(), "not json at all").unwrap();
        assert_eq!(store.read(), None);
    }

    #[test]
    fn write_creates_missing_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path().join("nested/data/waqt_server.json"));
        let state = ManagedProcessState::new(7, "0.0.0.0", 8080);

        store.write(&state).unwrap();
        assert_eq!(store.read(), Some(state));
    }

    #[test]
    fn write_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        for port in 1..=5 {
            store
                .write(&ManagedProcessState::new(42, "127.0.0.1", port))
                .unwrap();
        }

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["waqt_server.json".to_string()]);
    }

    #[test]
    fn failed_write_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        // A directory at the target path makes the final rename fail.
        let target = dir.path().join("waqt_server.json");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("occupant"), "x").unwrap();

        let store = StateStore::new(&target);
        assert!(store.write(&ManagedProcessState::new(1, "127.0.0.1", 1)).is_err());

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    #[cfg(unix)]
    fn concurrent_reader_never_sees_torn_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store
            .write(&ManagedProcessState::new(1, "h".repeat(64), 1))
            .unwrap();

        let done = Arc::new(AtomicBool::new(false));
        let reader = {
            let store = store.clone();
            let done = Arc::clone(&done);
            thread::spawn(move || {
                let mut observed = 0usize;
                while !done.load(Ordering::Acquire) {
                    let state = store.read().expect("reader observed a missing or torn record");
                    // Every record is written with host length = port * 64.
                    assert_eq!(state.host.len(), usize::from(state.port) * 64);
                    observed += 1;
                }
                observed
            })
        };

        let mut last = None;
        for port in 1..=200u16 {
            let state = ManagedProcessState::new(i64::from(port), "h".repeat(usize::from(port) * 64), port);
            store.write(&state).unwrap();
            last = Some(state);
        }
        done.store(true, Ordering::Release);

        let observed = reader.join().expect("reader panicked");
        assert!(observed > 0);
        assert_eq!(store.read(), last);
    }
}
