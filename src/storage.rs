// Manages local file storage for user preferences.
//
// ⚠️ VERSION BUMP REQUIRED:
// Changes to the Prefs struct require incrementing PREFS_STORAGE_VERSION
// below to prevent data corruption.
use crate::paths::AppPaths;
use anyhow::Result;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

// Increment this when making breaking changes to the Prefs serialization format
// Version history:
// - v1: Initial format (last_name, document, document_path)
const PREFS_STORAGE_VERSION: u32 = 1;

/// Wrapper struct for versioned preference storage
#[derive(Serialize, Deserialize)]
struct PrefsData {
    #[serde(default)]
    version: u32,
    #[serde(default)]
    prefs: Prefs,
}

/// Tracks whether the last preference load succeeded.
/// This prevents data loss by blocking saves when we couldn't read the
/// existing file.
static LOAD_STATE: OnceLock<Mutex<LoadState>> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadState {
    /// Never attempted to load
    Uninitialized,
    /// Last load succeeded
    Success,
    /// Last load failed (deserialization error, corruption, etc.)
    Failed,
}

impl LoadState {
    fn get() -> LoadState {
        let state = LOAD_STATE.get_or_init(|| Mutex::new(LoadState::Uninitialized));
        *state.lock().unwrap()
    }

    fn set(new_state: LoadState) {
        let state = LOAD_STATE.get_or_init(|| Mutex::new(LoadState::Uninitialized));
        *state.lock().unwrap() = new_state;
    }
}

/// Values restored between sessions: the last loaded report document and
/// the last queried name. The extraction core never reads or writes
/// these; the shell passes them in and out explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prefs {
    /// Name used for the last report generation.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Raw text of the last loaded report document.
    #[serde(default)]
    pub document: Option<String>,
    /// Where `document` was read from, for display and reloading.
    #[serde(default)]
    pub document_path: Option<String>,
}

impl Prefs {
    /// Load preferences from prefs.json. A missing file yields defaults;
    /// a corrupt one is an error and blocks subsequent saves.
    pub fn load() -> Result<Self> {
        let path = AppPaths::get_prefs_path()?;
        if !path.exists() {
            LoadState::set(LoadState::Success);
            return Ok(Self::default());
        }

        let result = LocalStorage::with_lock(&path, || {
            let json = fs::read_to_string(&path)?;
            let data: PrefsData = serde_json::from_str(&json)?;

            if data.version > PREFS_STORAGE_VERSION {
                return Err(anyhow::anyhow!(
                    "Preferences version {} is newer than supported version {}. Please upgrade Accompli.",
                    data.version,
                    PREFS_STORAGE_VERSION
                ));
            }
            // v0 (no version field) and v1 share the same layout.
            Ok(data.prefs)
        });

        match &result {
            Ok(_) => LoadState::set(LoadState::Success),
            Err(_) => LoadState::set(LoadState::Failed),
        }
        result
    }

    /// Save preferences to prefs.json.
    ///
    /// # Data Loss Prevention
    /// Checks `LoadState` before saving. If the last `load()` failed, this
    /// returns an error instead of overwriting a file we could not read.
    /// After manual recovery, use `force_save()`.
    pub fn save(&self) -> Result<()> {
        if !Self::can_save() {
            return Err(anyhow::anyhow!(
                "Cannot save preferences: previous load failed. This prevents overwriting data that couldn't be read."
            ));
        }
        self.write_to_disk()
    }

    /// Save preferences, bypassing the load-state check.
    pub fn force_save(&self) -> Result<()> {
        self.write_to_disk()
    }

    /// Returns false when the last load failed.
    pub fn can_save() -> bool {
        LoadState::get() != LoadState::Failed
    }

    fn write_to_disk(&self) -> Result<()> {
        let path = AppPaths::get_prefs_path()?;
        LocalStorage::with_lock(&path, || {
            let data = PrefsData {
                version: PREFS_STORAGE_VERSION,
                prefs: self.clone(),
            };
            let json = serde_json::to_string_pretty(&data)?;
            LocalStorage::atomic_write(&path, json)?;
            Ok(())
        })?;
        log::info!("Preferences saved to {:?}", path);
        Ok(())
    }
}

/// File I/O primitives shared by preferences, config, and export.
pub struct LocalStorage;

impl LocalStorage {
    /// Helper to get a sidecar lock file path
    fn get_lock_path(file_path: &Path) -> PathBuf {
        let mut lock_path = file_path.to_path_buf();
        if let Some(ext) = lock_path.extension() {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".lock");
            lock_path.set_extension(new_ext);
        } else {
            lock_path.set_extension("lock");
        }
        lock_path
    }

    /// Runs `f` while holding an exclusive lock on a sidecar of
    /// `file_path`, serializing access across processes.
    pub fn with_lock<F, T>(file_path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let lock_path = Self::get_lock_path(file_path);
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        file.lock_exclusive()?;
        let result = f();
        file.unlock()?;
        result
    }

    /// Atomic write: Write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }
}
