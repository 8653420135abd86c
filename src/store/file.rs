//! # File Store
//!
//! Persisted reading state as JSON files under the state directory
//! (`~/.sifr/state/` by default):
//!
//! - `history.json` — ordered append log of tab snapshots, bounded
//! - `scroll.json` — tab id → offset map
//! - `preferences.json` — display preferences + dark mode
//!
//! All writes use atomic rename (write `.tmp`, then `rename()`) for crash
//! safety. Reads of missing or corrupt files fall back to defaults: a bad
//! state file costs saved positions, never a crash.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{HistoryEntry, Preferences, StateStore};

/// Oldest entries are dropped beyond this many.
pub const HISTORY_LIMIT: usize = 100;

pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    /// Failure to create it is logged, not fatal: reads will default and
    /// writes will warn, per the store contract.
    pub fn new(dir: PathBuf) -> Self {
        if let Err(e) = fs::create_dir_all(&dir) {
            warn!("Failed to create state dir {}: {}", dir.display(), e);
        }
        FileStore { dir }
    }

    fn history_path(&self) -> PathBuf {
        self.dir.join("history.json")
    }

    fn scroll_path(&self) -> PathBuf {
        self.dir.join("scroll.json")
    }

    fn preferences_path(&self) -> PathBuf {
        self.dir.join("preferences.json")
    }

    /// Read a JSON file, substituting the default on any failure.
    fn read_json<T: DeserializeOwned + Default>(&self, path: &Path) -> T {
        if !path.exists() {
            return T::default();
        }
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(value) => value,
                Err(e) => {
                    warn!("Corrupt state file {}, using defaults: {}", path.display(), e);
                    T::default()
                }
            },
            Err(e) => {
                warn!("Failed to read {}, using defaults: {}", path.display(), e);
                T::default()
            }
        }
    }

    /// Write a JSON file atomically; failures are logged and swallowed.
    fn write_json<T: Serialize>(&self, path: &Path, data: &T) {
        if let Err(e) = atomic_write_json(path, data) {
            warn!("Failed to write {}: {}", path.display(), e);
        }
    }
}

/// Atomically write `data` as JSON to `path` (via `.tmp` + rename).
fn atomic_write_json<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

#[derive(Serialize, Deserialize, Default)]
struct HistoryFile {
    entries: Vec<HistoryEntry>,
}

#[derive(Serialize, Deserialize, Default)]
struct ScrollFile {
    offsets: HashMap<String, f64>,
}

#[derive(Serialize, Deserialize, Default)]
struct PreferencesFile {
    #[serde(default)]
    preferences: Preferences,
    #[serde(default)]
    dark_mode: bool,
}

impl StateStore for FileStore {
    fn name(&self) -> &str {
        "file"
    }

    fn append_history(&self, entry: &HistoryEntry) {
        let mut file: HistoryFile = self.read_json(&self.history_path());
        file.entries.push(entry.clone());
        if file.entries.len() > HISTORY_LIMIT {
            let excess = file.entries.len() - HISTORY_LIMIT;
            file.entries.drain(..excess);
        }
        self.write_json(&self.history_path(), &file);
        debug!("History appended: {}", entry.title());
    }

    fn history(&self) -> Vec<HistoryEntry> {
        self.read_json::<HistoryFile>(&self.history_path()).entries
    }

    fn scroll_position(&self, tab_id: &str) -> f64 {
        self.read_json::<ScrollFile>(&self.scroll_path())
            .offsets
            .get(tab_id)
            .copied()
            .unwrap_or(0.0)
    }

    fn set_scroll_position(&self, tab_id: &str, offset: f64) {
        let mut file: ScrollFile = self.read_json(&self.scroll_path());
        file.offsets.insert(tab_id.to_string(), offset);
        self.write_json(&self.scroll_path(), &file);
    }

    fn remove_scroll_position(&self, tab_id: &str) {
        let mut file: ScrollFile = self.read_json(&self.scroll_path());
        if file.offsets.remove(tab_id).is_some() {
            self.write_json(&self.scroll_path(), &file);
        }
    }

    fn preferences(&self) -> Preferences {
        self.read_json::<PreferencesFile>(&self.preferences_path())
            .preferences
    }

    fn set_preferences(&self, preferences: &Preferences) {
        let mut file: PreferencesFile = self.read_json(&self.preferences_path());
        file.preferences = preferences.clone();
        self.write_json(&self.preferences_path(), &file);
    }

    fn dark_mode(&self) -> bool {
        self.read_json::<PreferencesFile>(&self.preferences_path())
            .dark_mode
    }

    fn set_dark_mode(&self, on: bool) {
        let mut file: PreferencesFile = self.read_json(&self.preferences_path());
        file.dark_mode = on;
        self.write_json(&self.preferences_path(), &file);
    }
}
