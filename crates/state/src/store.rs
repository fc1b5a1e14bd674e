use crate::{AppState, Dirty, Event, StateError};
use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Directory holding the persisted JSON documents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateDir {
    root: PathBuf,
}

impl StateDir {
    pub const TRANSACTIONS: &'static str = "transactions.json";
    pub const COOLDOWNS: &'static str = "cooldowns.json";
    pub const STREAK: &'static str = "streak.json";
    pub const PREFERENCES: &'static str = "preferences.json";

    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Reads a document, falling back to the default if it is missing or cannot be parsed.
    pub fn read<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        let path = self.path(name);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return T::default(),
            Err(err) => {
                warn!(?path, %err, "failed to read state document");
                return T::default();
            }
        };
        match serde_json::from_str(&contents) {
            Ok(value) => value,
            Err(err) => {
                warn!(?path, %err, "ignoring malformed state document");
                T::default()
            }
        }
    }

    /// Writes a document, replacing the previous version.
    pub fn write<T: Serialize>(&self, name: &str, value: &T) -> io::Result<()> {
        fs::create_dir_all(&self.root)?;
        let path = self.path(name);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(value)?)?;
        fs::rename(&tmp, &path)
    }
}

/// Owns the [`AppState`] and persists it after every successful transition.
///
/// Persistence is best effort: write failures are logged and otherwise ignored, and there is no
/// atomicity across documents.
#[derive(Debug)]
pub struct Store {
    dir: Option<StateDir>,
    state: AppState,
    busy: bool,
}

impl Store {
    /// Loads all documents from `dir`, applying the load-time cooldown and streak guards.
    pub fn open(dir: StateDir, now: DateTime<Utc>) -> Self {
        let cooldowns: Vec<_> = dir.read(StateDir::COOLDOWNS);
        let streak = dir.read(StateDir::STREAK);
        let loaded_cooldowns = cooldowns.len();

        let state = AppState::restore(
            dir.read(StateDir::TRANSACTIONS),
            cooldowns,
            streak,
            dir.read(StateDir::PREFERENCES),
            now,
        );
        debug!(
            root = ?dir.root(),
            transactions = state.transactions.len(),
            cooldowns = state.cooldowns.len(),
            streak = state.streak.count,
            "opened state"
        );

        let store = Self { dir: Some(dir), state, busy: false };
        let pruned = Dirty {
            cooldowns: store.state.cooldowns.len() != loaded_cooldowns,
            streak: store.state.streak != streak,
            ..Dirty::CLEAN
        };
        store.persist(pruned);
        store
    }

    /// A store that never touches the filesystem.
    pub fn ephemeral(state: AppState) -> Self {
        Self { dir: None, state, busy: false }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dir(&self) -> Option<&StateDir> {
        self.dir.as_ref()
    }

    /// Applies `event` and persists whatever it changed.
    pub fn dispatch(&mut self, event: Event) -> Result<(), StateError> {
        trace!(?event, "dispatch");
        let dirty = self.state.apply(event)?;
        self.persist(dirty);
        Ok(())
    }

    /// Marks an action as in progress. Returns `false` if one already is.
    ///
    /// This is advisory only; the executor does not check it.
    pub fn begin_action(&mut self) -> bool {
        !std::mem::replace(&mut self.busy, true)
    }

    pub fn end_action(&mut self) {
        self.busy = false;
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    fn persist(&self, dirty: Dirty) {
        let Some(dir) = &self.dir else { return };
        if dirty.transactions {
            write_logged(dir, StateDir::TRANSACTIONS, &self.state.transactions);
        }
        if dirty.cooldowns {
            write_logged(dir, StateDir::COOLDOWNS, &self.state.cooldowns);
        }
        if dirty.streak {
            write_logged(dir, StateDir::STREAK, &self.state.streak);
        }
        if dirty.preferences {
            write_logged(dir, StateDir::PREFERENCES, &self.state.preferences);
        }
    }
}

fn write_logged<T: Serialize>(dir: &StateDir, name: &str, value: &T) {
    if let Err(err) = dir.write(name, value) {
        warn!(document = name, %err, "failed to persist state");
    }
}
