//! File-backed persistence for the task collection and the rollover marker
//!
//! Writes are best-effort: a failed save is logged and the in-memory state
//! stays authoritative for the session. Reads fall back to defaults, never
//! propagate errors to the caller.

use std::error::Error;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::task::Task;

/// The task collection, backed by a JSON file
#[derive(Debug, PartialEq)]
pub struct Store {
    backing_file: PathBuf,
    tasks: Vec<Task>,
}

impl Store {
    /// Initialize a store from the content of a valid backing file if it exists.
    /// Returns an error otherwise
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn Error>> {
        let tasks = match std::fs::File::open(path) {
            Err(err) => {
                return Err(format!("Unable to open file {:?}: {}", path, err).into());
            }
            Ok(file) => serde_json::from_reader(file)?,
        };

        Ok(Self {
            backing_file: PathBuf::from(path),
            tasks,
        })
    }

    /// Initialize a store with the default seed collection
    pub fn new_seeded(path: &Path, today: NaiveDate) -> Self {
        Self {
            backing_file: PathBuf::from(path),
            tasks: seed_tasks(today),
        }
    }

    /// Load the collection from `path`, falling back to the seed collection
    /// when the file is absent or its payload is malformed.
    pub fn load_or_seed(path: &Path, today: NaiveDate) -> Self {
        match Self::from_file(path) {
            Ok(store) => store,
            Err(err) => {
                log::warn!("Falling back to the seed collection: {}", err);
                Self::new_seeded(path, today)
            }
        }
    }

    /// Store the current collection to its backing file, best-effort.
    pub fn save(&self) {
        let path = &self.backing_file;
        let file = match std::fs::File::create(path) {
            Err(err) => {
                log::warn!("Unable to save file {:?}: {}", path, err);
                return;
            }
            Ok(f) => f,
        };

        if let Err(err) = serde_json::to_writer(file, &self.tasks) {
            log::warn!("Unable to serialize: {}", err);
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Mutable access for the single logical owner of the collection.
    /// Callers are responsible for serializing mutations (e.g. not running
    /// rollover concurrently with a manual edit).
    pub fn tasks_mut(&mut self) -> &mut Vec<Task> {
        &mut self.tasks
    }

    pub fn add_task(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Remove a task by id. Returns whether anything was removed.
    pub fn remove_task(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id() != id);
        self.tasks.len() != before
    }

    pub fn task_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id() == id)
    }
}

/// The collection a first-time user starts with
fn seed_tasks(today: NaiveDate) -> Vec<Task> {
    vec![Task::new("Welcome to Daybook! Add your first task.", today)]
}

/// Single-key store holding the date the rollover last ran
#[derive(Debug, PartialEq)]
pub struct MarkerStore {
    backing_file: PathBuf,
    last_rollover: Option<NaiveDate>,
}

impl MarkerStore {
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn Error>> {
        let last_rollover = match std::fs::File::open(path) {
            Err(err) => {
                return Err(format!("Unable to open file {:?}: {}", path, err).into());
            }
            Ok(file) => serde_json::from_reader(file)?,
        };

        Ok(Self {
            backing_file: PathBuf::from(path),
            last_rollover,
        })
    }

    /// Load the marker from `path`; an absent or malformed file means the
    /// rollover never ran.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::from_file(path) {
            Ok(store) => store,
            Err(err) => {
                log::warn!("Starting with an empty rollover marker: {}", err);
                Self {
                    backing_file: PathBuf::from(path),
                    last_rollover: None,
                }
            }
        }
    }

    pub fn last_rollover(&self) -> Option<NaiveDate> {
        self.last_rollover
    }

    pub fn set_last_rollover(&mut self, date: NaiveDate) {
        self.last_rollover = Some(date);
    }

    /// Store the current marker to its backing file, best-effort.
    pub fn save(&self) {
        let path = &self.backing_file;
        let file = match std::fs::File::create(path) {
            Err(err) => {
                log::warn!("Unable to save file {:?}: {}", path, err);
                return;
            }
            Ok(f) => f,
        };

        if let Err(err) = serde_json::to_writer(file, &self.last_rollover) {
            log::warn!("Unable to serialize: {}", err);
        }
    }
}
