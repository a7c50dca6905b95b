// Local snapshot of tasks, habits and today's completions.
//
// ⚠️ VERSION BUMP REQUIRED:
// Changes to Task / Habit serialization require incrementing
// SNAPSHOT_VERSION below, and teaching `load` how to read the old one.
use crate::context::AppContext;
use crate::model::{Habit, Task, TodoItem, combine_items, filter_items};
use anyhow::{Context, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionTarget {
    Task,
    Habit,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub habits: Vec<Habit>,
    #[serde(default)]
    pub completed_task_ids: HashSet<String>,
    #[serde(default)]
    pub completed_habit_ids: HashSet<String>,
}

impl Snapshot {
    pub fn today_items(&self, show_completed: bool) -> Vec<TodoItem> {
        let items = combine_items(
            &self.tasks,
            &self.habits,
            &self.completed_task_ids,
            &self.completed_habit_ids,
        );
        filter_items(items, show_completed)
    }

    pub fn add_task(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Flips the completion mark of the task or habit with `id`.
    /// Returns which list it belongs to and the new state.
    /// An id present in both lists is rejected rather than guessed.
    pub fn toggle_completion(&mut self, id: &str) -> Result<(CompletionTarget, bool)> {
        let is_task = self.tasks.iter().any(|t| t.id == id);
        let is_habit = self.habits.iter().any(|h| h.id == id);
        let (target, set) = match (is_task, is_habit) {
            (true, true) => anyhow::bail!("Id '{}' names both a task and a habit", id),
            (true, false) => (CompletionTarget::Task, &mut self.completed_task_ids),
            (false, true) => (CompletionTarget::Habit, &mut self.completed_habit_ids),
            (false, false) => anyhow::bail!("No task or habit with id '{}'", id),
        };

        let now_completed = if set.remove(id) {
            false
        } else {
            set.insert(id.to_string());
            true
        };
        Ok((target, now_completed))
    }
}

/// Wrapper struct for versioned storage
#[derive(Serialize, Deserialize)]
struct SnapshotData {
    #[serde(default)]
    version: u32,
    #[serde(flatten)]
    snapshot: Snapshot,
}

pub struct LocalStorage;

impl LocalStorage {
    fn get_lock_path(file_path: &Path) -> PathBuf {
        let mut p = file_path.to_path_buf();
        if let Some(ext) = p.extension() {
            let mut ext = ext.to_os_string();
            ext.push(".lock");
            p.set_extension(ext);
        } else {
            p.set_extension("lock");
        }
        p
    }

    /// Runs `f` while holding an exclusive lock on a sibling `.lock` file.
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
            .open(&lock_path)
            .with_context(|| format!("Failed to open lock file {:?}", lock_path))?;

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

    fn read_snapshot(path: &Path) -> Result<Snapshot> {
        if !path.exists() {
            log::debug!("No snapshot at {:?}, starting empty", path);
            return Ok(Snapshot::default());
        }
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot {:?}", path))?;
        let data: SnapshotData = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse snapshot {:?}", path))?;

        // Version 0 means the field was absent: files written before versioning.
        if data.version > SNAPSHOT_VERSION {
            anyhow::bail!(
                "Snapshot {:?} has version {}, this build reads up to {}",
                path,
                data.version,
                SNAPSHOT_VERSION
            );
        }

        log::debug!(
            "Loaded {} tasks, {} habits from {:?}",
            data.snapshot.tasks.len(),
            data.snapshot.habits.len(),
            path
        );
        Ok(data.snapshot)
    }

    fn write_snapshot(path: &Path, snapshot: &Snapshot) -> Result<()> {
        let data = SnapshotData {
            version: SNAPSHOT_VERSION,
            snapshot: snapshot.clone(),
        };
        let json = serde_json::to_string_pretty(&data)?;
        Self::atomic_write(path, json)?;
        log::info!(
            "Saved {} tasks, {} habits to {:?}",
            snapshot.tasks.len(),
            snapshot.habits.len(),
            path
        );
        Ok(())
    }

    pub fn load(ctx: &dyn AppContext) -> Result<Snapshot> {
        let path = ctx.get_snapshot_path()?;
        Self::with_lock(&path, || Self::read_snapshot(&path))
    }

    pub fn save(ctx: &dyn AppContext, snapshot: &Snapshot) -> Result<()> {
        let path = ctx.get_snapshot_path()?;
        Self::with_lock(&path, || Self::write_snapshot(&path, snapshot))
    }

    /// Load, apply `f`, save, all under a single lock.
    /// Nothing is written if `f` fails.
    pub fn modify<F, T>(ctx: &dyn AppContext, f: F) -> Result<T>
    where
        F: FnOnce(&mut Snapshot) -> Result<T>,
    {
        let path = ctx.get_snapshot_path()?;
        Self::with_lock(&path, || {
            let mut snapshot = Self::read_snapshot(&path)?;
            let out = f(&mut snapshot)?;
            Self::write_snapshot(&path, &snapshot)?;
            Ok(out)
        })
    }
}
