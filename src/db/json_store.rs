//! Provides the JSON-file-backed expense store.
//!
//! The store owns the in-memory collection and the path of its backing file.
//! Every access goes through one async mutex, and every mutation is written to
//! disk before it becomes visible in memory.

use crate::error::{AppError, Result};
use crate::models::{Expense, ExpenseDraft, ExpenseUpdate};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, error, info};

/// The expense collection and the file it is mirrored to.
pub struct ExpenseStore {
    path: PathBuf,
    expenses: Mutex<Vec<Expense>>,
}

impl ExpenseStore {
    /// Loads the collection from `path`.
    ///
    /// A missing file yields an empty collection; the file is created on the
    /// first mutation.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Storage` if the file exists but cannot be read or is
    /// not a JSON array of expenses.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let expenses = read_expenses(&path)?;
        info!(
            "Loaded {} expenses from {}",
            expenses.len(),
            path.display()
        );

        Ok(Self {
            path,
            expenses: Mutex::new(expenses),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the full collection in insertion order.
    pub async fn list(&self) -> Vec<Expense> {
        self.expenses.lock().await.clone()
    }

    /// Appends a new expense with the next free id and persists the collection.
    ///
    /// The id is one more than the largest id in the collection, so ids stay
    /// unique after deletes.
    pub async fn create(&self, draft: ExpenseDraft) -> Result<Expense> {
        let mut expenses = self.expenses.lock().await;

        let id = next_id(&expenses)?;
        let expense = draft.into_expense(id);

        let mut next = expenses.clone();
        next.push(expense.clone());
        *expenses = self.persist(next).await?;

        debug!("Created expense {}", id);
        Ok(expense)
    }

    /// Merges `changes` into the expense with `id` and persists the collection.
    ///
    /// Returns `Ok(None)` without writing anything when no expense has that id.
    pub async fn update(&self, id: u64, changes: ExpenseUpdate) -> Result<Option<Expense>> {
        let mut expenses = self.expenses.lock().await;

        let Some(index) = expenses.iter().position(|e| e.id == id) else {
            debug!("Update requested for unknown expense {}", id);
            return Ok(None);
        };

        let mut next = expenses.clone();
        changes.apply_to(&mut next[index]);
        let updated = next[index].clone();
        *expenses = self.persist(next).await?;

        debug!("Updated expense {}", id);
        Ok(Some(updated))
    }

    /// Removes the expense with `id`, if any, and persists the collection.
    ///
    /// The file is rewritten even when nothing matched. Returns whether a
    /// record was removed.
    pub async fn delete(&self, id: u64) -> Result<bool> {
        let mut expenses = self.expenses.lock().await;

        let next: Vec<Expense> = expenses.iter().filter(|e| e.id != id).cloned().collect();
        let removed = next.len() != expenses.len();
        *expenses = self.persist(next).await?;

        debug!("Delete of expense {} removed a record: {}", id, removed);
        Ok(removed)
    }

    /// Writes `expenses` to the backing file on the blocking pool and hands the
    /// collection back once it is on disk.
    async fn persist(&self, expenses: Vec<Expense>) -> Result<Vec<Expense>> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || {
            write_json_atomic(&path, &expenses).map(|()| expenses)
        })
        .await
        .map_err(|e| AppError::Storage(format!("Persistence task failed: {}", e)))?
        .map_err(|e| {
            error!("Failed to persist expenses: {}", e);
            e
        })
    }
}

/// Largest id in the collection plus one, or 1 when empty.
fn next_id(expenses: &[Expense]) -> Result<u64> {
    match expenses.iter().map(|e| e.id).max() {
        None => Ok(1),
        Some(max) => max
            .checked_add(1)
            .ok_or_else(|| AppError::Storage(format!("No id left after {}", max))),
    }
}

fn read_expenses(path: &Path) -> Result<Vec<Expense>> {
    if !path.exists() {
        info!(
            "No backing file at {}, starting with an empty collection",
            path.display()
        );
        return Ok(Vec::new());
    }

    let file = File::open(path)
        .map_err(|e| AppError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| AppError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Writes JSON to a sibling temp file, syncs it, then renames it over `path`.
/// The temp file is removed if any step fails.
fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            AppError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = path.with_extension("json.tmp");

    let result = write_temp(&temp_path, data).and_then(|()| {
        fs::rename(&temp_path, path)
            .map_err(|e| AppError::Storage(format!("Failed to rename temp file: {}", e)))
    });

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_temp<T: Serialize + ?Sized>(temp_path: &Path, data: &T) -> Result<()> {
    let file = File::create(temp_path)
        .map_err(|e| AppError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, data)
        .map_err(|e| AppError::Storage(format!("Failed to serialize expenses: {}", e)))?;

    writer
        .flush()
        .map_err(|e| AppError::Storage(format!("Failed to flush expenses: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| AppError::Storage(format!("Failed to sync expenses: {}", e)))
}
