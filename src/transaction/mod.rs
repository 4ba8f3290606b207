//! Transaction support for all-or-nothing renames
//!
//! Every content edit and filesystem rename performed during a run is
//! journalled. If the run fails before [`Transaction::commit`], the journal
//! is undone newest-first so the template is left as it was found.
//!
//! ## Usage
//!
//! ```ignore
//! let mut transaction = Transaction::new();
//!
//! transaction.apply_edit(&edit)?;
//! transaction.rename(&from, &to)?;
//!
//! // On success:
//! transaction.commit();
//!
//! // On error (automatic via Drop if not committed):
//! // rollback happens automatically
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::rename::{RenameJournal, RenameOutcome, rename_entry_journaled};
use crate::substitute::FileEdit;

/// A single reversible change
#[derive(Debug, Clone)]
enum JournalEntry {
    /// File content was replaced; holds the previous bytes
    Edited { path: PathBuf, original: Vec<u8> },
    Renamed { from: PathBuf, to: PathBuf },
    CreatedDir { path: PathBuf },
    RemovedDir { path: PathBuf },
    /// A superseded file was dropped during a merge
    RemovedFile { path: PathBuf, content: Vec<u8> },
}

/// A transaction for atomic template renames
#[derive(Debug)]
pub struct Transaction {
    journal: Vec<JournalEntry>,

    /// Whether the transaction has been committed
    committed: bool,
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new()
    }
}

impl Transaction {
    pub fn new() -> Self {
        Self {
            journal: Vec::new(),
            committed: false,
        }
    }

    /// Number of journalled changes
    pub fn len(&self) -> usize {
        self.journal.len()
    }

    /// Write a prepared edit, remembering the previous content
    pub fn apply_edit(&mut self, edit: &FileEdit) -> Result<()> {
        edit.write()?;
        self.journal.push(JournalEntry::Edited {
            path: edit.path.clone(),
            original: edit.original.clone().into_bytes(),
        });
        Ok(())
    }

    /// Rename an entry, journalling every primitive step
    pub fn rename(&mut self, from: &Path, to: &Path) -> Result<RenameOutcome> {
        rename_entry_journaled(from, to, self)
    }

    /// Commit the transaction (prevent rollback)
    pub fn commit(mut self) {
        self.committed = true;
    }

    /// Undo every journalled change, newest first. Returns the number of
    /// changes that could not be undone.
    pub fn rollback(&mut self) -> usize {
        if self.committed {
            return 0;
        }

        let mut failures = 0;
        while let Some(entry) = self.journal.pop() {
            if let Err(e) = undo(&entry) {
                eprintln!("Warning: Failed to undo {}: {}", describe(&entry), e);
                failures += 1;
            }
        }
        failures
    }
}

impl RenameJournal for Transaction {
    fn renamed(&mut self, from: &Path, to: &Path) {
        self.journal.push(JournalEntry::Renamed {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
        });
    }

    fn created_dir(&mut self, path: &Path) {
        self.journal.push(JournalEntry::CreatedDir {
            path: path.to_path_buf(),
        });
    }

    fn removed_dir(&mut self, path: &Path) {
        self.journal.push(JournalEntry::RemovedDir {
            path: path.to_path_buf(),
        });
    }

    fn removed_file(&mut self, path: &Path, content: Vec<u8>) {
        self.journal.push(JournalEntry::RemovedFile {
            path: path.to_path_buf(),
            content,
        });
    }
}

fn undo(entry: &JournalEntry) -> std::io::Result<()> {
    match entry {
        JournalEntry::Edited { path, original } => fs::write(path, original),
        JournalEntry::Renamed { from, to } => fs::rename(to, from),
        JournalEntry::CreatedDir { path } => {
            // Only remove if empty
            let empty = fs::read_dir(path)
                .map(|mut d| d.next().is_none())
                .unwrap_or(false);
            if empty { fs::remove_dir(path) } else { Ok(()) }
        }
        JournalEntry::RemovedDir { path } => fs::create_dir(path),
        JournalEntry::RemovedFile { path, content } => fs::write(path, content),
    }
}

fn describe(entry: &JournalEntry) -> String {
    match entry {
        JournalEntry::Edited { path, .. } => format!("edit of {}", path.display()),
        JournalEntry::Renamed { from, to } => {
            format!("rename {} -> {}", from.display(), to.display())
        }
        JournalEntry::CreatedDir { path } => format!("creation of {}", path.display()),
        JournalEntry::RemovedDir { path } | JournalEntry::RemovedFile { path, .. } => {
            format!("removal of {}", path.display())
        }
    }
}

impl Drop for Transaction {
    fn drop(&mut self) {
        if !self.committed && !self.journal.is_empty() {
            // Automatic rollback on drop if not committed
            let failures = self.rollback();
            if failures > 0 {
                eprintln!("Warning: Rollback left {failures} change(s) in place");
            }
        }
    }
}
