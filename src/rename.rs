//! Filesystem rename engine
//!
//! Renames folders and files whose names embed the old app name. A missing
//! source is a no-op. When two template generations map onto the same new
//! folder the older one is merged into it entry by entry. A file that exists
//! on both sides keeps the target copy, which the earlier generation already
//! migrated, and the source copy is dropped.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::error::fs::{read_failed, rename_conflict, rename_failed, write_failed};

/// Receives every primitive filesystem change made by a rename so it can be
/// undone later.
pub trait RenameJournal {
    fn renamed(&mut self, from: &Path, to: &Path);
    fn created_dir(&mut self, path: &Path);
    fn removed_dir(&mut self, path: &Path);
    /// A superseded file was deleted; `content` is what it held
    fn removed_file(&mut self, path: &Path, content: Vec<u8>);
}

/// Journal that records nothing
impl RenameJournal for () {
    fn renamed(&mut self, _from: &Path, _to: &Path) {}
    fn created_dir(&mut self, _path: &Path) {}
    fn removed_dir(&mut self, _path: &Path) {}
    fn removed_file(&mut self, _path: &Path, _content: Vec<u8>) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    /// Source does not exist
    Skipped,
    Renamed,
    /// Source was merged into an existing target. `superseded` lists the
    /// target files that were kept while their source copy was dropped.
    Merged {
        entries: usize,
        superseded: Vec<PathBuf>,
    },
}

/// Rename `from` to `to`. Missing sources are skipped without creating `to`.
pub fn rename_entry(from: &Path, to: &Path) -> Result<RenameOutcome> {
    rename_entry_journaled(from, to, &mut ())
}

/// [`rename_entry`], reporting each primitive change to `journal`
pub fn rename_entry_journaled(
    from: &Path,
    to: &Path,
    journal: &mut impl RenameJournal,
) -> Result<RenameOutcome> {
    if !entry_exists(from) || from == to || to.starts_with(from) {
        return Ok(RenameOutcome::Skipped);
    }

    if let Some(parent) = to.parent() {
        create_missing_dirs(parent, journal)?;
    }

    if !entry_exists(to) || same_entry(from, to) {
        plain_rename(from, to, journal)?;
        return Ok(RenameOutcome::Renamed);
    }

    let mut superseded = Vec::new();
    let entries = match (from.is_dir(), to.is_dir()) {
        (true, true) => merge_dirs(from, to, &mut superseded, journal)?,
        (false, false) => {
            drop_superseded(from, to, &mut superseded, journal)?;
            0
        }
        _ => return Err(rename_conflict(from, to)),
    };
    Ok(RenameOutcome::Merged {
        entries,
        superseded,
    })
}

fn plain_rename(from: &Path, to: &Path, journal: &mut impl RenameJournal) -> Result<()> {
    fs::rename(from, to).map_err(|e| rename_failed(from, to, &e))?;
    journal.renamed(from, to);
    Ok(())
}

fn merge_dirs(
    from: &Path,
    to: &Path,
    superseded: &mut Vec<PathBuf>,
    journal: &mut impl RenameJournal,
) -> Result<usize> {
    let mut children: Vec<PathBuf> = fs::read_dir(from)
        .map_err(|e| read_failed(from, &e))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .collect();
    children.sort();

    let mut moved = 0;
    for child in children {
        let Some(name) = child.file_name() else {
            continue;
        };
        let target = to.join(name);

        if !entry_exists(&target) {
            plain_rename(&child, &target, journal)?;
            moved += 1;
            continue;
        }
        match (child.is_dir(), target.is_dir()) {
            (true, true) => moved += merge_dirs(&child, &target, superseded, journal)?,
            (false, false) => drop_superseded(&child, &target, superseded, journal)?,
            _ => return Err(rename_conflict(&child, &target)),
        }
    }

    fs::remove_dir(from).map_err(|e| write_failed(from, &e))?;
    journal.removed_dir(from);

    Ok(moved)
}

/// Delete `from` because `kept` already holds the migrated copy
fn drop_superseded(
    from: &Path,
    kept: &Path,
    superseded: &mut Vec<PathBuf>,
    journal: &mut impl RenameJournal,
) -> Result<()> {
    let content = fs::read(from).map_err(|e| read_failed(from, &e))?;
    fs::remove_file(from).map_err(|e| write_failed(from, &e))?;
    journal.removed_file(from, content);
    superseded.push(kept.to_path_buf());
    Ok(())
}

fn create_missing_dirs(dir: &Path, journal: &mut impl RenameJournal) -> Result<()> {
    let mut missing = Vec::new();
    let mut current = Some(dir);
    while let Some(path) = current {
        if path.as_os_str().is_empty() || entry_exists(path) {
            break;
        }
        missing.push(path.to_path_buf());
        current = path.parent();
    }

    for path in missing.iter().rev() {
        fs::create_dir(path).map_err(|e| write_failed(path, &e))?;
        journal.created_dir(path);
    }
    Ok(())
}

fn entry_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// True when both paths name the same entry, e.g. a case-only rename on a
/// case-insensitive filesystem.
fn same_entry(a: &Path, b: &Path) -> bool {
    match (dunce::canonicalize(a), dunce::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
