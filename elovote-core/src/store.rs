/// JSON persistence for the rating table, plus explicit reconciliation
/// against a changed candidate list.
///
/// The file is always rewritten in full (temp file + rename), never appended.
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::EloConfig;
use crate::error::{EloError, Result};
use crate::types::RatingTable;

/// A rating table persisted at a fixed path.
#[derive(Debug, Clone)]
pub struct RatingStore {
    path: PathBuf,
}

impl RatingStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        RatingStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the persisted table verbatim, or build a fresh one from
    /// `candidate_names` when nothing has been saved yet.
    ///
    /// An existing file is never reconciled against `candidate_names`; see
    /// [`reconcile`] for that.
    pub fn load<I, S>(&self, candidate_names: I, config: &EloConfig) -> Result<RatingTable>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if let Some(table) = self.read()? {
            return Ok(table);
        }
        let table = RatingTable::from_names(candidate_names, config.default_item());
        info!(path = %self.path.display(), items = table.len(), "created fresh rating table");
        Ok(table)
    }

    /// Read the persisted table. `Ok(None)` when the file does not exist.
    pub fn read(&self) -> Result<Option<RatingTable>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };

        let table: RatingTable = serde_json::from_str(&content).map_err(|e| self.corrupt(e.to_string()))?;
        if let Some((name, item)) = table.iter().find(|(_, item)| !item.rating.is_finite()) {
            return Err(self.corrupt(format!("item \"{name}\" has non-finite rating {}", item.rating)));
        }

        info!(path = %self.path.display(), items = table.len(), "loaded rating table");
        Ok(Some(table))
    }

    /// Overwrite the persisted table with `table`.
    pub fn save(&self, table: &RatingTable) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let content = serde_json::to_string_pretty(table).map_err(|e| self.io_error(e.into()))?;
        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, content).map_err(|e| EloError::Io { path: tmp_path.clone(), source: e })?;
        fs::rename(&tmp_path, &self.path).map_err(|e| self.io_error(e))?;

        info!(path = %self.path.display(), items = table.len(), "saved rating table");
        Ok(())
    }

    /// Delete the persisted table. Returns false when there was nothing to delete.
    pub fn discard(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                warn!(path = %self.path.display(), "discarded rating table");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }

    fn io_error(&self, source: std::io::Error) -> EloError {
        EloError::Io { path: self.path.clone(), source }
    }

    fn corrupt(&self, reason: String) -> EloError {
        EloError::DataCorruption { path: self.path.clone(), reason }
    }
}

/// What to do with table entries that are no longer in the candidate list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReconcilePolicy {
    /// Keep them, with their rating history.
    #[default]
    Retain,
    /// Drop them from the table.
    Prune,
}

/// Names changed by [`reconcile`], each list in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

impl ReconcileReport {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Bring `table` in line with `candidate_names`: missing names are added with
/// the configured defaults, unlisted names are kept or dropped per `policy`.
///
/// An empty candidate list never prunes; it would wipe the whole table.
pub fn reconcile<I, S>(
    table: &mut RatingTable,
    candidate_names: I,
    policy: ReconcilePolicy,
    config: &EloConfig,
) -> ReconcileReport
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let listed = RatingTable::from_names(candidate_names, config.default_item());
    let mut report = ReconcileReport::default();

    for name in listed.names() {
        if table.insert_if_absent(name, config.default_item()) {
            report.added.push(name.to_string());
        }
    }

    if policy == ReconcilePolicy::Prune && listed.is_empty() {
        warn!(items = table.len(), "candidate list is empty, not pruning");
    } else if policy == ReconcilePolicy::Prune {
        let stale: Vec<String> = table
            .names()
            .filter(|name| !listed.contains(name))
            .map(str::to_string)
            .collect();
        for name in stale {
            table.remove(&name);
            report.removed.push(name);
        }
    }

    if !report.is_empty() {
        warn!(
            added = report.added.len(),
            removed = report.removed.len(),
            "reconciled rating table with candidate list"
        );
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Item;

    #[test]
    fn test_reconcile_adds_missing_names() {
        let config = EloConfig::default();
        let mut table = RatingTable::from_names(["a", "b"], config.default_item());
        let report = reconcile(&mut table, ["a", "b", "C"], ReconcilePolicy::Retain, &config);
        assert_eq!(report.added, vec!["c"]);
        assert!(report.removed.is_empty());
        assert_eq!(table.get("c"), Some(&Item { rating: 1000.0, rounds: 0 }));
    }

    #[test]
    fn test_reconcile_retain_keeps_unlisted() {
        let config = EloConfig::default();
        let mut table = RatingTable::from_names(["a", "b", "gone"], config.default_item());
        let report = reconcile(&mut table, ["a", "b"], ReconcilePolicy::Retain, &config);
        assert!(report.is_empty());
        assert!(table.contains("gone"));
    }

    #[test]
    fn test_reconcile_prune_drops_unlisted() {
        let config = EloConfig::default();
        let mut table = RatingTable::from_names(["a", "b", "gone"], config.default_item());
        let report = reconcile(&mut table, ["a", "b", "new"], ReconcilePolicy::Prune, &config);
        assert_eq!(report.added, vec!["new"]);
        assert_eq!(report.removed, vec!["gone"]);
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["a", "b", "new"]);
    }

    #[test]
    fn test_reconcile_preserves_existing_ratings() {
        let config = EloConfig::default();
        let mut table = RatingTable::new();
        table.insert_if_absent("a", Item { rating: 1234.5, rounds: 9 });
        reconcile(&mut table, ["a", "b"], ReconcilePolicy::Prune, &config);
        assert_eq!(table.get("a"), Some(&Item { rating: 1234.5, rounds: 9 }));
    }

    #[test]
    fn test_reconcile_prune_with_empty_list_keeps_everything() {
        let config = EloConfig::default();
        let mut table = RatingTable::from_names(["a", "b"], config.default_item());
        let before = table.clone();
        let report = reconcile(&mut table, ["", "  "], ReconcilePolicy::Prune, &config);
        assert!(report.is_empty());
        assert_eq!(table, before);
    }
}
