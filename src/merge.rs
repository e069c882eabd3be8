//! Override merge between freshly extracted records and the persisted file.
//!
//! With `M = keys(fresh) ∩ keys(persisted)`, `L = keys(fresh) - M` and
//! `R = keys(persisted) - M`, the result is the fresh records keyed in `L`
//! plus the persisted records keyed in `M`. New keys get their placeholder,
//! surviving keys keep their translation, and keys gone from the source are
//! dropped.

use std::collections::{
    BTreeMap,
    HashSet,
};

use crate::types::Record;

/// Key counts reported after a merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeStats {
    /// Records in the result
    pub total: usize,
    /// `|L|`: keys found in the source but not in the file
    pub added: usize,
    /// `|R|`: keys in the file no longer found in the source
    pub removed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Merged records, sorted by key, one per key
    pub records: Vec<Record>,
    pub stats: MergeStats,
}

/// Merges `fresh` (extracted this run) with `persisted` (loaded from the file).
///
/// Each key appears once in the result. When a key occurs more than once on the
/// side it is taken from, the first occurrence wins; a differing duplicate is
/// logged as a warning.
///
/// # Examples
/// ```
/// use strings_sync::merge::override_records;
/// use strings_sync::types::Record;
///
/// let fresh = vec![Record::placeholder("HELLO", "HELLO"), Record::placeholder("BYE", "BYE")];
/// let persisted = vec![Record::new("HELLO", "Greeting", "Bonjour")];
///
/// let outcome = override_records(fresh, persisted);
/// assert_eq!(outcome.records[0].key, "BYE");
/// assert_eq!(outcome.records[1].localized_value, "Bonjour");
/// assert_eq!((outcome.stats.total, outcome.stats.added, outcome.stats.removed), (2, 1, 0));
/// ```
#[must_use]
pub fn override_records(fresh: Vec<Record>, persisted: Vec<Record>) -> MergeOutcome {
    let fresh_keys: HashSet<&str> = fresh.iter().map(|r| r.key.as_str()).collect();
    let persisted_keys: HashSet<&str> = persisted.iter().map(|r| r.key.as_str()).collect();

    let added = fresh_keys.difference(&persisted_keys).count();
    let removed = persisted_keys.difference(&fresh_keys).count();

    let kept: HashSet<String> =
        fresh_keys.intersection(&persisted_keys).map(|k| (*k).to_string()).collect();

    // BTreeMap gives key order; String's Ord is byte-wise
    let mut merged: BTreeMap<String, Record> = BTreeMap::new();
    let from_fresh = fresh.into_iter().filter(|r| !kept.contains(&r.key));
    let from_persisted = persisted.into_iter().filter(|r| kept.contains(&r.key));
    for record in from_fresh.chain(from_persisted) {
        insert_first(&mut merged, record);
    }

    let records: Vec<Record> = merged.into_values().collect();
    let stats = MergeStats { total: records.len(), added, removed };

    tracing::info!("Keys: {} (+{}, -{})", stats.total, stats.added, stats.removed);

    MergeOutcome { records, stats }
}

/// Inserts a record unless its key is already present.
fn insert_first(merged: &mut BTreeMap<String, Record>, record: Record) {
    match merged.get(&record.key) {
        None => {
            merged.insert(record.key.clone(), record);
        }
        Some(existing) if *existing != record => {
            tracing::warn!(
                key = %record.key,
                kept = %existing.description,
                dropped = %record.description,
                "Duplicate key with a different description or value; keeping the first"
            );
        }
        Some(_) => {}
    }
}
