use std::collections::{HashMap, HashSet};

use snafu::ensure;

use super::{DesiredRecord, DuplicateKeySnafu, MatchKey, RecordSet, Result};

pub struct DiffResult<'a> {
    pub matched: Vec<(&'a DesiredRecord, &'a RecordSet)>,
    pub desired_only: Vec<&'a DesiredRecord>,
    pub observed_only: Vec<&'a RecordSet>,
}

impl DiffResult<'_> {
    pub fn is_converged(&self) -> bool {
        self.desired_only.is_empty()
    }
}

/// Drops NS and SOA record sets, which belong to the zone rather than the document.
pub fn managed_record_sets(observed: &[RecordSet]) -> impl Iterator<Item = &RecordSet> {
    observed
        .iter()
        .filter(|record| !record.kind.is_zone_management())
}

/// Pairs desired records with observed record sets by [`MatchKey`].
///
/// Every record lands in exactly one partition. A key repeated on either side
/// fails the whole comparison.
pub fn diff_records<'a>(
    desired: &'a [DesiredRecord],
    observed: &'a [RecordSet],
) -> Result<DiffResult<'a>> {
    let mut desired_by_key: HashMap<MatchKey, &DesiredRecord> =
        HashMap::with_capacity(desired.len());
    for record in desired {
        let key = record.key();
        ensure!(
            !desired_by_key.contains_key(&key),
            DuplicateKeySnafu {
                side: "desired",
                key
            }
        );
        desired_by_key.insert(key, record);
    }

    let mut matched = Vec::new();
    let mut observed_only = Vec::new();
    let mut observed_keys: HashSet<MatchKey> = HashSet::with_capacity(observed.len());
    for record in managed_record_sets(observed) {
        let key = record.key();
        match desired_by_key.get(&key) {
            Some(&wanted) => matched.push((wanted, record)),
            None => observed_only.push(record),
        }
        ensure!(
            observed_keys.insert(key.clone()),
            DuplicateKeySnafu {
                side: "observed",
                key
            }
        );
    }

    // Walk the document rather than the map to keep declaration order.
    let desired_only: Vec<&DesiredRecord> = desired
        .iter()
        .filter(|record| !observed_keys.contains(&record.key()))
        .collect();

    tracing::debug!(
        matched = matched.len(),
        desired_only = desired_only.len(),
        observed_only = observed_only.len(),
        "Compared records",
    );

    Ok(DiffResult {
        matched,
        desired_only,
        observed_only,
    })
}
