use crate::domain::model::ServiceRecord;
use std::collections::BTreeSet;

/// Category filter options: the known list plus any category found in the
/// catalog, de-duplicated and sorted.
pub fn category_options(records: &[ServiceRecord], known: &[&str]) -> Vec<String> {
    known
        .iter()
        .map(|c| c.to_string())
        .chain(
            records
                .iter()
                .map(|r| r.category.clone())
                .filter(|c| !c.trim().is_empty()),
        )
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn university_options(known: &[&str]) -> Vec<String> {
    known.iter().map(|u| u.to_string()).collect()
}
