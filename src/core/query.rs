use crate::domain::model::{FilterSpec, ServiceRecord, SortMode};
use feruca::{Collator, Locale, Tailoring};
use std::cmp::Ordering;

/// Filter, search and sort a catalog snapshot.
///
/// Pure: the input is never modified and nothing here fails. Malformed prices
/// and timestamps have already been coerced by the model accessors.
pub fn query(records: &[ServiceRecord], spec: &FilterSpec) -> Vec<ServiceRecord> {
    let category = spec.category_constraint();
    let university = spec.university_constraint();
    let needle = spec.search_term().map(str::to_lowercase);

    let mut matched: Vec<ServiceRecord> = records
        .iter()
        .filter(|record| category.map_or(true, |c| record.category == c))
        .filter(|record| university.map_or(true, |u| record.university == u))
        .filter(|record| {
            needle
                .as_deref()
                .map_or(true, |needle| matches_search(record, needle))
        })
        .cloned()
        .collect();

    sort_records(&mut matched, spec.sort_mode());

    tracing::debug!(
        "Query matched {} of {} services (sort: {})",
        matched.len(),
        records.len(),
        spec.sort_mode()
    );
    matched
}

fn matches_search(record: &ServiceRecord, needle: &str) -> bool {
    record.title.to_lowercase().contains(needle)
        || record.description.to_lowercase().contains(needle)
}

/// Stable sort; ties keep their input order.
pub fn sort_records(records: &mut [ServiceRecord], mode: SortMode) {
    match mode {
        SortMode::Relevance => {}
        SortMode::PriceLowHigh => {
            records.sort_by(|a, b| a.price.amount().total_cmp(&b.price.amount()))
        }
        SortMode::PriceHighLow => {
            records.sort_by(|a, b| b.price.amount().total_cmp(&a.price.amount()))
        }
        SortMode::Alpha => {
            let mut collator = title_collator();
            records.sort_by(|a, b| compare_titles(&mut collator, &a.title, &b.title))
        }
        SortMode::Newest => records.sort_by_key(|r| std::cmp::Reverse(r.created_at_millis())),
    }
}

/// Root-locale collator: accents and case only decide between otherwise
/// equal titles. Punctuation and spaces are not ignored.
pub fn title_collator() -> Collator {
    Collator::new(Tailoring::Cldr(Locale::Root), false, false)
}

/// Locale-aware title order. Lowercase sorts before uppercase; titles the
/// collator cannot tell apart fall back to code points.
pub fn compare_titles(collator: &mut Collator, a: &str, b: &str) -> Ordering {
    collator.collate(a, b).then_with(|| b.cmp(a))
}
