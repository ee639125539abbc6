use std::collections::{BTreeSet, HashMap};

use crate::model::{MISC_KEY, MetadataRecord, NAME_KEY, QUANTITY_KEY, is_reserved_key};

/// Default share of parts that must define a field for it to get a column.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Picks the fields defined by at least `threshold` of the records.
///
/// Presence is what counts: a field holding an empty string still counts as
/// defined. Reserved keys and the misc header itself are never promoted.
pub fn select_columns<'r>(
    records: impl IntoIterator<Item = &'r MetadataRecord>,
    threshold: f64,
) -> BTreeSet<String> {
    debug_assert!((0.0..=1.0).contains(&threshold));

    let mut occurrences: HashMap<&'r str, usize> = HashMap::new();
    let mut total = 0usize;
    for record in records {
        total += 1;
        for key in record.keys() {
            *occurrences.entry(key).or_default() += 1;
        }
    }

    if total == 0 {
        return BTreeSet::new();
    }

    occurrences
        .into_iter()
        .filter(|(key, _)| !is_reserved_key(key) && *key != MISC_KEY)
        .filter(|(_, count)| *count as f64 / total as f64 >= threshold)
        .map(|(key, _)| key.to_string())
        .collect()
}

/// Sort position of a column.
///
/// Ordinary fields are ranked by their lowercased first character only, so
/// `Mass` and `Material` tie and keep their relative input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ColumnRank {
    Name,
    Quantity,
    Field(i64),
    Misc,
}

pub fn rank(key: &str) -> ColumnRank {
    match key {
        NAME_KEY => ColumnRank::Name,
        QUANTITY_KEY => ColumnRank::Quantity,
        MISC_KEY => ColumnRank::Misc,
        _ => {
            let first = key
                .chars()
                .next()
                .and_then(|ch| ch.to_lowercase().next())
                .map_or(i64::MIN, |ch| i64::from(u32::from(ch)) - i64::from(u32::from('a')));
            ColumnRank::Field(first)
        }
    }
}

/// Orders column keys by [`rank`], keeping input order among ties.
pub fn order_columns<I, S>(keys: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut ordered: Vec<String> = keys.into_iter().map(Into::into).collect();
    ordered.sort_by_key(|key| rank(key));
    ordered
}
