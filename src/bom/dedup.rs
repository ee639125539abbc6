use std::collections::HashMap;
use std::hash::Hash;

use crate::model::PartInstance;

/// Groups `items` by `key`, returning each first-seen representative with the
/// number of items sharing its key. Output follows first-seen order.
pub fn group_by<T, K, F>(items: impl IntoIterator<Item = T>, key: F) -> Vec<(T, usize)>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut positions: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(T, usize)> = Vec::new();

    for item in items {
        let item_key = key(&item);
        match positions.get(&item_key) {
            Some(&position) => groups[position].1 += 1,
            None => {
                positions.insert(item_key, groups.len());
                groups.push((item, 1));
            }
        }
    }

    groups
}

/// Counts occurrences per linked part. Two links placing the same part fall
/// into one entry regardless of where they are placed.
pub fn deduplicate<'a>(instances: &[PartInstance<'a>]) -> Vec<(PartInstance<'a>, usize)> {
    group_by(instances.iter().copied(), |instance| instance.identity())
}
