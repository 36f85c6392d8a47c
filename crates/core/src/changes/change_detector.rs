use std::collections::{HashMap, HashSet};

use super::changes_model::{ChangeSet, PriceChange};
use crate::subscriptions::SubscriptionRecord;

/// Id-keyed view over a listing.
///
/// Keys keep the position of their first occurrence; on duplicate ids the
/// last record wins.
struct IdIndex<'a> {
    order: Vec<i64>,
    by_id: HashMap<i64, &'a SubscriptionRecord>,
}

impl<'a> IdIndex<'a> {
    fn build(records: &'a [SubscriptionRecord]) -> Self {
        let mut order = Vec::with_capacity(records.len());
        let mut by_id = HashMap::with_capacity(records.len());
        for record in records {
            if by_id.insert(record.id, record).is_none() {
                order.push(record.id);
            }
        }
        Self { order, by_id }
    }

    fn contains(&self, id: i64) -> bool {
        self.by_id.contains_key(&id)
    }

    fn get(&self, id: i64) -> Option<&'a SubscriptionRecord> {
        self.by_id.get(&id).copied()
    }

    fn iter(&self) -> impl Iterator<Item = &'a SubscriptionRecord> + '_ {
        self.order.iter().filter_map(|id| self.by_id.get(id).copied())
    }
}

/// Computes additions, removals and price changes between two listings.
///
/// Outputs follow the iteration order of their source collection (`current`
/// for additions and price changes, `previous` for removals). Prices compare
/// by exact minor-unit equality; other field differences are ignored.
pub fn detect_changes(
    current: &[SubscriptionRecord],
    previous: &[SubscriptionRecord],
) -> ChangeSet {
    let current_index = IdIndex::build(current);
    let previous_index = IdIndex::build(previous);

    let added = current_index
        .iter()
        .filter(|record| !previous_index.contains(record.id))
        .cloned()
        .collect();

    let removed = previous_index
        .iter()
        .filter(|record| !current_index.contains(record.id))
        .cloned()
        .collect();

    let price_changes = current_index
        .iter()
        .filter_map(|now| {
            let before = previous_index.get(now.id)?;
            (before.price_amount != now.price_amount).then(|| PriceChange {
                id: now.id,
                name: now.name.clone(),
                old_price: before.price_amount,
                new_price: now.price_amount,
                currency: now.currency.clone(),
            })
        })
        .collect();

    ChangeSet {
        added,
        removed,
        price_changes,
    }
}

/// Ids that appear more than once in a listing. Upstream should never send
/// any; the monitor logs them when it does.
pub fn duplicate_ids(records: &[SubscriptionRecord]) -> Vec<i64> {
    let mut seen = HashSet::with_capacity(records.len());
    let mut duplicates = Vec::new();
    for record in records {
        if !seen.insert(record.id) && !duplicates.contains(&record.id) {
            duplicates.push(record.id);
        }
    }
    duplicates
}
