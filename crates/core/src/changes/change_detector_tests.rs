#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use proptest::prelude::*;

    use crate::changes::{detect_changes, duplicate_ids, ChangeSet, PriceChange};
    use crate::subscriptions::SubscriptionRecord;

    fn sub(id: i64, name: &str, price: i64) -> SubscriptionRecord {
        SubscriptionRecord::new(id, name, price, "SEK").with_business_units([2612])
    }

    #[test]
    fn test_identical_listings_produce_no_changes() {
        let listing = vec![sub(1, "A", 1000), sub(2, "B", 500)];
        assert_eq!(detect_changes(&listing, &listing), ChangeSet::default());
    }

    #[test]
    fn test_added_and_price_changed() {
        let previous = vec![sub(1, "A", 1000)];
        let current = vec![sub(1, "A", 1200), sub(2, "B", 500)];

        let changes = detect_changes(&current, &previous);

        assert_eq!(changes.added, vec![sub(2, "B", 500)]);
        assert!(changes.removed.is_empty());
        assert_eq!(
            changes.price_changes,
            vec![PriceChange {
                id: 1,
                name: "A".to_string(),
                old_price: 1000,
                new_price: 1200,
                currency: "SEK".to_string(),
            }]
        );
    }

    #[test]
    fn test_everything_removed() {
        let previous = vec![sub(1, "A", 1000), sub(2, "B", 500)];
        let changes = detect_changes(&[], &previous);

        assert!(changes.added.is_empty());
        assert_eq!(changes.removed_ids(), vec![1, 2]);
        assert!(changes.price_changes.is_empty());
    }

    #[test]
    fn test_cold_start_reports_everything_added() {
        let current = vec![sub(3, "C", 100), sub(1, "A", 100)];
        let changes = detect_changes(&current, &[]);
        assert_eq!(changes.added_ids(), vec![3, 1]);
        assert_eq!(changes.len(), 2);
    }

    #[test]
    fn test_rename_without_price_change_is_ignored() {
        let previous = vec![sub(1, "Old name", 1000)];
        let current = vec![SubscriptionRecord::new(1, "New name", 1000, "EUR")];
        assert!(detect_changes(&current, &previous).is_empty());
    }

    #[test]
    fn test_price_change_uses_current_name() {
        let previous = vec![sub(1, "Old name", 1000)];
        let current = vec![sub(1, "New name", 900)];
        let changes = detect_changes(&current, &previous);
        assert_eq!(changes.price_changes[0].name, "New name");
        assert_eq!(changes.price_changes[0].old_price, 1000);
        assert_eq!(changes.price_changes[0].new_price, 900);
    }

    #[test]
    fn test_outputs_follow_input_order() {
        let previous = vec![sub(9, "I", 1), sub(5, "E", 1), sub(7, "G", 1), sub(4, "D", 1)];
        let current = vec![sub(8, "H", 2), sub(4, "D", 2), sub(6, "F", 2), sub(7, "G", 2)];

        let changes = detect_changes(&current, &previous);

        assert_eq!(changes.added_ids(), vec![8, 6]);
        assert_eq!(changes.removed_ids(), vec![9, 5]);
        assert_eq!(
            changes.price_changes.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![4, 7]
        );
    }

    #[test]
    fn test_duplicate_ids_last_write_wins() {
        let previous = vec![sub(1, "A", 1000)];
        let current = vec![sub(1, "A", 1000), sub(2, "B", 10), sub(1, "A v2", 1500)];

        let changes = detect_changes(&current, &previous);

        assert_eq!(changes.added_ids(), vec![2]);
        assert_eq!(changes.price_changes.len(), 1);
        assert_eq!(changes.price_changes[0].name, "A v2");
        assert_eq!(changes.price_changes[0].new_price, 1500);
        assert_eq!(duplicate_ids(&current), vec![1]);
        assert!(duplicate_ids(&previous).is_empty());
    }

    fn arb_listing() -> impl Strategy<Value = Vec<SubscriptionRecord>> {
        prop::collection::btree_map(0i64..40, (0i64..5, "[a-z]{1,6}"), 0..25).prop_map(|m| {
            m.into_iter()
                .map(|(id, (price, name))| sub(id, &name, price * 100))
                .collect()
        })
    }

    fn as_sets(changes: &ChangeSet) -> (BTreeSet<i64>, BTreeSet<i64>, BTreeSet<(i64, i64, i64)>) {
        (
            changes.added_ids().into_iter().collect(),
            changes.removed_ids().into_iter().collect(),
            changes
                .price_changes
                .iter()
                .map(|c| (c.id, c.old_price, c.new_price))
                .collect(),
        )
    }

    proptest! {
        #[test]
        fn prop_diff_of_identical_state_is_empty(listing in arb_listing()) {
            prop_assert!(detect_changes(&listing, &listing).is_empty());
        }

        #[test]
        fn prop_diff_is_order_insensitive(
            current in arb_listing(),
            previous in arb_listing(),
            seed in any::<u64>(),
        ) {
            let mut shuffled_current = current.clone();
            let mut shuffled_previous = previous.clone();
            // Deterministic rotation/reversal stands in for a shuffle.
            let len_c = shuffled_current.len().max(1);
            let len_p = shuffled_previous.len().max(1);
            shuffled_current.rotate_left(seed as usize % len_c);
            shuffled_previous.reverse();
            shuffled_previous.rotate_right((seed >> 8) as usize % len_p);

            let expected = detect_changes(&current, &previous);
            let actual = detect_changes(&shuffled_current, &shuffled_previous);
            prop_assert_eq!(as_sets(&expected), as_sets(&actual));
        }

        #[test]
        fn prop_equal_prices_never_reported(current in arb_listing(), previous in arb_listing()) {
            let changes = detect_changes(&current, &previous);
            for change in &changes.price_changes {
                prop_assert_ne!(change.old_price, change.new_price);
            }
            let changed: BTreeSet<i64> = changes.price_changes.iter().map(|c| c.id).collect();
            for now in &current {
                if let Some(before) = previous.iter().find(|p| p.id == now.id) {
                    prop_assert_eq!(changed.contains(&now.id), before.price_amount != now.price_amount);
                }
            }
        }

        #[test]
        fn prop_added_and_removed_partition_ids(current in arb_listing(), previous in arb_listing()) {
            let changes = detect_changes(&current, &previous);
            let current_ids: BTreeSet<i64> = current.iter().map(|r| r.id).collect();
            let previous_ids: BTreeSet<i64> = previous.iter().map(|r| r.id).collect();
            let (added, removed, _) = as_sets(&changes);
            prop_assert_eq!(added, current_ids.difference(&previous_ids).copied().collect::<BTreeSet<_>>());
            prop_assert_eq!(removed, previous_ids.difference(&current_ids).copied().collect::<BTreeSet<_>>());
        }
    }
}
