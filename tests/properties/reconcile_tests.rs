use std::collections::BTreeSet;

use proptest::prelude::*;

use skillbook::core::entry::Entry;
use skillbook::core::ident::format_id;
use skillbook::core::reconcile::{MergePolicy, reconcile};
use skillbook::core::score::{Ratings, decode, encode};
use skillbook::core::tabular::TabularRow;
use skillbook::core::tier::Tier;
use skillbook::test_utils::fixed_today;

fn arb_tier() -> impl Strategy<Value = Tier> {
    prop::sample::select(Tier::ALL.to_vec())
}

fn arb_ratings() -> impl Strategy<Value = Ratings> {
    prop::array::uniform5(prop::option::of(-500i64..5000)).prop_map(Ratings::from_values)
}

fn arb_row(name: String) -> impl Strategy<Value = TabularRow> {
    (
        arb_ratings(),
        prop::option::of(prop::sample::select(vec!["Front", "Late", "Mile", "Turf"])),
    )
        .prop_map(move |(ratings, check_type)| TabularRow {
            name: name.clone(),
            ratings,
            check_type: check_type.map(str::to_string),
        })
}

fn arb_names(max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set("[a-z]{3,10}", 0..max).prop_map(|set| set.into_iter().collect())
}

/// Existing store entries with canonical ids, plus a batch drawing names
/// from both the store and a fresh pool.
fn arb_case() -> impl Strategy<Value = (Tier, Vec<Entry>, Vec<TabularRow>)> {
    (arb_tier(), arb_names(8), arb_names(8))
        .prop_flat_map(|(tier, stored, fresh)| {
            let existing: Vec<Entry> = (1u32..)
                .zip(&stored)
                .map(|(sequence, name)| {
                    Entry::created(tier, sequence, name, None, decode(&Ratings::default()), fixed_today())
                })
                .collect();
            let pool: Vec<String> = stored.iter().chain(&fresh).cloned().collect();
            let batch = if pool.is_empty() {
                Just(Vec::new()).boxed()
            } else {
                prop::collection::vec(prop::sample::select(pool).prop_flat_map(arb_row), 0..12).boxed()
            };
            (Just(tier), Just(existing), batch)
        })
}

proptest! {
    #[test]
    fn non_empty_ratings_survive_decode_encode(ratings in arb_ratings()) {
        prop_assume!(!ratings.is_empty());
        prop_assert_eq!(encode(&decode(&ratings)), ratings);
    }

    #[test]
    fn replace_numbers_entries_from_one((tier, existing, batch) in arb_case()) {
        let result = reconcile(tier, MergePolicy::Replace, existing, &batch, fixed_today()).unwrap();
        prop_assert_eq!(result.entries.len(), batch.len());
        for (index, entry) in result.entries.iter().enumerate() {
            let expected = format_id(tier, u32::try_from(index + 1).unwrap());
            prop_assert_eq!(entry.id.as_deref(), Some(expected.as_str()));
            prop_assert_eq!(&entry.name, &batch[index].name);
        }
    }

    #[test]
    fn update_keeps_order_and_appends_new_names((tier, existing, batch) in arb_case()) {
        let before: Vec<String> = existing.iter().map(|e| e.name.clone()).collect();
        let result = reconcile(tier, MergePolicy::Update, existing, &batch, fixed_today()).unwrap();

        let names: Vec<&str> = result.entries.iter().map(|e| e.name.as_str()).collect();
        prop_assert_eq!(&names[..before.len()], before.iter().map(String::as_str).collect::<Vec<_>>());

        let fresh: BTreeSet<&str> = batch
            .iter()
            .map(|row| row.name.as_str())
            .filter(|name| !before.iter().any(|known| known == name))
            .collect();
        prop_assert_eq!(result.added, fresh.len());
        prop_assert_eq!(result.entries.len(), before.len() + fresh.len());
        prop_assert_eq!(result.updated + result.unchanged, before.len());

        let unique: BTreeSet<&str> = names.iter().copied().collect();
        prop_assert_eq!(unique.len(), names.len());
    }

    #[test]
    fn add_only_leaves_existing_entries_alone((tier, existing, batch) in arb_case()) {
        let result = reconcile(tier, MergePolicy::AddOnly, existing.clone(), &batch, fixed_today()).unwrap();
        prop_assert_eq!(result.updated, 0);
        prop_assert_eq!(&result.entries[..existing.len()], &existing[..]);

        let ids: BTreeSet<Option<String>> = result.entries.iter().map(|e| e.id.clone()).collect();
        prop_assert_eq!(ids.len(), result.entries.len());
    }
}
