use chrono::NaiveDateTime;
use proptest::prelude::*;

use skillbook::catalog::{MergeOptions, merge_tiers, split_combined, validate_all};
use skillbook::config::ManifestConfig;
use skillbook::core::entry::BareEntry;
use skillbook::core::score::{Ratings, Score};
use skillbook::core::tier::Tier;
use skillbook::storage::store::{CombinedStore, read_combined, write_combined};
use skillbook::test_utils::{CatalogFixture, fixed_today};

fn arb_score() -> impl Strategy<Value = Score> {
    prop_oneof![
        (0i64..3000).prop_map(Score::Flat),
        (
            prop::option::of(0i64..3000),
            prop::array::uniform4(prop::option::of(0i64..3000)),
        )
            .prop_filter("graded needs a non-base key", |(_, rest)| rest.iter().any(Option::is_some))
            .prop_map(|(base, [good, average, bad, terrible])| {
                Score::Graded(Ratings::from_values([base, good, average, bad, terrible]))
            }),
    ]
}

fn arb_bare() -> impl Strategy<Value = BareEntry> {
    (
        "[A-Za-z][A-Za-z ]{0,15}",
        prop::option::of(prop::sample::select(vec!["Pace", "End", "Dirt", "Long"])),
        arb_score(),
    )
        .prop_map(|(name, check_type, score)| BareEntry {
            name,
            check_type: check_type.map(str::to_string),
            score,
        })
}

fn arb_store() -> impl Strategy<Value = CombinedStore> {
    prop::collection::vec(prop::collection::vec(arb_bare(), 0..6), 7).prop_map(|lists| {
        let mut store = CombinedStore::new();
        for (tier, entries) in Tier::ALL.into_iter().zip(lists) {
            store.insert(tier, entries);
        }
        store
    })
}

fn stamp() -> NaiveDateTime {
    fixed_today().and_hms_opt(12, 0, 0).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn split_then_merge_restores_the_combined_store(store in arb_store()) {
        let fixture = CatalogFixture::new();
        let layout = &fixture.layout;
        write_combined(&layout.combined, &store).unwrap();

        split_combined(layout, &layout.combined, fixed_today(), &ManifestConfig::default()).unwrap();
        let options = MergeOptions {
            output: Some(fixture.root().join("rebuilt.json")),
            backup: false,
            now: stamp(),
        };
        let outcome = merge_tiers(layout, &layout.manifest, &options).unwrap();
        prop_assert!(outcome.skipped.is_empty());

        let rebuilt = read_combined(&outcome.combined_path).unwrap();
        for tier in Tier::ALL {
            prop_assert_eq!(rebuilt.get(tier), store.get(tier));
        }
    }

    #[test]
    fn split_output_validates_without_errors(store in arb_store()) {
        let fixture = CatalogFixture::new();
        let layout = &fixture.layout;
        write_combined(&layout.combined, &store).unwrap();
        split_combined(layout, &layout.combined, fixed_today(), &ManifestConfig::default()).unwrap();

        let report = validate_all(layout).unwrap();
        prop_assert!(report.errors.is_empty(), "errors: {:?}", report.errors);
        prop_assert_eq!(report.tiers.len(), Tier::ALL.len());
    }
}
