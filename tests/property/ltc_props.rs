//! LTC arithmetic invariants.

use ctp_search::ltc::{allowed_categories, category_value, percent_change, Category, Metric};
use ctp_search::LtcAggregate;
use proptest::prelude::*;
use serde_json::{Map, Value};

/// A record with random counts (or nulls, or nothing) for every field.
fn aggregate_strategy() -> impl Strategy<Value = LtcAggregate> {
    let keys: Vec<String> = Metric::ALL
        .iter()
        .flat_map(|m| {
            Category::ALL.iter().flat_map(move |c| {
                [
                    format!("{}_{}", m.key(), c.key()),
                    format!("prob{}_{}", m.key(), c.key()),
                ]
            })
        })
        .collect();
    let cell = prop::option::of(prop::option::of(0u32..5000));
    prop::collection::vec(cell, keys.len()).prop_map(move |cells| {
        let mut fields = Map::new();
        for (key, cell) in keys.iter().zip(cells) {
            match cell {
                Some(Some(n)) => {
                    fields.insert(key.clone(), Value::from(n));
                }
                Some(None) => {
                    fields.insert(key.clone(), Value::Null);
                }
                None => {}
            }
        }
        LtcAggregate::new(fields)
    })
}

proptest! {
    /// Every value in the table is a non-negative count.
    #[test]
    fn prop_values_non_negative(record in aggregate_strategy()) {
        for category in Category::ALL {
            for metric in Metric::ALL {
                if let Some(v) = category_value(&record, metric, category) {
                    prop_assert!(v >= 0.0);
                }
            }
        }
    }

    /// Confirmed plus probable is never less than confirmed alone.
    #[test]
    fn prop_probable_only_adds(record in aggregate_strategy()) {
        for category in Category::ALL {
            let confirmed = record.confirmed(Metric::PosRes, category).unwrap_or(0.0);
            let value = category_value(&record, Metric::PosRes, category).unwrap_or(0.0);
            prop_assert!(value >= confirmed);
        }
    }

    /// Allowed categories come out in table order with no repeats.
    #[test]
    fn prop_categories_ordered(record in aggregate_strategy()) {
        let allowed = allowed_categories(std::slice::from_ref(&record));
        let order: Vec<usize> = allowed
            .iter()
            .map(|c| Category::ALL.iter().position(|x| x == c).unwrap())
            .collect();
        prop_assert!(order.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn prop_no_change_is_zero(n in 1u32..1_000_000) {
        prop_assert_eq!(percent_change(Some(f64::from(n)), Some(f64::from(n))), Some(0.0));
    }
}
