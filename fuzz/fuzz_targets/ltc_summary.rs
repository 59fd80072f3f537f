// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the LTC summary table.
//!
//! Aggregate records come from dozens of state feeds with inconsistent field
//! sets. Building the table from any JSON object must not panic, and a row
//! only exists for a category the record says something positive about.

#![no_main]

use ctp_search::ltc::{percent_change, LtcAggregate, LtcSummary};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(aggregate) = serde_json::from_slice::<LtcAggregate>(data) else {
        return;
    };

    let summary = LtcSummary::build("fuzz", &aggregate);
    assert!(summary.rows.len() <= 4);

    for row in &summary.rows {
        // INVARIANT: an allowed category has at least one positive field
        let marker = format!("_{}", row.category.key());
        let json = serde_json::to_value(&aggregate).unwrap();
        let any_positive = json
            .as_object()
            .unwrap()
            .iter()
            .any(|(k, v)| k.contains(&marker) && v.as_f64().is_some_and(|n| n > 0.0));
        assert!(any_positive);
    }

    for (value, total) in summary.rows.iter().flat_map(|r| r.values).zip(summary.totals) {
        let _ = percent_change(value, total);
    }
});
