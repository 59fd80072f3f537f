// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Race and ethnicity time-series helpers.
//!
//! Each day is a flat record keyed `{Metric}_{Group}` (`Cases_Black`,
//! `Deaths_Ethnicity_Hispanic`), plus a `Date` field as `yyyymmdd`.

use serde_json::{Map, Value};

use crate::utils::{group_thousands, round_half_up};

/// One day of race/ethnicity figures.
pub type Day = Map<String, Value>;

/// Values below this are flagged when displaying rates.
pub const SMALL_NUMBER_CUTOFF: f64 = 10.0;

/// Census population group for a reported group name.
pub fn census_group(group: &str) -> Option<&'static str> {
    Some(match group {
        "AIAN" => "aian",
        "Asian" => "asian",
        "Black" => "black",
        "Hispanic" | "LatinX" => "hisp",
        "NHPI" => "nhpi",
        "NonHispanic" => "notHisp",
        "Other" => "other",
        "Total" => "total",
        "Multiracial" => "twoOrMore",
        "White" => "white",
        _ => return None,
    })
}

/// Metric keys on `day` starting with `prefix` that have a value.
///
/// Totals never count. With `race_only` the ethnicity breakdown is dropped,
/// otherwise only the ethnicity breakdown is kept.
pub fn available_metric_fields(day: &Day, prefix: &str, race_only: bool) -> Vec<String> {
    day.iter()
        .filter(|(key, value)| key.starts_with(prefix) && !value.is_null() && !key.contains("Total"))
        .map(|(key, _)| key)
        .filter(|key| key.contains("Ethnicity") != race_only)
        .cloned()
        .collect()
}

/// Strip the metric prefix: `Cases_Black` becomes `Black`.
///
/// The prefix is the longest leading run of ASCII `A..=z` ending in `_`, so
/// `Cases_Ethnicity_Hispanic` becomes `Hispanic`.
pub fn remove_metric_prefix(metric: &str) -> &str {
    let run = metric
        .bytes()
        .take_while(|b| (b'A'..=b'z').contains(b))
        .count();
    match metric[..run].rfind('_') {
        Some(underscore) => &metric[underscore + 1..],
        None => metric,
    }
}

/// Add a `{metric}_per100k` field for every metric with a census group.
///
/// `population` is keyed by census group. A group missing from it, or with
/// no population, is skipped. Rates are whole numbers.
pub fn add_per_100k(days: &mut [Day], population: &Map<String, Value>) {
    for day in days.iter_mut() {
        let rates: Vec<(String, Value)> = day
            .iter()
            .filter_map(|(key, value)| {
                let value = value.as_f64()?;
                let group = census_group(remove_metric_prefix(key))?;
                let population = population.get(group)?.as_f64()?;
                let rate = round_half_up(value / population * 100_000.0);
                if !rate.is_finite() {
                    return None;
                }
                Some((format!("{}_per100k", key), Value::from(rate as i64)))
            })
            .collect();

        day.extend(rates);
    }
}

/// Whether a state reports race and ethnicity combined.
///
/// `Some(true)` with exactly one combined source, `Some(false)` with exactly
/// one separate source, `None` when it can't tell.
pub fn is_combined<C, S>(combined: &[C], separate: &[S]) -> Option<bool> {
    if combined.len() == 1 {
        Some(true)
    } else if separate.len() == 1 {
        Some(false)
    } else {
        None
    }
}

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// `20200901` as `September 1, 2020`.
pub fn format_date(date: i64) -> Option<String> {
    let (year, month, day) = (date / 10_000, (date / 100) % 100, date % 100);
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }
    Some(format!("{} {}, {}", MONTHS[(month - 1) as usize], day, year))
}

/// Display value of one figure.
///
/// Small integers are flagged with `*` when showing rates.
pub fn display_value(key: &str, value: &Value, using_rates: bool) -> Option<String> {
    let number = value.as_f64()?;
    if using_rates && number.fract() == 0.0 && number < SMALL_NUMBER_CUTOFF {
        return Some(format!("{}*", number));
    }
    if key.to_lowercase().contains("date") {
        return None;
    }
    Some(group_thousands(number))
}

/// Format every numeric figure for a table and add `formattedDate`.
pub fn format_table_values(days: &mut [Day], using_rates: bool) {
    for day in days.iter_mut() {
        if let Some(date) = day.get("Date").and_then(Value::as_i64).and_then(format_date) {
            day.insert("formattedDate".to_string(), Value::String(date));
        }

        for (key, value) in day.iter_mut() {
            if let Some(display) = display_value(key, value, using_rates) {
                *value = Value::String(display);
            }
        }
    }
}
