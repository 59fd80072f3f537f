// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Daily series with a seven-day average.
//!
//! The homepage charts plot daily national figures as bars with a seven-day
//! average line over them. The average at day `d` covers `d` and the six days
//! after it, so the last seven days have no average and are cut from the bars
//! as well. Both series always have the same length.

use serde::Serialize;
use serde_json::{Map, Value};

/// Days averaged into one point of the average line.
pub const AVERAGE_WINDOW: usize = 7;

/// One day of one figure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPoint {
    pub date: String,
    pub value: f64,
}

/// Bars and the average line drawn over them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DailySeries {
    pub daily: Vec<DailyPoint>,
    pub average: Vec<DailyPoint>,
}

/// Pull `field` out of each record, oldest first.
///
/// Records carry an ISO `date`. A `null` or non-numeric figure counts as 0, a
/// record without a date is skipped.
pub fn daily_points(records: &[Map<String, Value>], field: &str) -> Vec<DailyPoint> {
    let mut points: Vec<DailyPoint> = records
        .iter()
        .filter_map(|record| {
            let date = match record.get("date")? {
                Value::String(date) => date.clone(),
                Value::Number(date) => date.to_string(),
                _ => return None,
            };
            let value = record.get(field).and_then(Value::as_f64).unwrap_or(0.0);
            Some(DailyPoint { date, value })
        })
        .collect();
    points.sort_by(|a, b| a.date.cmp(&b.date));
    points
}

/// Forward seven-day averages of `points`, dated at the start of each window.
pub fn seven_day_average(points: &[DailyPoint]) -> Vec<DailyPoint> {
    points
        .windows(AVERAGE_WINDOW)
        .take(points.len().saturating_sub(AVERAGE_WINDOW))
        .map(|window| DailyPoint {
            date: window[0].date.clone(),
            value: window.iter().map(|p| p.value).sum::<f64>() / AVERAGE_WINDOW as f64,
        })
        .collect()
}

/// Chart-ready series for `field`.
pub fn daily_series(records: &[Map<String, Value>], field: &str) -> DailySeries {
    let mut daily = daily_points(records, field);
    let average = seven_day_average(&daily);
    daily.truncate(daily.len().saturating_sub(AVERAGE_WINDOW));
    DailySeries { daily, average }
}
