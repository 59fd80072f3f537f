// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Long-term-care (LTC) summary arithmetic.
//!
//! States report LTC outbreaks as a flat record of `{metric}_{category}`
//! fields, with probable counts under `prob{metric}_{category}`. Reporting is
//! patchy: plenty of states publish resident and staff counts but never the
//! combined "resident & staff" figure, or the other way around. The summary
//! table reconstructs what it can:
//!
//! - A category's combined figure falls back to resident + staff (confirmed
//!   and probable) when the state didn't publish one.
//! - Probable counts are folded into confirmed ones wherever both exist.
//! - A figure nobody reported stays absent, never zero.
//!
//! Categories only appear in the table if the state reported anything
//! positive for them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::round_half_up;

/// Facility categories, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Nh,
    Alf,
    Other,
    Ltc,
}

impl Category {
    pub const ALL: [Category; 4] = [Category::Nh, Category::Alf, Category::Other, Category::Ltc];

    pub fn key(self) -> &'static str {
        match self {
            Category::Nh => "nh",
            Category::Alf => "alf",
            Category::Other => "other",
            Category::Ltc => "ltc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Nh => "Nursing home",
            Category::Alf => "Assisted-living facility",
            Category::Other => "Other facility",
            Category::Ltc => "Long-term-care facility",
        }
    }
}

/// Label for categories that some states report lumped together.
pub const LUMPED_OTHER_LABEL: &str = "Lumped or other long-term-care facilities";

/// Table columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    PosRes,
    DeathRes,
    PosStaff,
    DeathStaff,
    PosResStaff,
    DeathResStaff,
    OutbrkFac,
}

impl Metric {
    pub const ALL: [Metric; 7] = [
        Metric::PosRes,
        Metric::DeathRes,
        Metric::PosStaff,
        Metric::DeathStaff,
        Metric::PosResStaff,
        Metric::DeathResStaff,
        Metric::OutbrkFac,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Metric::PosRes => "posres",
            Metric::DeathRes => "deathres",
            Metric::PosStaff => "posstaff",
            Metric::DeathStaff => "deathstaff",
            Metric::PosResStaff => "posresstaff",
            Metric::DeathResStaff => "deathresstaff",
            Metric::OutbrkFac => "outbrkfac",
        }
    }

    pub fn header(self) -> &'static str {
        match self {
            Metric::PosRes => "Resident cases",
            Metric::DeathRes => "Resident deaths",
            Metric::PosStaff => "Staff cases",
            Metric::DeathStaff => "Staff deaths",
            Metric::PosResStaff => "Staff & Resident cases",
            Metric::DeathResStaff => "Staff & Resident deaths",
            Metric::OutbrkFac => "Facilities impacted",
        }
    }

    /// Resident and staff parts of a combined metric.
    pub fn parts(self) -> Option<(Metric, Metric)> {
        match self {
            Metric::PosResStaff => Some((Metric::PosRes, Metric::PosStaff)),
            Metric::DeathResStaff => Some((Metric::DeathRes, Metric::DeathStaff)),
            _ => None,
        }
    }
}

/// One flat LTC record as published for a state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LtcAggregate {
    fields: Map<String, Value>,
}

impl LtcAggregate {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Numeric value of `key`; null, absent and non-numeric all read as `None`.
    pub fn value(&self, key: &str) -> Option<f64> {
        self.fields.get(key).and_then(Value::as_f64)
    }

    pub fn confirmed(&self, metric: Metric, category: Category) -> Option<f64> {
        self.value(&format!("{}_{}", metric.key(), category.key()))
    }

    pub fn probable(&self, metric: Metric, category: Category) -> Option<f64> {
        self.value(&format!("prob{}_{}", metric.key(), category.key()))
    }

    fn reports_positive(&self, category: Category) -> bool {
        let marker = format!("_{}", category.key());
        self.fields
            .iter()
            .any(|(key, value)| key.contains(&marker) && value.as_f64().is_some_and(|v| v > 0.0))
    }
}

fn non_zero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

/// Sum of the present values, `None` if there are none.
fn sum_present(values: impl IntoIterator<Item = Option<f64>>) -> Option<f64> {
    values
        .into_iter()
        .flatten()
        .fold(None, |acc, v| Some(acc.unwrap_or(0.0) + v))
}

/// Categories with at least one positive figure across `records`.
pub fn allowed_categories(records: &[LtcAggregate]) -> Vec<Category> {
    Category::ALL
        .into_iter()
        .filter(|&category| records.iter().any(|r| r.reports_positive(category)))
        .collect()
}

/// Table cell for `metric` in `category`.
pub fn category_value(record: &LtcAggregate, metric: Metric, category: Category) -> Option<f64> {
    let confirmed = record.confirmed(metric, category);

    match metric.parts() {
        Some((resident, staff)) if non_zero(confirmed).is_none() => sum_present([
            record.confirmed(resident, category),
            record.confirmed(staff, category),
            record.probable(resident, category),
            record.probable(staff, category),
        ]),
        _ => match non_zero(record.probable(metric, category)) {
            Some(probable) => Some(confirmed.unwrap_or(0.0) + probable),
            None => confirmed,
        },
    }
}

/// Totals row: each metric summed over `categories`.
pub fn totals(record: &LtcAggregate, categories: &[Category]) -> [Option<f64>; 7] {
    Metric::ALL.map(|metric| metric_total(record, metric, categories))
}

fn metric_total(record: &LtcAggregate, metric: Metric, categories: &[Category]) -> Option<f64> {
    let mut total: Option<f64> = None;
    let mut add = |v: f64| total = Some(total.unwrap_or(0.0) + v);

    for &category in categories {
        let confirmed = record.confirmed(metric, category);

        if let Some((resident, staff)) = metric.parts() {
            let res = record.confirmed(resident, category);
            let stf = record.confirmed(staff, category);
            if non_zero(confirmed).is_none() && (res.is_some() || stf.is_some()) {
                add(res.unwrap_or(0.0) + stf.unwrap_or(0.0));
                let prob_res = record.probable(resident, category);
                let prob_stf = record.probable(staff, category);
                if prob_res.is_some() || prob_stf.is_some() {
                    add(prob_res.unwrap_or(0.0) + prob_stf.unwrap_or(0.0));
                }
                continue;
            }
        }

        if let Some(v) = confirmed {
            add(v);
        }
        if let Some(p) = record.probable(metric, category) {
            add(p);
        }
    }

    total
}

/// One category row of the summary table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LtcRow {
    pub category: Category,
    pub label: &'static str,
    pub values: [Option<f64>; 7],
}

/// The whole LTC summary table for one state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LtcSummary {
    pub state_slug: String,
    pub rows: Vec<LtcRow>,
    pub totals: [Option<f64>; 7],
}

impl LtcSummary {
    pub fn build(state_slug: &str, aggregate: &LtcAggregate) -> Self {
        let categories = allowed_categories(std::slice::from_ref(aggregate));
        let rows = categories
            .iter()
            .map(|&category| LtcRow {
                category,
                label: category.label(),
                values: Metric::ALL.map(|metric| category_value(aggregate, metric, category)),
            })
            .collect();

        Self {
            state_slug: state_slug.to_string(),
            rows,
            totals: totals(aggregate, &categories),
        }
    }

    pub fn history_route(&self) -> String {
        format!("/data/state/{}/long-term-care/history", self.state_slug)
    }
}

/// Relative change from `last` to `current`, in percent with one decimal.
///
/// `None` when either side is missing or zero.
pub fn percent_change(current: Option<f64>, last: Option<f64>) -> Option<f64> {
    let current = non_zero(current)?;
    let last = non_zero(last)?;
    Some(round_half_up((current - last) / last * 100.0 * 10.0) / 10.0)
}

/// `percent_change` formatted for display: `"12.5%"` or `"N/A"`.
pub fn format_change(current: Option<f64>, last: Option<f64>) -> String {
    match percent_change(current, last) {
        Some(change) => format!("{}%", change),
        None => "N/A".to_string(),
    }
}
