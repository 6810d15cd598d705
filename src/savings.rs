//! Monthly reward-savings aggregation.
//!
//! Turns a list of transactions into one row per calendar month with a
//! savings value for every tracked category, ready for a stacked bar chart.
//!
//! Buckets are keyed by month of year only, so the same month in two
//! different years lands in the same row.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::error::{Result, SavingsError};
use crate::models::{
    Card, MonthlySavingsRecord, POINT_TO_CURRENCY_RATE, RateFallback, Transaction,
};

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregateOptions {
    /// Currency value of one reward point
    pub point_value: f64,
    pub rate_fallback: RateFallback,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            point_value: POINT_TO_CURRENCY_RATE,
            rate_fallback: RateFallback::MissingKey,
        }
    }
}

/// English three-letter month label, independent of the system locale.
pub fn month_label(date: NaiveDate) -> &'static str {
    MONTH_LABELS[date.month0() as usize]
}

/// Aggregates with the default point value and fallback policy.
pub fn aggregate(
    transactions: &[Transaction],
    cards: &HashMap<String, Card>,
    tracked: &[String],
) -> Result<Vec<MonthlySavingsRecord>> {
    aggregate_with(transactions, cards, tracked, &AggregateOptions::default())
}

/// Computes per-month, per-category savings.
///
/// Transactions whose card is not in `cards` are skipped. Output rows are
/// ordered Jan..Dec and carry exactly the `tracked` categories, in order,
/// with 0 for categories that earned nothing that month.
pub fn aggregate_with(
    transactions: &[Transaction],
    cards: &HashMap<String, Card>,
    tracked: &[String],
    options: &AggregateOptions,
) -> Result<Vec<MonthlySavingsRecord>> {
    // month0 -> category -> savings
    let mut buckets: BTreeMap<u32, HashMap<&str, f64>> = BTreeMap::new();
    let mut skipped = 0usize;

    for trans in transactions {
        let Some(card) = cards.get(&trans.card_id) else {
            debug!(transaction = %trans.id, card = %trans.card_id, "skipping transaction with unknown card");
            skipped += 1;
            continue;
        };

        if !trans.amount.is_finite() || trans.amount < 0.0 {
            return Err(SavingsError::InvalidAmount {
                transaction_id: trans.id.clone(),
            });
        }

        let rate = card.rate_for(&trans.category, options.rate_fallback)?;
        let savings = card
            .rewards
            .kind
            .savings(trans.amount, rate, options.point_value);

        *buckets
            .entry(trans.date.month0())
            .or_default()
            .entry(trans.category.as_str())
            .or_insert(0.0) += savings;
    }

    let records: Vec<MonthlySavingsRecord> = buckets
        .into_iter()
        .map(|(month0, by_category)| MonthlySavingsRecord {
            month: MONTH_LABELS[month0 as usize].to_string(),
            values: tracked
                .iter()
                .map(|category| {
                    let value = by_category.get(category.as_str()).copied().unwrap_or(0.0);
                    (category.clone(), value)
                })
                .collect(),
        })
        .collect();

    debug!(
        transactions = transactions.len(),
        skipped,
        months = records.len(),
        "aggregated monthly savings"
    );
    Ok(records)
}
