use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{Result, SavingsError};

pub const DEFAULT_CATEGORIES: &[&str] = &["Groceries", "Dining", "Travel", "Gas", "Other"];

/// Key in `RewardRule::rates` used when a category has no explicit entry.
pub const DEFAULT_RATE_KEY: &str = "default";

/// Currency value of a single reward point ($0.01 per point).
pub const POINT_TO_CURRENCY_RATE: f64 = 0.01;

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    pub description: String,
    /// Spend in the account currency, never negative
    pub amount: f64,
    pub category: String,
    pub card_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardKind {
    /// Rate is a fraction of spend (e.g. 0.05 for 5%)
    Cashback,
    /// Rate is a points multiplier (e.g. 3 for 3x points)
    Points,
}

impl RewardKind {
    /// Converts a spend amount at `rate` into currency.
    pub fn savings(self, amount: f64, rate: f64, point_value: f64) -> f64 {
        match self {
            RewardKind::Cashback => amount * rate,
            RewardKind::Points => {
                let points = amount * rate;
                points * point_value
            }
        }
    }
}

/// How a category rate of exactly zero is treated during lookup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateFallback {
    /// Fall back to `default` only when the category key is absent.
    #[default]
    MissingKey,
    /// Treat an explicit zero rate like an absent one.
    ZeroIsMissing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardRule {
    #[serde(rename = "type")]
    pub kind: RewardKind,
    /// Category name -> rate. Must contain `default`.
    pub rates: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub rewards: RewardRule,
}

impl Card {
    /// Resolves the reward rate for `category`, falling back to `default`.
    pub fn rate_for(&self, category: &str, fallback: RateFallback) -> Result<f64> {
        let rates = &self.rewards.rates;
        let default = *rates
            .get(DEFAULT_RATE_KEY)
            .ok_or_else(|| SavingsError::MissingDefaultRate {
                card_id: self.id.clone(),
            })?;
        self.check_rate(DEFAULT_RATE_KEY, default)?;

        let rate = match rates.get(category) {
            Some(&rate) if fallback == RateFallback::ZeroIsMissing && rate == 0.0 => default,
            Some(&rate) => {
                self.check_rate(category, rate)?;
                rate
            }
            None => default,
        };
        Ok(rate)
    }

    fn check_rate(&self, category: &str, rate: f64) -> Result<()> {
        if rate.is_finite() && rate >= 0.0 {
            Ok(())
        } else {
            Err(SavingsError::InvalidRate {
                card_id: self.id.clone(),
                category: category.to_string(),
            })
        }
    }
}

/// One chart row: a month label plus a value for every tracked category.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySavingsRecord {
    pub month: String,
    /// (category, savings) in tracked-category order
    pub values: Vec<(String, f64)>,
}

impl MonthlySavingsRecord {
    pub fn get(&self, category: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, value)| *value)
    }

    pub fn total(&self) -> f64 {
        self.values.iter().map(|(_, value)| value).sum()
    }
}

/// Serializes flat, e.g. `{"month":"Jan","Groceries":4.27,"Dining":1.35}`.
impl Serialize for MonthlySavingsRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len() + 1))?;
        map.serialize_entry("month", &self.month)?;
        for (category, value) in &self.values {
            map.serialize_entry(category, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(kind: RewardKind, rates: &[(&str, f64)]) -> Card {
        Card {
            id: "card-1".into(),
            name: "Test Card".into(),
            rewards: RewardRule {
                kind,
                rates: rates.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            },
        }
    }

    #[test]
    fn test_rate_for_explicit_category() {
        let c = card(RewardKind::Cashback, &[("Groceries", 0.05), ("default", 0.01)]);
        assert_eq!(c.rate_for("Groceries", RateFallback::MissingKey).unwrap(), 0.05);
    }

    #[test]
    fn test_rate_for_falls_back_to_default() {
        let c = card(RewardKind::Cashback, &[("Groceries", 0.05), ("default", 0.01)]);
        assert_eq!(c.rate_for("Other", RateFallback::MissingKey).unwrap(), 0.01);
    }

    #[test]
    fn test_zero_rate_kept_when_key_present() {
        let c = card(RewardKind::Cashback, &[("Gas", 0.0), ("default", 0.01)]);
        assert_eq!(c.rate_for("Gas", RateFallback::MissingKey).unwrap(), 0.0);
    }

    #[test]
    fn test_zero_rate_replaced_in_legacy_mode() {
        let c = card(RewardKind::Cashback, &[("Gas", 0.0), ("default", 0.01)]);
        assert_eq!(c.rate_for("Gas", RateFallback::ZeroIsMissing).unwrap(), 0.01);
    }

    #[test]
    fn test_missing_default_rate() {
        let c = card(RewardKind::Points, &[("Travel", 5.0)]);
        let err = c.rate_for("Travel", RateFallback::MissingKey).unwrap_err();
        assert!(matches!(err, SavingsError::MissingDefaultRate { card_id } if card_id == "card-1"));
    }

    #[test]
    fn test_negative_rate_rejected() {
        let c = card(RewardKind::Points, &[("Travel", -1.0), ("default", 1.0)]);
        let err = c.rate_for("Travel", RateFallback::MissingKey).unwrap_err();
        assert!(matches!(err, SavingsError::InvalidRate { category, .. } if category == "Travel"));
    }

    #[test]
    fn test_points_conversion() {
        // 200 * 5 = 1000 points -> $10
        let savings = RewardKind::Points.savings(200.0, 5.0, POINT_TO_CURRENCY_RATE);
        assert!((savings - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_cashback_conversion_ignores_point_value() {
        let savings = RewardKind::Cashback.savings(100.0, 0.05, 123.0);
        assert!((savings - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_reward_rule_wire_format() {
        let json = r#"{"type":"points","rates":{"Dining":3,"default":1}}"#;
        let rule: RewardRule = serde_json::from_str(json).unwrap();
        assert_eq!(rule.kind, RewardKind::Points);
        assert_eq!(rule.rates["Dining"], 3.0);
        assert_eq!(rule.rates["default"], 1.0);
    }

    #[test]
    fn test_record_serializes_flat_in_order() {
        let record = MonthlySavingsRecord {
            month: "Jan".into(),
            values: vec![("Travel".into(), 1.5), ("Dining".into(), 0.0)],
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"month":"Jan","Travel":1.5,"Dining":0.0}"#);
        assert_eq!(record.get("Travel"), Some(1.5));
        assert_eq!(record.get("Gas"), None);
        assert_eq!(record.total(), 1.5);
    }
}
