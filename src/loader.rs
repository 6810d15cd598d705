//! Reads transactions and cards from JSON.
//!
//! Transactions come in with camelCase keys and `YYYY-MM-DD` date strings;
//! dates are parsed here so the aggregator only ever sees calendar dates.

use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{Result, SavingsError};
use crate::models::{Card, Transaction};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionRecord {
    id: String,
    date: String,
    #[serde(default)]
    description: String,
    amount: f64,
    category: String,
    card_id: String,
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = SavingsError;

    fn try_from(record: TransactionRecord) -> Result<Self> {
        let date = NaiveDate::parse_from_str(record.date.trim(), "%Y-%m-%d").map_err(|_| {
            SavingsError::InvalidDate {
                transaction_id: record.id.clone(),
                value: record.date.clone(),
            }
        })?;
        Ok(Transaction {
            id: record.id,
            date,
            description: record.description,
            amount: record.amount,
            category: record.category,
            card_id: record.card_id,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CardCatalog {
    ById(HashMap<String, Card>),
    List(Vec<Card>),
}

pub fn parse_transactions(json: &str) -> Result<Vec<Transaction>> {
    let records: Vec<TransactionRecord> = serde_json::from_str(json)?;
    records.into_iter().map(Transaction::try_from).collect()
}

/// Accepts either `{"card-1": {...}}` or `[{"id": "card-1", ...}]`.
pub fn parse_cards(json: &str) -> Result<HashMap<String, Card>> {
    let catalog = match serde_json::from_str::<CardCatalog>(json)? {
        CardCatalog::ById(cards) => cards,
        CardCatalog::List(cards) => cards
            .into_iter()
            .map(|card| (card.id.clone(), card))
            .collect(),
    };
    Ok(catalog)
}

pub fn load_transactions(path: &Path) -> Result<Vec<Transaction>> {
    let content = std::fs::read_to_string(path)?;
    parse_transactions(&content)
}

pub fn load_cards(path: &Path) -> Result<HashMap<String, Card>> {
    let content = std::fs::read_to_string(path)?;
    parse_cards(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RewardKind;

    #[test]
    fn test_parse_transactions() {
        let json = r#"[
            {"id": "t1", "date": "2025-01-05", "description": "Super Foods",
             "amount": 85.5, "category": "Groceries", "cardId": "card-1"}
        ]"#;
        let txns = parse_transactions(json).unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].date, NaiveDate::from_ymd_opt(2025, 1, 5).unwrap());
        assert_eq!(txns[0].card_id, "card-1");
        assert_eq!(txns[0].description, "Super Foods");
    }

    #[test]
    fn test_description_optional() {
        let json = r#"[{"id": "t1", "date": "2025-01-05", "amount": 1,
                        "category": "Gas", "cardId": "c"}]"#;
        let txns = parse_transactions(json).unwrap();
        assert!(txns[0].description.is_empty());
    }

    #[test]
    fn test_invalid_date_names_transaction() {
        let json = r#"[
            {"id": "ok", "date": "2025-01-05", "amount": 1, "category": "Gas", "cardId": "c"},
            {"id": "bad", "date": "2025-13-40", "amount": 1, "category": "Gas", "cardId": "c"}
        ]"#;
        let err = parse_transactions(json).unwrap_err();
        match err {
            SavingsError::InvalidDate {
                transaction_id,
                value,
            } => {
                assert_eq!(transaction_id, "bad");
                assert_eq!(value, "2025-13-40");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_cards_keyed_object() {
        let json = r#"{
            "card-1": {"id": "card-1", "name": "Cash Back King",
                       "rewards": {"type": "cashback", "rates": {"Groceries": 0.05, "default": 0.01}}}
        }"#;
        let cards = parse_cards(json).unwrap();
        assert_eq!(cards["card-1"].rewards.kind, RewardKind::Cashback);
    }

    #[test]
    fn test_parse_cards_list() {
        let json = r#"[
            {"id": "card-2", "rewards": {"type": "points", "rates": {"default": 1}}}
        ]"#;
        let cards = parse_cards(json).unwrap();
        assert_eq!(cards.len(), 1);
        assert!(cards["card-2"].name.is_empty());
    }

    #[test]
    fn test_parse_cards_unknown_reward_type() {
        let json = r#"[{"id": "x", "rewards": {"type": "miles", "rates": {"default": 1}}}]"#;
        assert!(matches!(parse_cards(json), Err(SavingsError::Json(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_cards(Path::new("/nonexistent/cards.json")).unwrap_err();
        assert!(matches!(err, SavingsError::Io(_)));
    }
}
