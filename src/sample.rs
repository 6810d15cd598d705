//! Built-in demo dataset: two cards and a quarter of spending.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::models::{Card, RewardKind, RewardRule, Transaction};

fn rule(kind: RewardKind, rates: &[(&str, f64)]) -> RewardRule {
    RewardRule {
        kind,
        rates: rates
            .iter()
            .map(|(category, rate)| (category.to_string(), *rate))
            .collect::<BTreeMap<_, _>>(),
    }
}

pub fn cards() -> HashMap<String, Card> {
    [
        Card {
            id: "card-1".into(),
            name: "Cash Back King".into(),
            rewards: rule(
                RewardKind::Cashback,
                &[("Groceries", 0.05), ("Gas", 0.03), ("default", 0.01)],
            ),
        },
        Card {
            id: "card-2".into(),
            name: "Travel Points Pro".into(),
            rewards: rule(
                RewardKind::Points,
                &[("Dining", 3.0), ("Travel", 5.0), ("default", 1.0)],
            ),
        },
    ]
    .into_iter()
    .map(|card| (card.id.clone(), card))
    .collect()
}

pub fn transactions() -> Vec<Transaction> {
    let rows: [(&str, (i32, u32, u32), &str, f64, &str, &str); 7] = [
        ("t1", (2025, 1, 5), "Super Foods", 85.50, "Groceries", "card-1"),
        ("t2", (2025, 1, 12), "The Great Cafe", 45.00, "Dining", "card-2"),
        ("t3", (2025, 1, 20), "Gas Station", 50.00, "Gas", "card-1"),
        ("t4", (2025, 2, 8), "Grocery Haul", 120.00, "Groceries", "card-1"),
        ("t5", (2025, 2, 15), "Airfare to Bali", 1200.00, "Travel", "card-2"),
        ("t6", (2025, 3, 10), "Fancy Dinner", 150.00, "Dining", "card-2"),
        ("t7", (2025, 3, 22), "Book Store", 35.00, "Other", "card-2"),
    ];

    rows.into_iter()
        .filter_map(|(id, (y, m, d), description, amount, category, card_id)| {
            Some(Transaction {
                id: id.into(),
                date: NaiveDate::from_ymd_opt(y, m, d)?,
                description: description.into(),
                amount,
                category: category.into(),
                card_id: card_id.into(),
            })
        })
        .collect()
}
