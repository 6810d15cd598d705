//! cc-savings - reward savings per month and category, shaped for a stacked bar chart.

pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod sample;
pub mod savings;

pub use config::{CategorySeries, ChartConfig};
pub use error::{Result, SavingsError};
pub use models::{
    Card, DEFAULT_CATEGORIES, MonthlySavingsRecord, POINT_TO_CURRENCY_RATE, RateFallback,
    RewardKind, RewardRule, Transaction,
};
pub use savings::{AggregateOptions, aggregate, aggregate_with, month_label};
