use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SavingsError};
use crate::models::{DEFAULT_CATEGORIES, POINT_TO_CURRENCY_RATE, RateFallback};
use crate::savings::AggregateOptions;

const DEFAULT_COLORS: &[&str] = &["#4CAF50", "#FF9800", "#2196F3", "#F44336", "#9E9E9E"];

/// A tracked category and its legend color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySeries {
    pub name: String,
    pub color: String,
}

/// Shared by the aggregator (category list) and chart renderers (colors).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_categories")]
    pub categories: Vec<CategorySeries>,
    #[serde(default = "default_point_value")]
    pub point_value: f64,
    #[serde(default)]
    pub rate_fallback: RateFallback,
}

fn default_categories() -> Vec<CategorySeries> {
    DEFAULT_CATEGORIES
        .iter()
        .zip(DEFAULT_COLORS)
        .map(|(name, color)| CategorySeries {
            name: name.to_string(),
            color: color.to_string(),
        })
        .collect()
}

fn default_point_value() -> f64 {
    POINT_TO_CURRENCY_RATE
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            point_value: default_point_value(),
            rate_fallback: RateFallback::default(),
        }
    }
}

impl ChartConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ChartConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, format!("{json}\n"))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.categories.is_empty() {
            return Err(SavingsError::Config("no categories configured".into()));
        }
        let mut seen = HashSet::new();
        for series in &self.categories {
            if !seen.insert(series.name.as_str()) {
                return Err(SavingsError::Config(format!(
                    "duplicate category '{}'",
                    series.name
                )));
            }
        }
        if !self.point_value.is_finite() || self.point_value < 0.0 {
            return Err(SavingsError::Config(format!(
                "point_value must be finite and >= 0, got {}",
                self.point_value
            )));
        }
        Ok(())
    }

    pub fn tracked_categories(&self) -> Vec<String> {
        self.categories.iter().map(|s| s.name.clone()).collect()
    }

    pub fn options(&self) -> AggregateOptions {
        AggregateOptions {
            point_value: self.point_value,
            rate_fallback: self.rate_fallback,
        }
    }
}
