//! Strategic-analysis commentary attached to the dataset

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum Impact {
    High,
    Medium,
    Low,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum AdvantageCategory {
    Location,
    Competition,
    Market,
    Logistics,
}

/// One advantage of the new yard's position
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StrategicAdvantage {
    pub title: String,
    pub description: String,
    pub impact: Impact,
    pub category: AdvantageCategory,
}

impl StrategicAdvantage {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        impact: Impact,
        category: AdvantageCategory,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            impact,
            category,
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Impact::High => write!(f, "High"),
            Impact::Medium => write!(f, "Medium"),
            Impact::Low => write!(f, "Low"),
        }
    }
}

impl fmt::Display for AdvantageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdvantageCategory::Location => write!(f, "Location"),
            AdvantageCategory::Competition => write!(f, "Competition"),
            AdvantageCategory::Market => write!(f, "Market"),
            AdvantageCategory::Logistics => write!(f, "Logistics"),
        }
    }
}
