use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Audit {
    pub id: String,
    pub title: String,
    pub description: String,
    pub score: Option<f64>,
    pub score_display_mode: ScoreDisplayMode,
    pub numeric_value: Option<f64>,
    pub numeric_unit: Option<String>,
    pub display_value: Option<String>,
    pub details: Option<AuditDetails>,
    pub guidance_level: Option<u32>,
}

impl Audit {
    pub fn numeric_ms(&self) -> f64 {
        self.numeric_value.unwrap_or(0.0)
    }

    pub fn items(&self) -> &[DetailItem] {
        match &self.details {
            Some(AuditDetails::Table { items }) | Some(AuditDetails::Opportunity { items, .. }) => {
                items
            }
            _ => &[],
        }
    }

    pub fn savings_ms(&self) -> f64 {
        match &self.details {
            Some(AuditDetails::Opportunity {
                overall_savings_ms, ..
            }) => *overall_savings_ms,
            _ => 0.0,
        }
    }

    pub fn savings_bytes(&self) -> f64 {
        match &self.details {
            Some(AuditDetails::Opportunity {
                overall_savings_bytes,
                ..
            }) => *overall_savings_bytes,
            _ => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScoreDisplayMode {
    #[default]
    Binary,
    Numeric,
    Informative,
    NotApplicable,
    Manual,
    #[serde(other)]
    Unknown,
}

impl ScoreDisplayMode {
    pub fn is_scored(self) -> bool {
        !matches!(self, ScoreDisplayMode::Manual | ScoreDisplayMode::NotApplicable)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AuditDetails {
    Table {
        #[serde(default)]
        items: Vec<DetailItem>,
    },
    Opportunity {
        #[serde(default)]
        items: Vec<DetailItem>,
        #[serde(default, rename = "overallSavingsMs")]
        overall_savings_ms: f64,
        #[serde(default, rename = "overallSavingsBytes")]
        overall_savings_bytes: f64,
    },
    List {
        #[serde(default)]
        items: Vec<serde_json::Value>,
    },
    Node {
        #[serde(default)]
        selector: Option<String>,
        #[serde(default, rename = "nodeLabel")]
        node_label: Option<String>,
        #[serde(default)]
        snippet: Option<String>,
    },
    Filmstrip {
        #[serde(default)]
        items: Vec<serde_json::Value>,
    },
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DetailItem {
    pub url: Option<String>,
    pub wasted_bytes: Option<f64>,
    pub wasted_ms: Option<f64>,
    pub total_bytes: Option<f64>,
    pub node: Option<serde_json::Value>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl DetailItem {
    pub fn extra_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(|v| v.as_str())
    }
}
