use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::Audit;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LighthouseReport {
    pub requested_url: Option<String>,
    pub final_url: Option<String>,
    pub lighthouse_version: Option<String>,
    pub fetch_time: Option<String>,
    pub categories: BTreeMap<String, Category>,
    pub audits: BTreeMap<String, Audit>,
}

impl LighthouseReport {
    pub fn url(&self) -> Option<&str> {
        self.requested_url.as_deref().or(self.final_url.as_deref())
    }

    pub fn audit(&self, id: &str) -> Option<&Audit> {
        self.audits.get(id)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.get(id)
    }

    pub fn ordered_category_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = crate::core::CATEGORY_ORDER
            .iter()
            .copied()
            .filter(|id| self.categories.contains_key(*id))
            .collect();
        for id in self.categories.keys() {
            if !crate::core::CATEGORY_ORDER.contains(&id.as_str()) {
                ids.push(id);
            }
        }
        ids
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Category {
    pub id: Option<String>,
    pub title: String,
    pub score: Option<f64>,
    pub audit_refs: Vec<AuditRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditRef {
    pub id: String,
}
